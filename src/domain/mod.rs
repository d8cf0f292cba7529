// Domain layer: models shared by the reconciler and the marketplace adapters,
// plus the port the sync engine drives them through.

pub mod model;
pub mod ports;
