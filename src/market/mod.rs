pub mod ozon;
pub mod yandex;

pub use ozon::OzonClient;
pub use yandex::YandexClient;

use crate::domain::model::OfferId;
use std::collections::HashSet;

/// Drop repeated ids, keeping the first occurrence's position.
pub(crate) fn dedup_offer_ids(ids: Vec<OfferId>) -> Vec<OfferId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
