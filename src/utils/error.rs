use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("connection failed: {0}")]
    Connection(#[source] reqwest::Error),

    #[error("API request failed: {0}")]
    Api(#[source] reqwest::Error),

    #[error("zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("sheet parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing environment variable {name}")]
    MissingEnv { name: String },

    #[error("invalid value for {field}: {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("supply archive contains no files")]
    EmptyArchive,

    #[error("column {label:?} not found in supply sheet")]
    MissingColumn { label: String },

    #[error("unparseable quantity {value:?}")]
    Quantity { value: String },

    #[error("unparseable price {value:?}")]
    Price { value: String },
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SyncError::Timeout(err)
        } else if err.is_connect() {
            SyncError::Connection(err)
        } else {
            SyncError::Api(err)
        }
    }
}

impl SyncError {
    /// Process exit code reported for this error kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            SyncError::Timeout(_) => 2,
            SyncError::Connection(_) => 3,
            SyncError::MissingEnv { .. } | SyncError::InvalidConfigValue { .. } => 4,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
