use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load {source_name}: {reason}")]
    Load { source_name: String, reason: String },

    #[error("Missing column '{column}' in {location}")]
    MissingColumn { column: String, location: String },

    #[error("Missing feature '{feature}' for record {record}")]
    MissingFeature { feature: String, record: String },

    #[error("Invalid value for feature '{feature}' of record {record}: {reason}")]
    InvalidFeature {
        feature: String,
        record: String,
        reason: String,
    },

    #[error("Classifier has not been loaded")]
    ModelNotLoaded,

    #[error("Feature schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Classifier returned an invalid probability {probability} for record {record}")]
    InvalidProbability { probability: f64, record: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    pub fn load(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Load {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
