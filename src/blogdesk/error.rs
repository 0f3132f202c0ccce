use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlogError {
    /// A write to the backing store failed. `action` is the user-facing label
    /// (e.g. "Failed to save blog"); the backend failure is kept as the source.
    #[error("{action}")]
    StorageWrite {
        action: String,
        #[source]
        source: Box<BlogError>,
    },

    #[error("Cannot delete the active theme")]
    ActiveThemeDeletion,

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Api(String),
}

impl BlogError {
    pub fn write_failed(verb: &str, label: &str, source: BlogError) -> Self {
        BlogError::StorageWrite {
            action: format!("Failed to {} {}", verb, label),
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, BlogError>;
