use thiserror::Error;

/// Failure classifications for metainfo parsing.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The byte stream is not valid bencode, or its top level is not a
    /// dictionary.
    #[error("malformed metainfo document: {0}")]
    MalformedDocument(#[from] bencode::Error),

    /// A mandatory field is absent or carries the wrong value kind.
    #[error("missing required field `{0}`")]
    MissingRequiredField(&'static str),

    /// The torrent bytes could not be read from their source.
    #[error("torrent source unavailable: {0}")]
    SourceUnavailable(#[from] std::io::Error),
}
