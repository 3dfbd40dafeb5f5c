mod error;
pub use error::MetadataError;

mod fields;

mod hash;
pub use hash::Sha1;

mod metadata;
pub use metadata::{parse, parse_from_file, TorrentFile, TorrentMetadata};
