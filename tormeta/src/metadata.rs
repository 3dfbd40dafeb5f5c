use std::path::Path;

use bencode::{Dict, Value};
use bytes::Bytes;
use tracing::debug;

use crate::{
    error::MetadataError,
    fields::{optional, FieldValue},
    Sha1,
};

/// A single file described by a torrent document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentFile {
    path: Vec<String>,
    length: u64,
}

impl TorrentFile {
    /// Path segments relative to the torrent root. The last segment is the
    /// file name, preceding segments are ancestor directories in top-down
    /// order. Never empty.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    /// Segments joined with `/`, no leading or trailing separator.
    pub fn path_string(&self) -> String {
        self.path.join("/")
    }
}

/// Validated, immutable metadata of a torrent document.
///
/// Constructed in one pass by [`parse`]; no partially-populated record is
/// ever observable.
#[derive(Debug, Clone)]
pub struct TorrentMetadata {
    name: String,
    piece_length: u64,
    pieces_hashes: Bytes,
    info_hash: Sha1,
    creation_date: Option<i64>,
    comment: Option<String>,
    created_by: Option<String>,
    main_announce: Option<String>,
    announce_list: Vec<String>,
    files: Vec<TorrentFile>,
}

impl TorrentMetadata {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Byte size of each piece except possibly the last.
    pub fn piece_length(&self) -> u64 {
        self.piece_length
    }

    pub fn pieces_count(&self) -> u64 {
        (self.pieces_hashes.len() / 20) as u64
    }

    /// Concatenation of the 20-byte piece digests as they appeared in the
    /// document.
    pub fn pieces_hashes(&self) -> &[u8] {
        &self.pieces_hashes
    }

    /// The digest of piece `index`, or `None` past the last full digest.
    pub fn piece_hash(&self, index: u64) -> Option<Sha1> {
        let start = usize::try_from(index.checked_mul(20)?).ok()?;
        let digest = self.pieces_hashes.get(start..start + 20)?;
        <[u8; 20]>::try_from(digest).ok().map(Sha1::from)
    }

    /// SHA-1 of the canonical encoding of the info dictionary.
    pub fn info_hash(&self) -> Sha1 {
        self.info_hash
    }

    /// Creation time as a unix timestamp; `None` when the document carries
    /// none.
    pub fn creation_date(&self) -> Option<i64> {
        self.creation_date
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn created_by(&self) -> Option<&str> {
        self.created_by.as_deref()
    }

    pub fn main_announce(&self) -> Option<&str> {
        self.main_announce.as_deref()
    }

    /// Tracker URLs from `announce-list`, flattened across tiers in document
    /// order. Empty when the field is absent or not a list.
    pub fn announce_list(&self) -> &[String] {
        &self.announce_list
    }

    pub fn files(&self) -> &[TorrentFile] {
        &self.files
    }

    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|file| file.length).sum()
    }
}

/// Parses and validates a bencoded metainfo document.
pub fn parse(buf: &[u8]) -> Result<TorrentMetadata, MetadataError> {
    let document = bencode::decode(buf)?;
    let root = document.as_dict().ok_or_else(|| {
        MetadataError::MalformedDocument(bencode::Error::message(
            "top level value is not a dictionary",
        ))
    })?;

    let info_value = root
        .get(b"info")
        .ok_or(MetadataError::MissingRequiredField("info"))?;
    let info = info_value
        .as_dict()
        .ok_or(MetadataError::MissingRequiredField("info"))?;

    let pieces_hashes: &[u8] = require(info, "pieces")?;
    let piece_length: u64 = require(info, "piece length")?;
    let name: &str = require(info, "name")?;

    // The hash must cover the info dictionary exactly as it appeared in the
    // document, so the re-encode keeps the decoded entry order.
    let info_hash = Sha1::hash(&bencode::encode_value(info_value));

    let creation_date: Option<i64> = optional(root, "creation date");
    let comment: Option<&str> = optional(root, "comment");
    let created_by: Option<&str> = optional(root, "created by");
    let main_announce: Option<&str> = optional(root, "announce");
    let announce_list = flatten_announce_list(root);
    let files = resolve_files(info)?;

    debug!(
        name,
        pieces = pieces_hashes.len() / 20,
        files = files.len(),
        "parsed torrent metadata"
    );

    Ok(TorrentMetadata {
        name: name.to_owned(),
        piece_length,
        pieces_hashes: Bytes::copy_from_slice(pieces_hashes),
        info_hash,
        creation_date,
        comment: comment.map(str::to_owned),
        created_by: created_by.map(str::to_owned),
        main_announce: main_announce.map(str::to_owned),
        announce_list,
        files,
    })
}

/// Reads a torrent document from `path` and parses it.
pub fn parse_from_file(path: impl AsRef<Path>) -> Result<TorrentMetadata, MetadataError> {
    let buf = std::fs::read(path)?;
    parse(&buf)
}

fn require<'v, T: FieldValue<'v>>(
    dict: &'v Dict<'v>,
    key: &'static str,
) -> Result<T, MetadataError> {
    optional(dict, key).ok_or(MetadataError::MissingRequiredField(key))
}

/// Flattens the tiered `announce-list` into a single URL sequence. Outer
/// elements that are not lists and inner elements that are not text are
/// skipped.
fn flatten_announce_list(root: &Dict) -> Vec<String> {
    let tiers: &[Value] = match optional(root, "announce-list") {
        Some(tiers) => tiers,
        None => return Vec::new(),
    };

    let mut urls = Vec::new();
    for tier in tiers {
        let Some(entries) = tier.as_list() else {
            continue;
        };
        for entry in entries {
            if let Some(url) = entry.as_str() {
                urls.push(url.to_owned());
            }
        }
    }
    urls
}

/// Normalizes the two file-declaration forms into one entry list.
///
/// A document is multi-file when `files` is present and is a list, even an
/// empty one; anything else selects the single-file form, which reads
/// `length` and `name` directly from the info dictionary. A missing or
/// mistyped required sub-field fails the whole resolution; no partial list
/// is ever returned.
fn resolve_files(info: &Dict) -> Result<Vec<TorrentFile>, MetadataError> {
    let entries: &[Value] = match optional(info, "files") {
        Some(entries) => entries,
        None => {
            let length: u64 = require(info, "length")?;
            let name: &str = require(info, "name")?;
            return Ok(vec![TorrentFile {
                path: vec![name.to_owned()],
                length,
            }]);
        }
    };

    let mut files = Vec::with_capacity(entries.len());
    for entry in entries {
        let dict = entry
            .as_dict()
            .ok_or(MetadataError::MissingRequiredField("files"))?;
        let length: u64 = require(dict, "length")?;
        let segments: &[Value] = require(dict, "path")?;
        let mut path = Vec::with_capacity(segments.len());
        for segment in segments {
            let segment = segment
                .as_str()
                .ok_or(MetadataError::MissingRequiredField("path"))?;
            path.push(segment.to_owned());
        }
        if path.is_empty() {
            return Err(MetadataError::MissingRequiredField("path"));
        }
        files.push(TorrentFile { path, length });
    }
    Ok(files)
}
