use bencode::{Encoder, EncoderConfig};
use tormeta::{parse_from_file, MetadataError};

fn sample_document() -> Vec<u8> {
    let mut buf = Vec::new();
    let config = EncoderConfig::default();
    {
        let mut encoder = Encoder::new(&mut buf, &config);
        let mut dict = encoder.dict();
        dict.push(b"announce", "http://tracker.example/ann");
        dict.push_with_encoder(b"info", |e| {
            let mut info = e.dict();
            info.push(b"length", 64i64);
            info.push(b"name", "sample.bin");
            info.push(b"piece length", 32i64);
            info.push_with_encoder(b"pieces", |e| e.string(&[0u8; 40]));
        });
    }
    buf
}

#[test]
fn reads_and_parses_a_document_from_disk() {
    let path = std::env::temp_dir().join("tormeta-parse-from-file.torrent");
    std::fs::write(&path, sample_document()).unwrap();

    let metadata = parse_from_file(&path).unwrap();
    assert_eq!(metadata.name(), "sample.bin");
    assert_eq!(metadata.pieces_count(), 2);
    assert_eq!(metadata.files().len(), 1);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn unreadable_source_is_classified() {
    let err = parse_from_file("/definitely/not/here.torrent").unwrap_err();
    assert!(matches!(err, MetadataError::SourceUnavailable(_)));
}
