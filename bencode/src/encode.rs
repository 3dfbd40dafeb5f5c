use crate::{Dict, Value};

#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Sort dictionary keys while encoding. Canonical metainfo documents
    /// require sorted keys, so this is the default.
    pub sort_dict: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self { sort_dict: true }
    }
}

#[derive(Debug)]
pub struct Encoder<'a> {
    config: &'a EncoderConfig,
    buf: &'a mut Vec<u8>,
}

impl<'a> Encoder<'a> {
    pub fn new(buf: &'a mut Vec<u8>, config: &'a EncoderConfig) -> Self {
        Self { config, buf }
    }

    pub fn integer(&mut self, value: i64) {
        self.buf.push(b'i');
        self.buf.extend_from_slice(value.to_string().as_bytes());
        self.buf.push(b'e');
    }

    pub fn string(&mut self, value: &[u8]) {
        self.buf
            .extend_from_slice(value.len().to_string().as_bytes());
        self.buf.push(b':');
        self.buf.extend_from_slice(value);
    }

    pub fn list<'e>(&'e mut self) -> ListEncoder<'e, 'a> {
        self.buf.push(b'l');
        ListEncoder { encoder: self }
    }

    pub fn dict<'e>(&'e mut self) -> DictEncoder<'e, 'a> {
        DictEncoder {
            encoder: self,
            pairs: Vec::new(),
        }
    }
}

pub struct ListEncoder<'e, 'a> {
    encoder: &'e mut Encoder<'a>,
}

impl ListEncoder<'_, '_> {
    pub fn push<T: Encode>(&mut self, value: T) {
        value.encode(self.encoder);
    }

    pub fn push_with_encoder(&mut self, f: impl FnOnce(&mut Encoder)) {
        f(self.encoder);
    }
}

impl Drop for ListEncoder<'_, '_> {
    fn drop(&mut self) {
        self.encoder.buf.push(b'e');
    }
}

/// Buffers key/value pairs and writes the whole dictionary on drop, sorted
/// by key when the config asks for canonical output.
pub struct DictEncoder<'e, 'a> {
    encoder: &'e mut Encoder<'a>,
    pairs: Vec<(Vec<u8>, Vec<u8>)>,
}

impl DictEncoder<'_, '_> {
    pub fn push<T: Encode>(&mut self, key: impl AsRef<[u8]>, value: T) {
        self.pairs
            .push((key.as_ref().to_vec(), encode_with(self.encoder.config, value)));
    }

    pub fn push_with_encoder(&mut self, key: impl AsRef<[u8]>, f: impl FnOnce(&mut Encoder)) {
        let mut buf = Vec::new();
        f(&mut Encoder::new(&mut buf, self.encoder.config));
        self.pairs.push((key.as_ref().to_vec(), buf));
    }
}

impl Drop for DictEncoder<'_, '_> {
    fn drop(&mut self) {
        if self.encoder.config.sort_dict {
            self.pairs.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        }
        self.encoder.buf.push(b'd');
        for (key, value) in &self.pairs {
            self.encoder.string(key);
            self.encoder.buf.extend_from_slice(value);
        }
        self.encoder.buf.push(b'e');
    }
}

pub trait Encode {
    fn encode(&self, encoder: &mut Encoder);
}

pub fn encode_with<T: Encode>(config: &EncoderConfig, value: T) -> Vec<u8> {
    let mut buf = Vec::new();
    value.encode(&mut Encoder::new(&mut buf, config));
    buf
}

pub fn encode<T: Encode>(value: T) -> Vec<u8> {
    encode_with(&EncoderConfig::default(), value)
}

macro_rules! impl_encode_for_integer {
    ($t:ty) => {
        impl Encode for $t {
            fn encode(&self, encoder: &mut Encoder) {
                encoder.integer(*self as i64);
            }
        }
    };
}

impl_encode_for_integer!(i8);
impl_encode_for_integer!(i16);
impl_encode_for_integer!(i32);
impl_encode_for_integer!(i64);
impl_encode_for_integer!(u8);
impl_encode_for_integer!(u16);
impl_encode_for_integer!(u32);
impl_encode_for_integer!(u64);

impl Encode for &str {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.string(self.as_bytes());
    }
}

impl Encode for String {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.string(self.as_bytes());
    }
}

impl<T: Encode> Encode for &T {
    fn encode(&self, encoder: &mut Encoder) {
        (*self).encode(encoder);
    }
}

impl<T: Encode> Encode for &[T] {
    fn encode(&self, encoder: &mut Encoder) {
        let mut list = encoder.list();
        for value in *self {
            list.push(value);
        }
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, encoder: &mut Encoder) {
        let mut list = encoder.list();
        for value in self {
            list.push(value);
        }
    }
}

/// Re-encodes a decoded [`Value`] to its byte representation.
///
/// Dictionary entries are written in their decoded order, never re-sorted, so
/// a value decoded from a document re-encodes to the exact bytes it was
/// decoded from.
pub fn encode_value(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    write_value(&mut buf, value);
    buf
}

fn write_value(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Integer(v) => {
            buf.push(b'i');
            buf.extend_from_slice(v.to_string().as_bytes());
            buf.push(b'e');
        }
        Value::Bytes(v) => write_string(buf, v),
        Value::List(values) => {
            buf.push(b'l');
            for value in values {
                write_value(buf, value);
            }
            buf.push(b'e');
        }
        Value::Dict(dict) => write_dict(buf, dict),
    }
}

fn write_dict(buf: &mut Vec<u8>, dict: &Dict) {
    buf.push(b'd');
    for (key, value) in dict.entries() {
        write_string(buf, key);
        write_value(buf, value);
    }
    buf.push(b'e');
}

fn write_string(buf: &mut Vec<u8>, value: &[u8]) {
    buf.extend_from_slice(value.len().to_string().as_bytes());
    buf.push(b':');
    buf.extend_from_slice(value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode;

    #[test]
    fn encode_integers() {
        assert_eq!(encode(0i64), b"i0e");
        assert_eq!(encode(42i64), b"i42e");
        assert_eq!(encode(-42i64), b"i-42e");
        assert_eq!(encode(i64::MAX), b"i9223372036854775807e");
    }

    #[test]
    fn encode_strings() {
        assert_eq!(encode("spam"), b"4:spam");
        assert_eq!(encode(""), b"0:");
        assert_eq!(encode("hello:world"), b"11:hello:world");
    }

    #[test]
    fn encode_lists() {
        assert_eq!(encode(Vec::<i64>::new()), b"le");
        assert_eq!(encode(vec![1i64, 2, 3]), b"li1ei2ei3ee");
        assert_eq!(encode(vec!["spam", "eggs"]), b"l4:spam4:eggse");
    }

    #[test]
    fn encode_dicts_sorted_by_default() {
        let mut buf = Vec::new();
        let config = EncoderConfig::default();
        {
            let mut encoder = Encoder::new(&mut buf, &config);
            let mut dict = encoder.dict();
            dict.push(b"z", 1i64);
            dict.push(b"a", 2i64);
            dict.push(b"m", 3i64);
        }
        assert_eq!(buf, b"d1:ai2e1:mi3e1:zi1ee");
    }

    #[test]
    fn encode_dicts_unsorted_when_disabled() {
        let mut buf = Vec::new();
        let config = EncoderConfig { sort_dict: false };
        {
            let mut encoder = Encoder::new(&mut buf, &config);
            let mut dict = encoder.dict();
            dict.push(b"z", 1i64);
            dict.push(b"a", 2i64);
        }
        assert_eq!(buf, b"d1:zi1e1:ai2ee");
    }

    #[test]
    fn encode_nested_structures() {
        let mut buf = Vec::new();
        let config = EncoderConfig::default();
        {
            let mut encoder = Encoder::new(&mut buf, &config);
            let mut dict = encoder.dict();
            dict.push(b"int", 42i64);
            dict.push_with_encoder(b"dict", |e| {
                let mut inner = e.dict();
                inner.push(b"x", "y");
            });
            dict.push_with_encoder(b"raw", |e| e.string(b"\x00\x01"));
        }
        assert_eq!(buf, b"d4:dictd1:x1:ye3:inti42e3:raw2:\x00\x01e");
    }

    #[test]
    fn encode_value_round_trips_decoded_documents() {
        // Keys deliberately out of sorted order; the round trip must keep
        // the original order, not canonicalize it.
        let documents: &[&[u8]] = &[
            b"i42e",
            b"4:spam",
            b"l4:spami7ee",
            b"d1:zi1e1:ai2e4:listl1:xee",
            b"d4:infod4:name3:foo6:lengthi12eee",
        ];
        for document in documents {
            let value = decode(document).unwrap();
            assert_eq!(encode_value(&value), *document);
        }
    }
}
