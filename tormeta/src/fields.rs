use bencode::{Dict, Value};
use tracing::info;

/// Typed projection out of a bencode value. A kind mismatch yields `None`,
/// never an error; whether that is fatal is decided by the caller.
pub(crate) trait FieldValue<'v>: Sized {
    fn project(value: &'v Value<'v>) -> Option<Self>;
}

impl<'v> FieldValue<'v> for i64 {
    fn project(value: &'v Value<'v>) -> Option<Self> {
        value.as_integer()
    }
}

impl<'v> FieldValue<'v> for u64 {
    fn project(value: &'v Value<'v>) -> Option<Self> {
        value.as_integer().and_then(|n| u64::try_from(n).ok())
    }
}

impl<'v> FieldValue<'v> for &'v str {
    fn project(value: &'v Value<'v>) -> Option<Self> {
        value.as_str()
    }
}

impl<'v> FieldValue<'v> for &'v [u8] {
    fn project(value: &'v Value<'v>) -> Option<Self> {
        value.as_bytes()
    }
}

impl<'v> FieldValue<'v> for &'v [Value<'v>] {
    fn project(value: &'v Value<'v>) -> Option<Self> {
        value.as_list()
    }
}

impl<'v> FieldValue<'v> for &'v Dict<'v> {
    fn project(value: &'v Value<'v>) -> Option<Self> {
        value.as_dict()
    }
}

/// Looks up `key` in `dict` and attempts the typed projection. Absence and
/// kind mismatch both produce `None` and an info event.
pub(crate) fn optional<'v, T: FieldValue<'v>>(dict: &'v Dict<'v>, key: &'static str) -> Option<T> {
    let projected = dict.get(key.as_bytes()).and_then(T::project);
    if projected.is_none() {
        info!("torrent document has no usable `{key}` attribute");
    }
    projected
}
