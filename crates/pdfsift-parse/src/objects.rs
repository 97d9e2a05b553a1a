//! Small lopdf object helpers shared by the font and interpreter layers.

use crate::error::BackendError;

/// Follow an indirect reference to its object; non-references pass through.
pub(crate) fn resolve_ref<'a>(
    doc: &'a lopdf::Document,
    obj: &'a lopdf::Object,
) -> &'a lopdf::Object {
    match obj {
        lopdf::Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

pub(crate) fn object_to_f64(obj: &lopdf::Object) -> Option<f64> {
    match obj {
        lopdf::Object::Integer(i) => Some(*i as f64),
        lopdf::Object::Real(f) => Some(*f as f64),
        _ => None,
    }
}

pub(crate) fn object_to_i64(obj: &lopdf::Object) -> Option<i64> {
    match obj {
        lopdf::Object::Integer(i) => Some(*i),
        lopdf::Object::Real(f) => Some(*f as i64),
        _ => None,
    }
}

pub(crate) fn name_to_string(obj: &lopdf::Object) -> Option<String> {
    match obj {
        lopdf::Object::Name(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        _ => None,
    }
}

/// Decode a stream's content, decompressing only when a filter is present.
pub(crate) fn decode_stream(stream: &lopdf::Stream) -> Result<Vec<u8>, BackendError> {
    if stream.dict.get(b"Filter").is_ok() {
        stream
            .decompressed_content()
            .map_err(|e| BackendError::Parse(format!("failed to decompress stream: {e}")))
    } else {
        Ok(stream.content.clone())
    }
}

/// Resolve a dictionary entry that may be an indirect reference.
pub(crate) fn dict_get<'a>(
    doc: &'a lopdf::Document,
    dict: &'a lopdf::Dictionary,
    key: &[u8],
) -> Option<&'a lopdf::Object> {
    dict.get(key).ok().map(|obj| resolve_ref(doc, obj))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::Object;

    #[test]
    fn resolve_ref_follows_references() {
        let mut doc = lopdf::Document::with_version("1.5");
        let id = doc.add_object(Object::Integer(42));
        let reference = Object::Reference(id);
        assert_eq!(resolve_ref(&doc, &reference).as_i64().ok(), Some(42));
        let direct = Object::Integer(7);
        assert_eq!(resolve_ref(&doc, &direct).as_i64().ok(), Some(7));
    }

    #[test]
    fn numeric_conversions() {
        assert_eq!(object_to_f64(&Object::Integer(3)), Some(3.0));
        assert_eq!(object_to_f64(&Object::Real(1.5)), Some(1.5));
        assert_eq!(object_to_f64(&Object::Null), None);
        assert_eq!(object_to_i64(&Object::Real(2.9)), Some(2));
    }

    #[test]
    fn name_extraction() {
        let name = Object::Name(b"WinAnsiEncoding".to_vec());
        assert_eq!(name_to_string(&name).as_deref(), Some("WinAnsiEncoding"));
        assert_eq!(name_to_string(&Object::Integer(1)), None);
    }

    #[test]
    fn decode_stream_passes_unfiltered_content() {
        let stream = lopdf::Stream::new(lopdf::dictionary! {}, b"BT ET".to_vec());
        assert_eq!(decode_stream(&stream).unwrap(), b"BT ET");
    }
}
