// text encoders
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::config::EncodingConfig;
use crate::core::error::EncodingError;

mod value;

/// Minified JSON.
pub fn encode_compact<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, EncodingError> {
    Ok(serde_json::to_vec(value)?)
}

/// JSON indented by four spaces.
pub fn encode_pretty<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, EncodingError> {
    encode_pretty_with(value, &EncodingConfig::default())
}

pub fn encode_pretty_with<T: Serialize + ?Sized>(
    value: &T,
    config: &EncodingConfig,
) -> Result<Vec<u8>, EncodingError> {
    let indent = " ".repeat(config.indent);
    let mut ser =
        serde_json::Serializer::with_formatter(Vec::new(), PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut ser)?;
    Ok(ser.into_inner())
}

/// TOON text, going through the JSON data model first.
pub fn encode_toon<T: Serialize + ?Sized>(value: &T) -> Result<String, EncodingError> {
    let json = serde_json::to_value(value)?;
    toon_format::encode_default(&json).map_err(|e| EncodingError::Toon(Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::Value;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct User {
        name: String,
        tags: Vec<String>,
    }

    fn user() -> User {
        User { name: "Alice".into(), tags: vec!["admin".into()] }
    }

    #[test]
    fn compact_has_no_whitespace() {
        let out = encode_compact(&user()).unwrap();
        assert_eq!(out, br#"{"name":"Alice","tags":["admin"]}"#);
    }

    #[test]
    fn pretty_uses_four_spaces() {
        let m = BTreeMap::from([("a", 1)]);
        let out = encode_pretty(&m).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n    \"a\": 1\n}");
    }

    #[test]
    fn pretty_indent_is_configurable() {
        let m = BTreeMap::from([("a", 1)]);
        let out = encode_pretty_with(&m, &EncodingConfig { indent: 2 }).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn serializer_errors_surface_as_encoding_errors() {
        let f = Value::func(|_| Value::Int(0));
        assert!(matches!(encode_compact(&f), Err(EncodingError::Json(_))));
        assert!(matches!(encode_pretty(&f), Err(EncodingError::Json(_))));
        assert!(matches!(encode_toon(&f), Err(EncodingError::Json(_))));
    }

    #[test]
    fn toon_errors_keep_their_source() {
        use std::error::Error as _;

        let inner = std::io::Error::other("bad shape");
        let err = EncodingError::Toon(Box::new(inner));
        assert_eq!(err.to_string(), "toon encoding failed: bad shape");
        assert_eq!(err.source().unwrap().to_string(), "bad shape");
    }

    #[test]
    fn toon_output_carries_fields() {
        let out = encode_toon(&user()).unwrap();
        assert!(out.contains("name"));
        assert!(out.contains("Alice"));
    }
}
