// serde view of dynamic values
use serde::ser::{self, Serialize, SerializeMap, Serializer};

use crate::core::value::Value;

//mapping keys render as text so any object-keyed format can take them
fn canonical_key<E: ser::Error>(key: &Value) -> Result<String, E> {
    match key {
        Value::Str(s) => Ok(s.clone()),
        Value::Int(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(E::custom(format!("unsupported map key type `{}`", other.type_desc()))),
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Seq(seq) => serializer.collect_seq(seq.items()),
            Value::Map(map) => {
                let mut entries = map
                    .iter()
                    .map(|(k, v)| canonical_key::<S::Error>(k).map(|k| (k, v)))
                    .collect::<Result<Vec<_>, S::Error>>()?;
                //sorted keys keep the output canonical
                entries.sort_by(|a, b| a.0.cmp(&b.0));

                let mut out = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    out.serialize_entry(&k, v)?;
                }
                out.end()
            }
            Value::Ref(slot) => match slot.visit(|v| v.serialize(serializer)) {
                Some(out) => out,
                None => Err(<S::Error as ser::Error>::custom("unsupported value: reference cycle")),
            },
            Value::Func(_) => Err(<S::Error as ser::Error>::custom("unsupported value shape: fn")),
        }
    }
}
