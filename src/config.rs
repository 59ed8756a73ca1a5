// caller-tunable knobs
use serde::{Deserialize, Serialize};

/// What a dynamic `append_uniq` leaves behind when an element fails its check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppendPolicy {
    /// Check every element first; on failure the destination is untouched.
    #[default]
    Atomic,
    /// Check while appending; elements before the failing one stay appended.
    Partial,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    /// Spaces per nesting level for pretty output.
    pub indent: usize,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self { indent: 4 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(AppendPolicy::default(), AppendPolicy::Atomic);
        assert_eq!(EncodingConfig::default().indent, 4);
    }

    #[test]
    fn loads_from_partial_json() {
        let cfg: EncodingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, EncodingConfig::default());

        let cfg: EncodingConfig = serde_json::from_str(r#"{"indent": 2}"#).unwrap();
        assert_eq!(cfg.indent, 2);

        let policy: AppendPolicy = serde_json::from_str(r#""partial""#).unwrap();
        assert_eq!(policy, AppendPolicy::Partial);
    }
}
