//! JSON ⇄ YAML conversion for the panel buffer.
//!
//! The buffer carries no format hint, so detection is an ordered chain of
//! parse attempts: JSON first, then YAML. Anything that parses as JSON is
//! treated as JSON even though it would also be valid YAML.
//!
//! # Examples
//!
//! ```rust
//! use panel_core::convert::formats::convert_json_yaml;
//!
//! let outcome = convert_json_yaml("a: 1");
//! assert_eq!(outcome.buffer, "{\n  \"a\": 1\n}");
//! assert_eq!(outcome.status.message, "Converted YAML to JSON");
//! ```
use serde_json::Value;

use crate::convert::json_utils::{encode_json, encode_yaml, parse_json, parse_yaml};
use crate::status::{require_content, trim_blank, Failure, Outcome};

/// Which parser accepted the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
}

impl SourceFormat {
    fn success_message(self) -> &'static str {
        match self {
            Self::Json => "Converted JSON to YAML",
            Self::Yaml => "Converted YAML to JSON",
        }
    }
}

/// Classifies `input` by the first parser that accepts it.
pub fn detect(input: &str) -> Result<(SourceFormat, Value), Failure> {
    parse_json(input)
        .map(|value| (SourceFormat::Json, value))
        .or_else(|_| parse_yaml(input).map(|value| (SourceFormat::Yaml, value)))
        .map_err(|_| Failure::InvalidFormat)
}

/// Renders `value` in the format opposite to `source`.
pub fn render_opposite(source: SourceFormat, value: &Value) -> Result<String, Failure> {
    match source {
        SourceFormat::Json => encode_yaml(value),
        SourceFormat::Yaml => encode_json(value),
    }
    .map_err(Failure::Conversion)
}

/// Converts JSON to YAML or YAML to JSON, leaving the buffer alone on failure.
pub fn convert_json_yaml(buffer: &str) -> Outcome {
    match try_convert(buffer) {
        Ok((source, text)) => {
            tracing::debug!(?source, bytes = text.len(), "converted buffer");
            Outcome::success(text, source.success_message())
        }
        Err(failure) => Outcome::failure(buffer, failure),
    }
}

fn try_convert(buffer: &str) -> Result<(SourceFormat, String), Failure> {
    require_content(buffer)?;
    let (source, value) = detect(trim_blank(buffer))?;
    let text = render_opposite(source, &value)?;
    Ok((source, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Severity;
    use serde_json::json;

    #[test]
    fn json_object_becomes_yaml() {
        let outcome = convert_json_yaml(r#"{"a":1}"#);
        assert_eq!(outcome.buffer.trim_end(), "a: 1");
        assert_eq!(outcome.status.message, "Converted JSON to YAML");
        assert_eq!(outcome.status.severity, Severity::Success);
    }

    #[test]
    fn yaml_mapping_becomes_pretty_json() {
        let outcome = convert_json_yaml("a: 1");
        assert_eq!(outcome.buffer, "{\n  \"a\": 1\n}");
        assert_eq!(outcome.status.message, "Converted YAML to JSON");
    }

    #[test]
    fn empty_and_blank_input_is_rejected() {
        for input in ["", "   \n\t"] {
            let outcome = convert_json_yaml(input);
            assert_eq!(outcome.buffer, input);
            assert_eq!(outcome.status.message, "Input is empty");
            assert_eq!(outcome.status.severity, Severity::Error);
        }
    }

    #[test]
    fn unparseable_input_is_left_unchanged() {
        let input = "not: valid: yaml: json:";
        let outcome = convert_json_yaml(input);
        assert_eq!(outcome.buffer, input);
        assert_eq!(outcome.status.message, "Invalid JSON or YAML format");
        assert_eq!(outcome.status.severity, Severity::Error);
    }

    #[test]
    fn bare_number_is_classified_as_json() {
        let (source, value) = detect("42").unwrap();
        assert_eq!(source, SourceFormat::Json);
        assert_eq!(value, json!(42));
    }

    #[test]
    fn surrounding_whitespace_is_ignored_when_parsing() {
        let outcome = convert_json_yaml("\n  [1, 2]  \n");
        assert_eq!(outcome.status.message, "Converted JSON to YAML");
        assert_eq!(outcome.buffer, "- 1\n- 2\n");
    }

    #[test]
    fn leading_byte_order_mark_is_ignored() {
        let outcome = convert_json_yaml("\u{feff}{\"a\":1}");
        assert_eq!(outcome.status.message, "Converted JSON to YAML");
        assert_eq!(outcome.buffer, "a: 1\n");
    }

    #[test]
    fn merge_keys_are_applied_before_conversion() {
        let outcome = convert_json_yaml("base: &b\n  x: 1\nderived:\n  <<: *b\n  y: 2");
        assert_eq!(outcome.status.message, "Converted YAML to JSON");
        assert_eq!(
            parse_json(&outcome.buffer).unwrap(),
            json!({"base": {"x": 1}, "derived": {"x": 1, "y": 2}})
        );
    }

    #[test]
    fn plain_word_is_a_yaml_string() {
        let outcome = convert_json_yaml("hello");
        assert_eq!(outcome.buffer, "\"hello\"");
        assert_eq!(outcome.status.message, "Converted YAML to JSON");
    }

    #[test]
    fn json_to_yaml_to_json_keeps_value() {
        let original = r#"{"name":"Ada","tags":["x","y"],"nested":{"n":1.5,"ok":true,"none":null}}"#;
        let yaml = convert_json_yaml(original);
        assert_eq!(yaml.status.message, "Converted JSON to YAML");
        let back = convert_json_yaml(&yaml.buffer);
        assert_eq!(back.status.message, "Converted YAML to JSON");
        assert_eq!(
            parse_json(&back.buffer).unwrap(),
            parse_json(original).unwrap()
        );
    }

    #[test]
    fn multi_document_yaml_is_invalid() {
        let input = "a: 1\n---\nb: 2";
        let outcome = convert_json_yaml(input);
        assert_eq!(outcome.status.message, "Invalid JSON or YAML format");
        assert_eq!(outcome.buffer, input);
    }
}
