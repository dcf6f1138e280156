// JSON/YAML parse and encode helpers shared by the panel converters.
use serde_json::{Map, Number, Value};

/// Parses JSON text into a `serde_json::Value`, returning the parser message on failure.
///
/// # Example
/// ```
/// use panel_core::convert::json_utils::parse_json;
/// let value = parse_json("{\"id\":1}")?;
/// assert_eq!(value["id"], 1);
/// # Ok::<(), String>(())
/// ```
pub fn parse_json(input: &str) -> Result<Value, String> {
    serde_json::from_str(input).map_err(|err| err.to_string())
}

/// Parses a single YAML document, resolves `<<` merge keys and normalizes the
/// result into the JSON data model.
///
/// # Example
/// ```
/// use panel_core::convert::json_utils::parse_yaml;
/// let value = parse_yaml("name: Ada\ntags: [a, b]")?;
/// assert_eq!(value["tags"][1], "b");
/// # Ok::<(), String>(())
/// ```
pub fn parse_yaml(input: &str) -> Result<Value, String> {
    let mut doc: serde_yaml::Value =
        serde_yaml::from_str(input).map_err(|err| err.to_string())?;
    doc.apply_merge().map_err(|err| err.to_string())?;
    Ok(yaml_to_json(doc))
}

/// Pretty-prints JSON with a two-space indent and no trailing newline.
///
/// # Example
/// ```
/// use serde_json::json;
/// use panel_core::convert::json_utils::encode_json;
/// let text = encode_json(&json!({"a":1}))?;
/// assert_eq!(text, "{\n  \"a\": 1\n}");
/// # Ok::<(), String>(())
/// ```
pub fn encode_json(value: &Value) -> Result<String, String> {
    let serialized = serde_json::to_string_pretty(value).map_err(|err| err.to_string())?;
    Ok(serialized.trim_end().to_string())
}

/// Emits YAML block style with a two-space indent. Output ends with a newline.
pub fn encode_yaml(value: &Value) -> Result<String, String> {
    serde_yaml::to_string(value).map_err(|err| err.to_string())
}

/// Converts a `serde_yaml::Value` into JSON.
///
/// Tags are dropped in favor of the tagged value, non-finite floats become
/// `null`, and scalar mapping keys are rendered the way they were written.
pub fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(num) => yaml_number(&num),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(seq) => {
            Value::Array(seq.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(map) => {
            let mut obj = Map::with_capacity(map.len());
            for (k, v) in map {
                obj.insert(yaml_key(k), yaml_to_json(v));
            }
            Value::Object(obj)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_number(num: &serde_yaml::Number) -> Value {
    if let Some(i) = num.as_i64() {
        Value::Number(Number::from(i))
    } else if let Some(u) = num.as_u64() {
        Value::Number(Number::from(u))
    } else {
        num.as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Null => "null".into(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(num) => num.to_string(),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        // Complex keys have no JSON spelling; fall back to their compact JSON text.
        other => yaml_to_json(other).to_string(),
    }
}
