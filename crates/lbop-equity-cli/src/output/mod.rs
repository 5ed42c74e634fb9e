pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value, true),
        OutputFormat::Compact => json::print_json(value, false),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` body of a computation envelope, or the value itself.
pub(crate) fn result_body(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Scalar fields of a result keyed by dotted path, plus any arrays of
/// objects found along the way (fee lines, rate-card points, statement lines).
pub(crate) struct Flattened<'a> {
    pub fields: Vec<(String, &'a Value)>,
    pub tables: Vec<(String, &'a [Value])>,
}

pub(crate) fn flatten(map: &Map<String, Value>) -> Flattened<'_> {
    let mut out = Flattened {
        fields: Vec::new(),
        tables: Vec::new(),
    };
    flatten_into(map, "", &mut out);
    out
}

fn flatten_into<'a>(map: &'a Map<String, Value>, prefix: &str, out: &mut Flattened<'a>) {
    for (key, val) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => flatten_into(inner, &path, out),
            Value::Array(items) if items.iter().all(Value::is_object) && !items.is_empty() => {
                out.tables.push((path, items.as_slice()));
            }
            _ => out.fields.push((path, val)),
        }
    }
}

pub(crate) fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(format_scalar).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
