use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{flatten, format_scalar, result_body};

/// Format output as tables using the tabled crate: one Field/Value table
/// for scalar results, one table per list (fee lines, statement lines, ...).
pub fn print_table(value: &Value) {
    match result_body(value) {
        Value::Object(map) => {
            let flat = flatten(map);
            if !flat.fields.is_empty() {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                for (key, val) in &flat.fields {
                    builder.push_record([key.as_str(), &format_scalar(val)]);
                }
                println!("{}", Table::from(builder));
            }
            for (name, rows) in &flat.tables {
                println!("\n{}:", name);
                print_rows(rows);
            }
        }
        Value::Array(arr) => print_rows(arr),
        other => println!("{}", format_scalar(other)),
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        println!("(empty)");
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for row in rows.iter().filter_map(Value::as_object) {
        builder.push_record(
            headers
                .iter()
                .map(|h| row.get(h.as_str()).map(format_scalar).unwrap_or_default()),
        );
    }
    println!("{}", Table::from(builder));
}
