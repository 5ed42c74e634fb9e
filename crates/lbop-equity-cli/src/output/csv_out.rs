use serde_json::Value;
use std::io;

use super::{flatten, format_scalar, result_body};

/// Write output as CSV to stdout.
///
/// A result holding a single list (a rate card, say) is written as that
/// list; anything else as two-column `field,value` rows with dotted keys.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match result_body(value) {
        Value::Object(map) => {
            let flat = flatten(map);
            if flat.fields.is_empty() && flat.tables.len() == 1 {
                write_rows(&mut wtr, flat.tables[0].1);
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in &flat.fields {
                    let _ = wtr.write_record([key.as_str(), &format_scalar(val)]);
                }
                for (name, rows) in &flat.tables {
                    for (i, row) in rows.iter().enumerate() {
                        let _ = wtr.write_record([
                            format!("{name}[{i}]").as_str(),
                            &format_scalar(row),
                        ]);
                    }
                }
            }
        }
        Value::Array(arr) => write_rows(&mut wtr, arr),
        other => {
            let _ = wtr.write_record([format_scalar(other)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);
    for row in rows.iter().filter_map(Value::as_object) {
        let record: Vec<String> = headers
            .iter()
            .map(|h| row.get(*h).map(format_scalar).unwrap_or_default())
            .collect();
        let _ = wtr.write_record(&record);
    }
}
