use serde_json::Value;

use super::{flatten, format_scalar, result_body};

/// Headline figure per command, in priority order.
const PRIORITY_KEYS: [&str; 5] = [
    "payout.client_payout",
    "client_payout",
    "participation_pct",
    "total_fees",
    "title",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let body = result_body(value);

    if let Value::Object(map) = body {
        let flat = flatten(map);
        for key in PRIORITY_KEYS {
            if let Some((_, val)) = flat.fields.iter().find(|(k, v)| k == key && !v.is_null()) {
                println!("{}", format_scalar(val));
                return;
            }
        }

        if let Some((key, val)) = flat.fields.first() {
            println!("{}: {}", key, format_scalar(val));
            return;
        }
    }

    println!("{}", format_scalar(body));
}
