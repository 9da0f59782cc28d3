use serde_json::Value;
use std::io;

use super::flatten;

/// Write the result as two-column `field,value` CSV to stdout.
pub fn print_csv(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in flatten(result) {
        let _ = wtr.write_record([key, val]);
    }
    let _ = wtr.flush();
}
