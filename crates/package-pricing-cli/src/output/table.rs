use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::flatten;

/// Format output as a two-column table of flattened fields.
pub fn print_table(value: &Value) {
    let envelope = value.as_object();
    let result = envelope.and_then(|m| m.get("result")).unwrap_or(value);

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in flatten(result) {
        builder.push_record([key, val]);
    }
    println!("{}", Table::from(builder));

    let Some(envelope) = envelope else {
        return;
    };

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
