use serde_json::Value;

use super::format_value;

/// Print just the key answer from the output.
///
/// Looks for well-known result paths in priority order, then falls back to
/// the first field of the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // quote, bronze, gold, platinum, silver
    let priority_paths = [
        "recommendation.package",
        "chosen.total",
        "gold.total",
        "breakdown.total",
        "total",
    ];

    for path in &priority_paths {
        if let Some(val) = lookup_path(result_obj, path) {
            if !val.is_null() {
                println!("{}", format_value(val));
                return;
            }
        }
    }

    if let Some((key, val)) = result_obj.as_object().and_then(|m| m.iter().next()) {
        println!("{}: {}", key, format_value(val));
        return;
    }

    println!("{}", format_value(result_obj));
}

fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |v, key| v.get(key))
}
