//! JSON document for a die table.
//!
//! ```json
//! { "die": "d6",
//!   "rows": [{"low": "1", "high": "1", "result": "a"}, ...],
//!   "error": {"mean": "0.123457", "mean_exact": "10/81", ...},
//!   "dropped": [] }
//! ```
//! Object keys are inserted in the order shown; canonical writers may sort them.

use dt_core::Ratio;
use dt_pipeline::DieTable;
use serde_json::{json, Map, Value};

/// Fractional digits for the decimal form of error metrics.
pub const ERROR_PLACES: u32 = 6;

pub fn render_json(table: &DieTable) -> Value {
    let rows: Vec<Value> = table
        .rows
        .iter()
        .map(|r| json!({ "low": r.low, "high": r.high, "result": r.result }))
        .collect();

    let mut error = Map::new();
    metric(&mut error, "mean", &table.error.mean_relative_error);
    metric(&mut error, "highest", &table.error.highest_relative_error);
    metric(&mut error, "mse", &table.error.mean_squared_error);

    json!({
        "die": table.die,
        "rows": rows,
        "error": Value::Object(error),
        "dropped": table.dropped,
    })
}

fn metric(map: &mut Map<String, Value>, key: &str, value: &Ratio) {
    map.insert(key.to_string(), Value::String(value.to_decimal_string(ERROR_PLACES)));
    map.insert(format!("{key}_exact"), Value::String(value.to_string()));
}
