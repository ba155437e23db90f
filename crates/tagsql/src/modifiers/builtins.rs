use super::{AttrModifier, OpInfo};
use crate::dialect::Driver;
use crate::error::{OrmError, OrmResult};
use crate::value::Value;
use chrono::Utc;

/// Serializes the attribute as JSON on write and parses it back on scan.
pub const JSON: &str = "json";
/// Stamps the current UTC time on every write.
pub const TIME_NOW_UTC: &str = "timeNowUTC";
/// Stamps the current UTC time on insert; the field is left out of updates.
pub const TIME_NOW_UTC_SKIP_UPDATES: &str = "timeNowUTC/skipUpdates";
/// Leaves the field out of updates.
pub const SKIP_UPDATES: &str = "skipUpdates";
/// Leaves the field out of inserts.
pub const SKIP_INSERTS: &str = "skipInserts";

pub(super) fn all() -> [(&'static str, AttrModifier); 5] {
    [
        (JSON, json()),
        (TIME_NOW_UTC, time_now_utc()),
        (TIME_NOW_UTC_SKIP_UPDATES, time_now_utc().skip_on_update()),
        (SKIP_UPDATES, AttrModifier::new().skip_on_update()),
        (SKIP_INSERTS, AttrModifier::new().skip_on_insert()),
    ]
}

fn json() -> AttrModifier {
    AttrModifier::new()
        .with_value(json_value)
        .with_scan(json_scan)
}

// Postgres binds JSON natively; SQL Server wants text; the rest get bytes.
fn json_value(op: &OpInfo, value: Value) -> OrmResult<Value> {
    let doc = value.to_json();
    match op.driver.parse::<Driver>() {
        Ok(Driver::Postgres) => Ok(Value::Json(doc)),
        Ok(Driver::Sqlserver) => Ok(Value::Text(serde_json::to_string(&doc)?)),
        _ => Ok(Value::Bytes(serde_json::to_vec(&doc)?)),
    }
}

fn json_scan(_op: &OpInfo, value: Value) -> OrmResult<Value> {
    match value {
        Value::Null | Value::Json(_) => Ok(value),
        Value::Text(s) => Ok(Value::Json(serde_json::from_str(&s)?)),
        Value::Bytes(b) => Ok(Value::Json(serde_json::from_slice(&b)?)),
        other => Err(OrmError::modifier(
            JSON,
            format!("cannot decode JSON from {other:?}"),
        )),
    }
}

fn time_now_utc() -> AttrModifier {
    AttrModifier::new().with_value(|_, _| Ok(Value::Timestamp(Utc::now())))
}
