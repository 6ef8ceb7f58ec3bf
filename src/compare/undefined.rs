// Serde adapter for statistics that may be undefined
//
// Empty summaries and shifts with an empty side carry NaN. JSON has no NaN,
// so these fields are written as `null` and read back from `null` as NaN.
// Use with `#[serde(with = "crate::compare::undefined")]`.

use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_none()
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}
