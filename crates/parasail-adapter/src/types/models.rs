/*
[INPUT]:  Parasail API schema definitions and serde requirements
[OUTPUT]: Typed node statistics with lenient numeric decoding
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Node statistics as reported by `GET /v1/node/node_stats`.
///
/// Re-fetched on every stats cycle and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeStats {
    #[serde(default, deserialize_with = "serde_helpers::deserialize_bool_or_false")]
    pub has_node: bool,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_string_or_empty")]
    pub node_address: String,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub points: Decimal,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub pending_rewards: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_distributed: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_checkin_time: Option<i64>,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_count_or_zero")]
    pub card_count: u64,
}

impl NodeStats {
    /// Last check-in as a UTC timestamp, if the server reported one.
    pub fn last_checkin_at(&self) -> Option<DateTime<Utc>> {
        self.last_checkin_time
            .filter(|secs| *secs > 0)
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

mod serde_helpers {
    use super::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;
    use std::str::FromStr;

    fn decimal_from_value<E: serde::de::Error>(value: Value) -> Result<Option<Decimal>, E> {
        match value {
            Value::Null => Ok(None),
            Value::String(raw) if raw.trim().is_empty() => Ok(None),
            Value::String(raw) => Decimal::from_str(raw.trim()).map(Some).map_err(E::custom),
            Value::Number(number) => Decimal::from_str(&number.to_string())
                .or_else(|_| Decimal::from_scientific(&number.to_string()))
                .map(Some)
                .map_err(E::custom),
            _ => Err(E::custom("invalid decimal value")),
        }
    }

    pub fn deserialize_decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(decimal_from_value::<D::Error>(value)?.unwrap_or(Decimal::ZERO))
    }

    pub fn deserialize_decimal_option<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        decimal_from_value::<D::Error>(value)
    }

    pub fn deserialize_string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<String> = Option::deserialize(deserializer)?;
        Ok(value.unwrap_or_default())
    }

    pub fn deserialize_bool_or_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<bool> = Option::deserialize(deserializer)?;
        Ok(value.unwrap_or_default())
    }

    pub fn deserialize_count_or_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(0),
            Value::Number(number) => number
                .as_u64()
                .ok_or_else(|| serde::de::Error::custom("card count must be a non-negative integer")),
            Value::String(raw) if raw.trim().is_empty() => Ok(0),
            Value::String(raw) => raw.trim().parse().map_err(serde::de::Error::custom),
            _ => Err(serde::de::Error::custom("invalid card count")),
        }
    }

    pub fn serialize_decimal<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }
}
