//! Lenient field deserialisers for Grocy payloads.
//!
//! Depending on version and database backend Grocy sends numbers as `3`,
//! `3.0` or `"3"`, flags as `true`, `1` or `"1"`, and dates either as
//! `2024-05-01` or `2024-05-01 12:00:00`. Every helper here accepts all of
//! those and maps `null` / `""` to `None`.

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn to_f64(value: &Value) -> Result<Option<f64>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| format!("number {n} is not representable as f64")),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| format!("invalid number '{s}'")),
        other => Err(format!("expected a number, found {other}")),
    }
}

fn to_u64(value: &Value) -> Result<Option<u64>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| format!("expected a non-negative integer id, found {n}")),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| format!("invalid id '{s}'")),
        other => Err(format!("expected an id, found {other}")),
    }
}

fn to_bool(value: &Value) -> Result<Option<bool>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(Some(false)),
            Some(1) => Ok(Some(true)),
            _ => Err(format!("expected 0 or 1, found {n}")),
        },
        Value::String(s) => match s.trim() {
            "" => Ok(None),
            "0" | "false" => Ok(Some(false)),
            "1" | "true" => Ok(Some(true)),
            other => Err(format!("invalid flag '{other}'")),
        },
        other => Err(format!("expected a flag, found {other}")),
    }
}

fn to_date(value: &Value) -> Result<Option<NaiveDate>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => {
            let s = s.trim();
            let date_part = s.get(..10).unwrap_or(s);
            NaiveDate::parse_from_str(date_part, DATE_FORMAT)
                .map(Some)
                .map_err(|_| format!("invalid date '{s}'"))
        }
        other => Err(format!("expected a date string, found {other}")),
    }
}

fn to_date_time(value: &Value) -> Result<Option<NaiveDateTime>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => {
            let s = s.trim();
            NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT)
                .or_else(|_| {
                    NaiveDate::parse_from_str(s, DATE_FORMAT)
                        .map(|date| date.and_time(chrono::NaiveTime::MIN))
                })
                .map(Some)
                .map_err(|_| format!("invalid timestamp '{s}'"))
        }
        other => Err(format!("expected a timestamp string, found {other}")),
    }
}

fn required<T>(value: Option<T>, what: &str) -> Result<T, String> {
    value.ok_or_else(|| format!("missing {what}"))
}

pub fn option_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    to_f64(&value).map_err(de::Error::custom)
}

pub fn f64_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    option_f64(deserializer).map(Option::unwrap_or_default)
}

pub fn option_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    to_u64(&value).map_err(de::Error::custom)
}

pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    to_u64(&value)
        .and_then(|id| required(id, "id"))
        .map_err(de::Error::custom)
}

pub fn option_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    to_bool(&value).map_err(de::Error::custom)
}

pub fn option_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    to_date(&value).map_err(de::Error::custom)
}

pub fn option_date_time<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    to_date_time(&value).map_err(de::Error::custom)
}

/// Accepts `null` where a list is expected.
pub fn vec_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "option_f64")]
        amount: Option<f64>,
        #[serde(default, deserialize_with = "option_bool")]
        flag: Option<bool>,
        #[serde(default, deserialize_with = "option_date")]
        date: Option<NaiveDate>,
        #[serde(default, deserialize_with = "option_date_time")]
        at: Option<NaiveDateTime>,
        #[serde(default, deserialize_with = "option_u64")]
        group: Option<u64>,
    }

    #[derive(Debug, Deserialize)]
    struct WithId {
        #[serde(deserialize_with = "id")]
        id: u64,
    }

    fn fields(value: serde_json::Value) -> Fields {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_numbers_accept_strings_and_numbers() {
        assert_eq!(fields(json!({"amount": "2.5"})).amount, Some(2.5));
        assert_eq!(fields(json!({"amount": 3})).amount, Some(3.0));
        assert_eq!(fields(json!({"amount": ""})).amount, None);
        assert_eq!(fields(json!({"amount": null})).amount, None);
        assert_eq!(fields(json!({})).amount, None);
    }

    #[test]
    fn test_flags_accept_integers_strings_and_bools() {
        assert_eq!(fields(json!({"flag": 1})).flag, Some(true));
        assert_eq!(fields(json!({"flag": "0"})).flag, Some(false));
        assert_eq!(fields(json!({"flag": true})).flag, Some(true));
        assert!(serde_json::from_value::<Fields>(json!({"flag": 7})).is_err());
    }

    #[test]
    fn test_dates_ignore_time_suffix() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1);
        assert_eq!(fields(json!({"date": "2024-05-01"})).date, expected);
        assert_eq!(fields(json!({"date": "2024-05-01 08:30:00"})).date, expected);
        assert!(serde_json::from_value::<Fields>(json!({"date": "tomorrow"})).is_err());
    }

    #[test]
    fn test_timestamps_accept_plain_dates() {
        let at = fields(json!({"at": "2024-05-01"})).at.unwrap();
        assert_eq!(at.to_string(), "2024-05-01 00:00:00");

        let at = fields(json!({"at": "2024-05-01 08:30:00"})).at.unwrap();
        assert_eq!(at.to_string(), "2024-05-01 08:30:00");
    }

    #[test]
    fn test_ids_accept_strings() {
        assert_eq!(fields(json!({"group": "4"})).group, Some(4));
        let parsed: WithId = serde_json::from_value(json!({"id": "12"})).unwrap();
        assert_eq!(parsed.id, 12);
    }

    #[test]
    fn test_required_id_rejects_null_and_negative() {
        assert!(serde_json::from_value::<WithId>(json!({"id": null})).is_err());
        assert!(serde_json::from_value::<WithId>(json!({"id": -1})).is_err());
        assert!(serde_json::from_value::<WithId>(json!({})).is_err());
    }
}
