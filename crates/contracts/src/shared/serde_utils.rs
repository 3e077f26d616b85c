use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Treats an explicit JSON `null` like a missing field.
///
/// Use together with `#[serde(default)]`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Optional decimal sent either as a JSON number or as a numeric string.
///
/// Empty and unparseable strings become `None`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Amount {
        #[serde(default, deserialize_with = "lenient_f64")]
        value: Option<f64>,
    }

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "null_as_default")]
        name: String,
        #[serde(default, deserialize_with = "null_as_default")]
        count: u32,
    }

    #[test]
    fn test_null_and_missing_become_default() {
        let p: Probe = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(p.name, "");
        assert_eq!(p.count, 0);
    }

    #[test]
    fn test_present_value_kept() {
        let p: Probe = serde_json::from_str(r#"{"name": "x", "count": 3}"#).unwrap();
        assert_eq!(p.name, "x");
        assert_eq!(p.count, 3);
    }

    #[test]
    fn test_lenient_f64_forms() {
        let a: Amount = serde_json::from_str(r#"{"value": 1500000.5}"#).unwrap();
        assert_eq!(a.value, Some(1500000.5));
        let a: Amount = serde_json::from_str(r#"{"value": "2500.00"}"#).unwrap();
        assert_eq!(a.value, Some(2500.0));
        let a: Amount = serde_json::from_str(r#"{"value": ""}"#).unwrap();
        assert_eq!(a.value, None);
        let a: Amount = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert_eq!(a.value, None);
        let a: Amount = serde_json::from_str("{}").unwrap();
        assert_eq!(a.value, None);
    }
}
