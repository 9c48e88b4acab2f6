/// Loosely typed wire values. Both providers send ids as strings on some
/// endpoints and numbers on others, and ESPN scores come as a number, a
/// string, or a `{value, displayValue}` object depending on the sport.
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum FlexId {
    Number(i64),
    Text(String),
}

impl FlexId {
    /// `None` for blank strings.
    pub fn value(&self) -> Option<String> {
        match self {
            FlexId::Number(n) => Some(n.to_string()),
            FlexId::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_owned())
            }
        }
    }
}

impl fmt::Display for FlexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlexId::Number(n) => write!(f, "{n}"),
            FlexId::Text(s) => f.write_str(s.trim()),
        }
    }
}

/// Convenience for `Option<FlexId>` fields.
pub fn id_of(id: Option<&FlexId>) -> Option<String> {
    id.and_then(FlexId::value)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FlexScore {
    Number(f64),
    Text(String),
    Detailed {
        value: Option<f64>,
        #[serde(rename = "displayValue")]
        display_value: Option<String>,
    },
}

impl FlexScore {
    /// Numeric value; text scores like `"2 (4)"` read their leading number.
    pub fn numeric(&self) -> Option<f64> {
        match self {
            FlexScore::Number(n) => Some(*n),
            FlexScore::Text(s) => leading_number(s),
            FlexScore::Detailed {
                value,
                display_value,
            } => value.or_else(|| display_value.as_deref().and_then(leading_number)),
        }
        .filter(|n| n.is_finite())
    }

    pub fn display(&self) -> Option<String> {
        match self {
            FlexScore::Text(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
            FlexScore::Detailed {
                display_value: Some(d),
                ..
            } if !d.trim().is_empty() => Some(d.trim().to_owned()),
            _ => self.numeric().map(format_number),
        }
    }
}

fn leading_number(s: &str) -> Option<f64> {
    s.split_whitespace().next()?.parse().ok()
}

/// `3.0` prints as `3`, `6.5` as `6.5`.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// `deserialize_with` for nested record arrays: elements that don't fit are
/// logged and dropped instead of failing the parent record. Anything other
/// than an array reads as `None`.
pub fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Some(Value::Array(items)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let decoded = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("skipping malformed nested record: {e}");
                None
            }
        })
        .collect();
    Ok(Some(decoded))
}
