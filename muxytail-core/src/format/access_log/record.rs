use serde::{Deserialize, Deserializer};

/// One JSON access log entry, as written by Caddy.
///
/// Every field is optional and `null` reads as absent; a bare `{}` decodes to
/// all zero values. Decoding fails only on malformed JSON, a non-object
/// document, or a field of the wrong type.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AccessLogRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub request: RequestRecord,
    /// Any integer; only the 2xx and 4xx-and-up ranges are colored specially.
    #[serde(deserialize_with = "null_as_default")]
    pub status: i64,
    /// Unix epoch seconds, fractional allowed.
    #[serde(deserialize_with = "null_as_default")]
    pub ts: f64,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RequestRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub remote_ip: String,
    #[serde(deserialize_with = "null_as_default")]
    pub method: String,
    #[serde(deserialize_with = "null_as_default")]
    pub proto: String,
    #[serde(deserialize_with = "null_as_default")]
    pub host: String,
    #[serde(deserialize_with = "null_as_default")]
    pub uri: String,
    #[serde(deserialize_with = "null_as_default")]
    pub headers: RequestHeaders,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RequestHeaders {
    #[serde(rename = "Referer")]
    pub referer: HeaderValues,

    #[serde(rename = "User-Agent")]
    pub user_agent: HeaderValues,
}

/// A header logged either as a single value or as every value received.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum HeaderValues {
    #[default]
    Missing,
    One(String),
    Many(Vec<String>),
}

impl HeaderValues {
    pub fn as_slice(&self) -> &[String] {
        match self {
            HeaderValues::Missing => &[],
            HeaderValues::One(value) => std::slice::from_ref(value),
            HeaderValues::Many(values) => values,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl AccessLogRecord {
    /// Strictly decodes `line` as a JSON object.
    pub fn decode(line: &str) -> Result<Self, serde_json::Error> {
        if !line.trim_start().starts_with('{') {
            return Err(serde::de::Error::custom("not a JSON object"));
        }
        serde_json::from_str(line)
    }

    /// `host` followed by `uri`, e.g. `example.com/index.html`.
    pub fn url(&self) -> String {
        format!("{}{}", self.request.host, self.request.uri)
    }
}
