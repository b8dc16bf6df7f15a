use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::ErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("field {field} has malformed value: {value}")]
    MalformedField { field: &'static str, value: String },

    #[error("field {field} must not be negative: {value}")]
    NegativeValue { field: &'static str, value: String },

    #[error("field {field} is not a DD.MM.YYYY HH:MM:SS date: {value}")]
    InvalidDate { field: &'static str, value: String },

    #[error("response contains unknown message id: {id}")]
    UnknownMessageId { id: u64 },
}

/// Outcome of decoding a vendor reply that parsed cleanly.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<T> {
    Accepted(T),
    Rejected(VendorRejection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorRejection {
    pub code: ErrorCode,
    pub message: Option<String>,
}

/// Integer that SMSC.ru sends either as a JSON number or as a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TransportInt {
    Int(i64),
    String(String),
}

impl TransportInt {
    pub fn into_i64(self, field: &'static str) -> Result<i64, TransportError> {
        match self {
            Self::Int(value) => Ok(value),
            Self::String(value) => value
                .trim()
                .parse::<i64>()
                .map_err(|_| TransportError::MalformedField { field, value }),
        }
    }

    pub fn into_i32(self, field: &'static str) -> Result<i32, TransportError> {
        let value = self.into_i64(field)?;
        i32::try_from(value).map_err(|_| TransportError::MalformedField {
            field,
            value: value.to_string(),
        })
    }

    pub fn into_u32(self, field: &'static str) -> Result<u32, TransportError> {
        let value = self.into_i64(field)?;
        if value < 0 {
            return Err(TransportError::NegativeValue {
                field,
                value: value.to_string(),
            });
        }
        u32::try_from(value).map_err(|_| TransportError::MalformedField {
            field,
            value: value.to_string(),
        })
    }

    pub fn into_u64(self, field: &'static str) -> Result<u64, TransportError> {
        let value = self.into_i64(field)?;
        u64::try_from(value).map_err(|_| TransportError::NegativeValue {
            field,
            value: value.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ErrorJsonFields {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_code: Option<TransportInt>,
}

/// Parameters shared by every request: JSON replies (`fmt=3`) in UTF-8.
pub fn push_format(params: &mut Vec<(String, String)>) {
    params.push(("fmt".to_owned(), "3".to_owned()));
    params.push(("charset".to_owned(), "utf-8".to_owned()));
}

/// Look for the vendor's error indicator on a top-level JSON object.
///
/// An empty `error` together with a zero or missing `error_code` is not an error.
pub fn detect_rejection(json: &str) -> Result<Option<VendorRejection>, TransportError> {
    if !json.trim_start().starts_with('{') {
        return Ok(None);
    }

    let fields: ErrorJsonFields = serde_json::from_str(json)?;
    let code = match fields.error_code {
        Some(code) => code.into_i32("error_code")?,
        None => 0,
    };
    let message = fields.error.filter(|text| !text.trim().is_empty());
    if code == 0 && message.is_none() {
        return Ok(None);
    }

    Ok(Some(VendorRejection {
        code: ErrorCode::new(code),
        message,
    }))
}

/// Decode a single-object reply: rejection first, then the typed payload.
pub fn decode_reply<R, T>(
    json: &str,
    map: impl FnOnce(R) -> Result<T, TransportError>,
) -> Result<Decoded<T>, TransportError>
where
    R: DeserializeOwned,
{
    if let Some(rejection) = detect_rejection(json)? {
        return Ok(Decoded::Rejected(rejection));
    }
    let parsed: R = serde_json::from_str(json)?;
    map(parsed).map(Decoded::Accepted)
}
