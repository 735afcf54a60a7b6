//! Body encoding helpers shared by requests and responses.
//!
//! Bodies travel through the chain as raw [`Bytes`]. The helpers here turn
//! typed values into bytes on the way out and back on the way in, and
//! [`ContentType`] names the media types they produce.

use std::str::FromStr;

use bytes::Bytes;

use crate::{Error, Result};

/// Media types the body helpers know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ContentType {
    /// `application/json`.
    #[display("application/json")]
    Json,
    /// `application/x-www-form-urlencoded`.
    #[display("application/x-www-form-urlencoded")]
    FormUrlEncoded,
    /// `text/plain`.
    #[display("text/plain")]
    PlainText,
    /// `application/octet-stream`.
    #[display("application/octet-stream")]
    OctetStream,
}

impl ContentType {
    /// MIME type without parameters.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
            Self::PlainText => "text/plain",
            Self::OctetStream => "application/octet-stream",
        }
    }

    /// Reads a `Content-Type` header value.
    ///
    /// Parameters such as `charset` are ignored, the comparison is
    /// case-insensitive, and `+json` suffixes (`application/problem+json`)
    /// count as JSON. Unknown media types yield `None`.
    #[must_use]
    pub fn from_header(value: &str) -> Option<Self> {
        let essence = value.split(';').next().unwrap_or_default().trim();
        [Self::Json, Self::FormUrlEncoded, Self::PlainText, Self::OctetStream]
            .into_iter()
            .find(|known| known.as_str().eq_ignore_ascii_case(essence))
            .or_else(|| {
                let (kind, subtype) = essence.split_once('/')?;
                (kind.eq_ignore_ascii_case("application")
                    && subtype.to_ascii_lowercase().ends_with("+json"))
                .then_some(Self::Json)
            })
    }
}

impl FromStr for ContentType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Self::from_header(value)
            .ok_or_else(|| Error::invalid_request(format!("unsupported content type: {value}")))
    }
}

/// Encodes `value` as a JSON body.
///
/// # Errors
///
/// Returns [`Error::Json`] if the value cannot be represented as JSON.
///
/// # Example
///
/// ```
/// use plug_core::to_json;
///
/// let bytes = to_json(&serde_json::json!({ "id": 7 }))?;
/// assert_eq!(bytes.as_ref(), br#"{"id":7}"#);
/// # Ok::<(), plug_core::Error>(())
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    Ok(Bytes::from(serde_json::to_vec(value)?))
}

/// Encodes `value` as an `application/x-www-form-urlencoded` body.
///
/// Sequences become repeated keys (`tag=a&tag=b`).
///
/// # Errors
///
/// Returns [`Error::FormSerialization`] for values that are not flat
/// key/value structures.
pub fn to_form<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    Ok(Bytes::from(serde_html_form::to_string(value)?))
}

/// Decodes a JSON body.
///
/// Failures are reported as [`Error::JsonDeserialization`] with the path to
/// the offending field, e.g. `items[2].price`.
///
/// # Errors
///
/// Returns an error if `bytes` is not JSON of the expected shape.
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|err| Error::json_deserialization(err.path().to_string(), err.inner().to_string()))
}
