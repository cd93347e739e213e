//! Raw request body decoding.
//!
//! Handlers read the body as bytes so empty and undecodable payloads can be
//! reported with distinct messages before any field validation runs.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::Error;

/// Decode a JSON request body.
///
/// Empty or whitespace-only bodies yield [`Error::empty_body`]. Anything other
/// than a JSON object, or an object with mismatched types, yields
/// [`Error::malformed_body`]. Unknown fields are ignored by the target types.
///
/// # Examples
/// ```
/// use backend::domain::ErrorCode;
/// use backend::inbound::http::body::decode_json;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Body {
///     text: String,
/// }
///
/// let body: Body = decode_json(br#"{"text":"hi"}"#).expect("valid JSON");
/// assert_eq!(body.text, "hi");
///
/// let err = decode_json::<Body>(b"  ").err().expect("empty body");
/// assert_eq!(err.code(), ErrorCode::EmptyBody);
/// ```
pub fn decode_json<T>(bytes: &[u8]) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        debug!("request body is empty");
        return Err(Error::empty_body());
    }
    let object: Map<String, Value> = serde_json::from_slice(bytes).map_err(malformed)?;
    serde_json::from_value(Value::Object(object)).map_err(malformed)
}

fn malformed(err: serde_json::Error) -> Error {
    debug!(error = %err, "request body failed to decode");
    Error::malformed_body()
}
