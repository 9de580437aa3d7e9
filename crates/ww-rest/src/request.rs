//! Request construction from a session snapshot.

use serde::Serialize;

use waterwheel_auth::SessionSnapshot;
use waterwheel_client::{RequestBuilder, RequestMethod, REQUEST_FORMAT};

use crate::error::{Error, ErrorKind, Result};

/// Build a signed JSON request for `path`.
///
/// - URL is `{base}/{path}?_format=json`; `path` is not escaped.
/// - `Content-Type` and `Accept` are `application/json`.
/// - `Authorization: Basic …` and `X-CSRF-Token` come from the snapshot.
/// - GET never carries a body; `params` is ignored for GET.
/// - Other methods send `params` as a JSON object body. Anything that does
///   not serialize to a JSON object is rejected.
pub fn build_request<P>(
    snapshot: &SessionSnapshot,
    path: &str,
    method: RequestMethod,
    params: Option<&P>,
) -> Result<RequestBuilder>
where
    P: Serialize + ?Sized,
{
    let url = format!("{}/{}{}", snapshot.base_url(), path, REQUEST_FORMAT);

    let request = RequestBuilder::new(method, url)
        .header("Content-Type", "application/json")
        .header("Accept", "application/json")
        .headers(snapshot.signing_headers());

    let Some(params) = params.filter(|_| method != RequestMethod::Get) else {
        return Ok(request);
    };

    let value = serde_json::to_value(params).map_err(|e| Error {
        kind: ErrorKind::InvalidPayload(e.to_string()),
        source: Some(Box::new(e)),
    })?;
    if !value.is_object() {
        return Err(Error::new(ErrorKind::InvalidPayload(format!(
            "expected a JSON object, got {}",
            json_type_name(&value)
        ))));
    }

    Ok(request.json_value(value))
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
