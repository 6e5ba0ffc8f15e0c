use serde::de::DeserializeOwned;

use crate::route::api_error::ApiError;

/// Parses a JSON body. An empty body reads as `{}`.
pub(crate) fn parse_json_body<T>(body: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body).map_err(|e| ApiError::InvalidInput(format!("Invalid JSON body: {e}")))
}
