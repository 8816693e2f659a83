use reqwest;
use serde::de::DeserializeOwned;
use std::{collections::HashMap, sync::Arc, time::Duration};
use thiserror::Error;

// Shared HTTP client instance.
lazy_static::lazy_static! {
    static ref CLIENT: Arc<reqwest::Client> = Arc::new(reqwest::Client::new());
}

// Per-request timeout so one stalled fetch cannot wedge a whole scan cycle.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Custom error type for HTTP requests.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("HTTP {1} from {0}. Response body: {2}")]
    HttpError(reqwest::Url, u16, String),
    #[error("Error deserializing JSON: {0}")]
    JsonError(String),
    #[error("Other error: {0}")]
    Other(String),
}

/// Makes a GET request to the specified path with optional query parameters
/// and deserializes the JSON response.
pub async fn get<T: DeserializeOwned>(
    path: &str,                  // Full URL of the endpoint.
    params: HashMap<&str, &str>, // Optional query parameters.
) -> Result<T, RequestError> {
    // Construct the URL.
    let url = if params.len() > 0 {
        reqwest::Url::parse_with_params(path, &params)
            .map_err(|e| RequestError::Other(e.to_string()))?
    } else {
        reqwest::Url::parse(path).map_err(|e| RequestError::Other(e.to_string()))?
    };

    let response = CLIENT
        .get(url.as_str())
        .timeout(REQUEST_TIMEOUT)
        .send()
        .await
        .map_err(|e| RequestError::Other(e.to_string()))?;

    // Get the response status code.
    let status = response.status();

    // Handle non-success status codes.
    if !status.is_success() {
        let body = response
            .text()
            .await
            .map_err(|e| RequestError::Other(e.to_string()))?;
        return Err(RequestError::HttpError(url, status.as_u16(), body));
    }

    // Deserialize the JSON response.
    response
        .json()
        .await
        .map_err(|e| RequestError::JsonError(e.to_string()))
}
