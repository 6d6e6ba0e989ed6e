use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("unexpected status code: {0}")]
    HttpStatus(u16),
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

/// Issues a single GET for `url`. Anything but a `200 OK` is an error, and
/// there is no retry. Returns the raw body.
pub async fn fetch_feed(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, FetchError> {
    let response = client.get(url).send().await.map_err(FetchError::Request)?;
    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let body = response.bytes().await.map_err(FetchError::Body)?;
    Ok(body.to_vec())
}
