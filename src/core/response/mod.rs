use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::feed::fetcher::FetchError;
use super::feed::types::{ErrorBody, Feed, Root};

/// The four ways a conversion fails. Each one has a fixed client message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Fetch,
    UpstreamStatus,
    BodyRead,
    Decode,
}

impl FailureKind {
    pub fn message(self) -> &'static str {
        match self {
            FailureKind::Fetch => "Sorry Charlie, Trix are for kids!",
            FailureKind::UpstreamStatus => "Stay Frosty!",
            FailureKind::BodyRead => "Game Over Man, GAME OVER!",
            FailureKind::Decode => "Hey Vasquez, have you ever been mistaken for a man?",
        }
    }

    /// Prefix for the server-side log line.
    pub fn log_context(self) -> &'static str {
        match self {
            FailureKind::Fetch => "Error on Feed Retrieval",
            FailureKind::UpstreamStatus => "HTTP Status code other than 200 received",
            FailureKind::BodyRead => "Error on Reading Request",
            FailureKind::Decode => "Error on XML Parse",
        }
    }

    pub fn status(self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    pub fn to_error_body(self) -> ErrorBody {
        ErrorBody {
            code: self.status().as_u16(),
            message: self.message().to_string(),
        }
    }
}

impl From<&FetchError> for FailureKind {
    fn from(error: &FetchError) -> Self {
        match error {
            FetchError::Request(_) => FailureKind::Fetch,
            FetchError::HttpStatus(_) => FailureKind::UpstreamStatus,
            FetchError::Body(_) => FailureKind::BodyRead,
        }
    }
}

/// Outcome of one conversion.
///
/// `FailedThenConverted` is the decode failure path: the error object is
/// written first and a feed built from an empty channel follows it in the same
/// body, under the error's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedResponse {
    Failed(FailureKind),
    Converted(Feed),
    FailedThenConverted(FailureKind, Feed),
}

impl FeedResponse {
    pub fn status(&self) -> StatusCode {
        match self {
            FeedResponse::Failed(kind) | FeedResponse::FailedThenConverted(kind, _) => kind.status(),
            FeedResponse::Converted(_) => StatusCode::OK,
        }
    }

    /// Wire body: a bare error object, a `Root`-wrapped feed, or both in that
    /// order. Every document ends with a newline.
    pub fn to_body(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut body = Vec::new();
        match self {
            FeedResponse::Failed(kind) => {
                write_json_line(&mut body, &kind.to_error_body())?;
            }
            FeedResponse::Converted(feed) => {
                write_json_line(&mut body, &Root::from_feed(feed.clone()))?;
            }
            FeedResponse::FailedThenConverted(kind, feed) => {
                write_json_line(&mut body, &kind.to_error_body())?;
                write_json_line(&mut body, &Root::from_feed(feed.clone()))?;
            }
        }
        Ok(body)
    }
}

fn write_json_line<T: Serialize>(body: &mut Vec<u8>, value: &T) -> Result<(), serde_json::Error> {
    serde_json::to_writer(&mut *body, value)?;
    body.push(b'\n');
    Ok(())
}

impl IntoResponse for FeedResponse {
    fn into_response(self) -> Response {
        let status = self.status();
        match self.to_body() {
            Ok(body) => (
                status,
                [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
                body,
            )
                .into_response(),
            Err(error) => {
                tracing::error!("failed to encode response: {}", error);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
