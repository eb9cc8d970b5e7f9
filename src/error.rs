use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("{key}='{value}' is not a valid http(s) url: {reason}")]
    InvalidUrl {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Failures of a single relayed chat call. None of them are retried.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("inference server answered with status {0}")]
    UpstreamStatus(reqwest::StatusCode),

    #[error("inference server did not answer in time")]
    UpstreamTimeout,

    #[error("inference server is unreachable: {0}")]
    UpstreamUnreachable(#[source] reqwest::Error),

    #[error("inference server returned an unexpected body: {0}")]
    MalformedUpstreamResponse(String),
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RelayError::UpstreamTimeout
        } else if err.is_decode() {
            RelayError::MalformedUpstreamResponse(err.to_string())
        } else {
            RelayError::UpstreamUnreachable(err)
        }
    }
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}
