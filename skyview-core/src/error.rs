use serde::Serialize;
use thiserror::Error;

/// Why a single submission ended without a view model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    NetworkFailure,
    HttpError,
    EmptyBody,
    InvalidReading,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::NetworkFailure => "network_failure",
            FailureReason::HttpError => "http_error",
            FailureReason::EmptyBody => "empty_body",
            FailureReason::InvalidReading => "invalid_reading",
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced while fetching and decoding a current-weather response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// DNS, connect, timeout or reset while talking to the weather service.
    #[error("Network failure: {message}")]
    Network { message: String },

    /// The service answered with a non-2xx status.
    #[error("Weather service responded with status {status}: {body}")]
    Http { status: u16, body: String },

    /// 2xx status but nothing usable in the body.
    #[error("Weather service returned no usable payload: {message}")]
    EmptyBody { message: String },
}

impl FetchError {
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn http<S: Into<String>>(status: u16, body: S) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    pub fn empty_body<S: Into<String>>(message: S) -> Self {
        Self::EmptyBody {
            message: message.into(),
        }
    }

    pub fn reason(&self) -> FailureReason {
        match self {
            FetchError::Network { .. } => FailureReason::NetworkFailure,
            FetchError::Http { .. } => FailureReason::HttpError,
            FetchError::EmptyBody { .. } => FailureReason::EmptyBody,
        }
    }
}

/// The single error type handed to a render sink.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{reason}: {message}")]
pub struct PresentationError {
    pub reason: FailureReason,
    pub message: String,
    /// HTTP status when `reason` is [`FailureReason::HttpError`].
    pub status: Option<u16>,
}

impl PresentationError {
    pub fn new<S: Into<String>>(reason: FailureReason, message: S) -> Self {
        Self {
            reason,
            message: message.into(),
            status: None,
        }
    }

    /// A short line suitable for showing to the person who typed the query.
    #[must_use]
    pub fn user_message(&self) -> String {
        match (self.reason, self.status) {
            (FailureReason::HttpError, Some(404)) => "City not found.".to_string(),
            (FailureReason::HttpError, Some(401)) => {
                "The weather service rejected the API key. Run `skyview configure`.".to_string()
            }
            (FailureReason::HttpError, Some(status)) => {
                format!("The weather service returned an error (HTTP {status}).")
            }
            (FailureReason::HttpError, None) => "The weather service returned an error.".to_string(),
            (FailureReason::NetworkFailure, _) => {
                "Unable to reach the weather service. Please check your internet connection."
                    .to_string()
            }
            (FailureReason::EmptyBody, _) => "The weather service sent an empty response.".to_string(),
            (FailureReason::InvalidReading, _) => {
                "The weather service sent data that could not be displayed.".to_string()
            }
        }
    }
}

impl From<FetchError> for PresentationError {
    fn from(err: FetchError) -> Self {
        let status = match &err {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        };

        Self {
            reason: err.reason(),
            message: err.to_string(),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_map_to_reasons() {
        assert_eq!(FetchError::network("reset").reason(), FailureReason::NetworkFailure);
        assert_eq!(FetchError::http(404, "nope").reason(), FailureReason::HttpError);
        assert_eq!(FetchError::empty_body("").reason(), FailureReason::EmptyBody);
    }

    #[test]
    fn http_error_keeps_status_when_collapsed() {
        let err: PresentationError = FetchError::http(404, "city not found").into();

        assert_eq!(err.reason, FailureReason::HttpError);
        assert_eq!(err.status, Some(404));
        assert!(err.message.contains("404"));
        assert_eq!(err.user_message(), "City not found.");
    }

    #[test]
    fn network_error_has_no_status() {
        let err: PresentationError = FetchError::network("dns lookup failed").into();

        assert_eq!(err.status, None);
        assert!(err.user_message().contains("internet connection"));
    }

    #[test]
    fn display_leads_with_discriminator() {
        let err = PresentationError::new(FailureReason::EmptyBody, "body was blank");
        assert_eq!(err.to_string(), "empty_body: body was blank");
    }
}
