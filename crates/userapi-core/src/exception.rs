//! Error type shared by handlers, routers and the application factory.

use http::StatusCode;
use thiserror::Error;

/// Errors raised while building or running the application.
#[derive(Debug, Error)]
pub enum Error {
	/// No route matched the request path
	#[error("Not found: {0}")]
	NotFound(String),

	/// A route matched the path but not the method
	#[error("Method not allowed: {0}")]
	MethodNotAllowed(String),

	/// Malformed request or response parts
	#[error("HTTP error: {0}")]
	Http(String),

	/// JSON encoding or decoding failed
	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	/// Settings could not be loaded or failed validation
	#[error("Configuration error: {0}")]
	Configuration(String),

	/// Any other fault inside a handler
	#[error("Internal error: {0}")]
	Internal(String),
}

impl Error {
	/// HTTP status code this error is reported as on the wire.
	///
	/// # Examples
	///
	/// ```
	/// use userapi_core::Error;
	/// use http::StatusCode;
	///
	/// let err = Error::NotFound("/missing/".to_string());
	/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
	/// ```
	pub fn status_code(&self) -> StatusCode {
		match self {
			Error::NotFound(_) => StatusCode::NOT_FOUND,
			Error::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
			Error::Http(_) => StatusCode::BAD_REQUEST,
			Error::Serialization(_) | Error::Configuration(_) | Error::Internal(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}
}

impl From<http::Error> for Error {
	fn from(err: http::Error) -> Self {
		Error::Http(err.to_string())
	}
}

/// Result type used throughout userapi
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(Error::NotFound("/x/".into()), StatusCode::NOT_FOUND)]
	#[case(Error::MethodNotAllowed("POST".into()), StatusCode::METHOD_NOT_ALLOWED)]
	#[case(Error::Http("bad uri".into()), StatusCode::BAD_REQUEST)]
	#[case(Error::Configuration("port".into()), StatusCode::INTERNAL_SERVER_ERROR)]
	#[case(Error::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR)]
	fn test_status_code_mapping(#[case] err: Error, #[case] expected: StatusCode) {
		assert_eq!(err.status_code(), expected);
	}

	#[rstest]
	fn test_serialization_error_converts() {
		let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
		let err: Error = json_err.into();
		assert!(matches!(err, Error::Serialization(_)));
		assert!(err.to_string().starts_with("Serialization error:"));
	}

	#[rstest]
	fn test_display_includes_detail() {
		let err = Error::NotFound("/nope/".to_string());
		assert_eq!(err.to_string(), "Not found: /nope/");
	}
}
