//! Failure descriptors and the protocol response they convert into.
//!
//! A [`Failure`] describes a non-success handler outcome as data: a status
//! code, an optional message, and (for the error-shaped variants) the
//! originating error as diagnostic payload. Failures are returned, never
//! raised. At the web boundary each failure converts 1:1 into a
//! [`Response`].

use crate::error::{HandlerError, HandlerResult};
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::Serialize;

/// Boxed error payload attached to error-shaped failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Non-success handler outcome descriptor.
///
/// The variant set is closed: handler call sites branch over it
/// exhaustively. All variants share the status-code/message shape; the two
/// error variants additionally carry the originating error.
///
/// # Examples
///
/// ```
/// use http::StatusCode;
/// use request_handler::Failure;
///
/// let failure = Failure::bad_request(Some("missing field".to_string()));
/// assert_eq!(failure.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(failure.message(), Some("missing field"));
/// ```
#[derive(Debug)]
pub enum Failure {
	/// Plain status outcome. [`Failure::default`] is status 200 with no
	/// message.
	Status {
		/// Response status code.
		status: StatusCode,
		/// Optional status message.
		message: Option<String>,
	},

	/// The caller is not allowed to perform the operation (403).
	Forbidden {
		/// Optional status message.
		message: Option<String>,
	},

	/// The request was malformed or invalid (400).
	BadRequest {
		/// Optional status message.
		message: Option<String>,
	},

	/// An error translated into a client failure (400). The originating
	/// error stays attached as diagnostic payload; it is not re-raised.
	Error {
		/// The originating error.
		source: BoxError,
		/// Optional status message.
		message: Option<String>,
	},

	/// An unexpected error surfaced to the caller as-is (500) instead of
	/// being translated into a client failure.
	ErrorPassthrough {
		/// The originating error.
		source: BoxError,
		/// Optional status message.
		message: Option<String>,
	},
}

impl Failure {
	/// Plain status failure.
	pub fn status(status: StatusCode, message: Option<String>) -> Self {
		Self::Status { status, message }
	}

	/// Forbidden (403) failure.
	pub fn forbidden(message: Option<String>) -> Self {
		Self::Forbidden { message }
	}

	/// Bad-request (400) failure.
	pub fn bad_request(message: Option<String>) -> Self {
		Self::BadRequest { message }
	}

	/// Error failure (400) carrying the originating error.
	pub fn error(source: impl Into<BoxError>, message: Option<String>) -> Self {
		Self::Error {
			source: source.into(),
			message,
		}
	}

	/// Passthrough failure (500) carrying the originating error.
	pub fn error_passthrough(source: impl Into<BoxError>, message: Option<String>) -> Self {
		Self::ErrorPassthrough {
			source: source.into(),
			message,
		}
	}

	/// The status code this failure converts into.
	///
	/// # Examples
	///
	/// ```
	/// use http::StatusCode;
	/// use request_handler::Failure;
	///
	/// assert_eq!(Failure::forbidden(None).status_code(), StatusCode::FORBIDDEN);
	/// assert_eq!(Failure::default().status_code(), StatusCode::OK);
	/// ```
	pub fn status_code(&self) -> StatusCode {
		match self {
			Self::Status { status, .. } => *status,
			Self::Forbidden { .. } => StatusCode::FORBIDDEN,
			Self::BadRequest { .. } | Self::Error { .. } => StatusCode::BAD_REQUEST,
			Self::ErrorPassthrough { .. } => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// The status message, when one was supplied.
	pub fn message(&self) -> Option<&str> {
		match self {
			Self::Status { message, .. }
			| Self::Forbidden { message }
			| Self::BadRequest { message }
			| Self::Error { message, .. }
			| Self::ErrorPassthrough { message, .. } => message.as_deref(),
		}
	}

	/// The originating error, for the error-shaped variants.
	pub fn source(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
		match self {
			Self::Error { source, .. } | Self::ErrorPassthrough { source, .. } => {
				Some(source.as_ref())
			}
			_ => None,
		}
	}

	/// Converts the failure into a protocol response.
	///
	/// The status comes from [`status_code`](Self::status_code); a message,
	/// when present, becomes a JSON `{"error": ...}` body.
	///
	/// # Examples
	///
	/// ```
	/// use http::StatusCode;
	/// use request_handler::Failure;
	///
	/// let response = Failure::bad_request(Some("bad".to_string())).into_response();
	/// assert_eq!(response.status, StatusCode::BAD_REQUEST);
	/// assert_eq!(response.body, r#"{"error":"bad"}"#.as_bytes());
	/// ```
	pub fn into_response(self) -> Response {
		let status = self.status_code();
		match self.message() {
			Some(message) => {
				let body = serde_json::json!({ "error": message });
				Response::new(status)
					.with_json(&body)
					.unwrap_or_else(|_| Response::new(status))
			}
			None => Response::new(status),
		}
	}
}

impl Default for Failure {
	fn default() -> Self {
		Self::Status {
			status: StatusCode::OK,
			message: None,
		}
	}
}

impl From<Failure> for Response {
	fn from(failure: Failure) -> Self {
		failure.into_response()
	}
}

/// Protocol response: a status code plus an optional body.
///
/// This is the thin "status code + optional body" shape the surrounding web
/// layer consumes; it carries no routing or middleware concerns.
pub struct Response {
	/// Response status code.
	pub status: StatusCode,
	/// Response headers.
	pub headers: HeaderMap,
	/// Response body; empty when the response is status-only.
	pub body: Bytes,
}

impl Response {
	/// Creates a status-only response.
	///
	/// # Examples
	///
	/// ```
	/// use http::StatusCode;
	/// use request_handler::Response;
	///
	/// let response = Response::new(StatusCode::OK);
	/// assert_eq!(response.status, StatusCode::OK);
	/// assert!(response.body.is_empty());
	/// ```
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	/// HTTP 200 OK response.
	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	/// HTTP 400 Bad Request response.
	pub fn bad_request() -> Self {
		Self::new(StatusCode::BAD_REQUEST)
	}

	/// HTTP 403 Forbidden response.
	pub fn forbidden() -> Self {
		Self::new(StatusCode::FORBIDDEN)
	}

	/// HTTP 500 Internal Server Error response.
	pub fn internal_server_error() -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR)
	}

	/// Sets the response body.
	///
	/// # Examples
	///
	/// ```
	/// use bytes::Bytes;
	/// use request_handler::Response;
	///
	/// let response = Response::ok().with_body("hello");
	/// assert_eq!(response.body, Bytes::from("hello"));
	/// ```
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Sets the body to the JSON encoding of `data` and the matching
	/// `Content-Type` header.
	///
	/// # Examples
	///
	/// ```
	/// use request_handler::Response;
	/// use serde_json::json;
	///
	/// let data = json!({"message": "created"});
	/// let response = Response::ok().with_json(&data).unwrap();
	/// assert_eq!(
	/// 	response.headers.get("content-type").unwrap(),
	/// 	"application/json"
	/// );
	/// ```
	pub fn with_json<T: Serialize>(mut self, data: &T) -> HandlerResult<Self> {
		let json = serde_json::to_vec(data)
			.map_err(|e| HandlerError::Serialization(e.to_string()))?;
		self.body = Bytes::from(json);
		self.headers.insert(
			http::header::CONTENT_TYPE,
			http::header::HeaderValue::from_static("application/json"),
		);
		Ok(self)
	}
}
