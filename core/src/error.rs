//! Error types for the console client core.
//!
//! # Design
//! The backend reports status on two layers: the HTTP status and the `code`
//! field of the response envelope. A 2xx response can still carry an
//! application failure, so `Application` is kept apart from `Http`. Only
//! application failures carry a message meant for the user; everything else
//! collapses to a generic retry prompt in `user_message`.

use thiserror::Error;
use validator::ValidationErrors;

/// Shown for transport-level and malformed-response failures.
pub const RETRY_MESSAGE: &str = "Network error, please try again later";

/// Errors produced while building requests or parsing responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A draft failed client-side validation. No request was built.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// The request never produced a response (unreachable host, timeout).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The envelope arrived but its `code` is not the success sentinel.
    #[error("application error {code}: {message}")]
    Application { code: i64, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// The text a view should show for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Application { message, .. } => message.clone(),
            ApiError::Validation(errors) => validation_summary(errors),
            ApiError::Transport(_)
            | ApiError::Http { .. }
            | ApiError::Deserialization(_)
            | ApiError::Serialization(_) => RETRY_MESSAGE.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}

/// Key under which struct-level checks report.
const WHOLE_RECORD: &str = "__all__";

fn validation_summary(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<&str> = field_errors
        .keys()
        .copied()
        .filter(|field| *field != WHOLE_RECORD)
        .collect();
    fields.sort_unstable();

    let mut parts = Vec::new();
    if !fields.is_empty() {
        parts.push(format!("Please check: {}", fields.join(", ")));
    }
    if let Some(record) = field_errors.get(WHOLE_RECORD) {
        parts.extend(record.iter().map(|error| match &error.message {
            Some(message) => message.to_string(),
            None => error.code.to_string(),
        }));
    }
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn application_message_is_shown_verbatim() {
        let err = ApiError::Application {
            code: 500,
            message: "plate number already exists".to_string(),
        };
        assert_eq!(err.user_message(), "plate number already exists");
    }

    #[test]
    fn transport_and_http_failures_get_retry_prompt() {
        assert_eq!(
            ApiError::Transport("connection refused".into()).user_message(),
            RETRY_MESSAGE
        );
        let err = ApiError::Http {
            status: 502,
            body: "bad gateway".into(),
        };
        assert_eq!(err.user_message(), RETRY_MESSAGE);
        assert_eq!(
            ApiError::Deserialization("eof".into()).user_message(),
            RETRY_MESSAGE
        );
    }

    #[test]
    fn validation_message_lists_fields_sorted() {
        let mut errors = ValidationErrors::new();
        errors.add("phone", ValidationError::new("length"));
        errors.add("name", ValidationError::new("length"));
        let err = ApiError::from(errors);
        assert!(err.is_validation());
        assert_eq!(err.user_message(), "Please check: name, phone");
    }

    #[test]
    fn record_level_errors_follow_the_field_list() {
        let mut errors = ValidationErrors::new();
        errors.add("insurer", ValidationError::new("length"));
        let mut order = ValidationError::new("date_order");
        order.message = Some("end date is before start date".into());
        errors.add("__all__", order);
        assert_eq!(
            ApiError::from(errors).user_message(),
            "Please check: insurer; end date is before start date"
        );
    }
}
