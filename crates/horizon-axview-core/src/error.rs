//! Error types for the accessible text view core.

use serde::Serialize;

/// Result type alias for text view operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to the host call that triggered them.
///
/// Nothing in this crate is fatal: geometry and focus-resolution edge cases
/// are absorbed internally, and only option-decoding and empty-content
/// conditions reach the host.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The inbound options record could not be decoded.
    #[error("could not decode options: {message}")]
    OptionDecode { message: String },

    /// A rebuild was requested with no renderable text.
    #[error("html cannot be blank")]
    EmptyContent,
}

impl Error {
    /// Create an option-decoding error.
    pub fn option_decode(message: impl Into<String>) -> Self {
        Self::OptionDecode {
            message: message.into(),
        }
    }

    /// The stable error code reported over the host channel.
    pub fn code(&self) -> &'static str {
        match self {
            Self::OptionDecode { .. } => "JSONError",
            Self::EmptyContent => "EmptyContent",
        }
    }

    /// Convert to the structured record sent back to the host.
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code().to_string(),
            message: self.to_string(),
        }
    }
}

/// The structured `{ code, message }` record returned to the host when an
/// operation fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub code: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_carries_code_and_message() {
        let report = Error::option_decode("missing field `html`").report();
        assert_eq!(report.code, "JSONError");
        assert!(report.message.contains("missing field `html`"));

        assert_eq!(Error::EmptyContent.report().code, "EmptyContent");
    }
}
