use std::time::Duration;

/// Shown when submit is attempted with blank text.
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter text to translate.";
/// Shown for timeouts, transport failures and server errors without a message.
pub const CONNECTION_FAILURE_MESSAGE: &str = "Failed to connect to the server.";
/// Shown as the result when a successful response carries no translation.
pub const NO_TRANSLATION_MESSAGE: &str = "No translation found.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error("nothing to translate")]
    EmptyInput,

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("server responded with status {status}")]
    Server { status: u16, message: Option<String> },

    #[error("transport error: {0}")]
    Transport(String),
}

impl TranslateError {
    /// Text presented to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            TranslateError::EmptyInput => EMPTY_INPUT_MESSAGE.to_string(),
            TranslateError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            TranslateError::Timeout(_)
            | TranslateError::Server { message: None, .. }
            | TranslateError::Transport(_) => CONNECTION_FAILURE_MESSAGE.to_string(),
        }
    }
}
