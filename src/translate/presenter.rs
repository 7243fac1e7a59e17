use serde::Serialize;
use tracing::debug;

use super::error::TranslateError;
use super::interface::TranslateInterface;
use crate::language::LanguagePair;

/// What the user has entered, plus whether a call is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestState {
    pub source_text: String,
    pub language_pair: LanguagePair,
    pub is_pending: bool,
}

/// Outcome of the last submission. At most one side is ever set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultState {
    translation: Option<String>,
    error_message: Option<String>,
}

impl ResultState {
    pub fn translation(&self) -> Option<&str> {
        self.translation.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    fn clear(&mut self) {
        self.translation = None;
        self.error_message = None;
    }

    fn show_translation(&mut self, translation: String) {
        self.error_message = None;
        self.translation = Some(translation);
    }

    fn show_error(&mut self, message: String) {
        self.translation = None;
        self.error_message = Some(message);
    }
}

/// Rendered form state, sent to the client after every update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewSnapshot {
    pub source_text: String,
    pub language_pair: LanguagePair,
    pub is_pending: bool,
    pub translation: Option<String>,
    pub error_message: Option<String>,
}

/// An accepted submission waiting to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub generation: u64,
    pub text: String,
    pub language: LanguagePair,
}

/// Form state for one mounted view.
///
/// Submissions are numbered; only the settlement of the latest accepted
/// submission is applied, so a late or repeated settlement can never leave
/// the view pending.
#[derive(Debug, Default)]
pub struct TranslatorView {
    request: RequestState,
    result: ResultState,
    generation: u64,
}

impl TranslatorView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) -> &RequestState {
        &self.request
    }

    pub fn result(&self) -> &ResultState {
        &self.result
    }

    pub fn set_source_text(&mut self, text: impl Into<String>) {
        self.request.source_text = text.into();
    }

    pub fn set_language_pair(&mut self, pair: LanguagePair) {
        self.request.language_pair = pair;
    }

    /// Validate and accept the current input.
    ///
    /// Blank text sets the validation message and returns `None`; no call
    /// may be made. Otherwise the previous outcome is cleared, the view goes
    /// pending and the caller must issue exactly one call for the returned
    /// submission.
    pub fn submit(&mut self) -> Option<Submission> {
        if self.request.source_text.trim().is_empty() {
            debug!("Rejected submission with blank text");
            self.result.show_error(TranslateError::EmptyInput.user_message());
            return None;
        }

        self.generation += 1;
        self.result.clear();
        self.request.is_pending = true;

        Some(Submission {
            generation: self.generation,
            text: self.request.source_text.clone(),
            language: self.request.language_pair,
        })
    }

    /// Apply the outcome of a submission. Returns false when it was stale.
    pub fn settle(&mut self, generation: u64, outcome: Result<String, TranslateError>) -> bool {
        if generation != self.generation || !self.request.is_pending {
            debug!(
                "Ignoring settlement for generation {} (current {})",
                generation, self.generation
            );
            return false;
        }

        self.request.is_pending = false;
        match outcome {
            Ok(translation) => self.result.show_translation(translation),
            Err(e) => self.result.show_error(e.user_message()),
        }
        true
    }

    /// Submit and settle in one go against `backend`.
    pub async fn submit_with<T>(&mut self, backend: &T) -> bool
    where
        T: TranslateInterface + ?Sized,
    {
        let Some(submission) = self.submit() else {
            return false;
        };
        let outcome = backend.translate(&submission.text, submission.language).await;
        self.settle(submission.generation, outcome)
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            source_text: self.request.source_text.clone(),
            language_pair: self.request.language_pair,
            is_pending: self.request.is_pending,
            translation: self.result.translation.clone(),
            error_message: self.result.error_message.clone(),
        }
    }
}
