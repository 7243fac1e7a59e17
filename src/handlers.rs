use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::language::{LanguageOption, LanguagePair};
use crate::translate::{ViewEvent, ViewSession, ViewSnapshot};

/// Frames sent by the form.
#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    SetSourceText {
        #[serde(default)]
        text: String,
    },
    SetLanguagePair {
        language: String,
    },
    Submit,
    GoBack,
}

/// Frames sent to the form.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    LanguagePairs { pairs: Vec<LanguageOption> },
    ViewState(ViewSnapshot),
    Error { message: String },
}

impl ServerMessage {
    pub fn language_pairs() -> Self {
        ServerMessage::LanguagePairs {
            pairs: LanguagePair::options(),
        }
    }

    pub fn to_json(&self) -> String {
        // Serialising these variants cannot fail: all keys are strings.
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Close,
}

pub fn handle_message(session: &ViewSession, session_id: &str, text: &str) -> anyhow::Result<Flow> {
    let msg: ClientMessage = serde_json::from_str(text).context("Malformed message")?;
    debug!("Session {} received {:?}", session_id, msg);

    let event = match msg {
        ClientMessage::SetSourceText { text } => ViewEvent::SetSourceText(text),
        ClientMessage::SetLanguagePair { language } => {
            ViewEvent::SetLanguagePair(language.parse::<LanguagePair>()?)
        }
        ClientMessage::Submit => ViewEvent::Submit,
        ClientMessage::GoBack => {
            info!("Session {} navigated back", session_id);
            return Ok(Flow::Close);
        }
    };

    if !session.dispatch(event) {
        anyhow::bail!("View session {} is no longer running", session_id);
    }
    Ok(Flow::Continue)
}
