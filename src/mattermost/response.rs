use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::eightball::OutgoingAnswer;

pub const EIGHTBOT_USERNAME: &str = "eightbot";
pub const IN_CHANNEL_RESPONSE_TYPE: &str = "in_channel";

/// A message posted to the channel in response to a slash command or outgoing webhook.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct EightbotResponse {
    response_type: String,
    text: String,
    username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_url: Option<String>,
}

impl EightbotResponse {
    pub fn new(text: String, icon_url: Option<String>) -> Self {
        Self {
            response_type: IN_CHANNEL_RESPONSE_TYPE.to_string(),
            text,
            username: EIGHTBOT_USERNAME.to_string(),
            icon_url,
        }
    }

    /// Creates the response to a slash command, which echoes the question before answering it.
    pub fn slash(user_name: &str, question: &str, phrase: &str, icon_url: String) -> Self {
        let text = format!("{} asks: {}\n{}", user_name, question, phrase);
        Self::new(text, Some(icon_url))
    }

    #[cfg(test)]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[cfg(test)]
    pub fn icon_url(&self) -> Option<&str> {
        self.icon_url.as_deref()
    }
}

impl IntoResponse for EightbotResponse {
    fn into_response(self) -> Response {
        log::info!("respond {:?}", self);
        Json(self).into_response()
    }
}

/// The response to an outgoing webhook, which is empty when the bot stays quiet.
#[derive(Debug, PartialEq, Eq)]
pub struct OutgoingReply(Option<EightbotResponse>);

impl OutgoingReply {
    /// Creates a reply from an `OutgoingAnswer`.
    ///
    /// Ad-hoc answers omit the icon, so `icon_url` is only evaluated for triggered answers.
    pub fn new(answer: OutgoingAnswer, icon_url: impl FnOnce() -> String) -> Self {
        match answer {
            OutgoingAnswer::Triggered(phrase) => {
                Self(Some(EightbotResponse::new(phrase.to_string(), Some(icon_url()))))
            }
            OutgoingAnswer::AdHoc(phrase) => {
                log::info!("Giving an ad-hoc response.");
                Self(Some(EightbotResponse::new(phrase.to_string(), None)))
            }
            OutgoingAnswer::Silent => Self(None),
        }
    }

    #[cfg(test)]
    pub fn response(&self) -> Option<&EightbotResponse> {
        self.0.as_ref()
    }
}

impl IntoResponse for OutgoingReply {
    fn into_response(self) -> Response {
        match self.0 {
            Some(response) => response.into_response(),
            None => ().into_response(),
        }
    }
}
