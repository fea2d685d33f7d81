use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use thiserror::Error;

/// An error that occurs when the arguments of a webhook request cannot be decoded.
#[derive(Debug, Error)]
pub enum EightbotRequestError {
    #[error("Unable to read the request body: {0}")]
    UnreadableBody(String),
    #[error("The request body is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
    #[error("The JSON request body must be an object.")]
    NotAnObject,
    #[error("The form request body is malformed: {0}")]
    MalformedForm(#[from] serde_urlencoded::de::Error),
    #[error("The request is missing the required `{0}` field.")]
    MissingField(&'static str),
    #[error("The `{0}` field must be a string.")]
    InvalidField(&'static str),
}

impl IntoResponse for EightbotRequestError {
    fn into_response(self) -> Response {
        log::warn!("Rejecting webhook request. {}", self);
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

/// The arguments sent by Mattermost with a slash command or outgoing webhook.
///
/// Mattermost sends many more fields than any endpoint reads, so fields are only looked up and
/// checked when an endpoint asks for them. The arguments are decoded from JSON when the request
/// declares a JSON content type, and from a url encoded form otherwise.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum WebhookArgs {
    Json(Map<String, Value>),
    Form(Vec<(String, String)>),
}

impl WebhookArgs {
    /// Decodes the arguments from a raw request body.
    pub fn decode(content_type: Option<&str>, body: &[u8]) -> Result<Self, EightbotRequestError> {
        if content_type.is_some_and(is_json_content_type) {
            match serde_json::from_slice::<Value>(body)? {
                Value::Object(object) => Ok(Self::Json(object)),
                _ => Err(EightbotRequestError::NotAnObject),
            }
        } else {
            Ok(Self::Form(serde_urlencoded::from_bytes(body)?))
        }
    }

    /// Returns the string value of the named field.
    ///
    /// When a form repeats a field, the first value wins.
    pub fn field(&self, name: &'static str) -> Result<String, EightbotRequestError> {
        match self {
            Self::Json(object) => match object.get(name) {
                Some(Value::String(value)) => Ok(value.clone()),
                Some(_) => Err(EightbotRequestError::InvalidField(name)),
                None => Err(EightbotRequestError::MissingField(name)),
            },
            Self::Form(pairs) => pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
                .ok_or(EightbotRequestError::MissingField(name)),
        }
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers.get(CONTENT_TYPE).and_then(|value| value.to_str().ok())
}

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for WebhookArgs {
    type Rejection = EightbotRequestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = content_type(req.headers()).map(str::to_string);
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| EightbotRequestError::UnreadableBody(rejection.body_text()))?;
        Self::decode(content_type.as_deref(), &body)
    }
}

/// A slash command invoked by a user, eg. `/8ball will it rain?`.
#[derive(Debug, PartialEq, Eq)]
pub struct SlashCommand {
    user_name: String,
    question: String,
}

impl SlashCommand {
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn question(&self) -> &str {
        &self.question
    }
}

impl TryFrom<WebhookArgs> for SlashCommand {
    type Error = EightbotRequestError;

    fn try_from(args: WebhookArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            question: args.field("text")?,
            user_name: args.field("user_name")?,
        })
    }
}

/// A channel message forwarded by an outgoing webhook.
#[derive(Debug, PartialEq, Eq)]
pub struct OutgoingMessage {
    text: String,
}

impl OutgoingMessage {
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl TryFrom<WebhookArgs> for OutgoingMessage {
    type Error = EightbotRequestError;

    fn try_from(args: WebhookArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            text: args.field("text")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: Option<&str> = Some("application/json");
    const FORM: Option<&str> = Some("application/x-www-form-urlencoded");

    #[test]
    fn decode_json_object() {
        let body = br#"{"text": "will it rain?", "user_name": "alice", "channel_id": "town"}"#;
        let args = WebhookArgs::decode(JSON, body).unwrap();
        assert_eq!(args.field("text").unwrap(), "will it rain?");
        assert_eq!(args.field("user_name").unwrap(), "alice")
    }

    #[test]
    fn decode_json_with_charset_parameter() {
        let content_type = Some("application/json; charset=utf-8");
        let args = WebhookArgs::decode(content_type, br#"{"text": "hi"}"#).unwrap();
        assert_eq!(args.field("text").unwrap(), "hi")
    }

    #[test]
    fn decode_json_rejects_non_objects() {
        let result = WebhookArgs::decode(JSON, br#"["will it rain?", "alice"]"#);
        assert!(matches!(result, Err(EightbotRequestError::NotAnObject)))
    }

    #[test]
    fn decode_json_rejects_malformed_body() {
        let result = WebhookArgs::decode(JSON, b"text=will+it+rain%3F");
        assert!(matches!(result, Err(EightbotRequestError::MalformedJson(_))))
    }

    #[test]
    fn json_field_must_be_a_string() {
        let args = WebhookArgs::decode(JSON, br#"{"text": 8, "user_name": null}"#).unwrap();
        assert!(matches!(args.field("text"), Err(EightbotRequestError::InvalidField("text"))));
        assert!(matches!(
            args.field("user_name"),
            Err(EightbotRequestError::InvalidField("user_name"))
        ))
    }

    #[test]
    fn decode_form() {
        let body = b"token=abc&text=will+it+rain%3F&user_name=alice";
        let args = WebhookArgs::decode(FORM, body).unwrap();
        assert_eq!(args.field("text").unwrap(), "will it rain?");
        assert_eq!(args.field("user_name").unwrap(), "alice")
    }

    #[test]
    fn decode_form_when_content_type_is_missing() {
        let args = WebhookArgs::decode(None, b"text=hello").unwrap();
        assert_eq!(args.field("text").unwrap(), "hello")
    }

    #[test]
    fn form_field_uses_first_repeated_value() {
        let args = WebhookArgs::decode(FORM, b"text=first&text=second").unwrap();
        assert_eq!(args.field("text").unwrap(), "first")
    }

    #[test]
    fn decode_empty_form() {
        let args = WebhookArgs::decode(FORM, b"").unwrap();
        assert_eq!(args, WebhookArgs::Form(vec![]))
    }

    #[test]
    fn slash_command_requires_text_and_user_name() {
        let args = WebhookArgs::decode(FORM, b"user_name=alice").unwrap();
        let result = SlashCommand::try_from(args);
        assert!(matches!(result, Err(EightbotRequestError::MissingField("text"))));
        let args = WebhookArgs::decode(FORM, b"text=will+it+rain%3F").unwrap();
        let result = SlashCommand::try_from(args);
        assert!(matches!(result, Err(EightbotRequestError::MissingField("user_name"))))
    }

    #[test]
    fn slash_command_from_complete_args() {
        let args = WebhookArgs::decode(JSON, br#"{"text": "will it rain?", "user_name": "alice"}"#)
            .unwrap();
        let command = SlashCommand::try_from(args).unwrap();
        assert_eq!(command.user_name(), "alice");
        assert_eq!(command.question(), "will it rain?")
    }

    #[test]
    fn outgoing_message_requires_text() {
        let args = WebhookArgs::decode(FORM, b"user_name=alice").unwrap();
        let result = OutgoingMessage::try_from(args);
        assert!(matches!(result, Err(EightbotRequestError::MissingField("text"))));
        let args = WebhookArgs::decode(FORM, b"text=hi").unwrap();
        assert_eq!(OutgoingMessage::try_from(args).unwrap().text(), "hi")
    }

    #[test]
    fn outgoing_message_ignores_user_name() {
        let args = WebhookArgs::decode(JSON, br#"{"text": "hi", "user_name": 42}"#).unwrap();
        assert_eq!(OutgoingMessage::try_from(args).unwrap().text(), "hi")
    }

    #[test]
    fn missing_field_error_message_names_the_field() {
        let error = EightbotRequestError::MissingField("user_name");
        assert_eq!(
            error.to_string(),
            "The request is missing the required `user_name` field."
        )
    }
}
