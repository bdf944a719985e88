use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
    pub reply_to_message: Option<Box<Message>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub is_bot: bool,
    pub first_name: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
    #[serde(rename = "Markdown")]
    Markdown,
}

impl ParseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "HTML",
            Self::Markdown => "Markdown",
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ReplyParameters {
    pub message_id: i64,
    pub allow_sending_without_reply: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct LinkPreviewOptions {
    pub is_disabled: bool,
}

/// Body of `sendMessage`.
#[derive(Debug, Serialize)]
pub struct OutgoingMessage {
    pub chat_id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) reply_parameters: Option<ReplyParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) link_preview_options: Option<LinkPreviewOptions>,
}

impl OutgoingMessage {
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            parse_mode: None,
            reply_parameters: None,
            link_preview_options: None,
        }
    }

    pub fn html(mut self) -> Self {
        self.parse_mode = Some(ParseMode::Html);
        self
    }

    pub fn reply_to(mut self, message_id: i64) -> Self {
        self.reply_parameters = Some(ReplyParameters {
            message_id,
            allow_sending_without_reply: true,
        });
        self
    }

    pub fn without_link_preview(mut self) -> Self {
        self.link_preview_options = Some(LinkPreviewOptions { is_disabled: true });
        self
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GetUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    pub timeout: u32,
    pub allowed_updates: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EditMessageText<'a> {
    pub chat_id: i64,
    pub message_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    pub link_preview_options: LinkPreviewOptions,
}

#[derive(Debug, Serialize)]
pub(crate) struct DeleteMessage {
    pub chat_id: i64,
    pub message_id: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct DeleteWebhook {
    pub drop_pending_updates: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_with_reply() {
        let body = r#"{
            "update_id": 10,
            "message": {
                "message_id": 5,
                "from": {"id": 42, "is_bot": false, "first_name": "Ann"},
                "chat": {"id": -100, "type": "group"},
                "date": 0,
                "text": "/factcheck",
                "reply_to_message": {
                    "message_id": 4,
                    "chat": {"id": -100, "type": "group"},
                    "date": 0,
                    "text": "the moon is cheese"
                }
            }
        }"#;
        let update: Update = serde_json::from_str(body).unwrap();
        let message = update.message.unwrap();
        assert_eq!(message.from.map(|u| u.id), Some(42));
        assert_eq!(
            message.reply_to_message.and_then(|m| m.text).as_deref(),
            Some("the moon is cheese")
        );
    }

    #[test]
    fn test_outgoing_message_omits_unset_fields() {
        let plain = serde_json::to_value(OutgoingMessage::new(1, "hi")).unwrap();
        assert_eq!(plain, serde_json::json!({"chat_id": 1, "text": "hi"}));

        let full = serde_json::to_value(
            OutgoingMessage::new(1, "<b>hi</b>")
                .html()
                .reply_to(9)
                .without_link_preview(),
        )
        .unwrap();
        assert_eq!(full["parse_mode"], "HTML");
        assert_eq!(full["reply_parameters"]["message_id"], 9);
        assert_eq!(full["link_preview_options"]["is_disabled"], true);
    }

    #[test]
    fn test_error_envelope() {
        let body = r#"{"ok":false,"error_code":400,"description":"Bad Request: can't parse entities"}"#;
        let response: ApiResponse<Message> = serde_json::from_str(body).unwrap();
        assert!(!response.ok);
        assert!(response.result.is_none());
        assert_eq!(
            response.description.as_deref(),
            Some("Bad Request: can't parse entities")
        );
    }
}
