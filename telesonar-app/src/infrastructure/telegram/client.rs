use super::types::{
    ApiResponse, DeleteMessage, DeleteWebhook, EditMessageText, GetUpdates, LinkPreviewOptions,
    Message, OutgoingMessage, ParseMode, Update,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use telesonar_errors::AppError;

const TELEGRAM_API_URL: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT_SECS: u64 = 30;

pub struct TelegramClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(token: &str) -> Result<Self, AppError> {
        Self::with_api_url(TELEGRAM_API_URL, token)
    }

    pub fn with_api_url(api_url: &str, token: &str) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
        })
    }

    pub async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<bool, AppError> {
        self.call("deleteWebhook", &DeleteWebhook { drop_pending_updates })
            .await
    }

    /// Long-polls for message updates. `timeout_secs` must stay below the
    /// client's request timeout.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u32,
    ) -> Result<Vec<Update>, AppError> {
        let request = GetUpdates {
            offset,
            timeout: timeout_secs,
            allowed_updates: vec!["message"],
        };
        self.call("getUpdates", &request).await
    }

    pub async fn send_message(&self, message: &OutgoingMessage) -> Result<Message, AppError> {
        self.call("sendMessage", message).await
    }

    pub async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        parse_mode: Option<ParseMode>,
    ) -> Result<Message, AppError> {
        let request = EditMessageText {
            chat_id,
            message_id,
            text,
            parse_mode,
            link_preview_options: LinkPreviewOptions { is_disabled: true },
        };
        self.call("editMessageText", &request).await
    }

    pub async fn delete_message(&self, chat_id: i64, message_id: i64) -> Result<bool, AppError> {
        self.call("deleteMessage", &DeleteMessage { chat_id, message_id })
            .await
    }

    pub async fn send_document(
        &self,
        chat_id: i64,
        reply_to: Option<i64>,
        filename: &str,
        bytes: Vec<u8>,
        caption: &str,
    ) -> Result<Message, AppError> {
        let document = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("text/csv")
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let mut form = reqwest::multipart::Form::new()
            .text("chat_id", chat_id.to_string())
            .text("caption", caption.to_string())
            .text("parse_mode", ParseMode::Html.as_str())
            .part("document", document);

        if let Some(message_id) = reply_to {
            form = form.text(
                "reply_parameters",
                format!(
                    r#"{{"message_id":{},"allow_sending_without_reply":true}}"#,
                    message_id
                ),
            );
        }

        let response = self
            .http_client
            .post(format!("{}/sendDocument", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        Self::decode("sendDocument", response).await
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http_client
            .post(format!("{}/{}", self.base_url, method))
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        Self::decode(method, response).await
    }

    async fn decode<T: DeserializeOwned>(
        method: &str,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        let status = response.status();
        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| {
                AppError::TelegramError(format!("{} ({}): {}", method, status, e.without_url()))
            })?;

        if !envelope.ok {
            let description = envelope
                .description
                .unwrap_or_else(|| format!("HTTP {}", status));
            tracing::warn!("Telegram {} failed: {}", method, description);
            return Err(AppError::TelegramError(description));
        }

        envelope
            .result
            .ok_or_else(|| AppError::TelegramError(format!("{} returned no result", method)))
    }
}

/// Request URLs carry the bot token, so it is stripped before the error is surfaced.
fn transport_error(e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        return AppError::Timeout;
    }
    AppError::TelegramError(e.without_url().to_string())
}
