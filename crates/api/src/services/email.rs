//! Email delivery service.
//!
//! Supported providers:
//! - `console`: logs the fully rendered payload and reports success
//!   (development and dry runs; no message leaves the process)
//! - `http`: posts to a transactional email API

use crate::config::EmailConfig;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

/// Request timeout toward the email provider, in seconds.
const PROVIDER_TIMEOUT_SECS: u64 = 10;

/// Errors that can occur during email operations.
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Email service not configured")]
    NotConfigured,

    #[error("Failed to send email: {0}")]
    SendFailed(String),

    #[error("Provider error: {0}")]
    ProviderError(String),
}

/// Email message to be sent.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// Recipient email address
    pub to: String,
    /// Recipient name (optional)
    pub to_name: Option<String>,
    /// Email subject
    pub subject: String,
    /// HTML body
    pub html: String,
    /// Plain text body
    pub text: String,
}

/// Service for sending transactional emails.
#[derive(Clone)]
pub struct EmailService {
    config: Arc<EmailConfig>,
    client: reqwest::Client,
}

impl EmailService {
    /// Creates a new EmailService with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(PROVIDER_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config: Arc::new(config),
            client,
        }
    }

    /// Check if email sending is enabled.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Send an email message.
    pub async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        if !self.config.enabled {
            debug!(
                to = %message.to,
                subject = %message.subject,
                "Email service disabled, skipping send"
            );
            return Ok(());
        }

        match self.config.provider.as_str() {
            "console" => self.send_console(message).await,
            "http" => self.send_http(message).await,
            provider => {
                error!(provider = %provider, "Unknown email provider");
                Err(EmailError::NotConfigured)
            }
        }
    }

    /// Console provider - logs the payload instead of sending.
    async fn send_console(&self, message: EmailMessage) -> Result<(), EmailError> {
        info!(
            to = %message.to,
            to_name = ?message.to_name,
            subject = %message.subject,
            from = %self.config.sender_email,
            from_name = %self.config.sender_name,
            "Email (console provider)"
        );

        info!(body_text = %message.text, "Email body (plain text)");
        debug!(
            body_html_length = message.html.len(),
            "Email body (HTML) - {} chars",
            message.html.len()
        );

        Ok(())
    }

    /// HTTP provider - posts to a transactional email API.
    async fn send_http(&self, message: EmailMessage) -> Result<(), EmailError> {
        if self.config.api_url.is_empty() || self.config.api_key.is_empty() {
            return Err(EmailError::NotConfigured);
        }

        let reply_to = if self.config.reply_to.is_empty() {
            self.config.sender_email.clone()
        } else {
            self.config.reply_to.clone()
        };

        let mut to = serde_json::json!({ "email": message.to });
        if let Some(name) = &message.to_name {
            to["name"] = serde_json::json!(name);
        }

        let body = serde_json::json!({
            "from": {
                "email": self.config.sender_email,
                "name": self.config.sender_name,
            },
            "reply_to": { "email": reply_to },
            "to": [to],
            "subject": message.subject,
            "html": message.html,
            "text": message.text,
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .header(
                "Authorization",
                format!("Bearer {}", self.config.api_key),
            )
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| EmailError::SendFailed(format!("Provider request failed: {}", e)))?;

        if response.status().is_success() {
            info!(
                to = %message.to,
                subject = %message.subject,
                "Email sent via http provider"
            );
            Ok(())
        } else {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            error!(
                status = %status,
                error = %error_body,
                "Email provider error"
            );
            Err(EmailError::ProviderError(format!(
                "Provider returned {}: {}",
                status, error_body
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> EmailConfig {
        EmailConfig {
            enabled: true,
            provider: "console".to_string(),
            api_url: String::new(),
            api_key: String::new(),
            sender_email: "noreply@example.com".to_string(),
            sender_name: "Test".to_string(),
            reply_to: String::new(),
        }
    }

    fn test_message() -> EmailMessage {
        EmailMessage {
            to: "sponsor@example.com".to_string(),
            to_name: Some("Claire Martin".to_string()),
            subject: "Partenariat".to_string(),
            html: "<p>Bonjour</p>".to_string(),
            text: "Bonjour".to_string(),
        }
    }

    #[test]
    fn test_email_service_creation() {
        let service = EmailService::new(test_config());
        assert!(service.is_enabled());
    }

    #[tokio::test]
    async fn test_send_console_succeeds() {
        let service = EmailService::new(test_config());
        assert!(service.send(test_message()).await.is_ok());
    }

    #[tokio::test]
    async fn test_send_disabled_silently_succeeds() {
        let mut config = test_config();
        config.enabled = false;
        let service = EmailService::new(config);
        assert!(service.send(test_message()).await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_provider_fails() {
        let mut config = test_config();
        config.provider = "carrier-pigeon".to_string();
        let service = EmailService::new(config);
        assert!(matches!(
            service.send(test_message()).await,
            Err(EmailError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn test_http_provider_requires_configuration() {
        let mut config = test_config();
        config.provider = "http".to_string();
        let service = EmailService::new(config);
        assert!(matches!(
            service.send(test_message()).await,
            Err(EmailError::NotConfigured)
        ));
    }
}
