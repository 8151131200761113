use crate::config::toml_config::WatchConfig;
use crate::domain::model::{Layout, NotificationMessage, Section};
use crate::domain::ports::NotificationSink;
use crate::utils::error::{Result, WatchError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

fn section_markdown(section: &Section) -> String {
    match (section.label.is_empty(), section.short) {
        (true, _) => section.text.clone(),
        (false, true) => format!("*{}:* {}", section.label, section.text),
        (false, false) => format!("*{}:*\n{}", section.label, section.text),
    }
}

fn buttons(message: &NotificationMessage) -> Vec<Value> {
    message
        .link_actions
        .iter()
        .map(|action| {
            let mut button = json!({
                "type": "button",
                "text": action.label,
                "url": action.url,
            });
            if action.primary {
                button["style"] = json!("primary");
            }
            button
        })
        .collect()
}

fn attachment_payload(message: &NotificationMessage, color: &str) -> Value {
    let fields: Vec<Value> = message
        .body_sections
        .iter()
        .map(|s| json!({ "title": s.label, "value": s.text, "short": s.short }))
        .collect();

    let mut attachment = json!({
        "color": color,
        "title": message.title,
        "fields": fields,
        "actions": buttons(message),
        "ts": chrono::Utc::now().timestamp(),
    });
    if let Some(footer) = &message.footer {
        attachment["footer"] = json!(footer);
    }

    json!({ "attachments": [attachment] })
}

fn blocks_payload(message: &NotificationMessage) -> Value {
    let mut blocks = vec![
        json!({
            "type": "header",
            "text": { "type": "plain_text", "text": message.title, "emoji": true }
        }),
        json!({ "type": "divider" }),
    ];

    for section in &message.body_sections {
        blocks.push(json!({
            "type": "section",
            "text": { "type": "mrkdwn", "text": section_markdown(section) }
        }));
    }

    if !message.link_actions.is_empty() {
        let elements: Vec<Value> = message
            .link_actions
            .iter()
            .map(|action| {
                let mut button = json!({
                    "type": "button",
                    "text": { "type": "plain_text", "text": action.label, "emoji": true },
                    "url": action.url,
                });
                if action.primary {
                    button["style"] = json!("primary");
                }
                button
            })
            .collect();
        blocks.push(json!({ "type": "actions", "elements": elements }));
    }

    if let Some(footer) = &message.footer {
        blocks.push(json!({ "type": "divider" }));
        blocks.push(json!({
            "type": "context",
            "elements": [{ "type": "mrkdwn", "text": footer }]
        }));
    }

    // `text` is what notifications and clients without block support show
    json!({ "text": message.title, "blocks": blocks })
}

fn text_payload(message: &NotificationMessage) -> Value {
    let mut lines = vec![format!("*{}*", message.title)];
    lines.extend(message.body_sections.iter().map(section_markdown));
    lines.extend(
        message
            .link_actions
            .iter()
            .map(|a| format!("<{}|{}>", a.url, a.label)),
    );
    if let Some(footer) = &message.footer {
        lines.push(format!("_{}_", footer));
    }
    json!({ "text": lines.join("\n") })
}

/// Slack-compatible JSON body for one message.
pub fn payload(message: &NotificationMessage) -> Value {
    let mut body = match &message.layout {
        Layout::Attachment { color } => attachment_payload(message, color),
        Layout::Blocks => blocks_payload(message),
        Layout::Text => text_payload(message),
    };
    body["channel"] = json!(message.channel);
    body["username"] = json!(message.username);
    body["icon_emoji"] = json!(message.icon_emoji);
    body
}

pub struct SlackWebhookSink {
    client: Client,
    webhook_url: String,
}

impl SlackWebhookSink {
    pub fn new(webhook_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            webhook_url: webhook_url.into(),
        })
    }

    pub async fn post(&self, message: &NotificationMessage) -> Result<()> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload(message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WatchError::WebhookRejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationSink for SlackWebhookSink {
    async fn send(&self, message: &NotificationMessage) -> bool {
        match self.post(message).await {
            Ok(()) => {
                tracing::info!("✅ Slack notification sent: {}", message.title);
                true
            }
            Err(e) => {
                tracing::error!("❌ Slack delivery failed: {}", e);
                false
            }
        }
    }
}

/// Logs the payload instead of posting it.
#[derive(Debug, Default)]
pub struct DryRunSink;

#[async_trait]
impl NotificationSink for DryRunSink {
    async fn send(&self, message: &NotificationMessage) -> bool {
        tracing::info!("🧪 Test mode - notification not sent: {}", message.title);
        match serde_json::to_string_pretty(&payload(message)) {
            Ok(body) => tracing::debug!("Payload:\n{}", body),
            Err(e) => tracing::warn!("Payload could not be serialized: {}", e),
        }
        true
    }
}

/// The webhook sink, or the dry-run sink in test mode.
pub fn build_sink(config: &WatchConfig) -> Result<Box<dyn NotificationSink>> {
    if config.test_mode {
        return Ok(Box::new(DryRunSink));
    }
    let url = config.require_webhook()?;
    Ok(Box::new(SlackWebhookSink::new(url, config.webhook.timeout())?))
}
