use crate::core::{ConfigProvider, DeliveryOutcome, JobPosting, Notifier};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;

pub const EMBED_COLOR: u32 = 5814783;
pub const SUCCESS_STATUS: StatusCode = StatusCode::NO_CONTENT;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WebhookMessage {
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Embed {
    pub title: String,
    pub url: String,
    pub description: String,
    pub color: u32,
}

/// 職缺轉成 Discord embed
pub fn build_embed(posting: &JobPosting) -> WebhookMessage {
    let title = posting.title.as_deref().unwrap_or("N/A");
    let company = posting.company_name.as_deref().unwrap_or("N/A");
    let location = posting.location.as_deref().unwrap_or("N/A");
    let posted = posting.posted_at().unwrap_or("N/A");
    let job_type = posting.employment_type().unwrap_or("Unknown");

    WebhookMessage {
        embeds: vec![Embed {
            title: format!("{} @ {}", title, company),
            url: posting.link.clone().unwrap_or_default(),
            description: format!(
                "📍 **Location**: {}\n🕒 **Posted**: {}\n💼 **Type**: {}",
                location, posted, job_type
            ),
            color: EMBED_COLOR,
        }],
    }
}

pub struct DiscordNotifier<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> DiscordNotifier<C> {
    pub fn new(config: C) -> Self {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: C, client: Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl<C: ConfigProvider> Notifier for DiscordNotifier<C> {
    async fn notify(&self, posting: &JobPosting) -> Result<DeliveryOutcome> {
        let title = posting.title.as_deref().unwrap_or("N/A");
        let message = build_embed(posting);

        let response = self
            .client
            .post(self.config.webhook_url())
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        if status == SUCCESS_STATUS {
            tracing::info!("✅ Sent job to Discord: {}", title);
            return Ok(DeliveryOutcome::Delivered);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!(
            "❌ Failed to send to Discord: {} {}",
            status.as_u16(),
            body
        );
        Ok(DeliveryOutcome::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
