use crate::core::filter::filter_new_postings;
use crate::core::{ConfigProvider, JobPosting, JobSource, SearchResponse};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashSet;

pub const SEARCH_ENGINE: &str = "google_jobs";

/// SerpApi `google_jobs` search client.
pub struct SerpApiFetcher<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> SerpApiFetcher<C> {
    pub fn new(config: C) -> Self {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: C, client: Client) -> Self {
        Self { config, client }
    }

    /// `kw1 OR kw2 ... site:<site>`
    pub fn build_query(&self, keywords: &[String]) -> String {
        build_query(keywords, self.config.site_filter())
    }
}

pub fn build_query(keywords: &[String], site: &str) -> String {
    let mut query = keywords.join(" OR ");
    if !site.is_empty() {
        if !query.is_empty() {
            query.push(' ');
        }
        query.push_str("site:");
        query.push_str(site);
    }
    query
}

/// Searches once, then keeps postings that are new relative to `seen` and
/// match a keyword.
pub async fn fetch_new<F: JobSource + ?Sized>(
    source: &F,
    keywords: &[String],
    seen: &HashSet<String>,
) -> Result<Vec<JobPosting>> {
    let postings = source.search(keywords).await?;
    Ok(filter_new_postings(postings, keywords, seen))
}

#[async_trait]
impl<C: ConfigProvider> JobSource for SerpApiFetcher<C> {
    async fn search(&self, keywords: &[String]) -> Result<Vec<JobPosting>> {
        let query = self.build_query(keywords);
        tracing::debug!(
            "Searching {} ({} keyword(s), location: {})",
            self.config.search_endpoint(),
            keywords.len(),
            self.config.location()
        );

        let response = self
            .client
            .get(self.config.search_endpoint())
            .query(&[
                ("engine", SEARCH_ENGINE),
                ("q", query.as_str()),
                ("location", self.config.location()),
                ("api_key", self.config.api_key()),
            ])
            .send()
            .await?;

        tracing::debug!("Search API response status: {}", response.status());

        // 不檢查狀態碼；非 JSON 內容直接視為錯誤往上拋
        let body: SearchResponse = response.json().await?;

        if let Some(message) = body.error {
            tracing::warn!("⚠️ Search API reported an error: {}", message);
            return Ok(Vec::new());
        }

        tracing::debug!("Search API returned {} posting(s)", body.jobs_results.len());
        Ok(body.jobs_results)
    }
}
