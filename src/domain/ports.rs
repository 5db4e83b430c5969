use crate::domain::model::{DeliveryOutcome, JobPosting};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

pub trait SeenStore: Send + Sync {
    fn load(&self) -> impl std::future::Future<Output = Result<HashSet<String>>> + Send;
    fn save(&self, seen: &HashSet<String>)
        -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn search_endpoint(&self) -> &str;
    fn api_key(&self) -> &str;
    fn location(&self) -> &str;
    fn site_filter(&self) -> &str;
    fn webhook_url(&self) -> &str;
}

impl<T: ConfigProvider + ?Sized> ConfigProvider for Arc<T> {
    fn search_endpoint(&self) -> &str {
        (**self).search_endpoint()
    }

    fn api_key(&self) -> &str {
        (**self).api_key()
    }

    fn location(&self) -> &str {
        (**self).location()
    }

    fn site_filter(&self) -> &str {
        (**self).site_filter()
    }

    fn webhook_url(&self) -> &str {
        (**self).webhook_url()
    }
}

#[async_trait]
pub trait JobSource: Send + Sync {
    /// Postings from the search API, unfiltered and in response order.
    async fn search(&self, keywords: &[String]) -> Result<Vec<JobPosting>>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, posting: &JobPosting) -> Result<DeliveryOutcome>;
}
