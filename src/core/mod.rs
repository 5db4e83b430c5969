pub mod cycle;
pub mod fetcher;
pub mod filter;
pub mod keywords;
pub mod notifier;
pub mod seen_store;

pub use crate::domain::model::{
    CycleReport, DeliveryOutcome, JobPosting, Rejection, RoleTaxonomy, SearchResponse,
};
pub use crate::domain::ports::{ConfigProvider, JobSource, Notifier, SeenStore};
pub use crate::utils::error::Result;
