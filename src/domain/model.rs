use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 搜尋 API 回傳的一筆職缺，欄位原樣保留
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub detected_extensions: Option<DetectedExtensions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedExtensions {
    #[serde(default)]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub posted_at: Option<String>,
}

impl JobPosting {
    /// Present and non-empty id, or `None`.
    pub fn id(&self) -> Option<&str> {
        self.job_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn employment_type(&self) -> Option<&str> {
        self.detected_extensions
            .as_ref()
            .and_then(|ext| ext.employment_type.as_deref())
    }

    pub fn posted_at(&self) -> Option<&str> {
        self.detected_extensions
            .as_ref()
            .and_then(|ext| ext.posted_at.as_deref())
    }
}

/// `google_jobs` 回應的外層
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub jobs_results: Vec<JobPosting>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Canonical role -> synonym phrases. Keys are unique and the mapping is
/// never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleTaxonomy {
    roles: BTreeMap<String, Vec<String>>,
}

impl RoleTaxonomy {
    pub fn new(roles: BTreeMap<String, Vec<String>>) -> Self {
        Self { roles }
    }

    pub fn roles(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.roles
            .iter()
            .map(|(role, phrases)| (role.as_str(), phrases.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl Default for RoleTaxonomy {
    fn default() -> Self {
        const TABLE: &[(&str, &[&str])] = &[
            (
                "software engineer",
                &[
                    "software engineer",
                    "software developer",
                    "backend engineer",
                    "frontend engineer",
                    "software development engineer",
                    "sde",
                    "sde 1",
                    "sde 2",
                    "software engineer 1",
                    "software engineer 2",
                    "software engineer intern",
                    "junior developer",
                    "full stack engineer",
                    "full stack developer",
                    "intern",
                ],
            ),
            (
                "data analyst",
                &[
                    "data analyst",
                    "data analytics",
                    "business analyst",
                    "analytics intern",
                    "data visualization",
                    "data analyst intern",
                ],
            ),
            (
                "data scientist",
                &[
                    "data scientist",
                    "ml engineer",
                    "machine learning engineer",
                    "ai scientist",
                    "ml intern",
                    "data science intern",
                ],
            ),
            (
                "data engineer",
                &[
                    "data engineer",
                    "etl engineer",
                    "data pipeline engineer",
                    "big data",
                    "data platform engineer",
                    "data engineer intern",
                ],
            ),
            (
                "ai engineer",
                &[
                    "ai engineer",
                    "artificial intelligence engineer",
                    "machine learning developer",
                    "llm engineer",
                    "deep learning",
                    "ai intern",
                    "ai engineer intern",
                ],
            ),
        ];

        let roles = TABLE
            .iter()
            .map(|(role, phrases)| {
                (
                    role.to_string(),
                    phrases.iter().map(|p| p.to_string()).collect(),
                )
            })
            .collect();
        Self::new(roles)
    }
}

/// Result of one webhook POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    Rejected { status: u16, body: String },
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered)
    }
}

#[derive(Debug, Clone)]
pub struct Rejection {
    pub job_id: String,
    pub status: u16,
    pub body: String,
}

/// 單次循環的摘要
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    pub new_postings: usize,
    pub recorded_ids: Vec<String>,
    pub delivered: usize,
    pub rejected: Vec<Rejection>,
    pub persisted: bool,
}

impl CycleReport {
    pub fn empty(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            new_postings: 0,
            recorded_ids: Vec::new(),
            delivered: 0,
            rejected: Vec::new(),
            persisted: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posting_deserializes_partial_record() {
        let posting: JobPosting = serde_json::from_value(serde_json::json!({
            "job_id": "abc123",
            "title": "Data Engineer",
            "detected_extensions": {"posted_at": "3 days ago", "salary": "100k"},
            "thumbnail": "https://example.com/logo.png"
        }))
        .unwrap();

        assert_eq!(posting.id(), Some("abc123"));
        assert_eq!(posting.posted_at(), Some("3 days ago"));
        assert_eq!(posting.employment_type(), None);
        assert_eq!(posting.company_name, None);
    }

    #[test]
    fn test_empty_or_null_id_is_absent() {
        let empty: JobPosting = serde_json::from_str(r#"{"job_id": ""}"#).unwrap();
        let null: JobPosting = serde_json::from_str(r#"{"job_id": null}"#).unwrap();
        assert_eq!(empty.id(), None);
        assert_eq!(null.id(), None);
    }

    #[test]
    fn test_search_response_without_results() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"search_metadata": {"status": "Success"}}"#).unwrap();
        assert!(response.jobs_results.is_empty());
        assert!(response.error.is_none());
    }

    #[test]
    fn test_default_taxonomy_roles() {
        let taxonomy = RoleTaxonomy::default();
        assert_eq!(taxonomy.len(), 5);
        let roles: Vec<&str> = taxonomy.roles().map(|(role, _)| role).collect();
        assert!(roles.contains(&"software engineer"));
        assert!(roles.contains(&"ai engineer"));
    }
}
