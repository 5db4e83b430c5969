use crate::domain::model::JobPosting;
use std::collections::HashSet;

/// Keep postings that carry an id, are not in `seen`, and whose title
/// contains a keyword (case-insensitive). Response order is preserved and
/// an id repeated within one response is kept once.
pub fn filter_new_postings(
    postings: Vec<JobPosting>,
    keywords: &[String],
    seen: &HashSet<String>,
) -> Vec<JobPosting> {
    let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    let mut taken: HashSet<String> = HashSet::new();

    postings
        .into_iter()
        .filter(|posting| {
            let Some(id) = posting.id() else {
                tracing::debug!("Skipping posting without job_id");
                return false;
            };
            if seen.contains(id) || taken.contains(id) {
                return false;
            }
            if !title_matches(posting.title.as_deref().unwrap_or(""), &keywords) {
                tracing::debug!("Skipping '{}': no keyword in title", id);
                return false;
            }
            taken.insert(id.to_string());
            true
        })
        .collect()
}

fn title_matches(title: &str, lowered_keywords: &[String]) -> bool {
    let title = title.to_lowercase();
    lowered_keywords.iter().any(|k| title.contains(k.as_str()))
}
