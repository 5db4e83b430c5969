use crate::core::fetcher::fetch_new;
use crate::core::keywords::build_keywords;
use crate::core::{CycleReport, DeliveryOutcome, JobSource, Notifier, Rejection, RoleTaxonomy, SeenStore};
use crate::utils::error::Result;
use chrono::{Local, Utc};
use std::time::Duration;

/// Runs fetch -> filter -> notify -> persist cycles.
pub struct AlertEngine<S: SeenStore, F: JobSource, N: Notifier> {
    store: S,
    fetcher: F,
    notifier: N,
    taxonomy: RoleTaxonomy,
    dry_run: bool,
}

impl<S: SeenStore, F: JobSource, N: Notifier> AlertEngine<S, F, N> {
    pub fn new(store: S, fetcher: F, notifier: N, taxonomy: RoleTaxonomy) -> Self {
        Self {
            store,
            fetcher,
            notifier,
            taxonomy,
            dry_run: false,
        }
    }

    /// 只抓取與過濾，不發通知也不寫檔
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn run_cycle(&self) -> Result<CycleReport> {
        let mut report = CycleReport::empty(Utc::now());
        let mut seen = self.store.load().await?;
        let keywords = build_keywords(&self.taxonomy);

        tracing::info!(
            "[{}] 🔍 Checking for new jobs...",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        tracing::debug!("{} keyword(s), {} seen id(s)", keywords.len(), seen.len());

        let new_jobs = fetch_new(&self.fetcher, &keywords, &seen).await?;
        report.new_postings = new_jobs.len();

        if new_jobs.is_empty() {
            tracing::info!("📭 No new jobs found.");
            return Ok(report);
        }

        if self.dry_run {
            for job in &new_jobs {
                tracing::info!(
                    "🔍 [dry run] Would notify: {} ({})",
                    job.title.as_deref().unwrap_or("N/A"),
                    job.id().unwrap_or_default()
                );
            }
            tracing::info!("🔍 [dry run] {} new job(s) found, nothing sent", new_jobs.len());
            return Ok(report);
        }

        for job in &new_jobs {
            // 過濾後的職缺一定有 id
            let Some(id) = job.id() else { continue };

            match self.notifier.notify(job).await? {
                DeliveryOutcome::Delivered => report.delivered += 1,
                DeliveryOutcome::Rejected { status, body } => report.rejected.push(Rejection {
                    job_id: id.to_string(),
                    status,
                    body,
                }),
            }

            seen.insert(id.to_string());
            report.recorded_ids.push(id.to_string());
        }

        self.store.save(&seen).await?;
        report.persisted = true;

        tracing::info!("🔔 {} new job(s) notified!", new_jobs.len());
        if !report.rejected.is_empty() {
            tracing::warn!(
                "⚠️ {} of {} webhook delivery(ies) rejected",
                report.rejected.len(),
                new_jobs.len()
            );
        }

        Ok(report)
    }

    /// Repeats `run_cycle` with a fixed pause. A failed cycle is logged and
    /// the loop keeps going.
    pub async fn run_forever(&self, interval: Duration) {
        loop {
            if let Err(e) = self.run_cycle().await {
                tracing::error!("❌ Cycle failed: {}", e);
            }
            tracing::info!("😴 Sleeping for {}s", interval.as_secs());
            tokio::time::sleep(interval).await;
        }
    }
}
