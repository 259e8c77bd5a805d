use anyhow::Result;
use scraper::Html;
use tracing::{error, info};

use crate::extractor::ProfileExtractor;
use crate::models::{ProfileRecord, SubmitOutcome};
use crate::page::{HtmlPage, PageFetcher};
use crate::traits::ContactSink;

/// Outcome of one upload run, in input order
#[derive(Debug, Default)]
pub struct UploadReport {
    pub accepted: Vec<String>,
    /// Names flagged by the sink for manual review
    pub duplicates: Vec<String>,
    /// Profile URL and the reason it was skipped
    pub failures: Vec<(String, String)>,
}

pub struct ContactUploader<S> {
    fetcher: PageFetcher,
    extractor: ProfileExtractor,
    sink: S,
    search_name: String,
}

impl<S: ContactSink> ContactUploader<S> {
    pub fn new(
        fetcher: PageFetcher,
        extractor: ProfileExtractor,
        sink: S,
        search_name: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            sink,
            search_name: search_name.into(),
        }
    }

    /// Upload every profile; a failing profile is reported and skipped.
    pub async fn upload_all(&self, profile_urls: &[String]) -> UploadReport {
        let mut report = UploadReport::default();

        for url in profile_urls {
            let profile = match fetch_profile(&self.fetcher, &self.extractor, url).await {
                Ok(profile) => profile,
                Err(e) => {
                    error!("Skipping {}: {:#}", url, e);
                    report.failures.push((url.clone(), format!("{e:#}")));
                    continue;
                }
            };

            match self.sink.submit(&self.search_name, &profile).await {
                Ok(SubmitOutcome::Accepted) => report.accepted.push(profile.full_name()),
                Ok(SubmitOutcome::Duplicate) => report.duplicates.push(profile.full_name()),
                Err(e) => {
                    error!("Failed to save {}: {:#}", profile.full_name(), e);
                    report.failures.push((url.clone(), format!("{e:#}")));
                }
            }
        }

        info!(
            "Upload finished: {} added, {} duplicates, {} failed",
            report.accepted.len(),
            report.duplicates.len(),
            report.failures.len()
        );
        report
    }
}

/// Fetch and extract one profile without submitting it
pub async fn fetch_profile(
    fetcher: &PageFetcher,
    extractor: &ProfileExtractor,
    url: &str,
) -> Result<ProfileRecord> {
    let html = fetcher.fetch(url).await?;

    // The parsed document is not Send; keep it scoped to extraction
    let document = Html::parse_document(&html);
    let page = HtmlPage::new(&document);
    Ok(extractor.extract(&page).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Accepts each name once, flags repeats
    #[derive(Default)]
    struct MemorySink {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ContactSink for MemorySink {
        async fn submit(&self, _search_name: &str, profile: &ProfileRecord) -> Result<SubmitOutcome> {
            let mut seen = self.seen.lock().unwrap();
            let name = profile.full_name();
            if seen.contains(&name) {
                return Ok(SubmitOutcome::Duplicate);
            }
            seen.push(name);
            Ok(SubmitOutcome::Accepted)
        }
    }

    fn fixture_path() -> String {
        concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/profile.html").to_string()
    }

    #[tokio::test]
    async fn report_collects_every_outcome() {
        let uploader = ContactUploader::new(
            PageFetcher::new(None).unwrap(),
            ProfileExtractor::default(),
            MemorySink::default(),
            "Q3 CFO search",
        );

        let urls = vec![
            fixture_path(),
            "/nonexistent/profile.html".to_string(),
            fixture_path(),
        ];
        let report = uploader.upload_all(&urls).await;

        assert_eq!(report.accepted, vec!["Mary Ann Lee"]);
        assert_eq!(report.duplicates, vec!["Mary Ann Lee"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, "/nonexistent/profile.html");
    }
}
