//! Profile list ingestion from a spreadsheet export

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::info;

/// Header of the column holding profile URLs
pub const PROFILE_URL_COLUMN: &str = "LinkedIn URL";

/// Read profile URLs from the CSV file at `path`, in row order.
pub fn read_profile_urls(path: &Path) -> Result<Vec<String>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let urls = profile_urls_from_reader(file)?;
    info!("Loaded {} profile URLs from {}", urls.len(), path.display());
    Ok(urls)
}

/// The header row must come first; rows with an empty URL cell are skipped.
pub fn profile_urls_from_reader<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let column = reader
        .headers()?
        .iter()
        .position(|h| h.trim() == PROFILE_URL_COLUMN)
        .ok_or_else(|| anyhow!("CSV has no \"{PROFILE_URL_COLUMN}\" column"))?;

    let mut urls = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(url) = record.get(column).map(str::trim)
            && !url.is_empty()
        {
            urls.push(url.to_string());
        }
    }

    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_url_column_in_order() {
        let csv = "Name,LinkedIn URL,Title\n\
                   Jane,https://www.linkedin.com/in/jane,CFO\n\
                   Bob,,CTO\n\
                   Ann,https://www.linkedin.com/in/ann,CEO\n";
        let urls = profile_urls_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(
            urls,
            vec!["https://www.linkedin.com/in/jane", "https://www.linkedin.com/in/ann"]
        );
    }

    #[test]
    fn short_rows_are_skipped() {
        let csv = "Name,Title,LinkedIn URL\nJane,CFO\nAnn,CEO,https://www.linkedin.com/in/ann\n";
        let urls = profile_urls_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(urls, vec!["https://www.linkedin.com/in/ann"]);
    }

    #[test]
    fn missing_column_is_an_error() {
        let err = profile_urls_from_reader("Name,Profile\nJane,x\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("LinkedIn URL"));
    }
}
