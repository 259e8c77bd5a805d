use crate::error::ExtractionError;
use crate::models::EducationRecord;
use crate::normalize::parse_year_only;
use crate::traits::{PageQuery, ProfileSelectors};

/// `[school, degree?, dates?, description?]`
const MAX_SPANS: usize = 4;

fn record_from_spans(spans: &[String]) -> Result<EducationRecord, ExtractionError> {
    if spans.len() > MAX_SPANS {
        return Err(ExtractionError::StructuralMismatch {
            block: "education entry",
            span_count: spans.len(),
        });
    }

    let school_name = spans
        .first()
        .cloned()
        .ok_or(ExtractionError::MissingRequiredField("school name"))?;
    let (start_year, end_year) = match spans.get(2) {
        Some(dates) => {
            let (start, end) = parse_year_only(dates)?;
            (Some(start), end)
        }
        None => (None, None),
    };

    Ok(EducationRecord {
        school_name,
        degree: spans.get(1).cloned(),
        start_year,
        end_year,
        description: spans.get(3).cloned(),
    })
}

/// Assemble every entry of the education section, in page order.
pub async fn assemble<P: PageQuery>(
    page: &P,
    section: &P::Element,
    selectors: &ProfileSelectors,
) -> Result<Vec<EducationRecord>, ExtractionError> {
    let mut records = Vec::new();
    for entry in page.get_all_within(section, &selectors.list_entry).await? {
        let spans = page.get_text_spans(&entry, &selectors.text_span).await?;
        records.push(record_from_spans(&spans)?);
    }
    Ok(records)
}
