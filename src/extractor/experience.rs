//! Work history assembly.
//!
//! A company entry renders either one role (title and company side by side) or
//! several roles grouped under a shared company header. In both shapes an
//! optional job location occupies its own span and shifts every later field by
//! one, so the span count is the only signal for which field sits where. The
//! tables below spell out every count that is understood.

use tracing::debug;

use crate::error::ExtractionError;
use crate::models::Role;
use crate::normalize::{parse_tenure, strip_separator_suffix};
use crate::traits::{PageQuery, ProfileSelectors};

/// Span positions of each role field for a given span count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SpanLayout {
    title: usize,
    /// `None` when the company comes from the group header instead
    company: Option<usize>,
    tenure: usize,
    description: Option<usize>,
}

/// Roles nested under a company header: `[title, tenure, location?, description?]`
const GROUPED_ROLE_LAYOUTS: &[(usize, SpanLayout)] = &[
    (4, SpanLayout { title: 0, company: None, tenure: 1, description: Some(3) }),
    (3, SpanLayout { title: 0, company: None, tenure: 1, description: Some(2) }),
    (2, SpanLayout { title: 0, company: None, tenure: 1, description: None }),
];

/// A company entry holding one role: `[title, company, tenure, location?, description?]`
const SINGLE_ROLE_LAYOUTS: &[(usize, SpanLayout)] = &[
    (5, SpanLayout { title: 0, company: Some(1), tenure: 2, description: Some(4) }),
    (4, SpanLayout { title: 0, company: Some(1), tenure: 2, description: Some(3) }),
    (3, SpanLayout { title: 0, company: Some(1), tenure: 2, description: None }),
];

fn layout_for(
    table: &[(usize, SpanLayout)],
    span_count: usize,
    block: &'static str,
) -> Result<SpanLayout, ExtractionError> {
    table
        .iter()
        .find(|(count, _)| *count == span_count)
        .map(|(_, layout)| *layout)
        .ok_or(ExtractionError::StructuralMismatch { block, span_count })
}

/// Build a role from `spans`; `company` is used when the layout has no company span.
fn role_from_spans(
    spans: &[String],
    layout: SpanLayout,
    company: Option<&str>,
) -> Result<Role, ExtractionError> {
    let company = match (layout.company, company) {
        (Some(idx), _) => strip_separator_suffix(&spans[idx]).to_string(),
        (None, Some(name)) => name.to_string(),
        (None, None) => return Err(ExtractionError::MissingRequiredField("company name")),
    };
    let (start, end) = parse_tenure(&spans[layout.tenure])?;

    Ok(Role {
        title: spans[layout.title].clone(),
        company,
        start_date: Some(start),
        end_date: end,
        description: layout.description.map(|idx| spans[idx].clone()),
    })
}

/// Assemble the roles of every company entry in the experience section, in page order.
pub async fn assemble<P: PageQuery>(
    page: &P,
    section: &P::Element,
    selectors: &ProfileSelectors,
) -> Result<Vec<Role>, ExtractionError> {
    let mut roles = Vec::new();

    for entry in page.get_all_within(section, &selectors.list_entry).await? {
        let sub_entries = page.get_all_within(&entry, &selectors.role_sub_entry).await?;

        if sub_entries.len() > 1 {
            let company = page
                .get_text_within(&entry, &selectors.company_name)
                .await?
                .ok_or(ExtractionError::MissingRequiredField("company name"))?;
            let company = strip_separator_suffix(company.trim()).to_string();
            debug!("{} roles grouped under {}", sub_entries.len(), company);

            for sub_entry in &sub_entries {
                let spans = page.get_text_spans(sub_entry, &selectors.text_span).await?;
                let layout = layout_for(GROUPED_ROLE_LAYOUTS, spans.len(), "grouped role")?;
                roles.push(role_from_spans(&spans, layout, Some(&company))?);
            }
        } else {
            let spans = page.get_text_spans(&entry, &selectors.text_span).await?;
            let layout = layout_for(SINGLE_ROLE_LAYOUTS, spans.len(), "company entry")?;
            roles.push(role_from_spans(&spans, layout, None)?);
        }
    }

    Ok(roles)
}
