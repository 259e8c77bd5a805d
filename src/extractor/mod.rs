//! Profile extraction: one rendered profile page in, one [`ProfileRecord`] out.
//!
//! Fields are read top to bottom (name, location, contact, experience,
//! education). Any error aborts the whole profile; partial records are never
//! produced.

mod education;
mod experience;

use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::models::{Location, ProfileRecord};
use crate::normalize::{classify_links, parse_location, split_name};
use crate::traits::{PageQuery, ProfileSelectors};

#[derive(Debug, Clone, Default)]
pub struct ProfileExtractor {
    selectors: ProfileSelectors,
}

impl ProfileExtractor {
    pub fn new(selectors: ProfileSelectors) -> Self {
        Self { selectors }
    }

    pub async fn extract<P: PageQuery>(&self, page: &P) -> Result<ProfileRecord, ExtractionError> {
        let full_name = page
            .get_text(&self.selectors.name)
            .await?
            .ok_or(ExtractionError::MissingRequiredField("name"))?;
        let (first_name, last_name) = split_name(full_name.trim())?;
        debug!("Extracting profile of {} {}", first_name, last_name);

        let location = page
            .get_text(&self.selectors.location)
            .await?
            .map_or_else(Location::default, |raw| parse_location(raw.trim()));

        page.invoke_action(&self.selectors.contact_info_trigger).await?;
        let mut links = Vec::new();
        for anchor in page.get_all(&self.selectors.contact_links).await? {
            if let Some(href) = page.get_attribute(&anchor, "href").await? {
                links.push(href);
            }
        }
        let contact = classify_links(&links);
        page.invoke_action(&self.selectors.overlay_dismiss).await?;

        let experience = match self.find_section(page, &self.selectors.experience_anchor).await? {
            Some(section) => experience::assemble(page, &section, &self.selectors).await?,
            None => Vec::new(),
        };
        let education = match self.find_section(page, &self.selectors.education_anchor).await? {
            Some(section) => education::assemble(page, &section, &self.selectors).await?,
            None => Vec::new(),
        };

        info!(
            "Extracted {} {} ({} roles, {} schools)",
            first_name,
            last_name,
            experience.len(),
            education.len()
        );

        Ok(ProfileRecord {
            first_name,
            last_name,
            location,
            contact,
            experience,
            education,
        })
    }

    /// First section element containing `anchor`
    async fn find_section<P: PageQuery>(
        &self,
        page: &P,
        anchor: &str,
    ) -> Result<Option<P::Element>, ExtractionError> {
        for section in page.get_all(&self.selectors.section).await? {
            if !page.get_all_within(&section, anchor).await?.is_empty() {
                return Ok(Some(section));
            }
        }
        debug!("No section containing {}", anchor);
        Ok(None)
    }
}
