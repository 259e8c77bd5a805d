//! Traits and configuration at the seams between the extractor and its host

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PageError;
use crate::models::{ProfileRecord, SubmitOutcome};

/// CSS selectors for the parts of a profile page the extractor reads.
///
/// Layout drift on the profile site is a configuration change: every field can
/// be overridden from a JSON file, missing keys fall back to the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSelectors {
    /// Element holding the full display name
    pub name: String,
    /// Element holding the location line under the name
    pub location: String,
    /// Action that opens the contact info overlay
    pub contact_info_trigger: String,
    /// Anchors inside the contact info overlay
    pub contact_links: String,
    /// Action that closes the contact info overlay
    pub overlay_dismiss: String,
    /// Candidate section elements for experience and education
    pub section: String,
    /// Marker inside the experience section
    pub experience_anchor: String,
    /// Marker inside the education section
    pub education_anchor: String,
    /// One entry (company or school) within a section
    pub list_entry: String,
    /// One role nested under a company entry
    pub role_sub_entry: String,
    /// Company name within a company entry holding several roles
    pub company_name: String,
    /// Visible text spans within any entry
    pub text_span: String,
}

impl Default for ProfileSelectors {
    fn default() -> Self {
        Self {
            name: ".artdeco-hoverable-trigger.artdeco-hoverable-trigger--content-placed-bottom.artdeco-hoverable-trigger--is-hoverable.ember-view".to_string(),
            location: ".text-body-small.inline.t-black--light.break-words".to_string(),
            contact_info_trigger: "#top-card-text-details-contact-info".to_string(),
            contact_links: ".pv-profile-section__section-info.section-info a".to_string(),
            overlay_dismiss: r##"svg use[href="#close-medium"]"##.to_string(),
            section: "section".to_string(),
            experience_anchor: "div#experience".to_string(),
            education_anchor: "div#education".to_string(),
            list_entry: "li.artdeco-list__item".to_string(),
            role_sub_entry: "div.pvs-entity__sub-components li div.display-flex.flex-column.full-width.align-self-center".to_string(),
            company_name: r#"a[data-field="experience_company_logo"] span"#.to_string(),
            text_span: r#"span[aria-hidden="true"]"#.to_string(),
        }
    }
}

impl ProfileSelectors {
    /// Load selector overrides from a JSON file
    pub fn from_json_file(path: &std::path::Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Read-only view of one rendered profile page.
///
/// Implementations may suspend on every call (a live browser does); the
/// extractor only ever issues them one at a time.
#[async_trait(?Send)]
pub trait PageQuery {
    /// Opaque handle to an element on the page
    type Element;

    /// Text content of the first element matching `selector`
    async fn get_text(&self, selector: &str) -> Result<Option<String>, PageError>;

    /// All elements matching `selector`, in document order
    async fn get_all(&self, selector: &str) -> Result<Vec<Self::Element>, PageError>;

    /// All descendants of `scope` matching `selector`, in document order
    async fn get_all_within(
        &self,
        scope: &Self::Element,
        selector: &str,
    ) -> Result<Vec<Self::Element>, PageError>;

    /// Text content of the first descendant of `scope` matching `selector`
    async fn get_text_within(
        &self,
        scope: &Self::Element,
        selector: &str,
    ) -> Result<Option<String>, PageError>;

    async fn get_attribute(
        &self,
        element: &Self::Element,
        name: &str,
    ) -> Result<Option<String>, PageError>;

    /// Trimmed text of every visible span under `scope`, in document order
    async fn get_text_spans(
        &self,
        scope: &Self::Element,
        selector: &str,
    ) -> Result<Vec<String>, PageError>;

    /// Perform a UI action (click) on the element matching `selector`
    async fn invoke_action(&self, selector: &str) -> Result<(), PageError>;
}

/// Destination for extracted contacts (the CRM)
#[async_trait]
pub trait ContactSink: Send + Sync {
    /// Create a contact for `profile` unless the sink flags it as a duplicate
    ///
    /// # Returns
    /// * `Result<SubmitOutcome>` - whether the contact was created or flagged
    async fn submit(&self, search_name: &str, profile: &ProfileRecord) -> Result<SubmitOutcome>;
}
