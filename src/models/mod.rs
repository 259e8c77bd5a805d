//! Data models for extracted profiles and sink outcomes

use serde::{Deserialize, Serialize};

/// One profile's extracted data, built fresh per visit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub first_name: String,
    pub last_name: String,
    pub location: Location,
    pub contact: Contact,
    /// Most recent first, as displayed on the profile
    pub experience: Vec<Role>,
    pub education: Vec<EducationRecord>,
}

impl ProfileRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub email: Option<String>,
    pub profile_url: Option<String>,
}

/// A single position held at a company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub title: String,
    pub company: String,
    pub start_date: Option<String>,
    /// `None` when the role is ongoing ("Present")
    pub end_date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationRecord {
    pub school_name: String,
    pub degree: Option<String>,
    pub start_year: Option<String>,
    pub end_year: Option<String>,
    pub description: Option<String>,
}

/// What the contact sink decided about a submitted record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Duplicate,
}
