//! Pure normalizers turning raw profile text into structured fields

mod contact;
mod location;
mod name;
mod tenure;

pub use contact::classify_links;
pub use location::parse_location;
pub use name::split_name;
pub use tenure::{parse_tenure, parse_year_only, strip_separator_suffix};
