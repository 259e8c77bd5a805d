//! Full-name splitting

use crate::error::ExtractionError;

const PREFIXES: &[&str] = &["Dr. ", "Dr "];

/// Credential markers. Comma forms come first so that ", Ph.D" is not
/// consumed as " Ph.D" and leave a dangling comma.
const SUFFIXES: &[&str] = &[
    ", CPA", ", Esq.", ", MBA", ", M.D.", ", PhD", ", Ph.D", " CPA", " Esq.", " MBA", " M.D.",
    " PhD", " Ph.D",
];

/// Split a display name into `(first, last)`.
///
/// Strips one honorific prefix and any number of credential suffixes. Middle
/// names and initials stay with the first name.
///
/// # Errors
/// `InvalidName` when fewer than two words remain.
pub fn split_name(full_name: &str) -> Result<(String, String), ExtractionError> {
    let mut name = PREFIXES
        .iter()
        .find_map(|prefix| full_name.strip_prefix(prefix))
        .unwrap_or(full_name);

    while let Some(stripped) = SUFFIXES.iter().find_map(|suffix| name.strip_suffix(suffix)) {
        name = stripped;
    }

    let tokens: Vec<&str> = name.split(' ').filter(|t| !t.is_empty()).collect();
    match tokens.as_slice() {
        [] | [_] => Err(ExtractionError::InvalidName(full_name.to_string())),
        [first @ .., last] => Ok((first.join(" "), (*last).to_string())),
    }
}
