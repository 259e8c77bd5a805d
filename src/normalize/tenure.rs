//! Tenure (date range) parsing

use crate::error::ExtractionError;

const RANGE_SEPARATOR: &str = " - ";
const ONGOING: &str = "Present";

/// Separators that introduce trailing metadata such as "· 5 yrs 2 mos" or
/// "· Full-time". The second form is the same middle dot mis-decoded as Latin-1.
const SUFFIX_SEPARATORS: &[&str] = &[" \u{b7} ", " \u{c2}\u{b7} "];

/// Length of a "MMM YYYY" token
const MONTH_YEAR_LEN: usize = 8;
const MONTH_PREFIX_LEN: usize = 4;

/// Truncate `raw` at the first middle-dot separator, if any.
pub fn strip_separator_suffix(raw: &str) -> &str {
    SUFFIX_SEPARATORS
        .iter()
        .filter_map(|sep| raw.find(sep))
        .min()
        .map_or(raw, |idx| &raw[..idx])
}

/// Split a tenure string into start and end; an end of "Present" becomes `None`.
///
/// # Errors
/// `MalformedDateRange` unless the string has exactly one `" - "` separator.
pub fn parse_tenure(raw: &str) -> Result<(String, Option<String>), ExtractionError> {
    let mut parts = raw.split(RANGE_SEPARATOR);
    let (Some(start), Some(end), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ExtractionError::MalformedDateRange(raw.to_string()));
    };

    let end = strip_separator_suffix(end);
    let end = (end != ONGOING).then(|| end.to_string());

    Ok((start.to_string(), end))
}

/// Like [`parse_tenure`], but "MMM YYYY" tokens are reduced to the bare year.
pub fn parse_year_only(raw: &str) -> Result<(String, Option<String>), ExtractionError> {
    let (start, end) = parse_tenure(raw)?;
    Ok((year_of(start), end.map(year_of)))
}

fn year_of(token: String) -> String {
    if token.chars().count() == MONTH_YEAR_LEN {
        token.chars().skip(MONTH_PREFIX_LEN).collect()
    } else {
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ongoing_role_has_no_end() {
        let (start, end) = parse_tenure("Jan 2019 - Present").unwrap();
        assert_eq!(start, "Jan 2019");
        assert_eq!(end, None);
    }

    #[test]
    fn year_range_passes_through() {
        let (start, end) = parse_tenure("2015 - 2020").unwrap();
        assert_eq!(start, "2015");
        assert_eq!(end.as_deref(), Some("2020"));
    }

    #[test]
    fn duration_suffix_is_stripped_from_end() {
        let (start, end) = parse_tenure("Mar 2017 - Present \u{b7} 7 yrs 2 mos").unwrap();
        assert_eq!(start, "Mar 2017");
        assert_eq!(end, None);

        let (_, end) = parse_tenure("Mar 2017 - Jun 2020 \u{c2}\u{b7} 3 yrs 4 mos").unwrap();
        assert_eq!(end.as_deref(), Some("Jun 2020"));
    }

    #[test]
    fn missing_separator_is_an_error() {
        assert!(matches!(
            parse_tenure("Jan 2019"),
            Err(ExtractionError::MalformedDateRange(raw)) if raw == "Jan 2019"
        ));
        assert!(matches!(
            parse_tenure("2010 - 2012 - 2014"),
            Err(ExtractionError::MalformedDateRange(_))
        ));
    }

    #[test]
    fn year_only_drops_month() {
        let (start, end) = parse_year_only("Jan 2019 - Present").unwrap();
        assert_eq!(start, "2019");
        assert_eq!(end, None);

        let (start, end) = parse_year_only("Sep 2012 - May 2016").unwrap();
        assert_eq!(start, "2012");
        assert_eq!(end.as_deref(), Some("2016"));
    }

    #[test]
    fn year_only_is_idempotent() {
        let (start, end) = parse_year_only("Aug 2008 - Jun 2012").unwrap();
        let rejoined = format!("{start} - {}", end.unwrap());
        let (again_start, again_end) = parse_year_only(&rejoined).unwrap();
        assert_eq!(again_start, "2008");
        assert_eq!(again_end.as_deref(), Some("2012"));
    }

    #[test]
    fn company_suffix_is_stripped() {
        assert_eq!(strip_separator_suffix("Acme Corp \u{b7} Full-time"), "Acme Corp");
        assert_eq!(strip_separator_suffix("Acme Corp"), "Acme Corp");
    }
}
