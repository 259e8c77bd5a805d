use crate::models::Location;

const PART_SEPARATOR: &str = ", ";
const METRO_MARKER: &str = "Area";

/// Parse a profile location line such as "Austin, Texas, United States".
///
/// A lone part is a country unless it names a metro area ("Greater Boston
/// Area"), in which case it is kept as the city.
pub fn parse_location(raw: &str) -> Location {
    if raw.is_empty() {
        return Location::default();
    }

    let parts: Vec<&str> = raw.split(PART_SEPARATOR).collect();

    match parts.as_slice() {
        [only] if only.contains(METRO_MARKER) => Location {
            city: owned(only),
            ..Location::default()
        },
        [only] => Location {
            country: owned(only),
            ..Location::default()
        },
        [city, country] => Location {
            city: owned(city),
            state: None,
            country: owned(country),
        },
        [city, state, country, ..] => Location {
            city: owned(city),
            state: owned(state),
            country: owned(country),
        },
        [] => Location::default(),
    }
}

fn owned(part: &str) -> Option<String> {
    Some(part.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(city: Option<&str>, state: Option<&str>, country: Option<&str>) -> Location {
        Location {
            city: city.map(String::from),
            state: state.map(String::from),
            country: country.map(String::from),
        }
    }

    #[test]
    fn city_state_country() {
        assert_eq!(
            parse_location("San Francisco, CA, United States"),
            loc(Some("San Francisco"), Some("CA"), Some("United States"))
        );
    }

    #[test]
    fn country_only() {
        assert_eq!(parse_location("Germany"), loc(None, None, Some("Germany")));
    }

    #[test]
    fn city_and_country() {
        assert_eq!(parse_location("Berlin, Germany"), loc(Some("Berlin"), None, Some("Germany")));
    }

    #[test]
    fn metro_area_is_a_city() {
        assert_eq!(
            parse_location("San Francisco Bay Area"),
            loc(Some("San Francisco Bay Area"), None, None)
        );
    }

    #[test]
    fn extra_parts_are_ignored() {
        assert_eq!(
            parse_location("Brooklyn, New York, NY, United States"),
            loc(Some("Brooklyn"), Some("New York"), Some("NY"))
        );
    }

    #[test]
    fn empty_line_has_no_fields() {
        assert_eq!(parse_location(""), Location::default());
    }
}
