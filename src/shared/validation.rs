use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating report category slugs
    /// Must be lowercase alphanumeric with hyphens or underscores between segments
    /// - Valid: "pothole", "street-light", "waste_management"
    /// - Invalid: "-pothole", "pothole-", "Pothole", "pot hole"
    pub static ref CATEGORY_REGEX: Regex =
        Regex::new(r"^[a-z0-9]+(?:[-_][a-z0-9]+)*$").unwrap();
}

/// Longitude must be within [-180, 180]
pub fn is_valid_longitude(longitude: f64) -> bool {
    longitude.is_finite() && (-180.0..=180.0).contains(&longitude)
}

/// Latitude must be within [-90, 90]
pub fn is_valid_latitude(latitude: f64) -> bool {
    latitude.is_finite() && (-90.0..=90.0).contains(&latitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_regex_valid() {
        assert!(CATEGORY_REGEX.is_match("pothole"));
        assert!(CATEGORY_REGEX.is_match("street-light"));
        assert!(CATEGORY_REGEX.is_match("waste_management"));
        assert!(CATEGORY_REGEX.is_match("drainage2"));
    }

    #[test]
    fn test_category_regex_invalid() {
        assert!(!CATEGORY_REGEX.is_match("-pothole")); // starts with hyphen
        assert!(!CATEGORY_REGEX.is_match("pothole-")); // ends with hyphen
        assert!(!CATEGORY_REGEX.is_match("Pothole")); // uppercase
        assert!(!CATEGORY_REGEX.is_match("pot hole")); // space
        assert!(!CATEGORY_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_coordinate_bounds() {
        assert!(is_valid_longitude(106.8456));
        assert!(is_valid_longitude(-180.0));
        assert!(is_valid_longitude(180.0));
        assert!(!is_valid_longitude(180.01));
        assert!(!is_valid_longitude(f64::NAN));

        assert!(is_valid_latitude(-6.2088));
        assert!(is_valid_latitude(90.0));
        assert!(!is_valid_latitude(-90.5));
        assert!(!is_valid_latitude(f64::INFINITY));
    }
}
