use serde::{Deserialize, Serialize};

/// Geographic location attached to a match
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// City name
    #[serde(default)]
    pub city: Option<String>,

    /// Full country name
    #[serde(default)]
    pub country_name: Option<String>,

    /// Two-letter country code (ISO 3166-1 alpha-2)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,

    /// Region/state code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_code: Option<String>,

    /// Latitude coordinate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    /// Longitude coordinate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl GeoLocation {
    /// Returns true if neither city nor country is known
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        self.city.is_none() && self.country_name.is_none()
    }

    /// `"City, Country"` with `N/A` standing in for missing parts
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}, {}",
            self.city.as_deref().unwrap_or("N/A"),
            self.country_name.as_deref().unwrap_or("N/A")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_fills_missing_parts() {
        let loc = GeoLocation {
            city: Some("Paris".into()),
            ..Default::default()
        };
        assert_eq!(loc.summary(), "Paris, N/A");
        assert!(!loc.is_unknown());
        assert!(GeoLocation::default().is_unknown());
    }
}
