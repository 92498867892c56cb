//! Result filtering for place search and recommendations.

use traveler_api::endpoints::places::PlaceSummary;

/// Minimum query length before a search request is issued.
pub const MIN_QUERY_LEN: usize = 3;

/// Drop catalog entries that cannot be displayed or resolved: missing
/// title or subtitle, or a placeholder provider id.
pub fn filter_usable_places(places: Vec<PlaceSummary>) -> Vec<PlaceSummary> {
    places
        .into_iter()
        .filter(|place| {
            !place.provider_id.is_placeholder()
                && place.title.as_deref().is_some_and(|t| !t.trim().is_empty())
                && place
                    .subtitle
                    .as_deref()
                    .is_some_and(|s| !s.trim().is_empty())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use traveler_api::endpoints::ProviderId;

    fn summary(id: &str, title: Option<&str>, subtitle: Option<&str>) -> PlaceSummary {
        PlaceSummary {
            provider_id: ProviderId::from(id),
            title: title.map(str::to_string),
            subtitle: subtitle.map(str::to_string),
        }
    }

    #[test]
    fn filters_incomplete_entries() {
        let places = vec![
            summary("p-1", Some("Louvre"), Some("Paris, France")),
            summary("null", Some("Ghost"), Some("Nowhere")),
            summary("p-2", None, Some("Paris, France")),
            summary("p-3", Some("Blank subtitle"), Some("  ")),
            summary("", Some("Empty id"), Some("Somewhere")),
        ];

        let usable = filter_usable_places(places);
        assert_eq!(usable.len(), 1);
        assert_eq!(usable[0].provider_id.as_str(), "p-1");
    }
}
