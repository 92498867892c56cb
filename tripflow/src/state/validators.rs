//! Field validation and submission payload assembly for the
//! add-trip-point form.

use chrono::{NaiveDate, NaiveTime};
use traveler_api::endpoints::trip_points::{NewTripPoint, TripPointPlace};
use traveler_api::endpoints::Money;

use crate::state::form::{CostType, TripPointDraft};
use crate::state::navigation::{first_invalid_section, Section};

pub const NAME_REQUIRED: &str = "Name is required";
pub const TIME_RANGE_INVALID: &str = "End time must not be before start time";
pub const COST_INVALID: &str = "Cost must be a non-negative number";

pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        Err(NAME_REQUIRED.to_string())
    } else {
        Ok(())
    }
}

pub fn validate_time_range(start: NaiveTime, end: NaiveTime) -> Result<(), String> {
    if end < start {
        Err(TIME_RANGE_INVALID.to_string())
    } else {
        Ok(())
    }
}

/// Parse a cost entry. Empty input means "no cost" and is valid.
/// Accepts a comma as decimal separator.
pub fn parse_cost(input: &str) -> Result<Option<f64>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let normalized = trimmed.replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(Some(value)),
        _ => Err(COST_INVALID.to_string()),
    }
}

pub fn validate_cost(input: &str) -> Result<(), String> {
    parse_cost(input).map(|_| ())
}

/// Validate the whole draft and assemble the creation payload.
///
/// Per-person costs are multiplied by the traveler count here and
/// nowhere else; the draft keeps the entered per-person value.
pub fn build_trip_point(
    draft: &TripPointDraft,
    day_date: NaiveDate,
    number_of_travelers: u32,
) -> Result<NewTripPoint, (Section, String)> {
    if let Some(invalid) = first_invalid_section(draft) {
        return Err(invalid);
    }

    let start_time = day_date.and_time(draft.start_time);
    let end_time = day_date.and_time(draft.end_time);

    let mut trip_point = NewTripPoint::new(draft.name.value.trim(), start_time, end_time)
        .category_name(draft.category_name.clone())
        .place(build_place(draft));

    // first_invalid_section already rejected unparseable cost input
    if let Ok(Some(entered)) = parse_cost(&draft.cost_input.value) {
        let total = match draft.cost_type {
            CostType::PerPerson => entered * f64::from(number_of_travelers.max(1)),
            CostType::Total => entered,
        };
        trip_point = trip_point.predicted_cost(Money::from(total));
    }

    let comment = draft.comment.value.trim();
    if !comment.is_empty() {
        trip_point = trip_point.comment(comment.to_string());
    }

    Ok(trip_point)
}

fn build_place(draft: &TripPointDraft) -> TripPointPlace {
    TripPointPlace {
        name: draft
            .place
            .as_ref()
            .map(|reference| reference.display_name.clone())
            .filter(|name| !name.is_empty()),
        country: non_empty(&draft.country.value),
        state: non_empty(&draft.state_region.value),
        city: non_empty(&draft.city.value),
        street: non_empty(&draft.street.value),
        house_number: non_empty(&draft.house_number.value),
        latitude: draft.latitude,
        longitude: draft.longitude,
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, 14).unwrap()
    }

    fn valid_draft() -> TripPointDraft {
        let mut draft = TripPointDraft::starting_at(time(10, 0));
        draft.set_name("Louvre".to_string());
        draft
    }

    #[test]
    fn cost_parsing_accepts_comma_and_rejects_garbage() {
        assert_eq!(parse_cost(""), Ok(None));
        assert_eq!(parse_cost("  "), Ok(None));
        assert_eq!(parse_cost("12.5"), Ok(Some(12.5)));
        assert_eq!(parse_cost("12,5"), Ok(Some(12.5)));
        assert!(parse_cost("-3").is_err());
        assert!(parse_cost("abc").is_err());
    }

    #[test]
    fn per_person_cost_is_scaled_by_travelers() {
        let mut draft = valid_draft();
        draft.set_cost_input("12.50".to_string());
        let trip_point = build_trip_point(&draft, day(), 4).unwrap();
        assert_eq!(trip_point.predicted_cost, Money::from(50.0));

        draft.cost_type = CostType::Total;
        let trip_point = build_trip_point(&draft, day(), 4).unwrap();
        assert_eq!(trip_point.predicted_cost, Money::from(12.5));
    }

    #[test]
    fn whitespace_only_name_is_rejected() {
        assert_eq!(validate_name("   "), Err(NAME_REQUIRED.to_string()));

        let mut draft = TripPointDraft::starting_at(time(10, 0));
        draft.set_name("   ".to_string());
        let (section, message) = build_trip_point(&draft, day(), 1).unwrap_err();
        assert_eq!(section, Section::Basic);
        assert_eq!(message, NAME_REQUIRED);
    }

    #[test]
    fn missing_name_blocks_submission() {
        let draft = TripPointDraft::starting_at(time(10, 0));
        let (section, message) = build_trip_point(&draft, day(), 1).unwrap_err();
        assert_eq!(section, Section::Basic);
        assert_eq!(message, NAME_REQUIRED);
    }

    #[test]
    fn times_are_anchored_to_the_day_date() {
        let mut draft = valid_draft();
        draft.set_end_time(time(11, 30));
        let trip_point = build_trip_point(&draft, day(), 1).unwrap();
        assert_eq!(trip_point.start_time, day().and_time(time(10, 0)));
        assert_eq!(trip_point.end_time, day().and_time(time(11, 30)));
    }

    #[test]
    fn empty_address_fields_are_omitted() {
        let mut draft = valid_draft();
        draft.city.set("Paris".to_string());
        let trip_point = build_trip_point(&draft, day(), 1).unwrap();
        assert_eq!(trip_point.place.city.as_deref(), Some("Paris"));
        assert_eq!(trip_point.place.country, None);
        assert_eq!(trip_point.place.name, None);
    }
}
