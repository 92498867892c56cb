//! Draft state for the add-trip-point form.
//!
//! The draft owns every editable value together with its per-field
//! validation error. Address fields are place-owned while a place
//! reference is attached and become editable again only after the
//! reference is cleared.

use chrono::{Local, NaiveTime};
use traveler_api::endpoints::categories::{is_allowed_category, DEFAULT_CATEGORY_NAME};
use traveler_api::endpoints::places::PlaceDetails;
use traveler_api::endpoints::ProviderId;

use crate::state::validators;
use crate::utils::time::{add_hour_same_day, round_to_quarter_hour};

/// A single form value with its touched flag and validation error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Field<T> {
    pub value: T,
    pub touched: bool,
    pub error: Option<String>,
}

impl<T> Field<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            touched: false,
            error: None,
        }
    }

    /// User-driven edit. Marks the field as touched.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.touched = true;
    }

    /// Programmatic fill (place resolution). Does not mark touched.
    pub fn fill(&mut self, value: T) {
        self.value = value;
        self.error = None;
    }
}

/// Whether the cost input is per person or for the whole group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CostType {
    #[default]
    PerPerson,
    Total,
}

impl CostType {
    pub fn toggle(self) -> Self {
        match self {
            CostType::PerPerson => CostType::Total,
            CostType::Total => CostType::PerPerson,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CostType::PerPerson => "per person",
            CostType::Total => "total",
        }
    }
}

/// Compact handle to a selected place, kept for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceReference {
    pub provider_id: ProviderId,
    pub display_name: String,
}

/// Every field of the in-progress trip point.
#[derive(Debug, Clone, PartialEq)]
pub struct TripPointDraft {
    pub name: Field<String>,
    pub category_name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub time_error: Option<String>,
    pub country: Field<String>,
    pub state_region: Field<String>,
    pub city: Field<String>,
    pub street: Field<String>,
    pub house_number: Field<String>,
    pub cost_input: Field<String>,
    pub cost_type: CostType,
    pub comment: Field<String>,
    pub place: Option<PlaceReference>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl TripPointDraft {
    /// Fresh draft with the start rounded to the nearest quarter hour
    /// and the end one hour later.
    pub fn new() -> Self {
        Self::starting_at(Local::now().time())
    }

    pub fn starting_at(time: NaiveTime) -> Self {
        let start = round_to_quarter_hour(time);
        Self {
            name: Field::default(),
            category_name: DEFAULT_CATEGORY_NAME.to_string(),
            start_time: start,
            end_time: add_hour_same_day(start),
            time_error: None,
            country: Field::default(),
            state_region: Field::default(),
            city: Field::default(),
            street: Field::default(),
            house_number: Field::default(),
            cost_input: Field::default(),
            cost_type: CostType::default(),
            comment: Field::default(),
            place: None,
            latitude: None,
            longitude: None,
        }
    }

    pub fn set_name(&mut self, value: String) {
        self.name.set(value);
        self.name.error = validators::validate_name(&self.name.value).err();
    }

    /// Moving the start past the end drags the end along with it.
    pub fn set_start_time(&mut self, time: NaiveTime) {
        self.start_time = time;
        if self.end_time < self.start_time {
            self.end_time = self.start_time;
        }
        self.revalidate_times();
    }

    /// Moving the end never adjusts the start. An end before the start
    /// is kept and flagged as a time error instead.
    pub fn set_end_time(&mut self, time: NaiveTime) {
        self.end_time = time;
        self.revalidate_times();
    }

    fn revalidate_times(&mut self) {
        self.time_error = validators::validate_time_range(self.start_time, self.end_time).err();
    }

    pub fn set_cost_input(&mut self, value: String) {
        self.cost_input.set(value);
        self.cost_input.error = validators::validate_cost(&self.cost_input.value).err();
    }

    /// Address fields accept input only while no place reference is
    /// attached.
    pub fn address_editable(&self) -> bool {
        self.place.is_none()
    }

    /// Attach a resolved place. Name, address, coordinates and category
    /// are overwritten as one unit; absent source values clear the
    /// target field rather than leaving stale data behind.
    pub fn apply_place(&mut self, details: &PlaceDetails) {
        self.place = Some(PlaceReference {
            provider_id: details.provider_id.clone(),
            display_name: details.title.clone().unwrap_or_default(),
        });

        if let Some(title) = &details.title {
            if !title.trim().is_empty() {
                self.name.fill(title.clone());
            }
        }

        self.country.fill(details.country.clone().unwrap_or_default());
        self.state_region.fill(details.state.clone().unwrap_or_default());
        self.city.fill(details.city.clone().unwrap_or_default());
        self.street.fill(details.street.clone().unwrap_or_default());
        self.house_number
            .fill(details.house_number.clone().unwrap_or_default());
        self.latitude = details.latitude;
        self.longitude = details.longitude;
        self.category_name = resolve_category_name(details);
    }

    /// Switch to manual entry. The reference and coordinates are
    /// dropped but already-filled fields stay put for editing.
    pub fn clear_place_reference(&mut self) {
        self.place = None;
        self.latitude = None;
        self.longitude = None;
    }

    /// Skip the place entirely. Address data is reset as well.
    pub fn reset_place(&mut self) {
        self.clear_place_reference();
        self.country = Field::default();
        self.state_region = Field::default();
        self.city = Field::default();
        self.street = Field::default();
        self.house_number = Field::default();
    }
}

impl Default for TripPointDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// Category for a resolved place: the provider's super-category name
/// when present, otherwise the first attribute that matches a known
/// category, otherwise the generic fallback.
pub fn resolve_category_name(details: &PlaceDetails) -> String {
    if let Some(super_category) = &details.super_category {
        if let Some(name) = &super_category.name {
            let name = name.trim().to_lowercase();
            if !name.is_empty() {
                return name;
            }
        }
    }

    details
        .attributes
        .iter()
        .filter_map(|attribute| attribute.kind.as_deref())
        .map(|kind| kind.trim().to_lowercase())
        .find(|kind| is_allowed_category(kind))
        .unwrap_or_else(|| DEFAULT_CATEGORY_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use traveler_api::endpoints::places::{PlaceAttribute, SuperCategory};

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn place(title: &str) -> PlaceDetails {
        PlaceDetails {
            provider_id: ProviderId::from("p-1".to_string()),
            title: Some(title.to_string()),
            subtitle: Some("Somewhere".to_string()),
            country: Some("France".to_string()),
            state: None,
            city: Some("Paris".to_string()),
            street: Some("Rue de Rivoli".to_string()),
            house_number: Some("99".to_string()),
            latitude: Some(48.86),
            longitude: Some(2.33),
            super_category: None,
            attributes: vec![],
        }
    }

    #[test]
    fn start_past_end_drags_end_forward() {
        let mut draft = TripPointDraft::starting_at(time(10, 0));
        draft.set_end_time(time(11, 0));
        draft.set_start_time(time(12, 30));
        assert_eq!(draft.end_time, time(12, 30));
        assert!(draft.time_error.is_none());
    }

    #[test]
    fn end_before_start_is_flagged_not_corrected() {
        let mut draft = TripPointDraft::starting_at(time(10, 0));
        draft.set_end_time(time(9, 0));
        assert_eq!(draft.start_time, time(10, 0));
        assert_eq!(draft.end_time, time(9, 0));
        assert!(draft.time_error.is_some());
    }

    #[test]
    fn apply_place_overwrites_address_and_locks_it() {
        let mut draft = TripPointDraft::starting_at(time(10, 0));
        draft.city.set("Old town".to_string());
        draft.apply_place(&place("Louvre"));
        assert_eq!(draft.name.value, "Louvre");
        assert_eq!(draft.city.value, "Paris");
        assert_eq!(draft.state_region.value, "");
        assert!(!draft.address_editable());
    }

    #[test]
    fn clear_reference_keeps_fields_reset_clears_them() {
        let mut draft = TripPointDraft::starting_at(time(10, 0));
        draft.apply_place(&place("Louvre"));

        let mut manual = draft.clone();
        manual.clear_place_reference();
        assert!(manual.address_editable());
        assert_eq!(manual.city.value, "Paris");

        draft.reset_place();
        assert!(draft.address_editable());
        assert_eq!(draft.city.value, "");
    }

    #[test]
    fn category_prefers_super_category_then_attributes() {
        let mut details = place("Museum of Things");
        details.super_category = Some(SuperCategory {
            name: Some("Museum".to_string()),
        });
        assert_eq!(resolve_category_name(&details), "museum");

        details.super_category = Some(SuperCategory { name: None });
        details.attributes = vec![
            PlaceAttribute {
                kind: Some("wheelchair-accessible".to_string()),
            },
            PlaceAttribute {
                kind: Some("gallery".to_string()),
            },
        ];
        assert_eq!(resolve_category_name(&details), "gallery");

        details.attributes.clear();
        assert_eq!(resolve_category_name(&details), DEFAULT_CATEGORY_NAME);
    }
}
