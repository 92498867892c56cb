use super::{ProviderId, TripId};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Request, RequestData};

// Common

/// Full place/attraction record from the external catalog.
///
/// The catalog is loose about which fields it populates, so every field
/// defaults rather than failing deserialization.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub provider_id: ProviderId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub house_number: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub super_category: Option<SuperCategory>,
    #[serde(default)]
    pub attributes: Vec<PlaceAttribute>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuperCategory {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceAttribute {
    #[serde(default)]
    pub kind: Option<String>,
}

/// Compact summary returned by autocomplete and recommendation queries.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSummary {
    #[serde(default)]
    pub provider_id: ProviderId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
}

// Requests

/// Lookup for a place selected in-flow from search or recommendations.
#[derive(Debug, Clone, Serialize)]
pub struct GetPlace {
    provider_id: ProviderId,
}

impl GetPlace {
    pub fn new(provider_id: ProviderId) -> Self {
        Self { provider_id }
    }
}

impl Request for GetPlace {
    type Data = ();
    type Response = PlaceResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/places/{}", self.provider_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Empty
    }
}

/// Lookup for an attraction referenced by a deep link.
///
/// Hits a different backend resource than [`GetPlace`]; the two are kept as
/// distinct requests on purpose.
#[derive(Debug, Clone, Serialize)]
pub struct GetAttraction {
    provider_id: ProviderId,
}

impl GetAttraction {
    pub fn new(provider_id: ProviderId) -> Self {
        Self { provider_id }
    }
}

impl Request for GetAttraction {
    type Data = ();
    type Response = PlaceResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/attractions/{}", self.provider_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Empty
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AutocompletePlaces {
    query: String,
}

impl AutocompletePlaces {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

impl Request for AutocompletePlaces {
    type Data = Self;
    type Response = PlaceListResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/places/autocomplete".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetRecommendations {
    trip_id: TripId,
}

impl GetRecommendations {
    pub fn new(trip_id: TripId) -> Self {
        Self { trip_id }
    }
}

impl Request for GetRecommendations {
    type Data = ();
    type Response = PlaceListResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/trips/{}/recommendations", self.trip_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Empty
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceResponse {
    pub data: PlaceData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceData {
    pub place: PlaceDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceListResponse {
    pub data: PlaceListData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceListData {
    pub places: Vec<PlaceSummary>,
}
