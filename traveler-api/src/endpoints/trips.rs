use super::{TripDayId, TripId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Request, RequestData};

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSummary {
    pub id: TripId,
    pub name: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_travelers")]
    pub number_of_travelers: u32,
    #[serde(default)]
    pub currency_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDetails {
    pub id: TripId,
    pub name: String,
    #[serde(default = "default_travelers")]
    pub number_of_travelers: u32,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub days: Vec<TripDaySummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDaySummary {
    pub id: TripDayId,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

fn default_travelers() -> u32 {
    1
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListTrips;

impl ListTrips {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Request for ListTrips {
    type Data = ();
    type Response = TripsResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/trips".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Empty
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetTrip {
    trip_id: TripId,
}

impl GetTrip {
    pub fn new(trip_id: TripId) -> Self {
        Self { trip_id }
    }
}

impl Request for GetTrip {
    type Data = ();
    type Response = TripResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/trips/{}", self.trip_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Empty
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripsResponse {
    pub data: TripsData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripsData {
    pub trips: Vec<TripSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripResponse {
    pub data: TripData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripData {
    pub trip: TripDetails,
}
