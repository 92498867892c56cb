use super::trip_points::TripPointDetails;
use super::{TripDayId, TripId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Request, RequestData};

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDayDetails {
    pub id: TripDayId,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub trip_points: Vec<TripPointDetails>,
}

// Requests

#[derive(Debug, Clone, Serialize)]
pub struct GetTripDay {
    trip_id: TripId,
    day_id: TripDayId,
}

impl GetTripDay {
    pub fn new(trip_id: TripId, day_id: TripDayId) -> Self {
        Self { trip_id, day_id }
    }
}

impl Request for GetTripDay {
    type Data = ();
    type Response = TripDayResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/trips/{}/days/{}", self.trip_id, self.day_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Empty
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripDayResponse {
    pub data: TripDayData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripDayData {
    pub trip_day: TripDayDetails,
}
