use super::{Money, TripDayId, TripId, TripPointId};
use crate::macros::setter;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Method, Request, RequestData};

// Common

/// Place payload nested inside a trip point. Assembled either from a resolved
/// catalog place or from manually entered address fields.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPointPlace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPointDetails {
    pub id: TripPointId,
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    #[serde(default)]
    pub predicted_cost: Money,
    #[serde(default)]
    pub place: Option<TripPointPlace>,
}

// Requests

#[derive(Debug, Clone, Serialize)]
pub struct CreateTripPoint {
    #[serde(skip)]
    trip_id: TripId,
    #[serde(skip)]
    day_id: TripDayId,
    trip_point: NewTripPoint,
}

impl CreateTripPoint {
    pub fn new(trip_id: TripId, day_id: TripDayId, trip_point: NewTripPoint) -> Self {
        Self {
            trip_id,
            day_id,
            trip_point,
        }
    }
}

impl Request for CreateTripPoint {
    type Data = Self;
    type Response = TripPointResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/trips/{}/days/{}/trip-points", self.trip_id, self.day_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTripPoint {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub predicted_cost: Money,
    pub place: TripPointPlace,
}

impl NewTripPoint {
    pub fn new(name: impl Into<String>, start_time: NaiveDateTime, end_time: NaiveDateTime) -> Self {
        Self {
            name: name.into(),
            comment: None,
            category_name: None,
            start_time,
            end_time,
            predicted_cost: Money::default(),
            place: TripPointPlace::default(),
        }
    }

    setter!(opt comment: String);
    setter!(opt category_name: String);
    setter!(predicted_cost: Money);
    setter!(place: TripPointPlace);
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPointResponse {
    pub data: TripPointData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPointData {
    pub trip_point: TripPointDetails,
}
