pub mod endpoints;
mod error;
mod macros;
pub mod repositories;

pub use crate::error::{ErrorDetail, TravelerApiError, OVERLAP_SENTINEL};
use repositories::*;
use tower_api_client::{Client as ApiClient, Request as ApiRequest};

const BASE_URL: &str = "https://api.travelmate.app/v1";

pub struct Client {
    inner: ApiClient,
}

impl Client {
    pub fn new(access_token: &str) -> Self {
        Self::with_base_url(BASE_URL, access_token)
    }

    pub fn with_base_url(base_url: &str, access_token: &str) -> Self {
        Self {
            inner: ApiClient::new(base_url).bearer_auth(access_token),
        }
    }

    pub async fn send<R>(&self, request: R) -> Result<R::Response, TravelerApiError>
    where
        R: ApiRequest,
    {
        self.inner.send(request).await.map_err(From::from)
    }
}

pub struct Request;

impl Request {
    pub fn new() -> Self {
        Self {}
    }

    pub fn categories() -> CategoryRepository {
        CategoryRepository::new()
    }

    pub fn places() -> PlaceRepository {
        PlaceRepository::new()
    }

    pub fn trip_days() -> TripDayRepository {
        TripDayRepository::new()
    }

    pub fn trip_points() -> TripPointRepository {
        TripPointRepository::new()
    }

    pub fn trips() -> TripRepository {
        TripRepository::new()
    }
}
