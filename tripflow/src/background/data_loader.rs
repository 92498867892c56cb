use crate::events::DataEvent;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use traveler_api::endpoints::{trip_points::NewTripPoint, ProviderId, TripDayId, TripId};
use traveler_api::{Client, Request};

/// Delay between the last keystroke and the autocomplete request.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Runs API calls off the UI task and reports back via data events
#[derive(Clone)]
pub struct DataLoader {
    pub api_client: Arc<Client>,
    pub data_tx: mpsc::UnboundedSender<DataEvent>,
}

impl DataLoader {
    pub fn new(api_client: Arc<Client>, data_tx: mpsc::UnboundedSender<DataEvent>) -> Self {
        Self {
            api_client,
            data_tx,
        }
    }

    pub async fn load_trips(&self) {
        tracing::info!("Loading trips");
        match self.api_client.send(Request::trips().list()).await {
            Ok(response) => {
                tracing::info!("Loaded {} trips", response.data.trips.len());
                let _ = self.data_tx.send(DataEvent::TripsLoaded {
                    trips: response.data.trips,
                });
            }
            Err(e) => {
                tracing::error!("Failed to load trips: {}", e);
                let _ = self.data_tx.send(DataEvent::LoadError {
                    error: e.to_string(),
                });
            }
        }
    }

    pub async fn load_trip(&self, trip_id: TripId) {
        tracing::info!("Loading trip {}", trip_id);
        match self.api_client.send(Request::trips().get(trip_id)).await {
            Ok(response) => {
                let _ = self.data_tx.send(DataEvent::TripLoaded {
                    trip: Box::new(response.data.trip),
                });
            }
            Err(e) => {
                tracing::error!("Failed to load trip {}: {}", trip_id, e);
                let _ = self.data_tx.send(DataEvent::LoadError {
                    error: e.to_string(),
                });
            }
        }
    }

    pub async fn load_trip_day(&self, trip_id: TripId, day_id: TripDayId) {
        tracing::info!("Loading day {} of trip {}", day_id, trip_id);
        let req = Request::trip_days().with_trip(trip_id).get(day_id);
        match self.api_client.send(req).await {
            Ok(response) => {
                let _ = self.data_tx.send(DataEvent::TripDayLoaded {
                    day: Box::new(response.data.trip_day),
                });
            }
            Err(e) => {
                tracing::error!("Failed to load trip day {}: {}", day_id, e);
                let _ = self.data_tx.send(DataEvent::LoadError {
                    error: e.to_string(),
                });
            }
        }
    }

    pub async fn load_categories(&self) {
        tracing::debug!("Loading categories");
        match self.api_client.send(Request::categories().list()).await {
            Ok(response) => {
                let _ = self.data_tx.send(DataEvent::CategoriesLoaded {
                    categories: response.data.categories,
                });
            }
            // Category loading is non-fatal; the fixed fallback list
            // keeps the form usable
            Err(e) => {
                tracing::warn!("Failed to load categories: {}", e);
            }
        }
    }

    pub async fn load_recommendations(&self, trip_id: TripId) {
        tracing::debug!("Loading recommendations for trip {}", trip_id);
        let req = Request::trips().recommendations(trip_id);
        match self.api_client.send(req).await {
            Ok(response) => {
                let _ = self.data_tx.send(DataEvent::RecommendationsLoaded {
                    places: response.data.places,
                });
            }
            Err(e) => {
                let _ = self.data_tx.send(DataEvent::RecommendationsLoadFailed {
                    error: e.to_string(),
                });
            }
        }
    }

    /// Debounced place search. The caller spawns this under a fixed
    /// task id so a newer query aborts the pending one mid-sleep.
    pub async fn search_places(&self, query: String, seq: u64) {
        tokio::time::sleep(SEARCH_DEBOUNCE).await;

        tracing::debug!("Searching places for '{}' (seq {})", query, seq);
        let req = Request::places().autocomplete(query);
        match self.api_client.send(req).await {
            Ok(response) => {
                let _ = self.data_tx.send(DataEvent::SearchResultsLoaded {
                    seq,
                    places: response.data.places,
                });
            }
            Err(e) => {
                let _ = self.data_tx.send(DataEvent::SearchFailed {
                    seq,
                    error: e.to_string(),
                });
            }
        }
    }

    /// Full lookup for a place picked from search or recommendations.
    pub async fn resolve_place(&self, provider_id: ProviderId, generation: u64) {
        tracing::debug!("Resolving place {} (generation {})", provider_id, generation);
        let req = Request::places().get(provider_id);
        match self.api_client.send(req).await {
            Ok(response) => {
                let _ = self.data_tx.send(DataEvent::PlaceResolved {
                    generation,
                    place: Box::new(response.data.place),
                });
            }
            Err(e) => {
                let _ = self.data_tx.send(DataEvent::PlaceResolveFailed {
                    generation,
                    error: e.to_string(),
                });
            }
        }
    }

    /// Full lookup for an attraction opened via deep link.
    pub async fn resolve_attraction(&self, provider_id: ProviderId, generation: u64) {
        tracing::debug!(
            "Resolving attraction {} (generation {})",
            provider_id,
            generation
        );
        let req = Request::places().attraction(provider_id);
        match self.api_client.send(req).await {
            Ok(response) => {
                let _ = self.data_tx.send(DataEvent::PlaceResolved {
                    generation,
                    place: Box::new(response.data.place),
                });
            }
            Err(e) => {
                let _ = self.data_tx.send(DataEvent::PlaceResolveFailed {
                    generation,
                    error: e.to_string(),
                });
            }
        }
    }

    pub async fn create_trip_point(
        &self,
        trip_id: TripId,
        day_id: TripDayId,
        trip_point: NewTripPoint,
    ) {
        tracing::info!("Creating trip point '{}' on day {}", trip_point.name, day_id);
        let req = Request::trip_points()
            .with_trip(trip_id)
            .with_day(day_id)
            .create(trip_point);
        match self.api_client.send(req).await {
            Ok(response) => {
                let _ = self.data_tx.send(DataEvent::TripPointCreated {
                    trip_point: Box::new(response.data.trip_point),
                });
            }
            Err(e) => {
                let _ = self.data_tx.send(DataEvent::TripPointCreateFailed {
                    overlap: e.is_overlap_conflict(),
                    error: e.to_string(),
                });
            }
        }
    }
}
