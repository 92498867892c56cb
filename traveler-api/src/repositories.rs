use crate::endpoints::{
    ProviderId, TripDayId, TripId,
    categories::ListCategories,
    places::{AutocompletePlaces, GetAttraction, GetPlace, GetRecommendations},
    trip_days::GetTripDay,
    trip_points::{CreateTripPoint, NewTripPoint},
    trips::{GetTrip, ListTrips},
};

pub struct TripRepository;

impl TripRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListTrips {
        ListTrips::default()
    }

    pub fn get(&self, trip_id: TripId) -> GetTrip {
        GetTrip::new(trip_id)
    }

    pub fn recommendations(&self, trip_id: TripId) -> GetRecommendations {
        GetRecommendations::new(trip_id)
    }
}

#[derive(Default)]
pub struct TripDayRepository {
    trip_id: TripId,
}

impl TripDayRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trip(mut self, trip_id: TripId) -> Self {
        self.trip_id = trip_id;
        self
    }

    pub fn get(&self, day_id: TripDayId) -> GetTripDay {
        GetTripDay::new(self.trip_id, day_id)
    }
}

pub struct PlaceRepository;

impl PlaceRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn get(&self, provider_id: ProviderId) -> GetPlace {
        GetPlace::new(provider_id)
    }

    pub fn attraction(&self, provider_id: ProviderId) -> GetAttraction {
        GetAttraction::new(provider_id)
    }

    pub fn autocomplete(&self, query: impl Into<String>) -> AutocompletePlaces {
        AutocompletePlaces::new(query)
    }
}

pub struct CategoryRepository;

impl CategoryRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListCategories {
        ListCategories::default()
    }
}

#[derive(Default)]
pub struct TripPointRepository {
    trip_id: TripId,
    day_id: TripDayId,
}

impl TripPointRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trip(mut self, trip_id: TripId) -> Self {
        self.trip_id = trip_id;
        self
    }

    pub fn with_day(mut self, day_id: TripDayId) -> Self {
        self.day_id = day_id;
        self
    }

    pub fn create(&self, trip_point: NewTripPoint) -> CreateTripPoint {
        CreateTripPoint::new(self.trip_id, self.day_id, trip_point)
    }
}
