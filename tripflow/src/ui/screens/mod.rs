pub mod add_trip_point_screen;
pub mod logs_screen;
pub mod trip_day_screen;
pub mod trip_screen;
pub mod trips_screen;

use crate::state::{AddTripPointState, LogsState, TripDayState, TripState, TripsState};

#[derive(Debug, Clone)]
pub enum Screen {
    Trips(TripsState),
    Trip(TripState),
    TripDay(TripDayState),
    AddTripPoint(Box<AddTripPointState>),
    Logs(LogsState),
}
