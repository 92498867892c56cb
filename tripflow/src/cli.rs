//! Command line arguments. Besides plain startup, tripflow accepts a
//! deep link that jumps straight to a trip day and optionally opens the
//! add-trip-point form with an attraction pre-filled (this is what the
//! "add to trip" links in the web app invoke).

use clap::Parser;
use traveler_api::endpoints::{ProviderId, TripDayId, TripId};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "tripflow")]
#[command(author, version, about = "Terminal client for TravelMate trip planning")]
pub struct Cli {
    /// Open this trip on startup instead of the trip list
    #[arg(long, value_name = "TRIP_ID")]
    pub trip: Option<Uuid>,

    /// Open this day of the trip (requires --trip)
    #[arg(long, value_name = "DAY_ID", requires = "trip")]
    pub day: Option<Uuid>,

    /// Open the add form with this attraction pre-filled (requires --day)
    #[arg(long, value_name = "ATTRACTION_ID", requires = "day")]
    pub attraction: Option<String>,
}

/// A startup target assembled from `--trip`/`--day`/`--attraction`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeepLink {
    pub trip_id: TripId,
    pub day_id: TripDayId,
    pub attraction_id: Option<ProviderId>,
}

impl Cli {
    pub fn deep_link(&self) -> Option<DeepLink> {
        let trip_id = self.trip?;
        let day_id = self.day?;
        Some(DeepLink {
            trip_id: trip_id.into(),
            day_id: day_id.into(),
            attraction_id: self.attraction.clone().map(ProviderId::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attraction_requires_day_and_trip() {
        assert!(Cli::try_parse_from(["tripflow", "--attraction", "att-1"]).is_err());
        assert!(Cli::try_parse_from(["tripflow", "--day", "00000000-0000-0000-0000-000000000002"])
            .is_err());
    }

    #[test]
    fn full_deep_link_parses() {
        let cli = Cli::try_parse_from([
            "tripflow",
            "--trip",
            "00000000-0000-0000-0000-000000000001",
            "--day",
            "00000000-0000-0000-0000-000000000002",
            "--attraction",
            "att-1",
        ])
        .unwrap();

        let link = cli.deep_link().unwrap();
        assert_eq!(link.trip_id, Uuid::from_u128(1).into());
        assert_eq!(link.day_id, Uuid::from_u128(2).into());
        assert_eq!(link.attraction_id, Some(ProviderId::from("att-1")));
    }

    #[test]
    fn no_arguments_means_no_deep_link() {
        let cli = Cli::try_parse_from(["tripflow"]).unwrap();
        assert_eq!(cli.deep_link(), None);
    }
}
