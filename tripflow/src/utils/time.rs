use chrono::{NaiveTime, Timelike};

/// Round a time of day to the nearest quarter hour.
/// Times that would round past midnight clamp to 23:45.
pub fn round_to_quarter_hour(time: NaiveTime) -> NaiveTime {
    let minutes = time.hour() * 60 + time.minute();
    let rounded = ((minutes + 7) / 15) * 15;
    if rounded >= 24 * 60 {
        return NaiveTime::from_hms_opt(23, 45, 0).unwrap_or(time);
    }
    NaiveTime::from_hms_opt(rounded / 60, rounded % 60, 0).unwrap_or(time)
}

/// Add one hour without crossing into the next day; clamps to 23:45.
pub fn add_hour_same_day(time: NaiveTime) -> NaiveTime {
    let minutes = time.hour() * 60 + time.minute() + 60;
    if minutes >= 24 * 60 {
        return NaiveTime::from_hms_opt(23, 45, 0).unwrap_or(time);
    }
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap_or(time)
}

/// Shift a time by whole minutes, clamping to the same day on both ends.
pub fn shift_minutes(time: NaiveTime, delta: i32) -> NaiveTime {
    let minutes = (time.hour() * 60 + time.minute()) as i32 + delta;
    let clamped = minutes.clamp(0, 24 * 60 - 15) as u32;
    NaiveTime::from_hms_opt(clamped / 60, clamped % 60, 0).unwrap_or(time)
}

pub fn format_hm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn rounds_to_nearest_quarter() {
        assert_eq!(round_to_quarter_hour(t(10, 7)), t(10, 0));
        assert_eq!(round_to_quarter_hour(t(10, 8)), t(10, 15));
        assert_eq!(round_to_quarter_hour(t(10, 22)), t(10, 15));
        assert_eq!(round_to_quarter_hour(t(10, 23)), t(10, 30));
        assert_eq!(round_to_quarter_hour(t(10, 0)), t(10, 0));
    }

    #[test]
    fn rounding_clamps_at_end_of_day() {
        assert_eq!(round_to_quarter_hour(t(23, 55)), t(23, 45));
    }

    #[test]
    fn add_hour_clamps_to_same_day() {
        assert_eq!(add_hour_same_day(t(10, 30)), t(11, 30));
        assert_eq!(add_hour_same_day(t(23, 30)), t(23, 45));
    }

    #[test]
    fn shift_clamps_both_ends() {
        assert_eq!(shift_minutes(t(0, 0), -15), t(0, 0));
        assert_eq!(shift_minutes(t(23, 45), 15), t(23, 45));
        assert_eq!(shift_minutes(t(12, 0), 15), t(12, 15));
    }
}
