// ABOUTME: Relative TP-VP encoder following the GSM 03.40 validity period bands
// ABOUTME: Durations are clamped to the 440 day ceiling before banding

use std::time::Duration;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

/// Longest duration the relative format can express before clamping
const MAX_DAYS: u64 = 441;
const CLAMPED_DAYS: u64 = 440;

/// Relative validity period of a submission
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidityPeriod(Duration);

impl ValidityPeriod {
    pub fn new(duration: Duration) -> Self {
        Self(duration)
    }

    pub fn from_days(days: u64) -> Self {
        Self(Duration::from_secs(days.saturating_mul(SECONDS_PER_DAY)))
    }

    pub fn from_hours(hours: u64) -> Self {
        Self(Duration::from_secs(hours.saturating_mul(SECONDS_PER_HOUR)))
    }

    pub fn duration(&self) -> Duration {
        self.0
    }

    /// TP-VP octet in relative format
    pub fn to_byte(&self) -> u8 {
        encode_relative_validity(self.0)
    }
}

impl From<Duration> for ValidityPeriod {
    fn from(duration: Duration) -> Self {
        Self(duration)
    }
}

/// Encode a duration into the relative TP-VP octet.
///
/// Bands are evaluated on the day, hour-of-day and minute-of-hour components:
///
/// | range          | value                               |
/// |----------------|-------------------------------------|
/// | > 30 days      | `192 + days / 7`                    |
/// | 2..=30 days    | `166 + days`                        |
/// | > 12 hours     | `143 + (hours - 12) * 2 + min / 30` |
/// | > 1 h or 1 min | `hours * 12 + min / 5 - 1`          |
/// | otherwise      | `0`                                 |
pub fn encode_relative_validity(duration: Duration) -> u8 {
    let total = duration.as_secs();
    let (days, hours, minutes) = if total / SECONDS_PER_DAY > MAX_DAYS {
        (CLAMPED_DAYS, 0, 0)
    } else {
        (
            total / SECONDS_PER_DAY,
            (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
            (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
        )
    };

    let value = if days > 30 {
        192 + days / 7
    } else if days > 1 {
        166 + days
    } else if hours > 12 {
        143 + (hours - 12) * 2 + minutes / 30
    } else if hours > 1 || minutes > 1 {
        (hours * 12 + minutes / 5).saturating_sub(1)
    } else {
        0
    };

    // every band above tops out at 255
    value as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minutes(m: u64) -> Duration {
        Duration::from_secs(m * SECONDS_PER_MINUTE)
    }

    #[test]
    fn test_zero_duration() {
        assert_eq!(encode_relative_validity(Duration::ZERO), 0x00);
    }

    #[test]
    fn test_day_band() {
        assert_eq!(ValidityPeriod::from_days(2).to_byte(), 168);
        assert_eq!(ValidityPeriod::from_days(5).to_byte(), 171);
        assert_eq!(ValidityPeriod::from_days(30).to_byte(), 196);
    }

    #[test]
    fn test_week_band_and_clamp() {
        assert_eq!(ValidityPeriod::from_days(31).to_byte(), 196);
        assert_eq!(ValidityPeriod::from_days(440).to_byte(), 254);
        assert_eq!(ValidityPeriod::from_days(441).to_byte(), 255);
        assert_eq!(ValidityPeriod::from_days(1000).to_byte(), 254);
    }

    #[test]
    fn test_huge_counts_saturate_and_clamp() {
        assert_eq!(ValidityPeriod::from_days(1_000_000_000_000_000).to_byte(), 254);
        assert_eq!(ValidityPeriod::from_days(u64::MAX).to_byte(), 254);
        assert_eq!(ValidityPeriod::from_hours(u64::MAX).to_byte(), 254);
    }

    #[test]
    fn test_half_hour_band() {
        assert_eq!(ValidityPeriod::from_hours(13).to_byte(), 145);
        assert_eq!(encode_relative_validity(minutes(13 * 60 + 30)), 146);
        assert_eq!(ValidityPeriod::from_hours(23).to_byte(), 165);
    }

    #[test]
    fn test_five_minute_band() {
        assert_eq!(ValidityPeriod::from_hours(12).to_byte(), 143);
        assert_eq!(ValidityPeriod::from_hours(2).to_byte(), 23);
        assert_eq!(encode_relative_validity(minutes(30)), 5);
        assert_eq!(encode_relative_validity(minutes(2)), 0);
    }

    #[test]
    fn test_single_day_falls_through() {
        // one whole day has no hour or minute component
        assert_eq!(ValidityPeriod::from_days(1).to_byte(), 0);
    }
}
