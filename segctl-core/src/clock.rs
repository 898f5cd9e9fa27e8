//! Time-of-day rendering for clock mode
//!
//! Converts a wall-clock time into the four-digit value and decimal point
//! pattern the display shows for each [`TimeFormat`].

use crate::settings::TimeFormat;

const SECONDS_PER_DAY: u32 = 86_400;

/// Decimal seconds in a metric day (10 h × 100 min × 100 s)
const METRIC_SECONDS_PER_DAY: u32 = 100_000;

/// Local wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl TimeOfDay {
    /// Create a time, returning `None` when a field is out of range
    pub fn new(hours: u8, minutes: u8, seconds: u8) -> Option<Self> {
        if hours > 23 || minutes > 59 || seconds > 59 {
            return None;
        }
        Some(Self {
            hours,
            minutes,
            seconds,
        })
    }

    /// Time from seconds since local midnight (wraps past a day)
    pub fn from_seconds(seconds: u32) -> Self {
        let s = seconds % SECONDS_PER_DAY;
        Self {
            hours: (s / 3600) as u8,
            minutes: (s / 60 % 60) as u8,
            seconds: (s % 60) as u8,
        }
    }

    pub fn seconds_since_midnight(&self) -> u32 {
        self.hours as u32 * 3600 + self.minutes as u32 * 60 + self.seconds as u32
    }

    /// Four-digit value to show, zero padded by the display
    ///
    /// - `24hr`: HHMM
    /// - `12hr`: hhMM, midnight and noon read 12
    /// - `metric`: decimal hour, decimal minutes, tens of decimal seconds
    pub fn display_value(&self, format: TimeFormat) -> u16 {
        match format {
            TimeFormat::Hours24 => self.hours as u16 * 100 + self.minutes as u16,
            TimeFormat::Hours12 => {
                let hours = match self.hours % 12 {
                    0 => 12,
                    h => h,
                };
                hours as u16 * 100 + self.minutes as u16
            }
            TimeFormat::Metric => {
                let decimal =
                    self.seconds_since_midnight() as u64 * METRIC_SECONDS_PER_DAY as u64
                        / SECONDS_PER_DAY as u64;
                (decimal / 10) as u16
            }
        }
    }

    /// Decimal point bitmap (bit 0 = leftmost digit) separating the fields
    pub fn dots(format: TimeFormat) -> u8 {
        match format {
            // HH.MM
            TimeFormat::Hours24 | TimeFormat::Hours12 => 0b0010,
            // H.MM.S
            TimeFormat::Metric => 0b0101,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(TimeOfDay::new(23, 59, 59).is_some());
        assert!(TimeOfDay::new(24, 0, 0).is_none());
        assert!(TimeOfDay::new(0, 60, 0).is_none());
        assert!(TimeOfDay::new(0, 0, 60).is_none());
    }

    #[test]
    fn test_from_seconds_wraps() {
        let t = TimeOfDay::from_seconds(SECONDS_PER_DAY + 3661);
        assert_eq!(t, TimeOfDay::new(1, 1, 1).unwrap());
    }

    #[test]
    fn test_24hr() {
        let t = TimeOfDay::new(21, 5, 0).unwrap();
        assert_eq!(t.display_value(TimeFormat::Hours24), 2105);
        let t = TimeOfDay::new(0, 7, 0).unwrap();
        assert_eq!(t.display_value(TimeFormat::Hours24), 7);
    }

    #[test]
    fn test_12hr_noon_and_midnight() {
        let midnight = TimeOfDay::new(0, 30, 0).unwrap();
        assert_eq!(midnight.display_value(TimeFormat::Hours12), 1230);
        let noon = TimeOfDay::new(12, 0, 0).unwrap();
        assert_eq!(noon.display_value(TimeFormat::Hours12), 1200);
        let evening = TimeOfDay::new(21, 45, 0).unwrap();
        assert_eq!(evening.display_value(TimeFormat::Hours12), 945);
    }

    #[test]
    fn test_metric() {
        // Noon is exactly 5 decimal hours
        let noon = TimeOfDay::new(12, 0, 0).unwrap();
        assert_eq!(noon.display_value(TimeFormat::Metric), 5000);
        // 18:00 is 7.50.00
        let t = TimeOfDay::new(18, 0, 0).unwrap();
        assert_eq!(t.display_value(TimeFormat::Metric), 7500);
        let last = TimeOfDay::new(23, 59, 59).unwrap();
        assert_eq!(last.display_value(TimeFormat::Metric), 9999);
    }

    #[test]
    fn test_dots() {
        assert_eq!(TimeOfDay::dots(TimeFormat::Hours24), 0b0010);
        assert_eq!(TimeOfDay::dots(TimeFormat::Metric), 0b0101);
    }
}
