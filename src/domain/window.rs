use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_LOOKBACK_DAYS: u32 = 1;

/// Number of days before "now" within which commits are considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookbackWindow {
    days: u32,
}

impl Default for LookbackWindow {
    fn default() -> Self {
        Self::days(DEFAULT_LOOKBACK_DAYS)
    }
}

impl LookbackWindow {
    pub fn days(days: u32) -> Self {
        Self { days }
    }

    /// Blank, signed, or otherwise non-numeric input falls back to one day.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Self::default();
        }
        trimmed
            .parse::<u32>()
            .map(Self::days)
            .unwrap_or_default()
    }

    pub fn as_days(&self) -> u32 {
        self.days
    }

    /// Never earlier than the Unix epoch; the commits API rejects older timestamps.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(Duration::days(i64::from(self.days)))
            .filter(|cutoff| *cutoff >= DateTime::<Utc>::UNIX_EPOCH)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn parses_plain_day_counts() {
        assert_eq!(LookbackWindow::parse("3").as_days(), 3);
        assert_eq!(LookbackWindow::parse(" 14 ").as_days(), 14);
        assert_eq!(LookbackWindow::parse("0").as_days(), 0);
    }

    #[test]
    fn non_numeric_input_defaults_to_one_day() {
        for input in ["", "   ", "abc", "-2", "1.5", "2d", "+3"] {
            assert_eq!(LookbackWindow::parse(input).as_days(), 1, "input {input:?}");
        }
    }

    #[test]
    fn overflowing_input_defaults_to_one_day() {
        assert_eq!(LookbackWindow::parse("99999999999999").as_days(), 1);
    }

    #[test]
    fn cutoff_subtracts_whole_days() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 30, 0).unwrap();
        let cutoff = LookbackWindow::days(2).cutoff(now);
        assert_eq!(cutoff, Utc.with_ymd_and_hms(2024, 3, 8, 12, 30, 0).unwrap());
    }

    #[test]
    fn huge_window_clamps_to_unix_epoch() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();

        let cutoff = LookbackWindow::days(u32::MAX).cutoff(now);
        assert_eq!(cutoff, DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(
            cutoff.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            "1970-01-01T00:00:00Z"
        );

        let cutoff = LookbackWindow::days(1_000_000).cutoff(now);
        assert_eq!(cutoff, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn window_reaching_back_past_epoch_clamps() {
        let now = Utc.with_ymd_and_hms(1970, 1, 3, 0, 0, 0).unwrap();
        assert_eq!(LookbackWindow::days(5).cutoff(now), DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(
            LookbackWindow::days(2).cutoff(now),
            Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap()
        );
    }
}
