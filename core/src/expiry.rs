//! "Expiring soon" badges for dated records (policies, licences, inspections).

use chrono::NaiveDate;

use crate::validate::DATE_FORMAT;

/// A date within this many days (inclusive) is expiring soon.
pub const EXPIRING_SOON_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryBadge {
    Expired { days_ago: i64 },
    ExpiringSoon { days_left: i64 },
    Valid,
}

impl ExpiryBadge {
    pub fn for_date(end: NaiveDate, today: NaiveDate) -> Self {
        let days_left = (end - today).num_days();
        if days_left < 0 {
            ExpiryBadge::Expired {
                days_ago: -days_left,
            }
        } else if days_left <= EXPIRING_SOON_DAYS {
            ExpiryBadge::ExpiringSoon { days_left }
        } else {
            ExpiryBadge::Valid
        }
    }

    /// `None` when the date is blank or does not parse.
    pub fn for_str(end: &str, today: NaiveDate) -> Option<Self> {
        NaiveDate::parse_from_str(end.trim(), DATE_FORMAT)
            .ok()
            .map(|end| Self::for_date(end, today))
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExpiryBadge::Expired { .. } => "expired",
            ExpiryBadge::ExpiringSoon { .. } => "expiring soon",
            ExpiryBadge::Valid => "valid",
        }
    }

    pub fn needs_attention(&self) -> bool {
        !matches!(self, ExpiryBadge::Valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn thirty_days_out_is_still_expiring_soon() {
        let today = day(2024, 1, 1);
        assert_eq!(
            ExpiryBadge::for_date(day(2024, 1, 31), today),
            ExpiryBadge::ExpiringSoon { days_left: 30 }
        );
        assert_eq!(ExpiryBadge::for_date(day(2024, 2, 1), today), ExpiryBadge::Valid);
    }

    #[test]
    fn today_is_expiring_not_expired() {
        let today = day(2024, 6, 15);
        assert_eq!(
            ExpiryBadge::for_date(today, today),
            ExpiryBadge::ExpiringSoon { days_left: 0 }
        );
        assert_eq!(
            ExpiryBadge::for_date(day(2024, 6, 10), today),
            ExpiryBadge::Expired { days_ago: 5 }
        );
    }

    #[test]
    fn unparseable_dates_have_no_badge() {
        let today = day(2024, 6, 15);
        assert_eq!(ExpiryBadge::for_str("", today), None);
        assert_eq!(ExpiryBadge::for_str("soon", today), None);
        assert!(ExpiryBadge::for_str("2024-06-20", today)
            .unwrap()
            .needs_attention());
    }
}
