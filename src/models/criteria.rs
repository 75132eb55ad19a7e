use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{ProcessingError, Result};

/// Inclusive date window. `from <= to` always holds once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(ProcessingError::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    pub fn num_days(&self) -> i64 {
        self.to.signed_duration_since(self.from).num_days() + 1
    }

    /// Narrow this range to `bounds`. `None` when the two windows do not overlap.
    pub fn clamp_to(&self, bounds: &DateRange) -> Option<DateRange> {
        let from = self.from.max(bounds.from);
        let to = self.to.min(bounds.to);
        (from <= to).then_some(DateRange { from, to })
    }
}

/// Station + date window selected by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FilterCriteria {
    #[validate(length(min = 1))]
    pub station: String,

    pub date_from: NaiveDate,

    pub date_to: NaiveDate,
}

impl FilterCriteria {
    pub fn new(station: impl Into<String>, date_from: NaiveDate, date_to: NaiveDate) -> Result<Self> {
        let criteria = Self {
            station: station.into(),
            date_from,
            date_to,
        };
        criteria.validate()?;
        criteria.range()?;
        Ok(criteria)
    }

    pub fn range(&self) -> Result<DateRange> {
        DateRange::new(self.date_from, self.date_to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        let err = DateRange::new(date(2012, 3, 1), date(2012, 2, 1)).unwrap_err();
        assert!(matches!(err, ProcessingError::InvalidRange { .. }));

        let single_day = DateRange::new(date(2012, 3, 1), date(2012, 3, 1)).unwrap();
        assert!(single_day.contains(date(2012, 3, 1)));
        assert_eq!(single_day.num_days(), 1);
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let range = DateRange::new(date(2012, 1, 10), date(2012, 1, 20)).unwrap();
        assert!(range.contains(date(2012, 1, 10)));
        assert!(range.contains(date(2012, 1, 20)));
        assert!(!range.contains(date(2012, 1, 9)));
        assert!(!range.contains(date(2012, 1, 21)));
    }

    #[test]
    fn test_clamp_to_bounds() {
        let bounds = DateRange::new(date(2012, 1, 1), date(2012, 12, 31)).unwrap();
        let wide = DateRange::new(date(2011, 6, 1), date(2012, 3, 1)).unwrap();
        let clamped = wide.clamp_to(&bounds).unwrap();
        assert_eq!(clamped.from(), date(2012, 1, 1));
        assert_eq!(clamped.to(), date(2012, 3, 1));

        let disjoint = DateRange::new(date(2013, 1, 1), date(2013, 2, 1)).unwrap();
        assert!(disjoint.clamp_to(&bounds).is_none());
    }

    #[test]
    fn test_filter_criteria_validation() {
        assert!(FilterCriteria::new("Santiago", date(2012, 1, 1), date(2012, 1, 31)).is_ok());
        assert!(matches!(
            FilterCriteria::new("", date(2012, 1, 1), date(2012, 1, 31)),
            Err(ProcessingError::Validation(_))
        ));
        assert!(matches!(
            FilterCriteria::new("Santiago", date(2012, 2, 1), date(2012, 1, 31)),
            Err(ProcessingError::InvalidRange { .. })
        ));
    }
}
