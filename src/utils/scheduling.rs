use chrono::{NaiveDate, NaiveTime};

use crate::models::negotiationmodel::TimeSlot;

/// Installations need at least a day of lead time, so a proposal must name
/// a date strictly after the day it is submitted.
pub fn validate_proposed_date(proposed: NaiveDate, today: NaiveDate) -> Result<(), String> {
    if proposed <= today {
        return Err("Proposed date must be at least one day in the future".to_string());
    }
    Ok(())
}

/// Time information is optional, but when present it is either a recognized
/// slot or an explicit start/end window, never both, and a window must have
/// start before end.
pub fn validate_time_terms(
    slot: Option<TimeSlot>,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
) -> Result<(), String> {
    if slot.is_some() && (start_time.is_some() || end_time.is_some()) {
        return Err(
            "Provide either a time slot or an explicit start/end window, not both".to_string(),
        );
    }

    match (start_time, end_time) {
        (None, None) => Ok(()),
        (Some(start), Some(end)) => {
            if start >= end {
                return Err("Start time must be before end time".to_string());
            }
            Ok(())
        }
        _ => Err("Both start and end time are required for an explicit window".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_rejects_today_and_past_dates() {
        let today = date(2030, 6, 10);
        assert!(validate_proposed_date(date(2030, 6, 10), today).is_err());
        assert!(validate_proposed_date(date(2030, 6, 9), today).is_err());
        assert!(validate_proposed_date(date(2029, 12, 31), today).is_err());
    }

    #[test]
    fn test_accepts_strictly_future_dates() {
        let today = date(2030, 6, 10);
        assert!(validate_proposed_date(date(2030, 6, 11), today).is_ok());
        assert!(validate_proposed_date(date(2030, 7, 1), today).is_ok());
    }

    #[test]
    fn test_time_terms_absent_is_allowed() {
        assert!(validate_time_terms(None, None, None).is_ok());
    }

    #[test]
    fn test_time_terms_slot_only() {
        assert!(validate_time_terms(Some(TimeSlot::Morning), None, None).is_ok());
    }

    #[test]
    fn test_time_terms_window_must_be_ordered() {
        assert!(validate_time_terms(None, Some(time(9, 0)), Some(time(12, 0))).is_ok());
        assert!(validate_time_terms(None, Some(time(12, 0)), Some(time(9, 0))).is_err());
        assert!(validate_time_terms(None, Some(time(9, 0)), Some(time(9, 0))).is_err());
    }

    #[test]
    fn test_time_terms_window_must_be_complete() {
        assert!(validate_time_terms(None, Some(time(9, 0)), None).is_err());
        assert!(validate_time_terms(None, None, Some(time(12, 0))).is_err());
    }

    #[test]
    fn test_time_terms_rejects_both_representations() {
        assert!(
            validate_time_terms(Some(TimeSlot::Afternoon), Some(time(9, 0)), Some(time(12, 0)))
                .is_err()
        );
        assert!(validate_time_terms(Some(TimeSlot::Evening), Some(time(18, 0)), None).is_err());
    }
}
