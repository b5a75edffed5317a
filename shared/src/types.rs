//! Common types used across the platform

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive range of calendar days used by reports
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// First instant of `start` (UTC)
    pub fn start_instant(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.start.and_time(NaiveTime::MIN))
    }

    /// Last representable instant of `end` (UTC), so the whole end day is included
    pub fn end_instant(&self) -> DateTime<Utc> {
        let end_of_day = NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).unwrap_or(NaiveTime::MIN);
        Utc.from_utc_datetime(&self.end.and_time(end_of_day))
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }
}

/// Optional narrowing of a query to a product, store or store chain
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Scope {
    pub product_id: Option<i32>,
    pub store_id: Option<i32>,
    pub store_chain_id: Option<i32>,
}
