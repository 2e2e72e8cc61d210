use chrono::NaiveDate;
use time::OffsetDateTime;

/// Current unix timestamp in seconds.
pub fn timestamp() -> u64 {
    OffsetDateTime::now_utc().unix_timestamp().max(0) as u64
}

pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}
