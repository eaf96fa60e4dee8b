/// APOD fetch module
///
/// This module handles:
/// - Calling the Astronomy Picture of the Day API (client.rs)
/// - Parsing the JSON reply into display-ready data (response.rs)
/// - Saving downloaded pictures to the local cache (cache.rs)
/// - Validating the requested date range

pub mod cache;
pub mod client;
pub mod response;

pub use client::{fetch_picture, FetchError};
pub use response::{ApodPicture, MediaType};

use chrono::{Local, NaiveDate};

/// The first date with an APOD entry (the service launched 1995-06-16)
pub fn min_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1995, 6, 16).expect("valid calendar date")
}

/// The latest date that can be requested (today, local time)
pub fn max_date() -> NaiveDate {
    Local::now().date_naive()
}

/// Check whether a date can be requested from the service
pub fn date_in_range(date: NaiveDate) -> bool {
    date >= min_date() && date <= max_date()
}
