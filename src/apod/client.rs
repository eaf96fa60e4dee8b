/// APOD API client — the background fetch worker
///
/// One call to `fetch_picture` performs the whole job for a date: request
/// the metadata record, and when the entry is an image, download the
/// picture itself into the local cache. It runs off the UI thread (via
/// `Task::perform`) and resolves to exactly one result.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

use super::cache;
use super::response::{ApodPicture, ApodReply};

const BASE_URL: &str = "https://api.nasa.gov/planetary/apod";

/// NASA's shared demo key. Rate-limited, but plenty for one request per click.
const API_KEY: &str = "DEMO_KEY";

/// Errors produced by the fetch worker
///
/// Variants carry plain strings so the error can travel inside an iced
/// message (which must be `Clone`).
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("APOD service returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected reply from the APOD service: {0}")]
    Payload(String),

    #[error("Could not save the picture: {0}")]
    Cache(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        FetchError::Network(error.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        FetchError::Payload(error.to_string())
    }
}

impl From<std::io::Error> for FetchError {
    fn from(error: std::io::Error) -> Self {
        FetchError::Cache(error.to_string())
    }
}

pub(crate) fn request_url(date: NaiveDate) -> String {
    format!("{}?api_key={}&date={}", BASE_URL, API_KEY, date)
}

/// Fetch the picture of the day for `date`
///
/// Returns the display-ready record, with `file_path` set when the entry
/// was an image and its bytes were saved to the cache.
pub async fn fetch_picture(date: NaiveDate) -> Result<ApodPicture, FetchError> {
    println!("🛰️  Requesting APOD for {}", date);

    let response = reqwest::get(request_url(date)).await?;
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(FetchError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.text().await?;
    let reply: ApodReply = serde_json::from_str(&body)?;

    // Only image entries have something to download; videos and other
    // media types are reported back as-is for the UI to explain.
    let file_path = if reply.media_type == "image" {
        Some(download_picture(date, &reply.url).await?)
    } else {
        None
    };

    Ok(ApodPicture::from_reply(reply, file_path))
}

/// Download the picture binary and persist it to the cache
async fn download_picture(date: NaiveDate, url: &str) -> Result<PathBuf, FetchError> {
    if url.is_empty() {
        return Err(FetchError::Payload(
            "image entry is missing its download URL".to_string(),
        ));
    }

    let response = reqwest::get(url).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Api {
            status: status.as_u16(),
            message: format!("while downloading {}", url),
        });
    }

    let bytes = response.bytes().await?;
    let path = cache::save_picture(date, url, &bytes)?;
    Ok(path)
}
