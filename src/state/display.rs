/// Display-ready content for one picture of the day
///
/// `DisplayContent` is everything the view needs to render a successful
/// fetch: formatted labels plus a decoded image handle. It is built once
/// per completed request and replaced wholesale by the next one.

use chrono::NaiveDate;
use iced::widget::image::Handle;
use std::path::Path;

use crate::apod::ApodPicture;

/// Labels and image for the currently displayed picture
#[derive(Debug, Clone, Default)]
pub struct DisplayContent {
    pub title: String,
    /// Long-form date, e.g. "Friday, June 16, 1995"
    pub date_text: String,
    pub credits: String,
    pub explanation: String,
    /// Decoded picture, if the saved file could be read (blank area otherwise)
    pub picture: Option<Handle>,
}

impl DisplayContent {
    /// Build display content from a fetched picture
    ///
    /// A missing or unreadable image file is not an error here: the labels
    /// still render and the image area stays blank.
    pub fn from_picture(picture: &ApodPicture) -> Self {
        let handle = picture.file_path.as_deref().and_then(load_picture);

        DisplayContent {
            title: picture.title.clone(),
            date_text: format_long_date(&picture.date),
            credits: format_credits(&picture.copyright),
            explanation: picture.explanation.clone(),
            picture: handle,
        }
    }
}

/// Format the credit line for display
///
/// Newlines are collapsed to spaces first. If the text already names itself
/// ("Image Credit" in any case) it is shown verbatim; otherwise it gets the
/// "Image credit: " prefix. An empty credit stays empty.
pub fn format_credits(copyright: &str) -> String {
    let flattened = copyright.replace('\n', " ");

    if flattened.trim().is_empty() {
        return String::new();
    }

    if flattened.to_lowercase().contains("image credit") {
        copyright.to_string()
    } else {
        format!("Image credit: {}", flattened)
    }
}

/// Format the service's YYYY-MM-DD date string as a long date
/// Falls back to the raw string if it does not parse
pub fn format_long_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%A, %B %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

/// Read and decode the saved picture file
///
/// Returns None when the file is missing or not a decodable image; the
/// failure is logged and the image area is simply left blank.
fn load_picture(path: &Path) -> Option<Handle> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(error) => {
            eprintln!("⚠️  Could not read saved picture {}: {}", path.display(), error);
            return None;
        }
    };

    if let Err(error) = image::load_from_memory(&bytes) {
        eprintln!(
            "⚠️  Saved picture {} is not a valid image: {}",
            path.display(),
            error
        );
        return None;
    }

    Some(Handle::from_bytes(bytes))
}
