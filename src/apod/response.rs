/// Data structures for the APOD service reply
///
/// `ApodReply` mirrors the JSON wire format; `ApodPicture` is the
/// display-ready record the fetch worker hands back to the UI.

use serde::Deserialize;
use std::path::PathBuf;

/// Classification of the returned content
///
/// The service mostly serves images, but some dates are videos (and the
/// format leaves room for future kinds). Only images get downloaded and
/// rendered; everything else is reported to the user as "not an image".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Other(String),
}

impl MediaType {
    /// Parse the wire value ("image", "video", ...)
    pub fn from_wire(value: &str) -> Self {
        if value == "image" {
            MediaType::Image
        } else {
            MediaType::Other(value.to_string())
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, MediaType::Image)
    }
}

/// Raw JSON reply from the APOD API
///
/// `copyright` is absent for most NASA-produced pictures, and `url`/`hdurl`
/// vary by media type, so those fields all default.
#[derive(Debug, Clone, Deserialize)]
pub struct ApodReply {
    pub media_type: String,
    pub title: String,
    pub explanation: String,
    #[serde(default)]
    pub copyright: String,
    pub date: String,
    /// Standard-quality content URL (the one that gets downloaded)
    #[serde(default)]
    pub url: String,
    /// High-resolution image URL, when the service provides one
    #[serde(default)]
    pub hdurl: Option<String>,
}

/// One fetched picture of the day, ready for display
///
/// Built by the fetch worker and owned by the UI for a single display
/// cycle; the next completed request replaces it wholesale.
#[derive(Debug, Clone)]
pub struct ApodPicture {
    pub media_type: MediaType,
    pub title: String,
    pub explanation: String,
    pub copyright: String,
    /// The service's own date string (YYYY-MM-DD)
    pub date: String,
    /// Where the downloaded image was saved (only set for image entries)
    pub file_path: Option<PathBuf>,
}

impl ApodPicture {
    /// Build the display record from a parsed reply and the saved file path
    pub fn from_reply(reply: ApodReply, file_path: Option<PathBuf>) -> Self {
        ApodPicture {
            media_type: MediaType::from_wire(&reply.media_type),
            title: reply.title,
            explanation: reply.explanation,
            copyright: reply.copyright,
            date: reply.date,
            file_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_image_reply() {
        let json = r#"{
            "copyright": "\nSteed Yu\n",
            "date": "2020-04-25",
            "explanation": "The Moon and bright planets gathered low in the west.",
            "hdurl": "https://apod.nasa.gov/apod/image/2004/example_big.jpg",
            "media_type": "image",
            "service_version": "v1",
            "title": "Planets in the West",
            "url": "https://apod.nasa.gov/apod/image/2004/example.jpg"
        }"#;

        let reply: ApodReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.media_type, "image");
        assert_eq!(reply.copyright, "\nSteed Yu\n");
        assert_eq!(reply.url, "https://apod.nasa.gov/apod/image/2004/example.jpg");

        let picture = ApodPicture::from_reply(reply, Some(PathBuf::from("/tmp/2020-04-25.jpg")));
        assert!(picture.media_type.is_image());
        assert_eq!(picture.title, "Planets in the West");
        assert_eq!(picture.date, "2020-04-25");
    }

    #[test]
    fn test_parse_video_reply_without_copyright() {
        // Video entries have no copyright field and no hdurl
        let json = r#"{
            "date": "2019-04-01",
            "explanation": "A total solar eclipse time lapse.",
            "media_type": "video",
            "service_version": "v1",
            "title": "Total Solar Eclipse",
            "url": "https://www.youtube.com/embed/example"
        }"#;

        let reply: ApodReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.copyright, "");
        assert!(reply.hdurl.is_none());

        let picture = ApodPicture::from_reply(reply, None);
        assert_eq!(picture.media_type, MediaType::Other("video".to_string()));
        assert!(picture.file_path.is_none());
    }

    #[test]
    fn test_malformed_reply_is_an_error() {
        let json = r#"{"error": {"code": "OVER_RATE_LIMIT"}}"#;
        assert!(serde_json::from_str::<ApodReply>(json).is_err());
    }
}
