/// Local picture cache
///
/// Downloaded pictures are written to a deterministic per-date path so a
/// fetch always knows where its image landed. There is no eviction; the
/// cache is tiny (one picture per requested date).

use chrono::NaiveDate;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Get the picture cache directory
/// Returns ~/.cache/apod-viewer/pictures on Linux
pub fn picture_cache_dir() -> PathBuf {
    let mut path = dirs_next::cache_dir()
        .or_else(|| dirs_next::home_dir())
        .expect("Could not determine cache directory");

    path.push("apod-viewer");
    path.push("pictures");
    path
}

/// The deterministic save path for a date's picture
pub fn picture_path(date: NaiveDate, extension: &str) -> PathBuf {
    picture_cache_dir().join(format!("{}.{}", date, extension))
}

/// Pick a file extension from the download URL, defaulting to "jpg"
pub fn extension_for_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let file_name = path.rsplit('/').next().unwrap_or(path);

    match file_name.rsplit_once('.') {
        Some((_, ext))
            if !ext.is_empty()
                && ext.len() <= 4
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            ext.to_ascii_lowercase()
        }
        _ => "jpg".to_string(),
    }
}

/// Write the downloaded picture bytes to the cache
/// Returns the path the picture was saved to
pub fn save_picture(date: NaiveDate, url: &str, bytes: &[u8]) -> io::Result<PathBuf> {
    let path = picture_path(date, &extension_for_url(url));

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, bytes)?;

    println!("💾 Saved picture: {} ({} KB)", path.display(), bytes.len() / 1024);
    Ok(path)
}
