use chrono::{Datelike, Local, NaiveDate};
use iced::widget::{button, column, container, image as picture, row, scrollable, text};
use iced::{Alignment, Element, Length, Task, Theme};
use iced_aw::date_picker::Date;
use iced_aw::helpers::date_picker;

// Declare the application modules
mod apod;
mod state;

use apod::{fetch_picture, ApodPicture, FetchError};
use state::display::DisplayContent;

/// Main application state
///
/// Runs a small Idle/Busy state machine: `busy` is the single-flight guard,
/// set when a fetch task launches and cleared when its completion message
/// arrives. All other fields are only touched inside `update`, so clearing
/// and rendering never interleave.
struct ApodViewer {
    /// Date selected for "Get picture for date"
    selected_date: NaiveDate,
    /// Whether the calendar overlay is open
    show_picker: bool,
    /// Single-flight guard: true while a fetch task is running
    busy: bool,
    /// Content from the most recent successful fetch
    content: DisplayContent,
    /// Pending user-facing notice (errors, "please wait", non-image dates)
    notice: Option<Notice>,
    /// Status message to display to the user
    status: String,
}

/// A user-facing notification, shown until dismissed
#[derive(Debug, Clone)]
struct Notice {
    title: String,
    body: String,
}

impl Notice {
    fn new(title: &str, body: impl Into<String>) -> Self {
        Notice {
            title: title.to_string(),
            body: body.into(),
        }
    }
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked "Get today's picture"
    FetchToday,
    /// User clicked "Get picture for date"
    FetchForDate,
    /// User opened the calendar overlay
    OpenDatePicker,
    /// User closed the calendar without choosing
    CancelDatePicker,
    /// User chose a date in the calendar
    DateSelected(Date),
    /// Background fetch completed
    PictureFetched(Result<ApodPicture, FetchError>),
    /// User dismissed the current notice
    DismissNotice,
}

impl ApodViewer {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let today = Local::now().date_naive();

        let mut viewer = ApodViewer {
            selected_date: today,
            show_picker: false,
            busy: false,
            content: DisplayContent::default(),
            notice: None,
            status: String::from("Ready."),
        };

        // Fetch today's picture right away so the window never opens empty.
        // If today's entry is a video or the network is down, the user sees
        // the same notice they would get from clicking the button.
        let startup = viewer.request(today);

        (viewer, startup)
    }

    /// Start a fetch for `date`, unless one is already running
    fn request(&mut self, date: NaiveDate) -> Task<Message> {
        if self.busy {
            self.notice = Some(Notice::new(
                "Busy",
                "Please wait for the previous request to complete.",
            ));
            return Task::none();
        }

        if !apod::date_in_range(date) {
            self.notice = Some(Notice::new(
                "Invalid date",
                format!(
                    "Pictures are available from {} through today.",
                    apod::min_date()
                ),
            ));
            return Task::none();
        }

        // Clear the previous picture before the new request starts
        self.content = DisplayContent::default();
        self.notice = None;
        self.busy = true;
        self.status = format!("Fetching picture for {}…", date);

        Task::perform(fetch_picture(date), Message::PictureFetched)
    }

    /// Handle the worker's completion message and return to Idle
    fn handle_result(&mut self, result: Result<ApodPicture, FetchError>) {
        self.busy = false;

        match result {
            Ok(ref picture) if picture.media_type.is_image() => {
                self.content = DisplayContent::from_picture(picture);
                self.status = format!("Showing the picture for {}.", picture.date);
                println!("🖼️  Displaying \"{}\" ({})", picture.title, picture.date);
            }
            Ok(picture) => {
                println!(
                    "🎬 Entry for {} is {:?}, nothing to display",
                    picture.date, picture.media_type
                );
                self.notice = Some(Notice::new(
                    "Sorry!",
                    "The response is not an image. Please try another date.",
                ));
                self.status = String::from("Ready.");
            }
            Err(error) => {
                eprintln!("❌ Fetch failed: {}", error);
                self.notice = Some(Notice::new("Error", error.to_string()));
                self.status = String::from("Ready.");
            }
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::FetchToday => self.request(Local::now().date_naive()),
            Message::FetchForDate => self.request(self.selected_date),
            Message::OpenDatePicker => {
                if !self.busy {
                    self.show_picker = true;
                }
                Task::none()
            }
            Message::CancelDatePicker => {
                self.show_picker = false;
                Task::none()
            }
            Message::DateSelected(date) => {
                self.show_picker = false;
                if let Some(selected) = NaiveDate::from_ymd_opt(date.year, date.month, date.day) {
                    self.selected_date = selected;
                }
                Task::none()
            }
            Message::PictureFetched(result) => {
                self.handle_result(result);
                Task::none()
            }
            Message::DismissNotice => {
                self.notice = None;
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let date_button = button(text(self.selected_date.to_string()))
            .on_press_maybe((!self.busy).then_some(Message::OpenDatePicker))
            .padding(10);

        let picker = date_picker(
            self.show_picker,
            Date::from_ymd(
                self.selected_date.year(),
                self.selected_date.month(),
                self.selected_date.day(),
            ),
            date_button,
            Message::CancelDatePicker,
            Message::DateSelected,
        );

        let controls = row![
            picker,
            button("Get picture for date")
                .on_press_maybe((!self.busy).then_some(Message::FetchForDate))
                .padding(10),
            button("Get today's picture")
                .on_press_maybe((!self.busy).then_some(Message::FetchToday))
                .padding(10),
        ]
        .spacing(12)
        .align_y(Alignment::Center);

        let mut page = column![controls].spacing(16).padding(20);

        if let Some(notice) = &self.notice {
            let banner = row![
                text(format!("{}: {}", notice.title, notice.body)).width(Length::Fill),
                button("OK").on_press(Message::DismissNotice),
            ]
            .spacing(12)
            .align_y(Alignment::Center);

            page = page.push(container(banner).padding(12).style(container::rounded_box));
        }

        page = page.push(self.view_picture());
        page = page.push(text(&self.status).size(14));

        container(page)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// The scrollable picture area: labels, image, explanation
    fn view_picture(&self) -> Element<Message> {
        let mut body = column![].spacing(10);

        if !self.content.title.is_empty() {
            body = body.push(text(&self.content.title).size(30));
        }
        if !self.content.date_text.is_empty() {
            body = body.push(text(&self.content.date_text).size(18));
        }
        if !self.content.credits.is_empty() {
            body = body.push(text(&self.content.credits).size(14));
        }
        if let Some(handle) = &self.content.picture {
            body = body.push(picture(handle.clone()).width(Length::Fill));
        }
        if !self.content.explanation.is_empty() {
            body = body.push(text(&self.content.explanation).size(16));
        }

        scrollable(body.width(Length::Fill))
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application(
        "Astronomy Picture of the Day",
        ApodViewer::update,
        ApodViewer::view,
    )
    .theme(ApodViewer::theme)
    .centered()
    .run_with(ApodViewer::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apod::MediaType;
    use std::path::PathBuf;

    /// An idle viewer with no startup fetch
    fn idle_viewer() -> ApodViewer {
        ApodViewer {
            selected_date: Local::now().date_naive(),
            show_picker: false,
            busy: false,
            content: DisplayContent::default(),
            notice: None,
            status: String::from("Ready."),
        }
    }

    fn image_picture() -> ApodPicture {
        ApodPicture {
            media_type: MediaType::Image,
            title: "Planets in the West".to_string(),
            explanation: "The Moon and bright planets gathered low in the west.".to_string(),
            copyright: "Jane Doe".to_string(),
            date: "2020-04-25".to_string(),
            file_path: Some(PathBuf::from("/nonexistent/2020-04-25.jpg")),
        }
    }

    #[test]
    fn test_request_sets_busy_and_clears_content() {
        let mut viewer = idle_viewer();
        viewer.content.title = "Old picture".to_string();

        let _task = viewer.request(Local::now().date_naive());

        assert!(viewer.busy);
        assert!(viewer.content.title.is_empty());
        assert!(viewer.notice.is_none());
    }

    #[test]
    fn test_second_trigger_while_busy_shows_please_wait() {
        let mut viewer = idle_viewer();
        let _task = viewer.request(Local::now().date_naive());
        viewer.content.title = "In-flight placeholder".to_string();

        let _task = viewer.update(Message::FetchToday);

        assert!(viewer.busy);
        // The in-flight request is untouched: no new clear, just a notice
        assert_eq!(viewer.content.title, "In-flight placeholder");
        let notice = viewer.notice.expect("busy trigger should raise a notice");
        assert!(notice.body.contains("Please wait"));
    }

    #[test]
    fn test_out_of_range_date_is_rejected_without_a_worker() {
        let mut viewer = idle_viewer();
        let before_first_entry = NaiveDate::from_ymd_opt(1995, 6, 15).unwrap();

        let _task = viewer.request(before_first_entry);

        assert!(!viewer.busy);
        assert!(viewer.notice.is_some());
    }

    #[test]
    fn test_image_result_renders_labels() {
        let mut viewer = idle_viewer();
        viewer.busy = true;

        viewer.handle_result(Ok(image_picture()));

        assert!(!viewer.busy);
        assert!(viewer.notice.is_none());
        assert_eq!(viewer.content.title, "Planets in the West");
        assert_eq!(viewer.content.date_text, "Saturday, April 25, 2020");
        assert_eq!(viewer.content.credits, "Image credit: Jane Doe");
        // File does not exist, so the image area stays blank (and that is fine)
        assert!(viewer.content.picture.is_none());
    }

    #[test]
    fn test_video_result_asks_for_another_date() {
        let mut viewer = idle_viewer();
        viewer.busy = true;

        let mut video = image_picture();
        video.media_type = MediaType::Other("video".to_string());
        video.file_path = None;
        viewer.handle_result(Ok(video));

        assert!(!viewer.busy);
        assert!(viewer.content.title.is_empty());
        let notice = viewer.notice.expect("non-image media should raise a notice");
        assert!(notice.body.contains("try another date"));
    }

    #[test]
    fn test_fetch_error_returns_to_idle_with_notice() {
        let mut viewer = idle_viewer();
        viewer.busy = true;

        viewer.handle_result(Err(FetchError::Network("connection refused".to_string())));

        assert!(!viewer.busy);
        let notice = viewer.notice.expect("fetch failure should raise a notice");
        assert!(notice.body.contains("connection refused"));
    }

    #[test]
    fn test_date_selection_updates_and_closes_picker() {
        let mut viewer = idle_viewer();
        viewer.show_picker = true;

        let _task = viewer.update(Message::DateSelected(Date::from_ymd(2020, 4, 25)));

        assert!(!viewer.show_picker);
        assert_eq!(
            viewer.selected_date,
            NaiveDate::from_ymd_opt(2020, 4, 25).unwrap()
        );
    }
}
