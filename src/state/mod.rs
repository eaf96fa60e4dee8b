/// State management module
///
/// This module holds the state the UI renders from:
/// - Display-ready content for the current picture (display.rs)

pub mod display;
