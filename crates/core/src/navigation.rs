//! Navigation intents raised by the API client
//!
//! The client never drives a UI itself. When a response demands a redirect or
//! a user-facing message it hands the intent to a [`Navigator`], which the
//! embedding application implements.

use std::sync::Mutex;
use tracing::{info, warn};

/// Something the client asked the surrounding application to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationIntent {
    Navigate(String),
    Notify(String),
}

pub trait Navigator: Send + Sync {
    /// Switch to the view at `path`
    fn navigate(&self, path: &str);

    /// Show `message` to the user
    fn notify(&self, message: &str);
}

/// Discards every intent
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, _path: &str) {}

    fn notify(&self, _message: &str) {}
}

/// Reports intents through tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, path: &str) {
        info!(path, "Navigation requested");
    }

    fn notify(&self, message: &str) {
        warn!("{message}");
    }
}

/// Keeps every intent in order of arrival
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    intents: Mutex<Vec<NavigationIntent>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intents(&self) -> Vec<NavigationIntent> {
        self.intents
            .lock()
            .map(|intents| intents.clone())
            .unwrap_or_default()
    }

    /// Paths navigated to, in order
    pub fn navigations(&self) -> Vec<String> {
        self.intents()
            .into_iter()
            .filter_map(|intent| match intent {
                NavigationIntent::Navigate(path) => Some(path),
                NavigationIntent::Notify(_) => None,
            })
            .collect()
    }

    /// Messages shown, in order
    pub fn notifications(&self) -> Vec<String> {
        self.intents()
            .into_iter()
            .filter_map(|intent| match intent {
                NavigationIntent::Notify(message) => Some(message),
                NavigationIntent::Navigate(_) => None,
            })
            .collect()
    }

    /// Most recent navigation target
    pub fn last_navigation(&self) -> Option<String> {
        self.navigations().pop()
    }

    fn push(&self, intent: NavigationIntent) {
        if let Ok(mut intents) = self.intents.lock() {
            intents.push(intent);
        }
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.push(NavigationIntent::Navigate(path.to_string()));
    }

    fn notify(&self, message: &str) {
        self.push(NavigationIntent::Notify(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_navigator_keeps_order() {
        let nav = RecordingNavigator::new();
        nav.notify("denied");
        nav.navigate("/admin/login");
        nav.navigate("/home");

        assert_eq!(
            nav.intents(),
            vec![
                NavigationIntent::Notify("denied".into()),
                NavigationIntent::Navigate("/admin/login".into()),
                NavigationIntent::Navigate("/home".into()),
            ]
        );
        assert_eq!(nav.notifications(), vec!["denied".to_string()]);
        assert_eq!(nav.last_navigation().as_deref(), Some("/home"));
    }
}
