use std::sync::Mutex;

pub const DASHBOARD_ROUTE: &str = "/dashboard";
pub const LOGIN_ROUTE: &str = "/login";
pub const SIGNUP_ROUTE: &str = "/signup";

/// Imperative route transitions.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Remembers every requested route so a request handler can turn the last one
/// into a redirect.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the most recent route, clearing the history.
    pub fn take(&self) -> Option<String> {
        let mut visited = self.visited.lock().unwrap_or_else(|e| e.into_inner());
        let last = visited.pop();
        visited.clear();
        last
    }

    pub fn history(&self) -> Vec<String> {
        self.visited
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        tracing::debug!("Navigating to {}", path);
        self.visited
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(path.to_string());
    }
}
