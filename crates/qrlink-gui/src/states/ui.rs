use std::time::{Duration, Instant};

const TOAST_LIFETIME: Duration = Duration::from_secs(3);

/// Which screen is shown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Main,
    /// Decoded payload waiting for the user to act on it.
    Result { text: String },
}

pub struct Toast {
    pub message: String,
    pub shown_at: Instant,
}

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    pub route: Route,
    pub input_text: String,

    /// Camera preview is visible while a live scan runs.
    pub show_preview: bool,
    /// "Save Image" is offered once a code has been generated.
    pub show_save_button: bool,

    /// A worker command is in flight (generate, file scan, send).
    pub busy: bool,

    pub toasts: Vec<Toast>,
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    pub fn toast(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.add_log(message.clone());
        self.toasts.push(Toast {
            message,
            shown_at: Instant::now(),
        });
    }

    /// Drop toasts older than their lifetime.
    pub fn expire_toasts(&mut self, now: Instant) {
        self.toasts
            .retain(|t| now.saturating_duration_since(t.shown_at) < TOAST_LIFETIME);
    }

    /// The input exactly as typed, or `None` when it is blank.
    pub fn encodable_text(&self) -> Option<String> {
        (!self.input_text.trim().is_empty()).then(|| self.input_text.clone())
    }

    /// A code was generated from the input: clear the field, offer saving.
    pub fn on_generated(&mut self) {
        self.busy = false;
        self.input_text.clear();
        self.show_save_button = true;
    }

    pub fn begin_live_scan(&mut self) {
        self.show_preview = true;
    }

    pub fn end_live_scan(&mut self) {
        self.show_preview = false;
    }

    /// Navigate to the result screen. Ignored while a result is already open,
    /// so a session never acts on a second payload.
    pub fn show_result(&mut self, text: String) -> bool {
        self.busy = false;
        self.end_live_scan();
        if matches!(self.route, Route::Result { .. }) {
            return false;
        }
        self.route = Route::Result { text };
        true
    }

    pub fn back_to_main(&mut self) {
        self.route = Route::Main;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_button_only_after_generate() {
        let mut state = UIState::default();
        assert!(!state.show_save_button);

        state.input_text = "hello".into();
        state.busy = true;
        state.on_generated();

        assert!(state.show_save_button);
        assert!(state.input_text.is_empty());
        assert!(!state.busy);
    }

    #[test]
    fn encodable_text_keeps_surrounding_spaces() {
        let mut state = UIState::default();
        state.input_text = "   \n".into();
        assert_eq!(state.encodable_text(), None);

        state.input_text = "  padded payload ".into();
        assert_eq!(state.encodable_text().as_deref(), Some("  padded payload "));
    }

    #[test]
    fn result_route_round_trip() {
        let mut state = UIState::default();
        state.begin_live_scan();

        assert!(state.show_result("https://example.com".into()));
        assert!(!state.show_preview);
        assert_eq!(
            state.route,
            Route::Result {
                text: "https://example.com".into()
            }
        );

        state.back_to_main();
        assert_eq!(state.route, Route::Main);
    }

    #[test]
    fn second_result_is_ignored() {
        let mut state = UIState::default();
        assert!(state.show_result("first".into()));
        assert!(!state.show_result("second".into()));
        assert_eq!(state.route, Route::Result { text: "first".into() });
    }

    #[test]
    fn toasts_expire() {
        let mut state = UIState::default();
        state.toast("Image saved");
        assert_eq!(state.toasts.len(), 1);
        assert_eq!(state.log_messages, vec!["Image saved".to_string()]);

        let later = state.toasts[0].shown_at + TOAST_LIFETIME;
        state.expire_toasts(later);
        assert!(state.toasts.is_empty());
    }
}
