use super::AlertKind;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertState {
    pub kind: AlertKind,
    pub title: Option<String>,
    pub message: String,
    pub is_open: bool,
}

/// Local alert state for one view: closed until [`AlertHook::show_alert`].
#[derive(Debug, Clone, Default)]
pub struct AlertHook {
    alert: AlertState,
}

impl AlertHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alert(&self) -> &AlertState {
        &self.alert
    }

    /// Replaces the whole record and opens it. A missing `title` clears any previous one.
    pub fn show_alert(&mut self, kind: AlertKind, message: impl Into<String>, title: Option<&str>) {
        self.alert = AlertState {
            kind,
            title: title.map(ToOwned::to_owned),
            message: message.into(),
            is_open: true,
        };
    }

    /// Closes the alert, keeping kind, title and message.
    pub fn hide_alert(&mut self) {
        self.alert.is_open = false;
    }
}
