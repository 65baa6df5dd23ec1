use super::{AlertKind, AlertState, DismissTimer};
use console::style;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_AUTO_CLOSE_TIME: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertProps {
    pub kind: AlertKind,
    pub title: Option<String>,
    pub message: String,
    pub is_open: bool,
    pub auto_close: bool,
    pub auto_close_time: Duration,
}

impl AlertProps {
    pub fn new(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: None,
            message: message.into(),
            is_open: true,
            auto_close: false,
            auto_close_time: DEFAULT_AUTO_CLOSE_TIME,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn open(mut self, is_open: bool) -> Self {
        self.is_open = is_open;
        self
    }

    pub fn auto_close(mut self, after: Duration) -> Self {
        self.auto_close = true;
        self.auto_close_time = after;
        self
    }

    fn schedule_key(&self) -> (bool, bool, Duration) {
        (self.is_open, self.auto_close, self.auto_close_time)
    }
}

impl From<&AlertState> for AlertProps {
    fn from(state: &AlertState) -> Self {
        Self {
            kind: state.kind,
            title: state.title.clone(),
            message: state.message.clone(),
            is_open: state.is_open,
            auto_close: false,
            auto_close_time: DEFAULT_AUTO_CLOSE_TIME,
        }
    }
}

/// A mounted alert. Dropping it is unmounting: any pending auto-close is cancelled.
///
/// Auto-close needs a tokio runtime, since the timer runs as a background task.
pub struct Alert {
    props: AlertProps,
    on_close: Arc<dyn Fn() + Send + Sync>,
    timer: Option<DismissTimer>,
}

impl Alert {
    pub fn mount<F>(props: AlertProps, on_close: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut alert = Self {
            props,
            on_close: Arc::new(on_close),
            timer: None,
        };
        alert.sync_timer();
        alert
    }

    pub fn props(&self) -> &AlertProps {
        &self.props
    }

    /// Re-renders with new props. The auto-close timer restarts only when
    /// `is_open`, `auto_close` or `auto_close_time` changed.
    pub fn set_props(&mut self, props: AlertProps) {
        let reschedule = props.schedule_key() != self.props.schedule_key();
        self.props = props;
        if reschedule {
            self.sync_timer();
        }
    }

    /// The close button. Invokes the callback once per call.
    pub fn dismiss(&self) {
        (self.on_close)();
    }

    pub fn is_auto_close_pending(&self) -> bool {
        self.timer.as_ref().is_some_and(DismissTimer::is_pending)
    }

    fn sync_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        if self.props.is_open && self.props.auto_close {
            let on_close = Arc::clone(&self.on_close);
            self.timer = Some(DismissTimer::schedule(self.props.auto_close_time, move || {
                on_close();
            }));
        }
    }

    /// Terminal rendering; `None` while closed.
    pub fn render(&self) -> Option<String> {
        if !self.props.is_open {
            return None;
        }

        let (icon, heading) = match self.props.kind {
            AlertKind::Success => ("✓", style(self.heading()).green().bold()),
            AlertKind::Error => ("✗", style(self.heading()).red().bold()),
            AlertKind::Info => ("ℹ", style(self.heading()).blue().bold()),
            AlertKind::Warning => ("⚠", style(self.heading()).yellow().bold()),
        };

        let mut out = format!("{icon} {heading}");
        if self.props.title.is_some() {
            out.push_str("\n  ");
            out.push_str(&self.props.message);
        }
        Some(out)
    }

    fn heading(&self) -> String {
        self.props
            .title
            .clone()
            .unwrap_or_else(|| self.props.message.clone())
    }
}
