//! Ephemeral notifications: the alert state hook, the alert component and
//! its auto-dismiss timer.

pub mod component;
pub mod hook;
pub mod timer;

pub use component::{Alert, AlertProps, DEFAULT_AUTO_CLOSE_TIME};
pub use hook::{AlertHook, AlertState};
pub use timer::DismissTimer;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlertKind {
    Success,
    Error,
    #[default]
    Info,
    Warning,
}
