#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod alert;
pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod fetch;
pub mod http;
pub mod models;
pub mod storage;
pub mod store;

pub use config::Config;
pub use context::AppContext;
pub use error::{ApiError, DatawiseError, Result};
