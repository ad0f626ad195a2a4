//! Elicit Analyzer
//!
//! Client-side controller for a two-stage document pipeline: a PDF or image
//! is validated, sent to an extraction service, and the extracted text is
//! sent on to an analysis service. The controller exposes a view model that
//! any shell can render.

pub mod config;
pub mod controller;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod view;

pub use config::Config;
pub use controller::{Controller, ControllerChannels};
pub use error::{Alert, AppError, AppResult};
pub use view::ViewModel;
