//! Core library for the `skyview` weather tool.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather fetcher and its error taxonomy
//! - Condition → theme classification and view-model presentation
//! - The submit/render session that ties a query to its completion
//!
//! It is used by `skyview-cli`, but any front end that can implement
//! [`RenderSink`] can drive it.

pub mod config;
pub mod error;
pub mod model;
pub mod presenter;
pub mod provider;
pub mod session;
pub mod theme;

pub use config::Config;
pub use error::{FailureReason, FetchError, PresentationError};
pub use model::{WeatherQuery, WeatherReading};
pub use presenter::{DisplayViewModel, present, present_outcome};
pub use provider::{OpenWeatherClient, WeatherFetcher, client_from_config};
pub use session::{Completion, Completions, QuerySubmitter, RenderSink, Renderer, RequestState, session};
pub use theme::{PresentationTheme, classify_theme};
