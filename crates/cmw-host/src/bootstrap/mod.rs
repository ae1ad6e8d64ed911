pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, resolve_config, ConfigError, CONFIG_ENV};
pub use run::run_stdio;
pub use wiring::{wire_widget, wire_widget_with, WidgetWiring};
