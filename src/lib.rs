pub mod config;

pub use config::{global, Config, ConfigError, Environment, Loader, ProcessEnv, Section};
