//! Configuration loading and typed lookup.

mod builder;
mod env;
mod error;
pub mod global;
mod model;
mod resolve;
mod section;

pub use builder::Loader;
pub use env::{Environment, ProcessEnv};
pub use error::ConfigError;
pub use model::Config;
pub use section::Section;
