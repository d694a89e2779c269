pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{CliConfig, CliRequest};

pub use crate::config::lambda::{HttpRequestEvent, HttpResponse, LambdaConfig};
pub use crate::config::Settings;

pub use crate::core::resolver::{AcquiredFields, RequestFieldResolver, DEFAULT_EMAIL, DEFAULT_NAME};
pub use crate::core::{Age, RawInput, ResolvedFields};
pub use crate::utils::error::{IntakeError, Result};
