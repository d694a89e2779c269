pub mod body;
pub mod casing;
pub mod resolver;

pub use crate::domain::model::{Age, RawInput, ResolvedFields};
pub use crate::domain::ports::{ConfigProvider, RequestSource};
pub use crate::utils::error::Result;
