use thiserror::Error;

mod collections;
mod colors;
mod ids;
mod rich_text;
pub(crate) mod tagged;
mod timestamps;
mod users;

pub use collections::*;
pub use colors::*;
pub use ids::*;
pub use rich_text::*;
pub use timestamps::*;
pub use users::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid Notion ID format: {0}")]
    InvalidId(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Value out of bounds: {value}, expected {min}..={max}")]
    OutOfBounds { value: u32, min: u32, max: u32 },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
