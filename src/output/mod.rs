//! Tree formatting and display
//!
//! - `style` - color classification of entry names
//! - `streaming` - text formatter for console output
//! - `json` - JSON document output

mod json;
mod streaming;
mod style;

pub use json::{JsonFormatter, JsonNode};
pub use streaming::StreamingFormatter;
pub use style::{EntryStyle, error_spec};
