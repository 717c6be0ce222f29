//! Output rendering for topics and thread listings.

use std::fmt;
use std::str::FromStr;

pub mod json;
pub mod text;

pub use json::{JsonConfig, listing_to_json, topic_to_json};
pub use text::{listing_to_text, topic_to_text};

use crate::Result;
use crate::model::{ThreadListing, Topic};

/// Output format for rendered records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Renders a topic in `format`. `pretty` only affects JSON.
pub fn render_topic(topic: &Topic, format: OutputFormat, pretty: bool) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(topic_to_text(topic)),
        OutputFormat::Json => topic_to_json(topic, &JsonConfig { pretty }),
    }
}

/// Renders a thread listing in `format`. `pretty` only affects JSON.
pub fn render_listing(threads: &[ThreadListing], format: OutputFormat, pretty: bool) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(listing_to_text(threads)),
        OutputFormat::Json => listing_to_json(threads, &JsonConfig { pretty }),
    }
}
