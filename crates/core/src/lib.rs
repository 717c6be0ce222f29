pub mod classify;
pub mod client;
pub mod error;
pub mod extract;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod floor;
pub mod formatters;
pub mod listing;
pub mod model;
pub mod paginate;
pub mod parse;
pub mod query;
pub mod replies;
pub mod source;

pub use client::Tieba;
#[cfg(feature = "fetch")]
pub use client::fetch_topic;
pub use error::{Result, TiebaError};
pub use extract::{ExtractConfig, PostExtractor};
#[cfg(feature = "fetch")]
pub use fetch::{FetchConfig, HttpSource};
pub use formatters::{JsonConfig, OutputFormat, listing_to_json, listing_to_text, topic_to_json, topic_to_text};
pub use formatters::{render_listing, render_topic};
pub use listing::{extract_listing_page, fetch_listing};
pub use model::{Post, Subpost, ThreadListing, Topic};
pub use paginate::{PageExtractor, Walk, walk_pages};
pub use parse::{ContentNode, Document, Element};
pub use replies::{SubpostExtractor, fetch_subposts};
pub use source::{DocumentSource, Endpoint, PageRequest};
