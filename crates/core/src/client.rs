//! Main fetching API.
//!
//! [`Tieba`] bundles a [`DocumentSource`] with an [`ExtractConfig`] and
//! exposes the three walks: a whole topic, a single reply thread and a forum
//! listing.
//!
//! # Example
//!
//! ```rust
//! use tiebafetch_core::{DocumentSource, Tieba};
//!
//! async fn dump_topic<S: DocumentSource>(source: S, kz: u64) -> tiebafetch_core::Result<()> {
//!     let topic = Tieba::new(source).fetch_topic(kz).await?;
//!     println!("{} ({} floors)", topic.title, topic.posts.len());
//!     Ok(())
//! }
//! ```
//!
//! With the `fetch` feature, `Tieba::http` builds a client backed by the
//! live site.

use tracing::info;

use crate::extract::{ExtractConfig, PostExtractor};
use crate::listing::fetch_listing;
use crate::model::{Subpost, ThreadListing, Topic};
use crate::paginate::walk_pages;
use crate::replies::fetch_subposts;
use crate::source::{DocumentSource, PageRequest};
use crate::{Result, TiebaError};

#[cfg(feature = "fetch")]
use crate::fetch::{FetchConfig, HttpSource};

/// Entry point for fetching topics and listings.
pub struct Tieba<S> {
    source: S,
    config: ExtractConfig,
}

impl<S: DocumentSource> Tieba<S> {
    /// Creates a client with default extraction settings.
    pub fn new(source: S) -> Self {
        Self::with_config(source, ExtractConfig::default())
    }

    /// Creates a client with a custom extraction configuration.
    pub fn with_config(source: S, config: ExtractConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Walks every page of topic `kz`, including split posts and reply threads.
    ///
    /// # Errors
    ///
    /// Fails on the first transport error or unexpected page shape. A topic
    /// without a `<title>` or without posts is an unexpected shape.
    pub async fn fetch_topic(&self, kz: u64) -> Result<Topic> {
        info!(kz, "fetching topic");

        let extractor = PostExtractor::new(&self.source, kz, &self.config);
        let walk = walk_pages(&self.source, &PageRequest::topic(kz), &extractor).await?;

        let title = walk
            .title
            .ok_or_else(|| TiebaError::shape(format!("topic {} page has no title", kz)))?;
        info!(%title, "topic title");

        let author = walk
            .items
            .first()
            .map(|post| post.author.clone())
            .ok_or_else(|| TiebaError::shape(format!("topic {} has no posts", kz)))?;

        info!(kz, floors = walk.items.len(), "topic done");
        Ok(Topic { title, author, posts: walk.items })
    }

    /// Walks the reply thread under post `pid` of topic `kz`.
    pub async fn fetch_replies(&self, kz: u64, pid: u64) -> Result<Vec<Subpost>> {
        fetch_subposts(&self.source, kz, pid, &self.config).await
    }

    /// Fetches pages `start..=end` of `forum`'s thread listing.
    pub async fn fetch_listing(&self, forum: &str, start: u32, end: u32, showcase_only: bool) -> Result<Vec<ThreadListing>> {
        fetch_listing(&self.source, forum, start, end, showcase_only).await
    }
}

#[cfg(feature = "fetch")]
impl Tieba<HttpSource> {
    /// Creates a client backed by the live site.
    pub fn http(fetch: FetchConfig, config: ExtractConfig) -> Result<Self> {
        Ok(Self::with_config(HttpSource::new(fetch)?, config))
    }
}

/// Fetches topic `kz` from the live site with default settings.
#[cfg(feature = "fetch")]
pub async fn fetch_topic(kz: u64) -> Result<Topic> {
    Tieba::http(FetchConfig::default(), ExtractConfig::default())?
        .fetch_topic(kz)
        .await
}
