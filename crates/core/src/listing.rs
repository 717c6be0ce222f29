//! Forum thread listings.
//!
//! Unlike topics, listing pages carry no page-count signal; the caller names
//! an inclusive page range and every page in it is fetched in order.

use tracing::{debug, info};

use crate::extract::ITEM_SELECTOR;
use crate::model::ThreadListing;
use crate::parse::{Document, Element};
use crate::query::{query_param, strip_through};
use crate::source::{DocumentSource, PageRequest};
use crate::{Result, TiebaError};

/// Separator between the position number and the title in listing links.
pub const TITLE_SEPARATOR: &str = ".\u{a0}";

/// Badge text of showcase threads.
pub const FEATURED_BADGE: &str = "精";

/// Badge text of pinned threads.
pub const PINNED_BADGE: &str = "顶";

/// Extracts one listing item.
pub fn extract_listing_item(item: &Element<'_>) -> Result<ThreadListing> {
    let link = item
        .select_first("a")?
        .ok_or_else(|| TiebaError::shape("listing item has no link"))?;

    let href = link.attr("href").unwrap_or_default();
    let id = query_param(href, "kz")
        .and_then(|kz| kz.parse().ok())
        .ok_or_else(|| TiebaError::shape(format!("listing link has no numeric kz: {:?}", href)))?;

    let text = link.text();
    let title = strip_through(&text, TITLE_SEPARATOR).to_string();

    Ok(ThreadListing {
        id,
        title,
        featured: item.has_text_node(FEATURED_BADGE),
        pinned: item.has_text_node(PINNED_BADGE),
    })
}

/// Extracts every listing item on one page.
pub fn extract_listing_page(doc: &Document) -> Result<Vec<ThreadListing>> {
    doc.select(ITEM_SELECTOR)?.iter().map(extract_listing_item).collect()
}

/// Fetches pages `start..=end` of `forum`'s listing.
///
/// Results are concatenated in page order without deduplication.
///
/// # Errors
///
/// Returns [`TiebaError::InvalidPageRange`] before any fetch when
/// `start > end`.
pub async fn fetch_listing<S>(source: &S, forum: &str, start: u32, end: u32, showcase_only: bool) -> Result<Vec<ThreadListing>>
where
    S: DocumentSource + ?Sized,
{
    if start > end {
        return Err(TiebaError::InvalidPageRange { start, end });
    }

    info!(forum, start, end, showcase_only, "fetching thread listing");

    let mut threads = Vec::new();
    for page in start..=end {
        info!(page, "listing page");
        let doc = source.fetch(&PageRequest::listing(forum, page, showcase_only)).await?;
        let entries = extract_listing_page(&doc)?;
        debug!(page, entries = entries.len(), "listing page extracted");
        threads.extend(entries);
    }

    info!(forum, threads = threads.len(), "thread listing done");
    Ok(threads)
}
