//! Sequential pagination.
//!
//! Topics and reply threads are both split over an unknown number of pages.
//! The count is only visible on page 1, as a hidden `pnum` input, so the walk
//! is: fetch page 1, read the count once, then fetch pages 2..=N in order.

use tracing::info;

use crate::parse::Document;
use crate::source::{DocumentSource, PageRequest};
use crate::{Result, TiebaError};

/// Turns one fetched page into records.
#[allow(async_fn_in_trait)]
pub trait PageExtractor {
    type Item;

    /// Extracts the records on `doc`, which is page number `page`.
    async fn extract_page(&self, doc: &Document, page: u32) -> Result<Vec<Self::Item>>;
}

/// Result of a complete walk.
#[derive(Debug, Clone)]
pub struct Walk<T> {
    /// `<title>` of page 1.
    pub title: Option<String>,
    pub total_pages: u32,
    /// Records of every page, in page order.
    pub items: Vec<T>,
}

/// Reads the page count from the hidden `pnum` input, defaulting to 1.
///
/// # Errors
///
/// Returns [`TiebaError::UnexpectedDocument`] if the input exists but its
/// value is missing or not a number.
pub fn total_pages(doc: &Document) -> Result<u32> {
    let Some(input) = doc.select_first(r#"input[name="pnum"]"#)? else {
        return Ok(1);
    };

    let value = input
        .attr("value")
        .ok_or_else(|| TiebaError::shape("page count input has no value"))?;

    value
        .trim()
        .parse()
        .map_err(|_| TiebaError::shape(format!("page count is not a number: {:?}", value)))
}

/// Walks every page reachable from `first`, one fetch at a time.
///
/// Any failed fetch or extraction aborts the walk; nothing collected so far
/// is returned.
pub async fn walk_pages<S, E>(source: &S, first: &PageRequest, extractor: &E) -> Result<Walk<E::Item>>
where
    S: DocumentSource + ?Sized,
    E: PageExtractor,
{
    let doc = source.fetch(first).await?;
    let title = doc.title();
    let total_pages = total_pages(&doc)?;
    info!(total_pages, "page count");

    let mut items = extractor.extract_page(&doc, 1).await?;
    drop(doc);

    for page in 2..=total_pages {
        info!(page, total_pages, "fetching next page");
        let doc = source.fetch(&first.page(page)).await?;
        items.extend(extractor.extract_page(&doc, page).await?);
    }

    Ok(Walk { title, total_pages, items })
}
