//! Reply threads ("floors within floors").
//!
//! A post with replies links to a separate, paginated `flr` page. Each reply
//! item reads `text <br> author-link date`, so the body ends at the first
//! line break and the author is the last profile link in the item.

use tracing::info;

use crate::classify::{USER_PREFIX, accumulate_text};
use crate::extract::{ExtractConfig, ITEM_SELECTOR, required_text};
use crate::model::Subpost;
use crate::paginate::{PageExtractor, walk_pages};
use crate::parse::{ContentNode, Document, Element};
use crate::source::{DocumentSource, PageRequest};
use crate::{Result, TiebaError};

/// Extracts [`Subpost`]s from reply-thread pages.
pub struct SubpostExtractor<'c> {
    config: &'c ExtractConfig,
}

impl<'c> SubpostExtractor<'c> {
    pub fn new(config: &'c ExtractConfig) -> Self {
        Self { config }
    }

    /// Extracts one reply item.
    pub fn extract_subpost(&self, item: &Element<'_>) -> Result<Subpost> {
        let author = reply_author(item)?;
        let date = required_text(item, "span.b")?;

        let nodes = item.children();
        let body_end = nodes
            .iter()
            .position(|node| matches!(node, ContentNode::LineBreak))
            .unwrap_or(nodes.len());
        let text = accumulate_text(&nodes[..body_end], self.config);

        Ok(Subpost { author, date, text })
    }
}

impl PageExtractor for SubpostExtractor<'_> {
    type Item = Subpost;

    async fn extract_page(&self, doc: &Document, _page: u32) -> Result<Vec<Subpost>> {
        doc.select(ITEM_SELECTOR)?
            .iter()
            .map(|item| self.extract_subpost(item))
            .collect()
    }
}

/// Author of a reply: the last profile link, so `@mentions` in the body of a
/// reply-to-reply are skipped.
fn reply_author(item: &Element<'_>) -> Result<String> {
    item.select("a[href]")?
        .into_iter()
        .rev()
        .find(|link| link.attr("href").is_some_and(|href| href.starts_with(USER_PREFIX)))
        .map(|link| link.text())
        .ok_or_else(|| TiebaError::shape("reply item has no author link"))
}

/// Walks the whole reply thread of post `pid` in topic `kz`.
pub async fn fetch_subposts<S>(source: &S, kz: u64, pid: u64, config: &ExtractConfig) -> Result<Vec<Subpost>>
where
    S: DocumentSource + ?Sized,
{
    info!(pid, "fetching reply thread");
    let walk = walk_pages(source, &PageRequest::replies(kz, pid), &SubpostExtractor::new(config)).await?;
    info!(pid, total_pages = walk.total_pages, replies = walk.items.len(), "reply thread done");
    Ok(walk.items)
}
