//! Post extraction for topic pages.
//!
//! Each `div.i` on a topic page is one floor. [`PostExtractor`] reads the
//! metadata spans, strips the floor prefix, joins split posts back together
//! and, when a post has replies, walks its reply thread before moving on.

use tracing::{debug, info};

use crate::classify::accumulate_text;
use crate::floor::normalize_floor;
use crate::model::Post;
use crate::paginate::PageExtractor;
use crate::parse::{Document, Element};
use crate::query::{first_integer, query_param};
use crate::replies::fetch_subposts;
use crate::source::{DocumentSource, PageRequest};
use crate::{Result, TiebaError};

/// Selector of post, reply and listing items.
pub(crate) const ITEM_SELECTOR: &str = "div.i";

/// Text of the link that marks a post as split.
pub const CONTINUATION_MARKER: &str = "下一段";

/// Configuration for content extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractConfig {
    /// Emit the original upload URL of content images instead of the
    /// resized proxy URL.
    pub preserve_original_image_url: bool,
}

/// Extracts [`Post`]s from the pages of topic `kz`.
pub struct PostExtractor<'s, S: ?Sized> {
    source: &'s S,
    kz: u64,
    config: &'s ExtractConfig,
}

impl<'s, S: DocumentSource + ?Sized> PostExtractor<'s, S> {
    pub fn new(source: &'s S, kz: u64, config: &'s ExtractConfig) -> Self {
        Self { source, kz, config }
    }

    /// Extracts one post item found on `page`.
    pub async fn extract_post(&self, item: &Element<'_>, page: u32) -> Result<Post> {
        let author = required_text(item, "span.g")?;
        let date = required_text(item, "span.b")?;
        let (pid, reply_count) = reply_link(item)?;

        let normalized = normalize_floor(item)?;
        let floor = normalized.floor;
        debug!(floor, %author, reply_count, "post item");

        let text = match find_continuation(item)? {
            Some(_) => {
                info!(floor, "expanding split post");
                let expanded = self.source.fetch(&PageRequest::expanded_post(self.kz, page, floor)).await?;
                let replacement = expanded
                    .select_first(ITEM_SELECTOR)?
                    .ok_or_else(|| TiebaError::shape(format!("expanded page for floor {} has no item", floor)))?;
                accumulate_text(&normalize_floor(&replacement)?.nodes, self.config)
            }
            None => accumulate_text(&normalized.nodes, self.config),
        };

        let subposts = match pid {
            Some(pid) if reply_count > 0 => {
                info!(floor, reply_count, "post has replies");
                Some(fetch_subposts(self.source, self.kz, pid, self.config).await?)
            }
            _ => None,
        };

        Ok(Post { floor, author, date, pid, reply_count, text, subposts })
    }
}

impl<S: DocumentSource + ?Sized> PageExtractor for PostExtractor<'_, S> {
    type Item = Post;

    async fn extract_page(&self, doc: &Document, page: u32) -> Result<Vec<Post>> {
        let mut posts = Vec::new();
        for item in doc.select(ITEM_SELECTOR)? {
            posts.push(self.extract_post(&item, page).await?);
        }
        Ok(posts)
    }
}

/// Text of the first descendant matching `selector`.
pub(crate) fn required_text(item: &Element<'_>, selector: &str) -> Result<String> {
    item.select_first(selector)?
        .map(|el| el.text())
        .ok_or_else(|| TiebaError::shape(format!("item has no {}", selector)))
}

/// `pid` and reply count from the optional `a.reply_to` link.
fn reply_link(item: &Element<'_>) -> Result<(Option<u64>, u32)> {
    let Some(link) = item.select_first("a.reply_to")? else {
        return Ok((None, 0));
    };

    let href = link.attr("href").unwrap_or_default();
    let pid = query_param(href, "pid")
        .and_then(|pid| pid.parse().ok())
        .ok_or_else(|| TiebaError::shape(format!("reply link has no numeric pid: {:?}", href)))?;
    let reply_count = first_integer(&link.text()).unwrap_or(0);

    Ok((Some(pid), reply_count))
}

/// The "next segment" link of a split post, if any.
fn find_continuation<'a>(item: &Element<'a>) -> Result<Option<Element<'a>>> {
    Ok(item
        .select("a")?
        .into_iter()
        .find(|link| link.text().trim() == CONTINUATION_MARKER))
}
