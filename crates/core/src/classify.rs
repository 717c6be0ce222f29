//! Node-to-text classification.
//!
//! Every child node of a post or reply item is turned into a text fragment by
//! [`classify_node`]. Rules are evaluated in a fixed order and the first match
//! wins; anything unrecognised becomes an empty fragment.

use crate::extract::ExtractConfig;
use crate::parse::{ContentNode, Element};
use crate::query::{canonicalize_image_url, decoded_param};

/// `href` prefix of user profile links (author names and `@` mentions).
pub const USER_PREFIX: &str = "i?un=";

/// `href` prefix of the redirect gateway that wraps external links.
pub const GATE_URL_PREFIX: &str = "http://gate.baidu.com";

/// `src` prefix of emoticon images.
pub const EMOTICON_URL_PREFIX: &str = "http://tb2.bdstatic.com/tb/editor/images/";

/// Class carried by user-posted images.
pub const CONTENT_IMAGE_CLASS: &str = "BDE_Image";

/// Classifies one node into a text fragment.
///
/// 1. `<br>` becomes `"\n"`.
/// 2. Text nodes are copied verbatim.
/// 3. Profile links keep their display text.
/// 4. Gateway links become the decoded `src` parameter.
/// 5. Emoticons become `" [<name>] "`.
/// 6. Containers holding a content image become the image URL on its own line.
/// 7. Other images become `" <src> "`.
/// 8. Everything else is dropped.
///
/// # Example
///
/// ```rust
/// use tiebafetch_core::classify::classify_node;
/// use tiebafetch_core::parse::ContentNode;
/// use tiebafetch_core::ExtractConfig;
///
/// let config = ExtractConfig::default();
/// assert_eq!(classify_node(&ContentNode::LineBreak, &config), "\n");
/// ```
pub fn classify_node(node: &ContentNode<'_>, config: &ExtractConfig) -> String {
    match node {
        ContentNode::LineBreak => "\n".to_string(),
        ContentNode::Text(text) => text.to_string(),
        ContentNode::Element(element) => classify_element(element, config),
        ContentNode::Other => String::new(),
    }
}

/// Concatenates the fragments of `nodes`.
pub fn accumulate_text(nodes: &[ContentNode<'_>], config: &ExtractConfig) -> String {
    nodes.iter().map(|node| classify_node(node, config)).collect()
}

fn classify_element(element: &Element<'_>, config: &ExtractConfig) -> String {
    let href = element.attr("href").unwrap_or_default();

    if href.starts_with(USER_PREFIX) {
        return element.text();
    }

    if href.starts_with(GATE_URL_PREFIX) {
        return decoded_param(href, "src").unwrap_or_default();
    }

    let is_img = element.tag_name() == "img";
    let src = element.attr("src").unwrap_or_default();

    if is_img && let Some(name) = src.strip_prefix(EMOTICON_URL_PREFIX) {
        return format!(" [{}] ", name);
    }

    if let Some(url) = content_image_url(element, config) {
        return format!("\n{}\n", url);
    }

    if is_img {
        return format!(" {} ", src);
    }

    String::new()
}

/// URL of the first descendant content image, if any.
fn content_image_url(element: &Element<'_>, config: &ExtractConfig) -> Option<String> {
    let selector = format!("img.{}", CONTENT_IMAGE_CLASS);
    let image = element.select_first(&selector).ok().flatten()?;
    let src = image.attr("src").unwrap_or_default();

    let url = if config.preserve_original_image_url {
        decoded_param(src, "src").unwrap_or_else(|| src.to_string())
    } else {
        canonicalize_image_url(src)
    };

    Some(url)
}
