//! Floor-number prefix handling.
//!
//! Each post item opens with a text node like `"3楼. Hello"`. The number is
//! the post's floor; it and the separator must be removed from the text
//! before classification so they never reach the assembled post body.

use std::borrow::Cow;

use crate::parse::{ContentNode, Element};
use crate::query::parse_leading_integer;
use crate::{Result, TiebaError};

/// Separators accepted between the floor number and the post body.
///
/// The live pages use the simplified form; the traditional form shows up in
/// converted captures.
pub const FLOOR_SEPARATORS: [&str; 2] = ["楼. ", "樓. "];

/// A post item's floor number and its children with the prefix removed.
#[derive(Debug, Clone)]
pub struct NormalizedItem<'a> {
    pub floor: u32,
    pub nodes: Vec<ContentNode<'a>>,
}

/// Splits `"<digits><separator><rest>"` into the floor number and `rest`.
///
/// ```rust
/// use tiebafetch_core::floor::split_floor_prefix;
///
/// assert_eq!(split_floor_prefix("12楼. hi"), Some((12, "hi")));
/// assert_eq!(split_floor_prefix("12 hi"), None);
/// ```
pub fn split_floor_prefix(s: &str) -> Option<(u32, &str)> {
    let (floor, rest) = parse_leading_integer::<u32>(s)?;
    FLOOR_SEPARATORS
        .iter()
        .find_map(|separator| rest.strip_prefix(separator))
        .map(|body| (floor, body))
}

/// Reads the floor from `item`'s first child and strips it.
///
/// # Errors
///
/// Returns [`TiebaError::UnexpectedDocument`] when the item is empty or its
/// first child does not start with a floor prefix.
pub fn normalize_floor<'a>(item: &Element<'a>) -> Result<NormalizedItem<'a>> {
    let mut nodes = item.children();

    let (floor, rest) = {
        let first = nodes
            .first()
            .and_then(ContentNode::string)
            .ok_or_else(|| TiebaError::shape("post item has no leading text node"))?;

        let (floor, rest) = split_floor_prefix(&first)
            .ok_or_else(|| TiebaError::shape(format!("post item does not start with a floor prefix: {:?}", first)))?;
        (floor, rest.to_string())
    };

    nodes[0] = ContentNode::Text(Cow::Owned(rest));

    Ok(NormalizedItem { floor, nodes })
}
