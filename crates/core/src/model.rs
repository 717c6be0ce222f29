//! Records produced by the extractors.
//!
//! These are plain owned values: a [`Topic`] owns its [`Post`]s and a post
//! owns its [`Subpost`]s. Nothing is shared or mutated once returned.

use serde::Serialize;

/// A fully walked thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topic {
    pub title: String,
    /// Author of the first post.
    pub author: String,
    pub posts: Vec<Post>,
}

/// One floor of a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub floor: u32,
    pub author: String,
    pub date: String,
    /// Absent for items without a reply link.
    pub pid: Option<u64>,
    pub reply_count: u32,
    /// Post body with the floor prefix removed.
    pub text: String,
    /// Present exactly when `reply_count > 0`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subposts: Option<Vec<Subpost>>,
}

/// A reply inside a post's reply thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subpost {
    pub author: String,
    pub date: String,
    pub text: String,
}

/// One entry of a forum's thread listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadListing {
    pub id: u64,
    pub title: String,
    /// Carries the showcase badge.
    pub featured: bool,
    /// Carries the sticky badge.
    pub pinned: bool,
}
