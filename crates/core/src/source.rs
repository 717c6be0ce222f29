//! The document source seam.
//!
//! Extractors never talk to the network directly. They describe the page
//! they want as a [`PageRequest`] and hand it to a [`DocumentSource`], which
//! returns a parsed [`Document`]. [`crate::fetch::HttpSource`] is the live
//! implementation; tests replay captured pages instead.

use crate::Result;
use crate::parse::Document;

/// The two page families served under the mobile site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `/mo/m`: thread pages, expanded posts and forum listings.
    Thread,
    /// `/mo/m/flr`: a post's reply thread.
    Replies,
}

impl Endpoint {
    /// Path suffix appended to the source's base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Thread => "",
            Endpoint::Replies => "/flr",
        }
    }
}

/// One page to fetch: an endpoint plus ordered query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub endpoint: Endpoint,
    pub params: Vec<(&'static str, String)>,
}

impl PageRequest {
    /// First page of topic `kz`.
    pub fn topic(kz: u64) -> Self {
        Self::new(Endpoint::Thread).param("kz", kz)
    }

    /// A single post of topic `kz` on `page`, with its split segments joined.
    pub fn expanded_post(kz: u64, page: u32, floor: u32) -> Self {
        Self::new(Endpoint::Thread)
            .param("kz", kz)
            .param("pnum", page)
            .param("expand", floor)
            .param("global", 1)
    }

    /// First page of the reply thread under post `pid` of topic `kz`.
    pub fn replies(kz: u64, pid: u64) -> Self {
        Self::new(Endpoint::Replies).param("kz", kz).param("pid", pid)
    }

    /// Page `page` of forum `forum`'s thread listing.
    pub fn listing(forum: &str, page: u32, showcase_only: bool) -> Self {
        let request = Self::new(Endpoint::Thread).param("kw", forum).param("pnum", page);
        if showcase_only { request.param("lm", 4) } else { request }
    }

    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint, params: Vec::new() }
    }

    /// Appends a query parameter.
    pub fn param(mut self, name: &'static str, value: impl ToString) -> Self {
        self.params.push((name, value.to_string()));
        self
    }

    /// The same request for a later page of a paginated walk.
    pub fn page(&self, page: u32) -> Self {
        self.clone().param("pnum", page)
    }

    /// Looks up a parameter value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Anything that can turn a [`PageRequest`] into a parsed document.
///
/// Implementations are awaited one request at a time; callers never issue a
/// second request before the previous one resolved.
#[allow(async_fn_in_trait)]
pub trait DocumentSource {
    async fn fetch(&self, request: &PageRequest) -> Result<Document>;
}

impl<S: DocumentSource + ?Sized> DocumentSource for &S {
    async fn fetch(&self, request: &PageRequest) -> Result<Document> {
        (**self).fetch(request).await
    }
}
