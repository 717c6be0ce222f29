//! Library API integration tests
use std::cell::RefCell;

use tiebafetch_core::*;

const CANONICAL_IMAGE: &str = "http://m.tiebaimg.com/timg?wapp&quality=100&size=b2000_2000&src=http%3A%2F%2Fimgsrc.baidu.com%2Fforum%2Fpic%2Fitem%2Fabc.jpg";

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(get_fixture_path(name)).unwrap()
}

/// Serves the captured fixture pages for topic 4242 and the `rust` forum.
#[derive(Default)]
struct FixtureSource {
    requests: RefCell<Vec<PageRequest>>,
}

impl FixtureSource {
    fn fixture_for(request: &PageRequest) -> Option<&'static str> {
        let page = request.get("pnum");
        match (request.endpoint, request.get("kz"), request.get("kw")) {
            (Endpoint::Replies, Some("4242"), None) if request.get("pid") == Some("1001") => Some("replies_1001.html"),
            (Endpoint::Thread, Some("4242"), None) if request.get("expand") == Some("2") => Some("topic_expanded.html"),
            (Endpoint::Thread, Some("4242"), None) => match page {
                None => Some("topic_page1.html"),
                Some("2") => Some("topic_page2.html"),
                Some(_) => None,
            },
            (Endpoint::Thread, None, Some("rust")) => Some("listing_rust.html"),
            _ => None,
        }
    }

    fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl DocumentSource for FixtureSource {
    async fn fetch(&self, request: &PageRequest) -> Result<Document> {
        self.requests.borrow_mut().push(request.clone());
        let name = Self::fixture_for(request)
            .ok_or_else(|| TiebaError::InvalidUrl(format!("no fixture for {:?}", request)))?;
        Document::parse(&read_fixture(name))
    }
}

#[tokio::test]
async fn test_fetch_topic_from_fixtures() {
    let source = FixtureSource::default();
    let topic = Tieba::new(&source).fetch_topic(4242).await.expect("should walk topic");

    assert_eq!(topic.title, "Rust 编程讨论");
    assert_eq!(topic.author, "alice");

    let floors: Vec<u32> = topic.posts.iter().map(|p| p.floor).collect();
    assert_eq!(floors, vec![1, 2, 3, 4]);
    assert!(floors.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_topic_post_bodies() {
    let source = FixtureSource::default();
    let topic = Tieba::new(&source).fetch_topic(4242).await.unwrap();
    let posts = &topic.posts;

    assert_eq!(posts[0].text, "大家好\n第二行 [face/i_f01.png] \n\u{a0}\u{a0}");
    assert_eq!(posts[1].text, "截断的帖子现在完整了\n第二段");
    assert_eq!(
        posts[2].text,
        format!("看图\n{}\n外链http://www.rust-lang.org/\n\u{a0}", CANONICAL_IMAGE)
    );
    assert_eq!(posts[3].text, "最后一楼\n\u{a0}");

    for post in posts {
        assert!(!post.text.contains("楼. "));
        assert!(!post.text.contains("樓. "));
    }
}

#[tokio::test]
async fn test_topic_reply_threads() {
    let source = FixtureSource::default();
    let topic = Tieba::new(&source).fetch_topic(4242).await.unwrap();

    let first = &topic.posts[0];
    assert_eq!(first.pid, Some(1001));
    assert_eq!(first.reply_count, 2);
    let subposts = first.subposts.as_ref().expect("first floor has replies");
    assert_eq!(subposts.len(), 2);
    assert_eq!(subposts[0], Subpost { author: "dave".into(), date: "5-1 12:01".into(), text: "沙发".into() });
    assert_eq!(subposts[1].author, "erin");
    assert_eq!(subposts[1].text, "回复 alice :谢谢");

    let second = &topic.posts[1];
    assert_eq!(second.pid, Some(1002));
    assert_eq!(second.reply_count, 0);
    assert!(second.subposts.is_none());

    assert_eq!(topic.posts[3].pid, None);
}

#[tokio::test]
async fn test_topic_request_sequence() {
    let source = FixtureSource::default();
    Tieba::new(&source).fetch_topic(4242).await.unwrap();

    let requests = source.requests.borrow();
    assert_eq!(requests.len(), 4);
    assert_eq!(requests[0], PageRequest::topic(4242));
    assert_eq!(requests[1], PageRequest::replies(4242, 1001));
    assert_eq!(requests[2], PageRequest::expanded_post(4242, 1, 2));
    assert_eq!(requests[3], PageRequest::topic(4242).page(2));
}

#[tokio::test]
async fn test_preserve_original_image_url() {
    let source = FixtureSource::default();
    let config = ExtractConfig { preserve_original_image_url: true };
    let topic = Tieba::with_config(&source, config).fetch_topic(4242).await.unwrap();

    assert!(topic.posts[2].text.contains("\nhttp://imgsrc.baidu.com/forum/pic/item/abc.jpg\n"));
    assert!(!topic.posts[2].text.contains("timg"));
}

#[tokio::test]
async fn test_fetch_replies_directly() {
    let source = FixtureSource::default();
    let replies = Tieba::new(&source).fetch_replies(4242, 1001).await.unwrap();

    assert_eq!(replies.len(), 2);
    assert_eq!(source.request_count(), 1);
}

#[tokio::test]
async fn test_fetch_unknown_topic_fails() {
    let source = FixtureSource::default();
    let result = Tieba::new(&source).fetch_topic(1).await;
    assert!(matches!(result, Err(TiebaError::InvalidUrl(_))));
}

#[tokio::test]
async fn test_fetch_listing_from_fixtures() {
    let source = FixtureSource::default();
    let threads = Tieba::new(&source).fetch_listing("rust", 1, 2, false).await.unwrap();

    assert_eq!(source.request_count(), 2);
    assert_eq!(threads.len(), 6);

    let first_page = &threads[..3];
    assert_eq!(
        first_page[0],
        ThreadListing { id: 1001, title: "本吧吧规".into(), featured: false, pinned: true }
    );
    assert_eq!(
        first_page[1],
        ThreadListing { id: 1002, title: "所有权入门".into(), featured: true, pinned: false }
    );
    assert_eq!(first_page[2].title, "求助. \u{a0}借用检查报错");
    assert!(!first_page[2].featured && !first_page[2].pinned);
}

#[tokio::test]
async fn test_fetch_listing_invalid_range() {
    let source = FixtureSource::default();
    let result = Tieba::new(&source).fetch_listing("rust", 5, 1, true).await;

    assert!(matches!(result, Err(TiebaError::InvalidPageRange { start: 5, end: 1 })));
    assert_eq!(source.request_count(), 0);
}

#[test]
fn test_extract_listing_page_api() {
    let doc = Document::parse(&read_fixture("listing_rust.html")).unwrap();
    let ids: Vec<u64> = extract_listing_page(&doc).unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1001, 1002, 1003]);
}

#[tokio::test]
async fn test_render_topic_formats() {
    let source = FixtureSource::default();
    let topic = Tieba::new(&source).fetch_topic(4242).await.unwrap();

    let text = render_topic(&topic, OutputFormat::Text, false).unwrap();
    assert!(text.starts_with("Rust 编程讨论\nLZ: alice\n"));
    assert!(text.contains("1L | alice | 5-1 12:00\n\n大家好"));
    assert!(text.contains("*** dave | 5-1 12:01\n> 沙发\n\n"));
    assert_eq!(text.matches(&"#".repeat(80)).count(), 4);

    let json: serde_json::Value = serde_json::from_str(&render_topic(&topic, OutputFormat::Json, true).unwrap()).unwrap();
    assert_eq!(json["posts"].as_array().unwrap().len(), 4);
    assert_eq!(json["posts"][0]["subposts"][1]["author"], "erin");
    assert!(json["posts"][1].get("subposts").is_none());
}
