use serde::Serialize;

use crate::Result;
use crate::model::{ThreadListing, Topic};

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
}

fn to_json<T: Serialize + ?Sized>(value: &T, config: &JsonConfig) -> Result<String> {
    let json = if config.pretty { serde_json::to_string_pretty(value)? } else { serde_json::to_string(value)? };
    Ok(json)
}

/// Convert a topic to JSON
pub fn topic_to_json(topic: &Topic, config: &JsonConfig) -> Result<String> {
    to_json(topic, config)
}

/// Convert a thread listing to a JSON array
pub fn listing_to_json(threads: &[ThreadListing], config: &JsonConfig) -> Result<String> {
    to_json(threads, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Post, Subpost};

    fn topic() -> Topic {
        Topic {
            title: "Rust".to_string(),
            author: "alice".to_string(),
            posts: vec![
                Post {
                    floor: 1,
                    author: "alice".to_string(),
                    date: "5-1 12:00".to_string(),
                    pid: Some(900),
                    reply_count: 1,
                    text: "hello".to_string(),
                    subposts: Some(vec![Subpost {
                        author: "bob".to_string(),
                        date: "5-1 12:01".to_string(),
                        text: "hi".to_string(),
                    }]),
                },
                Post {
                    floor: 2,
                    author: "carol".to_string(),
                    date: "5-1 12:05".to_string(),
                    pid: None,
                    reply_count: 0,
                    text: "second".to_string(),
                    subposts: None,
                },
            ],
        }
    }

    #[test]
    fn test_topic_to_json_structure() {
        let json = topic_to_json(&topic(), &JsonConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["title"], "Rust");
        assert_eq!(value["author"], "alice");
        assert_eq!(value["posts"][0]["subposts"][0]["author"], "bob");
        assert!(value["posts"][1].get("subposts").is_none());
        assert!(value["posts"][1]["pid"].is_null());
    }

    #[test]
    fn test_topic_to_json_compact() {
        let json = topic_to_json(&topic(), &JsonConfig::default()).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains(r#""title":"Rust""#));
    }

    #[test]
    fn test_topic_to_json_pretty() {
        let json = topic_to_json(&topic(), &JsonConfig { pretty: true }).unwrap();
        assert!(json.contains('\n'));
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
    }

    #[test]
    fn test_listing_to_json() {
        let threads = vec![ThreadListing { id: 1001, title: "置顶".to_string(), featured: true, pinned: true }];
        let json = listing_to_json(&threads, &JsonConfig::default()).unwrap();
        assert_eq!(json, r#"[{"id":1001,"title":"置顶","featured":true,"pinned":true}]"#);
    }

    #[test]
    fn test_empty_listing_to_json() {
        assert_eq!(listing_to_json(&[], &JsonConfig::default()).unwrap(), "[]");
    }
}
