use std::fmt::Write;

use crate::model::{Post, ThreadListing, Topic};

const RULE_WIDTH: usize = 80;

/// Convert a topic to the plain text layout: a title header, then one block
/// per floor with its replies quoted underneath.
pub fn topic_to_text(topic: &Topic) -> String {
    let mut output = String::new();

    output.push_str(&generate_header(topic));
    for post in &topic.posts {
        write_post(&mut output, post);
    }

    output
}

/// Generate the title header
fn generate_header(topic: &Topic) -> String {
    format!("{}\nLZ: {}\n{}\n", topic.title, topic.author, "=".repeat(RULE_WIDTH))
}

fn write_post(output: &mut String, post: &Post) {
    let _ = writeln!(output, "{}L | {} | {}", post.floor, post.author, post.date);
    output.push('\n');
    output.push_str(&post.text);
    output.push('\n');

    for subpost in post.subposts.iter().flatten() {
        let _ = writeln!(output, "*** {} | {}", subpost.author, subpost.date);
        let _ = writeln!(output, "> {}", subpost.text);
        output.push('\n');
    }

    output.push_str(&"#".repeat(RULE_WIDTH));
    output.push('\n');
}

/// Convert a thread listing to one line per thread
pub fn listing_to_text(threads: &[ThreadListing]) -> String {
    let mut output = String::new();

    for thread in threads {
        let _ = write!(output, "{} {}", thread.id, thread.title);
        if thread.featured {
            output.push_str(" 【精】");
        }
        if thread.pinned {
            output.push_str(" 【顶】");
        }
        output.push('\n');
    }

    output
}
