// src/search/format.rs
// =============================================================================
// Text rendering of a SearXNG response.
//
// Sections appear in a fixed order and only when non-empty:
//   Infoboxes, Answers, Corrections, Suggestions, Results
// An empty result list renders as a single "No results found" line.
// =============================================================================

use serde_json::Value;
use std::fmt::Write;

use super::SearchResponse;
use crate::extract::truncate_chars;

// Characters of each result's content shown in the listing
const RESULT_EXCERPT: usize = 500;

pub fn format_response(data: &SearchResponse, limit: usize) -> String {
    let mut text = String::new();

    // Writing into a String cannot fail
    let _ = write_response(&mut text, data, limit);
    text
}

fn write_response(text: &mut String, data: &SearchResponse, limit: usize) -> std::fmt::Result {
    writeln!(text, "Query: {}", data.query)?;
    writeln!(text, "Number of results: {}", data.number_of_results)?;
    writeln!(text)?;

    for infobox in &data.infoboxes {
        writeln!(text, "=== Infobox: {} ===", infobox.infobox)?;
        writeln!(text, "ID: {}", infobox.id.as_deref().unwrap_or_default())?;
        writeln!(text, "Content: {}", infobox.content.as_deref().unwrap_or_default())?;
        if !infobox.urls.is_empty() {
            writeln!(text, "Related URLs:")?;
            for url in &infobox.urls {
                writeln!(text, "  - {}: {}", url.title, url.url)?;
            }
        }
        writeln!(text)?;
    }

    if !data.answers.is_empty() {
        writeln!(text, "=== Answers ===")?;
        for answer in &data.answers {
            writeln!(text, "{}", answer_text(answer))?;
        }
        writeln!(text)?;
    }

    write_bullets(text, "Corrections", &data.corrections)?;
    write_bullets(text, "Suggestions", &data.suggestions)?;

    if data.results.is_empty() {
        writeln!(text, "No results found")?;
        return Ok(());
    }

    writeln!(text, "=== Results ===")?;
    for (i, result) in data.results.iter().take(limit).enumerate() {
        let (excerpt, truncated) = truncate_chars(&result.content, RESULT_EXCERPT);

        writeln!(text, "[{}] {}", i + 1, result.title)?;
        writeln!(text, "    URL: {}", result.url)?;
        writeln!(
            text,
            "    Content: {}{}",
            excerpt,
            if truncated { "..." } else { "" }
        )?;
        if let Some(engine) = &result.engine {
            writeln!(text, "    Engine: {}", engine)?;
        }
        if let Some(score) = result.score {
            writeln!(text, "    Score: {}", score)?;
        }
        writeln!(text)?;
    }

    Ok(())
}

fn write_bullets(text: &mut String, heading: &str, items: &[String]) -> std::fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(text, "=== {} ===", heading)?;
    for item in items {
        writeln!(text, "- {}", item)?;
    }
    writeln!(text)
}

// Answers are plain strings on most instances, objects with an "answer"
// field on newer ones
fn answer_text(answer: &Value) -> String {
    match answer {
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("answer") {
            Some(Value::String(s)) => s.clone(),
            _ => answer.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{Infobox, InfoboxUrl, SearchResult};
    use serde_json::json;

    fn result(title: &str, content: &str) -> SearchResult {
        SearchResult {
            url: format!("https://example.com/{}", title),
            title: title.to_string(),
            content: content.to_string(),
            ..SearchResult::default()
        }
    }

    #[test]
    fn test_no_results() {
        let data = SearchResponse {
            query: "nothing".to_string(),
            ..SearchResponse::default()
        };
        assert_eq!(
            format_response(&data, 10),
            "Query: nothing\nNumber of results: 0\n\nNo results found\n"
        );
    }

    #[test]
    fn test_results_listing() {
        let data = SearchResponse {
            query: "rust".to_string(),
            number_of_results: 2.0,
            results: vec![
                SearchResult {
                    engine: Some("duckduckgo".to_string()),
                    score: Some(1.5),
                    ..result("one", "first")
                },
                result("two", "second"),
            ],
            ..SearchResponse::default()
        };

        let expected = "\
Query: rust
Number of results: 2

=== Results ===
[1] one
    URL: https://example.com/one
    Content: first
    Engine: duckduckgo
    Score: 1.5

[2] two
    URL: https://example.com/two
    Content: second

";
        assert_eq!(format_response(&data, 10), expected);
    }

    #[test]
    fn test_limit_and_excerpt() {
        let long = "x".repeat(600);
        let data = SearchResponse {
            results: vec![result("a", &long), result("b", "b"), result("c", "c")],
            ..SearchResponse::default()
        };

        let text = format_response(&data, 2);
        assert!(text.contains(&format!("    Content: {}...\n", "x".repeat(500))));
        assert!(text.contains("[2] b"));
        assert!(!text.contains("[3] c"));
    }

    #[test]
    fn test_section_order() {
        let data = SearchResponse {
            query: "q".to_string(),
            infoboxes: vec![Infobox {
                infobox: "Rust".to_string(),
                id: Some("rust-id".to_string()),
                content: Some("A language".to_string()),
                urls: vec![InfoboxUrl {
                    title: "Home".to_string(),
                    url: "https://rust-lang.org".to_string(),
                }],
            }],
            answers: vec![json!("42"), json!({"answer": "forty-two"})],
            corrections: vec!["rust lang".to_string()],
            suggestions: vec!["rust book".to_string()],
            ..SearchResponse::default()
        };

        let text = format_response(&data, 10);
        let order = [
            "=== Infobox: Rust ===",
            "  - Home: https://rust-lang.org",
            "=== Answers ===\n42\nforty-two\n",
            "=== Corrections ===\n- rust lang\n",
            "=== Suggestions ===\n- rust book\n",
            "No results found",
        ];
        let positions: Vec<_> = order.iter().map(|s| text.find(s).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_infobox_with_null_fields() {
        let data: SearchResponse = serde_json::from_value(json!({
            "query": "q",
            "number_of_results": 0,
            "infoboxes": [{ "infobox": "Rust", "id": null, "content": null }]
        }))
        .unwrap();

        let text = format_response(&data, 10);
        assert!(text.contains("=== Infobox: Rust ===\nID: \nContent: \n"));
    }
}
