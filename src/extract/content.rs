// src/extract/content.rs
// =============================================================================
// Reduces an HTML document to a title and its principal readable text.
//
// Steps:
// 1. Parse with scraper (html5ever underneath)
// 2. Detach structural noise: script, style, nav, header, footer, aside,
//    noscript (including everything inside them)
// 3. Title = <title>, else the first <h1>, else none
// 4. Main content = the first element, in document order, that looks like a
//    content container (<main>, <article>, class content/post/entry);
//    otherwise the whole <body>
// 5. Collapse whitespace, drop blank lines, trim
// 6. Cut to a character budget
//
// The content-container detection is a best-effort heuristic. Pages that
// put their text elsewhere simply fall back to the body text.
// =============================================================================

use scraper::{node::Element, ElementRef, Html, Selector};

/// Character budget for each page of a crawl report.
pub const CRAWL_CONTENT_LIMIT: usize = 5_000;

/// Character budget for the single-page fetch tool.
pub const FETCH_CONTENT_LIMIT: usize = 10_000;

const NOISE_SELECTOR: &str = "script, style, nav, header, footer, aside, noscript";

// One structural hint that an element holds the main content
#[derive(Debug, Clone, Copy)]
enum ContentHint {
    Tag(&'static str),
    Class(&'static str),
}

const CONTENT_HINTS: [ContentHint; 5] = [
    ContentHint::Tag("main"),
    ContentHint::Tag("article"),
    ContentHint::Class("content"),
    ContentHint::Class("post"),
    ContentHint::Class("entry"),
];

impl ContentHint {
    fn matches(self, element: &Element) -> bool {
        match self {
            ContentHint::Tag(name) => element.name() == name,
            ContentHint::Class(class) => element.classes().any(|c| c == class),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageContent {
    pub title: Option<String>,
    pub content: String,
    /// Whether `content` was cut to fit the character budget
    pub truncated: bool,
}

// Selectors used here are compile-time constants
fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

/// Parses `html` and strips the noise elements. The result feeds both
/// content and link extraction.
pub fn parse_document(html: &str) -> Html {
    let mut document = Html::parse_document(html);

    let noise = selector(NOISE_SELECTOR);
    let ids: Vec<_> = document.select(&noise).map(|el| el.id()).collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    document
}

/// Title and normalized main text of an already-cleaned document.
pub fn extract_content(document: &Html, limit: usize) -> PageContent {
    let title = find_title(document);

    let raw = match find_main(document) {
        Some(main) => element_text(main),
        None => document
            .root_element()
            .select(&selector("body"))
            .next()
            .map(element_text)
            .unwrap_or_default(),
    };

    let (content, truncated) = truncate_chars(&normalize_text(&raw), limit);

    PageContent {
        title,
        content,
        truncated,
    }
}

// Queries start at the root element: detached noise nodes stay in the arena
// and Html::select would still find them
fn find_title(document: &Html) -> Option<String> {
    let root = document.root_element();
    let title: String = root.select(&selector("title")).map(element_text).collect();
    let title = title.trim();
    if !title.is_empty() {
        return Some(title.to_string());
    }

    root.select(&selector("h1"))
        .next()
        .map(|h1| element_text(h1).trim().to_string())
        .filter(|t| !t.is_empty())
}

// First element in document order that satisfies any content hint
fn find_main(document: &Html) -> Option<ElementRef<'_>> {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| CONTENT_HINTS.iter().any(|hint| hint.matches(el.value())))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Collapses whitespace runs to single spaces, drops blank lines and trims.
pub fn normalize_text(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Cuts `text` to at most `limit` characters (never inside a UTF-8 sequence).
/// The flag reports whether anything was cut.
pub fn truncate_chars(text: &str, limit: usize) -> (String, bool) {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => (text[..byte_idx].to_string(), true),
        None => (text.to_string(), false),
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why detach instead of filtering text?
//    - scraper's Html exposes its ego_tree, so noise can be cut out of the
//      tree once
//    - Detached nodes remain in the arena, and Html::select scans the arena.
//      Later queries go through root_element(), which only walks the live tree
//
// 2. Why walk descendants() instead of one big selector?
//    - The hints read as an explicit list and the walk is in document
//      order, so "first element matching any hint" is literal
//
// 3. Why char_indices for truncation?
//    - Slicing a String at a byte index inside a multi-byte character panics
// -----------------------------------------------------------------------------
