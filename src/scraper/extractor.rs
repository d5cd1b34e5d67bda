//! Plain-text extraction from page markup.
//!
//! Two layers: a boilerplate-removing pass that looks for the main content
//! container, and a fallback that keeps every visible text node.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Minimum amount of visible text for a container to count as main content.
const MIN_CONTENT_CHARS: usize = 200;

/// Elements whose text never belongs to the article body.
const NOISE_TAGS: &[&str] = &[
    "script", "style", "noscript", "nav", "header", "footer", "aside", "form", "iframe", "svg",
    "template",
];

/// Elements whose text is not visible at all.
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template"];

static CONTENT_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    [
        "article",
        "main",
        "[role='main']",
        ".post-content",
        ".article-content",
        ".entry-content",
        ".story-body",
        ".article__body",
        ".content-body",
        "#article-body",
        "#content",
        ".prose",
    ]
    .iter()
    .map(|s| Selector::parse(s).expect("Failed to parse content selector"))
    .collect()
});

static PARAGRAPH_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("p").expect("Failed to parse paragraph selector")
});

static BLOCK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1, h2, h3, h4, h5, h6, p, li, blockquote, pre, td")
        .expect("Failed to parse block selector")
});

/// Extracts readable text from raw markup. Returns an empty string when the
/// document carries no text at all.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    extract_document_text(&document)
}

/// Same as [`extract_text`] over an already parsed document.
pub fn extract_document_text(document: &Html) -> String {
    if let Some(text) = extract_main_content(document) {
        return text;
    }

    debug!("Boilerplate extraction found nothing, falling back to all text nodes");
    stripped_strings(document.root_element(), HIDDEN_TAGS).join(" ")
}

/// Boilerplate removal. `None` when no container holds enough text.
pub fn extract_main_content(document: &Html) -> Option<String> {
    for selector in CONTENT_SELECTORS.iter() {
        for element in document.select(selector) {
            if visible_len(element) >= MIN_CONTENT_CHARS {
                return Some(block_text(element));
            }
        }
    }

    best_paragraph_container(document)
        .filter(|element| visible_len(*element) >= MIN_CONTENT_CHARS)
        .map(block_text)
}

/// Picks the element whose direct `<p>` children carry the most text. Ties
/// go to the container that appears first in the document.
fn best_paragraph_container(document: &Html) -> Option<ElementRef<'_>> {
    // Scores in first-seen order, indexed by node id.
    let mut scores = Vec::new();
    let mut slots = HashMap::new();

    for paragraph in document.select(&PARAGRAPH_SELECTOR) {
        if has_ancestor_in(paragraph, NOISE_TAGS) {
            continue;
        }
        let Some(parent) = paragraph.parent().and_then(ElementRef::wrap) else {
            continue;
        };
        let len: usize = stripped_strings(paragraph, NOISE_TAGS)
            .iter()
            .map(|s| s.len())
            .sum();
        let slot = *slots.entry(parent.id()).or_insert_with(|| {
            scores.push((parent.id(), 0usize));
            scores.len() - 1
        });
        scores[slot].1 += len;
    }

    // `max_by_key` keeps the last maximum, so walk backwards.
    let (best_id, _) = scores.into_iter().rev().max_by_key(|(_, score)| *score)?;
    document.tree.get(best_id).and_then(ElementRef::wrap)
}

/// Visible text of a container, one paragraph per block element.
fn block_text(container: ElementRef<'_>) -> String {
    let mut blocks = Vec::new();

    for block in container.select(&BLOCK_SELECTOR) {
        if has_ancestor_in(block, NOISE_TAGS) || has_block_ancestor_within(block, container) {
            continue;
        }
        let text = stripped_strings(block, NOISE_TAGS).join(" ");
        if !text.is_empty() {
            blocks.push(text);
        }
    }

    if blocks.is_empty() {
        stripped_strings(container, NOISE_TAGS).join(" ")
    } else {
        blocks.join("\n\n")
    }
}

fn visible_len(element: ElementRef<'_>) -> usize {
    stripped_strings(element, NOISE_TAGS)
        .iter()
        .map(|s| s.len())
        .sum()
}

/// Trimmed, non-empty text nodes under `element`, skipping any that sit
/// inside one of `skip`.
fn stripped_strings<'a>(element: ElementRef<'a>, skip: &[&str]) -> Vec<&'a str> {
    element
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let inside_skipped = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| skip.contains(&el.name()))
            });
            if inside_skipped {
                return None;
            }
            let trimmed = text.trim();
            (!trimmed.is_empty()).then_some(trimmed)
        })
        .collect()
}

fn has_ancestor_in(element: ElementRef<'_>, tags: &[&str]) -> bool {
    element.ancestors().any(|ancestor| {
        ancestor
            .value()
            .as_element()
            .is_some_and(|el| tags.contains(&el.name()))
    })
}

/// True when a block element is nested in another block element below
/// `container` (e.g. a `<p>` inside an `<li>`), so it is not emitted twice.
fn has_block_ancestor_within(block: ElementRef<'_>, container: ElementRef<'_>) -> bool {
    for ancestor in block.ancestors() {
        if ancestor.id() == container.id() {
            return false;
        }
        let Some(ancestor) = ElementRef::wrap(ancestor) else {
            continue;
        };
        if BLOCK_SELECTOR.matches(&ancestor) {
            return true;
        }
    }
    false
}
