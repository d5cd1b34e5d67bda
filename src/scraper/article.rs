//! Article metadata and NLP-style enrichment.
//!
//! Reads the title, authors and publish date out of page metadata, and
//! derives keywords and an extractive summary from the body text.

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

const MAX_KEYWORDS: usize = 10;
const SUMMARY_SENTENCES: usize = 5;
const MAX_AUTHOR_LEN: usize = 100;

static META_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("meta").expect("Failed to parse meta selector")
});

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("title").expect("Failed to parse title selector")
});

static H1_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1").expect("Failed to parse h1 selector")
});

static AUTHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("[rel='author'], [itemprop='author']").expect("Failed to parse author selector")
});

static TIME_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("time[datetime]").expect("Failed to parse time selector")
});

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{N}']+").expect("Failed to compile word pattern")
});

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her", "was",
        "one", "our", "out", "has", "have", "his", "how", "its", "may", "new", "now", "old", "see",
        "two", "who", "did", "get", "him", "let", "say", "she", "too", "use", "that", "with",
        "this", "from", "they", "will", "would", "there", "their", "what", "about", "which",
        "when", "make", "like", "time", "just", "know", "take", "into", "year", "your", "some",
        "could", "them", "than", "then", "only", "come", "its", "over", "also", "back", "after",
        "first", "well", "even", "want", "because", "these", "give", "most", "been", "were",
        "said", "more", "such", "where", "other", "very", "being", "those", "each", "many",
        "much", "while", "should", "does", "here", "what's", "it's", "don't", "i'm", "we're",
        "they're", "isn't", "between", "through", "during", "before", "under", "again", "same",
        "both", "own", "off", "why", "yes", "per", "via",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, thiserror::Error)]
pub enum ArticleError {
    #[error("no readable content in page")]
    NoContent,
}

/// What the article pass knows about a page beyond its body text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Article {
    pub title: String,
    pub authors: Vec<String>,
    pub publish_date: Option<DateTime<Utc>>,
    pub keywords: BTreeSet<String>,
    pub summary: String,
}

impl Article {
    /// Parses metadata from `document` and runs keyword/summary extraction
    /// over `body_text`.
    pub fn parse(document: &Html, body_text: &str) -> Result<Self, ArticleError> {
        if body_text.trim().is_empty() {
            return Err(ArticleError::NoContent);
        }

        let meta = collect_meta(document);
        let title = extract_title(document, &meta);
        let ranked = rank_keywords(body_text);
        let summary = summarize(body_text, &title, &ranked);

        Ok(Article {
            authors: extract_authors(document, &meta),
            publish_date: extract_publish_date(document, &meta),
            keywords: ranked.iter().map(|(word, _)| word.clone()).collect(),
            summary,
            title,
        })
    }
}

/// `<meta>` key (name, property or itemprop, lowercased) to content, first
/// occurrence wins.
fn collect_meta(document: &Html) -> HashMap<String, String> {
    let mut meta = HashMap::new();
    for el in document.select(&META_SELECTOR) {
        let value = el.value();
        let Some(content) = value.attr("content").map(str::trim).filter(|c| !c.is_empty()) else {
            continue;
        };
        for key in ["name", "property", "itemprop"] {
            if let Some(name) = value.attr(key) {
                meta.entry(name.trim().to_ascii_lowercase())
                    .or_insert_with(|| content.to_string());
            }
        }
    }
    meta
}

fn extract_title(document: &Html, meta: &HashMap<String, String>) -> String {
    if let Some(title) = meta.get("og:title") {
        return collapse(title);
    }
    [&*TITLE_SELECTOR, &*H1_SELECTOR]
        .into_iter()
        .find_map(|selector| {
            document
                .select(selector)
                .map(element_text)
                .find(|text| !text.is_empty())
        })
        .unwrap_or_default()
}

fn extract_authors(document: &Html, meta: &HashMap<String, String>) -> Vec<String> {
    let mut candidates = Vec::new();

    for key in ["author", "article:author"] {
        if let Some(value) = meta.get(key) {
            candidates.extend(value.split(',').map(collapse));
        }
    }
    for el in document.select(&AUTHOR_SELECTOR) {
        let text = el
            .value()
            .attr("content")
            .map(collapse)
            .unwrap_or_else(|| element_text(el));
        candidates.push(text);
    }

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|name| {
            !name.is_empty()
                && name.len() <= MAX_AUTHOR_LEN
                && !name.starts_with("http")
                && seen.insert(name.to_lowercase())
        })
        .collect()
}

fn extract_publish_date(document: &Html, meta: &HashMap<String, String>) -> Option<DateTime<Utc>> {
    const DATE_KEYS: &[&str] = &[
        "article:published_time",
        "og:published_time",
        "datepublished",
        "pubdate",
        "publish-date",
        "date",
    ];

    DATE_KEYS
        .iter()
        .filter_map(|key| meta.get(*key))
        .find_map(|raw| parse_date(raw))
        .or_else(|| {
            document
                .select(&TIME_SELECTOR)
                .filter_map(|el| el.value().attr("datetime"))
                .find_map(parse_date)
        })
}

/// RFC 3339, a zone-less timestamp, or a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    let day = raw.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    WORD_PATTERN.find_iter(text).map(|m| m.as_str().to_lowercase())
}

fn is_keyword_candidate(word: &str) -> bool {
    word.chars().count() >= 3
        && !STOP_WORDS.contains(word)
        && !word.chars().all(|c| c.is_numeric() || c == '\'')
}

/// Most frequent content words, highest count first; ties keep the order of
/// first appearance.
fn rank_keywords(text: &str) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (position, word) in words(text).filter(|w| is_keyword_candidate(w)).enumerate() {
        counts.entry(word).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
        count_b.cmp(count_a).then(first_a.cmp(first_b))
    });
    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(word, (count, _))| (word, count))
        .collect()
}

fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        let boundary = matches!(c, '.' | '!' | '?')
            && chars.peek().is_none_or(|(_, next)| next.is_whitespace());
        if boundary || c == '\n' {
            let end = idx + c.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

/// Extractive summary: the best-scoring sentences, in document order.
fn summarize(text: &str, title: &str, keywords: &[(String, usize)]) -> String {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return String::new();
    }

    let weights: HashMap<&str, usize> = keywords.iter().map(|(w, c)| (w.as_str(), *c)).collect();
    let total: usize = weights.values().sum::<usize>().max(1);
    let title_words: HashSet<String> = words(title).filter(|w| is_keyword_candidate(w)).collect();

    let mut scored: Vec<(usize, f64)> = sentences
        .iter()
        .enumerate()
        .map(|(idx, sentence)| {
            let sentence_words: Vec<String> = words(sentence).collect();
            if sentence_words.is_empty() {
                return (idx, 0.0);
            }
            let keyword_mass: usize = sentence_words
                .iter()
                .filter_map(|w| weights.get(w.as_str()))
                .sum();
            let title_hits = sentence_words.iter().filter(|w| title_words.contains(*w)).count();
            let keyword_score = keyword_mass as f64 / total as f64;
            let title_score = if title_words.is_empty() {
                0.0
            } else {
                title_hits as f64 / title_words.len() as f64
            };
            (idx, keyword_score + title_score)
        })
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    let mut chosen: Vec<usize> = scored
        .into_iter()
        .take(SUMMARY_SENTENCES)
        .map(|(idx, _)| idx)
        .collect();
    chosen.sort_unstable();

    chosen
        .into_iter()
        .map(|idx| sentences[idx])
        .collect::<Vec<_>>()
        .join("\n")
}

fn element_text(element: ElementRef<'_>) -> String {
    collapse(&element.text().collect::<String>())
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
