use once_cell::sync::Lazy;
use regex::Regex;

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"http\S+|www\.\S+").expect("Failed to compile URL pattern")
});

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\S+@\S+").expect("Failed to compile email pattern")
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Failed to compile whitespace pattern")
});

/// Strips URLs and email addresses, then collapses whitespace.
///
/// Removal runs before collapsing: a removed token leaves its surrounding
/// whitespace behind, and collapsing afterwards keeps the result stable
/// under repeated cleaning.
pub fn clean_text(text: &str) -> String {
    let text = URL_PATTERN.replace_all(text, "");
    let text = EMAIL_PATTERN.replace_all(&text, "");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace() {
        assert_eq!(clean_text("  Hello \t  world \n\n test  "), "Hello world test");
    }

    #[test]
    fn removes_urls() {
        let cleaned = clean_text("Read more at http://example.com/path today or www.example.org/x now");
        assert!(!cleaned.contains("http://example.com/path"));
        assert!(!cleaned.contains("www.example.org"));
        assert_eq!(cleaned, "Read more at today or now");
    }

    #[test]
    fn removes_emails() {
        let cleaned = clean_text("Contact user@example.com for details");
        assert!(!cleaned.contains("user@example.com"));
        assert_eq!(cleaned, "Contact for details");
    }

    #[test]
    fn url_glued_to_a_word_only_loses_the_url_part() {
        assert_eq!(clean_text("see:https://a.b/c end"), "see: end");
    }

    #[test]
    fn empty_and_blank_input() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text(" \n\t "), "");
    }

    #[test]
    fn cleaning_is_idempotent() {
        let samples = [
            "",
            "plain words only",
            "a http://x.io b",
            "  mail me@host.com  or  www.site.net/page\n\nthanks ",
            "x@y@z http://q www.",
            "text\u{a0}with\u{2003}unicode  spaces and café@bar.fr",
            "trailing url https://example.com/",
            "@ lone at-sign and wwwfoo and httpish",
        ];
        for sample in samples {
            let once = clean_text(sample);
            assert_eq!(clean_text(&once), once, "not idempotent for {:?}", sample);
        }
    }
}
