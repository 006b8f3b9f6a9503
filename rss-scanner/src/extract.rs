use crate::types::NormalizedArticle;
use chrono::NaiveDateTime;
use interfaces::defs::RawEntry;
use scraper::Html;

pub const NO_TITLE: &str = "No Title";

/// Bounds the prompt sent to the scoring service.
pub const MAX_SNIPPET_CHARS: usize = 500;

pub fn extract(entry: &RawEntry, published_at: Option<NaiveDateTime>) -> NormalizedArticle {
    let title = entry
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(NO_TITLE)
        .to_string();

    let snippet = truncate_chars(&strip_markup(snippet_source(entry)), MAX_SNIPPET_CHARS);

    NormalizedArticle {
        title,
        snippet,
        link: entry.link.clone().unwrap_or_default(),
        published_at,
    }
}

/// Summary/description first, then the first content block.
fn snippet_source(entry: &RawEntry) -> &str {
    entry
        .summary
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| entry.content.first().map(String::as_str))
        .unwrap_or("")
}

/// Reduce an HTML fragment to its text, whitespace collapsed.
pub fn strip_markup(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let fragment = Html::parse_fragment(html);
    let text: String = fragment.root_element().text().collect();

    // Escaped markup (`&lt;b&gt;`) comes back out of the parser as a real tag.
    remove_residual_tags(&text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn remove_residual_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => {
                out.push(' ');
                rest = &rest[open + close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
