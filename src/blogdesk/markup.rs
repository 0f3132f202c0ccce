//! Lightweight inline markup to HTML.
//!
//! This is not markdown. Post content is run through a fixed sequence of
//! substitutions, left to right:
//!
//! 1. HTML escaping of the raw text
//! 2. `**bold**`
//! 3. `*italic*`
//! 4. `# `, `## `, `### ` headings (line-leading)
//! 5. `- ` list items (line-leading)
//! 6. `[text](url)` links
//! 7. `![alt](url)` images
//! 8. remaining line breaks
//!
//! Each step only sees text, never the tags produced by an earlier step:
//! none of the patterns can match inside emitted markup, and the link step
//! leaves image syntax alone for step 7. Headings and list items are blocks,
//! so the line break that ends them does not become a `<br />`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static BOLD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid bold regex"));
static ITALIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").expect("valid italic regex"));
static H1_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^# (.*)$").expect("valid h1 regex"));
static H2_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^## (.*)$").expect("valid h2 regex"));
static H3_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^### (.*)$").expect("valid h3 regex"));
static LIST_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^- (.*)$").expect("valid list item regex"));
static BLOCK_END_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(</h[1-3]>|</li>)\n").expect("valid block end regex"));
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(!?)\[(.*?)\]\((.*?)\)").expect("valid link regex"));
static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").expect("valid image regex"));

/// Renders post content to an HTML fragment.
pub fn render(content: &str) -> String {
    let text = escape_html(&content.replace("\r\n", "\n"));

    let text = BOLD_RE.replace_all(&text, "<strong>$1</strong>");
    let text = ITALIC_RE.replace_all(&text, "<em>$1</em>");
    let text = H1_RE.replace_all(&text, "<h1>$1</h1>");
    let text = H2_RE.replace_all(&text, "<h2>$1</h2>");
    let text = H3_RE.replace_all(&text, "<h3>$1</h3>");
    let text = LIST_ITEM_RE.replace_all(&text, "<li>$1</li>");
    let text = LINK_RE.replace_all(&text, |caps: &Captures| {
        if &caps[1] == "!" {
            caps[0].to_string()
        } else {
            format!(
                r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
                &caps[3], &caps[2]
            )
        }
    });
    let text = IMAGE_RE.replace_all(
        &text,
        r#"<img src="$2" alt="$1" class="max-w-full h-auto" />"#,
    );

    BLOCK_END_RE.replace_all(&text, "$1").replace('\n', "<br />")
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
