//! Markdown rendering
//!
//! Best-effort regex conversion of a small Markdown subset to HTML:
//! fenced code blocks (with a language tag), `#`/`##`/`###` headers, `-`
//! bullet lists, `[text](url)` links, `**bold**`, pipe tables and paragraphs
//! (a line followed by a blank line).
//!
//! This is not a conformant parser. Nothing is escaped, nothing nests, and
//! unsupported syntax (nested lists, inline code spans, ...) passes through
//! unchanged. Code blocks are cut out first and the remaining rules run on
//! the text between them.

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// How documentation is displayed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MarkdownView {
    /// Rendered HTML
    #[default]
    Preview,
    /// Markdown source as-is
    Raw,
}

impl fmt::Display for MarkdownView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkdownView::Preview => write!(f, "preview"),
            MarkdownView::Raw => write!(f, "raw"),
        }
    }
}

impl std::str::FromStr for MarkdownView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preview" | "html" => Ok(MarkdownView::Preview),
            "raw" | "markdown" => Ok(MarkdownView::Raw),
            _ => Err(format!("Invalid view '{}'. Valid values: preview, raw", s)),
        }
    }
}

static CODE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(.+?)\n([\s\S]*?)```").expect("valid regex"));
static H3: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^### (.*)$").expect("valid regex"));
static H2: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^## (.*)$").expect("valid regex"));
static H1: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^# (.*)$").expect("valid regex"));
static LIST_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?:- .*(?:\n|$))+").expect("valid regex"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("valid regex"));
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid regex"));
static TABLE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?:\|.*(?:\n|$))+").expect("valid regex"));
static TABLE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*:?-+:?\s*$").expect("valid regex"));
static PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([^<\n].*)\n$").expect("valid regex"));

/// Render `content` for the given view
pub fn render(content: &str, view: MarkdownView) -> String {
    match view {
        MarkdownView::Preview => to_html(content),
        MarkdownView::Raw => content.to_string(),
    }
}

/// Convert the supported Markdown subset to HTML
pub fn to_html(markdown: &str) -> String {
    let mut html = String::with_capacity(markdown.len());
    let mut last = 0;

    for caps in CODE_BLOCK.captures_iter(markdown) {
        let Some(block) = caps.get(0) else { continue };
        html.push_str(&render_text(&markdown[last..block.start()], last > 0, true));
        html.push_str(&format!("<pre><code>{}</code></pre>", &caps[2]));
        last = block.end();
    }
    html.push_str(&render_text(&markdown[last..], last > 0, false));
    html
}

/// Text between code blocks. A segment that follows a code block does not
/// start a line; one that precedes a code block does not end in a blank line.
fn render_text(text: &str, after_code: bool, before_code: bool) -> String {
    if text.is_empty() {
        return String::new();
    }

    let html = line_rule(&H3, text, after_code, |caps| format!("<h3>{}</h3>", &caps[1]));
    let html = line_rule(&H2, &html, after_code, |caps| format!("<h2>{}</h2>", &caps[1]));
    let html = line_rule(&H1, &html, after_code, |caps| format!("<h1>{}</h1>", &caps[1]));
    let html = line_rule(&LIST_RUN, &html, after_code, |caps| render_list(&caps[0]));
    let html = LINK.replace_all(&html, r#"<a href="${2}">${1}</a>"#);
    let html = BOLD.replace_all(&html, "<strong>${1}</strong>");
    let html = line_rule(&TABLE_RUN, &html, after_code, |caps| render_table(&caps[0]));

    let end = html.len();
    line_rule(&PARAGRAPH, &html, after_code, |caps| {
        let ends_segment = caps.get(0).is_some_and(|m| m.end() == end);
        if before_code && ends_segment {
            caps[0].to_string()
        } else {
            format!("<p>{}</p>", &caps[1])
        }
    })
}

/// Apply a line-anchored rule, skipping a match at offset 0 when that offset
/// is not really the start of a line
fn line_rule<F>(re: &Regex, text: &str, after_code: bool, render: F) -> String
where
    F: Fn(&Captures) -> String,
{
    re.replace_all(text, |caps: &Captures| {
        let at_start = caps.get(0).is_some_and(|m| m.start() == 0);
        if after_code && at_start {
            caps[0].to_string()
        } else {
            render(caps)
        }
    })
    .into_owned()
}

fn trailing_newline(block: &str) -> &'static str {
    if block.ends_with('\n') { "\n" } else { "" }
}

fn render_list(block: &str) -> String {
    let items: String = block
        .lines()
        .filter_map(|line| line.strip_prefix("- "))
        .map(|item| format!("<li>{}</li>", item))
        .collect();
    format!("<ul>{}</ul>{}", items, trailing_newline(block))
}

fn split_cells(row: &str) -> Vec<&str> {
    let row = row.trim();
    let row = row.strip_prefix('|').unwrap_or(row);
    let row = row.strip_suffix('|').unwrap_or(row);
    row.split('|').map(str::trim).collect()
}

fn is_separator(row: &str) -> bool {
    let cells = split_cells(row);
    !cells.is_empty() && cells.iter().all(|c| TABLE_SEPARATOR.is_match(c))
}

fn render_table(block: &str) -> String {
    let rows: Vec<&str> = block.lines().collect();
    let has_header = rows.len() > 1 && is_separator(rows[1]);

    let mut html = String::from("<table>");
    for (i, row) in rows.iter().enumerate() {
        if is_separator(row) {
            continue;
        }
        let tag = if has_header && i == 0 { "th" } else { "td" };
        html.push_str("<tr>");
        for cell in split_cells(row) {
            html.push_str(&format!("<{0}>{1}</{0}>", tag, cell));
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
    html.push_str(trailing_newline(block));
    html
}

/// First `max_chars` characters, with `...` appended when truncated
pub fn excerpt(content: &str, max_chars: usize) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
