//! # Rich Text
//!
//! Styled text and the codec that turns markup into it and back.
//!
//! The engine only ever talks to [`RichTextCodec`]; [`MiniMarkup`] is the
//! default implementation and understands two dialects:
//!
//! - angle-bracket tags: `<red>`, `<color:gold>`, `<#ff8800>`, `<bold>`,
//!   `<i>`, `</red>`, `<reset>`; unknown tags, opening or closing, stay in
//!   the text as written
//! - legacy section codes: `§c` (color, clears decorations), `§l` (bold),
//!   `§r` (reset)
//!
//! `\<`, `\§` and `\\` escape the markers and the backslash itself.

/// Visual style of one run of text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Style {
    /// Named color or `#rrggbb`.
    pub color: Option<String>,
    /// Bold.
    pub bold: bool,
    /// Italic.
    pub italic: bool,
    /// Underlined.
    pub underlined: bool,
    /// Struck through.
    pub strikethrough: bool,
    /// Obfuscated.
    pub obfuscated: bool,
}

/// A run of text with one style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    /// Text content.
    pub text: String,
    /// Style of the whole run.
    pub style: Style,
}

/// A line of styled text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RichText {
    /// Runs in reading order. Never empty strings, never two neighbours
    /// with the same style.
    pub spans: Vec<Span>,
}

impl RichText {
    /// Unstyled text.
    #[must_use]
    pub fn plain_text(text: impl Into<String>) -> Self {
        let mut rich = Self::default();
        rich.push(text.into(), Style::default());
        rich
    }

    /// Text with all styling stripped.
    #[must_use]
    pub fn plain(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    /// True when there is no text at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Appends a run, merging it into the last one when the style matches.
    pub fn push(&mut self, text: String, style: Style) {
        if text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.text.push_str(&text),
            _ => self.spans.push(Span { text, style }),
        }
    }
}

/// Converts between markup strings and [`RichText`].
///
/// `parse(render(t)) == t` must hold for every `t` the codec produced.
pub trait RichTextCodec: Send + Sync {
    /// Parses markup. Never fails; unrecognized markup stays as text.
    fn parse(&self, markup: &str) -> RichText;

    /// Renders styled text back to markup.
    fn render(&self, text: &RichText) -> String;
}

/// Named colors, in legacy code order `0`-`f`.
const COLORS: [&str; 16] = [
    "black",
    "dark_blue",
    "dark_green",
    "dark_aqua",
    "dark_red",
    "dark_purple",
    "gold",
    "gray",
    "dark_gray",
    "blue",
    "green",
    "aqua",
    "red",
    "light_purple",
    "yellow",
    "white",
];

const SECTION: char = '§';

/// Tag and section-code markup.
#[derive(Clone, Copy, Debug, Default)]
pub struct MiniMarkup;

impl RichTextCodec for MiniMarkup {
    fn parse(&self, markup: &str) -> RichText {
        let mut out = RichText::default();
        let mut stack = vec![Style::default()];
        let mut buf = String::new();
        let mut rest = markup;

        while let Some(c) = rest.chars().next() {
            let after = &rest[c.len_utf8()..];
            match c {
                '\\' if after.starts_with(|n: char| n == '<' || n == SECTION || n == '\\') => {
                    let escaped = after.chars().next().unwrap_or('<');
                    buf.push(escaped);
                    rest = &after[escaped.len_utf8()..];
                }
                SECTION => match after.chars().next().and_then(|code| {
                    let top = stack.last().cloned().unwrap_or_default();
                    legacy_code(code, &top).map(|style| (code, style))
                }) {
                    Some((code, style)) => {
                        out.push(std::mem::take(&mut buf), current(&stack));
                        if let Some(top) = stack.last_mut() {
                            *top = style;
                        }
                        rest = &after[code.len_utf8()..];
                    }
                    None => {
                        buf.push(c);
                        rest = after;
                    }
                },
                '<' => {
                    let Some(end) = after.find('>') else {
                        buf.push(c);
                        rest = after;
                        continue;
                    };
                    let tag = &after[..end];
                    let top = current(&stack);
                    if tag.len() > 1 && tag.strip_prefix('/').is_some_and(is_known_tag) {
                        out.push(std::mem::take(&mut buf), top);
                        if stack.len() > 1 {
                            stack.pop();
                        }
                    } else if tag.eq_ignore_ascii_case("reset") || tag.eq_ignore_ascii_case("r") {
                        out.push(std::mem::take(&mut buf), top);
                        stack = vec![Style::default()];
                    } else if let Some(style) = apply_tag(tag, &top) {
                        out.push(std::mem::take(&mut buf), top);
                        stack.push(style);
                    } else {
                        buf.push('<');
                        buf.push_str(tag);
                        buf.push('>');
                    }
                    rest = &after[end + 1..];
                }
                _ => {
                    buf.push(c);
                    rest = after;
                }
            }
        }
        out.push(buf, current(&stack));
        out
    }

    fn render(&self, text: &RichText) -> String {
        let mut out = String::new();
        for span in &text.spans {
            let tags = open_tags(&span.style);
            for tag in &tags {
                out.push('<');
                out.push_str(tag);
                out.push('>');
            }
            for c in span.text.chars() {
                if c == '<' || c == SECTION || c == '\\' {
                    out.push('\\');
                }
                out.push(c);
            }
            for tag in tags.iter().rev() {
                out.push_str("</");
                out.push_str(tag.split(':').next().unwrap_or(tag));
                out.push('>');
            }
        }
        out
    }
}

fn current(stack: &[Style]) -> Style {
    stack.last().cloned().unwrap_or_default()
}

fn legacy_code(code: char, top: &Style) -> Option<Style> {
    let lower = code.to_ascii_lowercase();
    if let Some(index) = lower.to_digit(16) {
        return Some(Style {
            color: Some(COLORS[index as usize].to_string()),
            ..Style::default()
        });
    }
    let mut style = top.clone();
    match lower {
        'k' => style.obfuscated = true,
        'l' => style.bold = true,
        'm' => style.strikethrough = true,
        'n' => style.underlined = true,
        'o' => style.italic = true,
        'r' => style = Style::default(),
        _ => return None,
    }
    Some(style)
}

fn apply_tag(tag: &str, top: &Style) -> Option<Style> {
    let lower = tag.to_ascii_lowercase();
    let mut style = top.clone();
    match lower.as_str() {
        "bold" | "b" => style.bold = true,
        "italic" | "i" | "em" => style.italic = true,
        "underlined" | "u" => style.underlined = true,
        "strikethrough" | "st" => style.strikethrough = true,
        "obfuscated" | "obf" => style.obfuscated = true,
        _ => style.color = Some(color_name(&lower)?),
    }
    Some(style)
}

fn is_known_tag(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    matches!(lower.as_str(), "color" | "colour" | "c")
        || apply_tag(&lower, &Style::default()).is_some()
}

fn color_name(tag: &str) -> Option<String> {
    let name = tag
        .strip_prefix("color:")
        .or_else(|| tag.strip_prefix("colour:"))
        .or_else(|| tag.strip_prefix("c:"))
        .unwrap_or(tag);
    let name = if name == "grey" { "gray" } else { name };
    if COLORS.contains(&name) {
        return Some(name.to_string());
    }
    let hex = name.strip_prefix('#')?;
    (hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit())).then(|| name.to_string())
}

fn open_tags(style: &Style) -> Vec<String> {
    let mut tags = Vec::new();
    if let Some(color) = &style.color {
        tags.push(format!("color:{color}"));
    }
    for (on, tag) in [
        (style.bold, "bold"),
        (style.italic, "italic"),
        (style.underlined, "underlined"),
        (style.strikethrough, "strikethrough"),
        (style.obfuscated, "obfuscated"),
    ] {
        if on {
            tags.push(tag.to_string());
        }
    }
    tags
}
