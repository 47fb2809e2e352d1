//! Markup parsing and text extraction

use regex::Regex;
use scraper::{node::Node, ElementRef, Html, Selector};
use serde::Serialize;
use sitelang_core::{parse_lang_tags, AcceptedLanguages, LanguageTag};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// `<meta name=...>` values whose content describes the page
pub const DESCRIPTION_META_NAMES: &[&str] = &["description", "topic", "keywords"];

/// Elements whose text never counts as visible body text
const INVISIBLE_ELEMENTS: &[&str] = &["script", "style", "template"];

/// Runs of characters that carry no language signal
fn noise_pattern() -> &'static Regex {
    static NOISE: OnceLock<Regex> = OnceLock::new();
    NOISE.get_or_init(|| {
        Regex::new(
            r##"[\n \[\]"'.,:!?/+\-–\\*#()%&=_§€$@<>;|©0-9»«®…”“•�°←→„▶\x{96}\x{a0}\t\r]+"##,
        )
        .unwrap_or_else(|e| unreachable!("noise pattern is a valid regex: {e}"))
    })
}

/// Collapse punctuation, digits, symbols and whitespace into single spaces
pub fn filter_text(text: &str) -> String {
    noise_pattern().replace_all(text, " ").trim().to_string()
}

/// URIs with a scheme, `www.` hosts and e-mail addresses in running text
fn url_pattern() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| {
        Regex::new(
            r#"(?i)(?:\b[a-z][a-z0-9+.\-]*://|\bwww\.|\bmailto:)[^\s<>"]+|[^\s<>"@]+@[a-z0-9\-]+(?:\.[a-z0-9\-]+)+"#,
        )
        .unwrap_or_else(|e| unreachable!("url pattern is a valid regex: {e}"))
    })
}

/// Replace links and e-mail addresses with a space
///
/// Runs before [`filter_text`], which would otherwise leave the host and path
/// words of a link behind.
pub fn strip_urls(text: &str) -> String {
    url_pattern().replace_all(text, " ").into_owned()
}

/// A parsed HTML document
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    html: Html,
}

impl ParsedDocument {
    /// Parse markup; never fails, complaints are kept in
    /// [`ParsedDocument::parse_errors`]
    pub fn parse(markup: &str) -> Self {
        let html = Html::parse_document(markup);
        if !html.errors.is_empty() {
            tracing::trace!(errors = html.errors.len(), "markup parsed with errors");
        }
        Self { html }
    }

    /// Recoverable problems the parser ran into
    pub fn parse_errors(&self) -> impl Iterator<Item = &str> + '_ {
        self.html.errors.iter().map(|e| e.as_ref())
    }

    /// Whether the markup parsed without complaints
    pub fn is_well_formed(&self) -> bool {
        self.html.errors.is_empty()
    }

    /// The underlying scraper document
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Attribute of the `<html>` element
    pub fn root_attribute(&self, name: &str) -> Option<&str> {
        self.html.root_element().value().attr(name)
    }

    /// Elements matching a CSS selector, `None` if the selector is invalid
    pub fn select_all(&self, css: &str) -> Option<Vec<ElementRef<'_>>> {
        let selector = Selector::parse(css).ok()?;
        Some(self.html.select(&selector).collect())
    }

    fn select_static(&self, css: &'static str) -> Vec<ElementRef<'_>> {
        self.select_all(css).unwrap_or_default()
    }

    /// Visible text of `<body>` with links removed, filtered with
    /// [`filter_text`]
    pub fn body_text(&self) -> Option<String> {
        self.body_text_with(true)
    }

    /// Visible text of `<body>`, optionally keeping links
    pub fn body_text_with(&self, strip_links: bool) -> Option<String> {
        let body = self.select_static("body").into_iter().next()?;

        let mut raw = String::new();
        for node in body.descendants() {
            let Node::Text(text) = node.value() else {
                continue;
            };
            let hidden = node.ancestors().any(|ancestor| {
                matches!(ancestor.value(), Node::Element(el) if INVISIBLE_ELEMENTS.contains(&el.name()))
            });
            if !hidden {
                raw.push_str(text);
                raw.push(' ');
            }
        }

        if strip_links {
            raw = strip_urls(&raw);
        }
        Some(filter_text(&raw))
    }

    /// Filtered `content` of description, topic and keywords metas
    pub fn description(&self) -> String {
        self.select_static("head meta[name]")
            .into_iter()
            .filter(|meta| {
                meta.value().attr("name").is_some_and(|name| {
                    DESCRIPTION_META_NAMES
                        .iter()
                        .any(|wanted| name.trim().eq_ignore_ascii_case(wanted))
                })
            })
            .filter_map(|meta| meta.value().attr("content"))
            .map(filter_text)
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }

    /// Every `<script>` element
    pub fn scripts(&self) -> Vec<ScriptElement> {
        self.select_static("script")
            .into_iter()
            .map(|script| ScriptElement {
                attributes: script
                    .value()
                    .attrs()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect(),
                content: element_text(&script),
            })
            .collect()
    }

    /// Inline text of every `<noscript>` element
    pub fn noscripts(&self) -> Vec<Option<String>> {
        self.select_static("noscript")
            .into_iter()
            .map(|noscript| element_text(&noscript))
            .collect()
    }

    /// First accepted tag in the `<html lang>` attribute
    pub fn html_lang(&self, accepted: &AcceptedLanguages) -> Option<LanguageTag> {
        let lang = self.root_attribute("lang")?;
        parse_lang_tags(lang, accepted).into_iter().next()
    }

    /// The tag of the `http-equiv="content-language"` metas, if they name
    /// exactly one accepted language
    pub fn http_equiv_lang(&self, accepted: &AcceptedLanguages) -> Option<LanguageTag> {
        let tags: Vec<LanguageTag> = self
            .select_static("meta[http-equiv]")
            .into_iter()
            .filter(|meta| {
                meta.value()
                    .attr("http-equiv")
                    .is_some_and(|v| v.trim().eq_ignore_ascii_case("content-language"))
            })
            .filter_map(|meta| meta.value().attr("content"))
            .flat_map(|content| parse_lang_tags(content, accepted))
            .collect();

        exactly_one(tags)
    }
}

/// Text directly inside an element, `None` when it has none
fn element_text(element: &ElementRef<'_>) -> Option<String> {
    let mut text = String::new();
    for child in element.children() {
        if let Node::Text(t) = child.value() {
            text.push_str(t);
        }
    }
    if element.children().any(|c| c.value().is_text()) {
        Some(text)
    } else {
        None
    }
}

/// The only element of `tags`, if there is exactly one
pub(crate) fn exactly_one(tags: Vec<LanguageTag>) -> Option<LanguageTag> {
    let mut iter = tags.into_iter();
    match (iter.next(), iter.next()) {
        (Some(tag), None) => Some(tag),
        _ => None,
    }
}

/// A `<script>` element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptElement {
    /// Attributes by name
    pub attributes: BTreeMap<String, String>,
    /// Inline code, `None` when the element is empty
    pub content: Option<String>,
}

impl ScriptElement {
    /// Attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Document given either as raw markup or already parsed
#[derive(Debug, Clone)]
pub enum DocumentInput {
    /// Markup still to be parsed
    Raw(String),
    /// Parsed document
    Parsed(ParsedDocument),
}

impl DocumentInput {
    /// Parse if needed
    pub fn into_parsed(self) -> ParsedDocument {
        match self {
            DocumentInput::Raw(markup) => ParsedDocument::parse(&markup),
            DocumentInput::Parsed(doc) => doc,
        }
    }

    /// Run `f` against the parsed document, parsing raw markup on the fly
    pub fn with_parsed<R>(&self, f: impl FnOnce(&ParsedDocument) -> R) -> R {
        match self {
            DocumentInput::Raw(markup) => f(&ParsedDocument::parse(markup)),
            DocumentInput::Parsed(doc) => f(doc),
        }
    }
}

impl From<String> for DocumentInput {
    fn from(markup: String) -> Self {
        DocumentInput::Raw(markup)
    }
}

impl From<&str> for DocumentInput {
    fn from(markup: &str) -> Self {
        DocumentInput::Raw(markup.to_string())
    }
}

impl From<ParsedDocument> for DocumentInput {
    fn from(doc: ParsedDocument) -> Self {
        DocumentInput::Parsed(doc)
    }
}
