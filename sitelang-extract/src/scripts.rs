//! Script source classification
//!
//! Sorts `<script>` elements into includes (local or external to the site's
//! domain) and inline code, keyed by MIME type.

use crate::html::ScriptElement;
use serde::Serialize;
use std::fmt;
use url::{Host, Url};

/// MIME types with a known inline kind
const KNOWN_SCRIPT_MIME_TYPES: &[(&str, ScriptKind)] = &[
    ("text/javascript", ScriptKind::InlineJs),
    ("application/javascript", ScriptKind::InlineJs),
    ("application/json", ScriptKind::InlineJson),
    ("application/ld+json", ScriptKind::InlineJson),
    ("application/gem+json", ScriptKind::InlineJson),
    ("text/template", ScriptKind::InlineTemplate),
    ("text/x-template", ScriptKind::InlineTemplate),
    ("text/html", ScriptKind::InlineHtml),
    ("text/plain", ScriptKind::InlineText),
    ("text/xml", ScriptKind::InlineXml),
];

/// Kind of script source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScriptKind {
    /// Loaded from the site's own domain or a relative URL
    IncludeLocal,
    /// Loaded from another domain
    IncludeExternal,
    /// Inline JavaScript
    InlineJs,
    /// Inline JSON
    InlineJson,
    /// Inline template
    InlineTemplate,
    /// Inline HTML
    InlineHtml,
    /// Inline plain text
    InlineText,
    /// Inline XML
    InlineXml,
    /// Inline code of an unrecognized type
    InlineUnknown,
}

impl ScriptKind {
    /// Kebab-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptKind::IncludeLocal => "include-local",
            ScriptKind::IncludeExternal => "include-external",
            ScriptKind::InlineJs => "inline-js",
            ScriptKind::InlineJson => "inline-json",
            ScriptKind::InlineTemplate => "inline-template",
            ScriptKind::InlineHtml => "inline-html",
            ScriptKind::InlineText => "inline-text",
            ScriptKind::InlineXml => "inline-xml",
            ScriptKind::InlineUnknown => "inline-unknown",
        }
    }

    /// Whether the script is loaded through `src`
    pub fn is_include(&self) -> bool {
        matches!(self, ScriptKind::IncludeLocal | ScriptKind::IncludeExternal)
    }

    fn from_mime(mime: &str) -> Self {
        let mime = mime.trim();
        KNOWN_SCRIPT_MIME_TYPES
            .iter()
            .find(|(known, _)| mime.eq_ignore_ascii_case(known))
            .map(|(_, kind)| *kind)
            .unwrap_or(ScriptKind::InlineUnknown)
    }
}

impl fmt::Display for ScriptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptSource {
    /// Kind of source
    #[serde(rename = "type")]
    pub kind: ScriptKind,
    /// `src` attribute, includes only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Path part of `src`, includes only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src_path: Option<String>,
    /// Domain an external include is loaded from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src_domain: Option<String>,
    /// Inline code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Classify scripts scraped from a page served under `domain`
///
/// Includes whose host shares the registrable domain of `domain` count as
/// local, so `www.bmi.gv.at` and `cdn.bmi.gv.at` are the same site while
/// `www.bka.gv.at` is not.
pub fn classify_scripts(domain: &str, scripts: &[ScriptElement]) -> Vec<ScriptSource> {
    let domain = domain.trim().trim_end_matches('.').to_ascii_lowercase();
    scripts
        .iter()
        .map(|script| match script.attr("src") {
            Some(src) => classify_include(&domain, src),
            None => ScriptSource {
                kind: script
                    .attr("type")
                    .map_or(ScriptKind::InlineJs, ScriptKind::from_mime),
                src: None,
                src_path: None,
                src_domain: None,
                content: script.content.clone(),
            },
        })
        .collect()
}

fn classify_include(domain: &str, src: &str) -> ScriptSource {
    let mut source = ScriptSource {
        kind: ScriptKind::IncludeLocal,
        src: Some(src.to_string()),
        src_path: None,
        src_domain: None,
        content: None,
    };

    match parse_absolute(src) {
        Some(url) => {
            source.src_path = Some(url.path().to_string());
            if let Some(host) = url.host() {
                if !is_same_site(&host, domain) {
                    source.kind = ScriptKind::IncludeExternal;
                    source.src_domain = Some(host_domain(&host));
                }
            }
        }
        None => source.src_path = Some(relative_path(src)),
    }

    tracing::trace!(kind = %source.kind, src, "classified include");
    source
}

fn parse_absolute(src: &str) -> Option<Url> {
    let src = src.trim();
    if let Some(rest) = src.strip_prefix("//") {
        return Url::parse(&format!("https://{rest}")).ok();
    }
    Url::parse(src).ok()
}

fn relative_path(src: &str) -> String {
    let end = src.find(['?', '#']).unwrap_or(src.len());
    let path = src[..end].trim();
    match path.strip_prefix("./") {
        Some(rest) => format!("/{rest}"),
        None => path.to_string(),
    }
}

/// Registrable part of a domain name, e.g. `bmi.gv.at` for `cdn.bmi.gv.at`
///
/// Uses the public suffix list; names without a registrable part (a bare
/// suffix, `localhost`) are returned unchanged.
pub fn registrable_domain(name: &str) -> String {
    let name = name.trim().trim_end_matches('.').to_ascii_lowercase();
    match psl::domain_str(&name) {
        Some(domain) => domain.to_string(),
        None => name,
    }
}

fn host_domain(host: &Host<&str>) -> String {
    match host {
        Host::Domain(name) => registrable_domain(name),
        other => other.to_string(),
    }
}

fn is_same_site(host: &Host<&str>, domain: &str) -> bool {
    match host {
        Host::Domain(_) => host_domain(host) == registrable_domain(domain),
        other => other.to_string() == domain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn script(attrs: &[(&str, &str)], content: Option<&str>) -> ScriptElement {
        ScriptElement {
            attributes: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
            content: content.map(str::to_string),
        }
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(ScriptKind::from_mime("Application/LD+JSON"), ScriptKind::InlineJson);
        assert_eq!(ScriptKind::from_mime("text/x-template"), ScriptKind::InlineTemplate);
        assert_eq!(ScriptKind::from_mime("module"), ScriptKind::InlineUnknown);
    }

    #[test]
    fn test_scheme_relative_include() {
        let sources = classify_scripts("example.com", &[script(&[("src", "//cdn.example.org/a.js")], None)]);
        assert_eq!(sources[0].kind, ScriptKind::IncludeExternal);
        assert_eq!(sources[0].src_domain.as_deref(), Some("example.org"));
        assert_eq!(sources[0].src_path.as_deref(), Some("/a.js"));
    }

    #[test]
    fn test_lookalike_domain_is_external() {
        let sources = classify_scripts(
            "example.com",
            &[script(&[("src", "https://badexample.com/x.js")], None)],
        );
        assert_eq!(sources[0].kind, ScriptKind::IncludeExternal);
        assert_eq!(sources[0].src_domain.as_deref(), Some("badexample.com"));
    }

    #[test]
    fn test_relative_query_is_dropped() {
        let sources = classify_scripts(
            "example.com",
            &[script(&[("src", "./js/app.js?v=3#top")], None)],
        );
        assert_eq!(sources[0].kind, ScriptKind::IncludeLocal);
        assert_eq!(sources[0].src_path.as_deref(), Some("/js/app.js"));
        assert!(sources[0].src_domain.is_none());
    }

    #[test]
    fn test_ip_host() {
        let sources = classify_scripts(
            "example.com",
            &[script(&[("src", "http://10.0.0.1/x.js")], None)],
        );
        assert_eq!(sources[0].kind, ScriptKind::IncludeExternal);
        assert_eq!(sources[0].src_domain.as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn test_multi_label_public_suffix() {
        let includes = [
            script(&[("src", "https://cdn.bmi.gv.at/a.js")], None),
            script(&[("src", "https://www.bka.gv.at/b.js")], None),
            script(&[("src", "https://static.bbc.co.uk/c.js")], None),
        ];
        let sources = classify_scripts("www.bmi.gv.at", &includes);
        assert_eq!(sources[0].kind, ScriptKind::IncludeLocal);
        assert!(sources[0].src_domain.is_none());
        assert_eq!(sources[1].kind, ScriptKind::IncludeExternal);
        assert_eq!(sources[1].src_domain.as_deref(), Some("bka.gv.at"));
        assert_eq!(sources[2].src_domain.as_deref(), Some("bbc.co.uk"));
    }

    #[test]
    fn test_registrable_domain() {
        assert_eq!(registrable_domain("cdn.bmi.gv.at"), "bmi.gv.at");
        assert_eq!(registrable_domain("WWW.BBC.CO.UK."), "bbc.co.uk");
        assert_eq!(registrable_domain("nic.at"), "nic.at");
        assert_eq!(registrable_domain("localhost"), "localhost");
    }

    #[test]
    fn test_inline_content_kept() {
        let sources = classify_scripts("example.com", &[script(&[], Some("let a = 1;"))]);
        assert_eq!(sources[0].kind, ScriptKind::InlineJs);
        assert_eq!(sources[0].content.as_deref(), Some("let a = 1;"));
        assert!(sources[0].src.is_none());
    }
}
