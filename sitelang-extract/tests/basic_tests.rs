//! Basic tests for sitelang-extract

use sitelang_extract::*;

const PAGE: &str = r#"
<!DOCTYPE html>
<html lang="de_DE">
    <head>
        <title>Page Title</title>
        <meta http-equiv="Content-Language" content="it">
        <script type="text/javascript">
            document.write("Hello World!")
        </script>
        <script src="./include.js"></script>
        <script src="https://ajax.googleapis.com/ajax/libs/jquery/3.5.1/jquery.min.js"></script>
    </head>
    <body>
        <h1>My First Heading</h1>
        <p>My first paragraph. <strong>A strong statement</strong></p>
        <h2>Ein Satz in einer anderen Sprache.</h2>
        <h3>Hallo & So</h3>
        <noscript>Eine freundliche Erinnerung, dass es javascript braucht</noscript>
    </body>
</html>
"#;

const INLINE_JS: &str = "\n            document.write(\"Hello World!\")\n        ";

#[test]
fn test_body_text() {
    let doc = ParsedDocument::parse(PAGE);
    assert_eq!(
        doc.body_text().unwrap(),
        "My First Heading My first paragraph A strong statement Ein Satz in einer anderen \
         Sprache Hallo So Eine freundliche Erinnerung dass es javascript braucht"
    );
}

#[test]
fn test_scripts_and_noscripts() {
    let doc = ParsedDocument::parse(PAGE);

    let scripts = doc.scripts();
    assert_eq!(scripts.len(), 3);
    assert_eq!(scripts[0].attr("type"), Some("text/javascript"));
    assert_eq!(scripts[0].content.as_deref(), Some(INLINE_JS));
    assert_eq!(scripts[1].attr("src"), Some("./include.js"));
    assert!(scripts[1].content.is_none());
    assert_eq!(
        scripts[2].attr("src"),
        Some("https://ajax.googleapis.com/ajax/libs/jquery/3.5.1/jquery.min.js")
    );

    assert_eq!(
        doc.noscripts(),
        vec![Some(
            "Eine freundliche Erinnerung, dass es javascript braucht".to_string()
        )]
    );
}

#[test]
fn test_declared_language() {
    let resolver = MetaLanguageResolver::default();
    let found = resolver
        .resolve_with_source(&HeaderInput::none(), &DocumentInput::from(PAGE))
        .unwrap()
        .unwrap();
    assert_eq!(found.language, "de");
    assert_eq!(found.source, MetaSource::Markup);
}

#[test]
fn test_page_script_sources() {
    let doc = ParsedDocument::parse(PAGE);
    let sources = classify_scripts("example.com", &doc.scripts());
    let kinds: Vec<ScriptKind> = sources.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ScriptKind::InlineJs,
            ScriptKind::IncludeLocal,
            ScriptKind::IncludeExternal
        ]
    );
}

#[test]
fn test_classify_scripts() {
    let scripts = vec![
        ScriptElement {
            attributes: [("type".to_string(), "text/javascript".to_string())].into(),
            content: Some(INLINE_JS.to_string()),
        },
        ScriptElement {
            attributes: [("src".to_string(), "./include.js".to_string())].into(),
            content: None,
        },
        ScriptElement {
            attributes: [(
                "src".to_string(),
                "https://subdomain.example.com/include_local.js".to_string(),
            )]
            .into(),
            content: None,
        },
        ScriptElement {
            attributes: [(
                "src".to_string(),
                "https://ajax.googleapis.com/ajax/libs/jquery/3.5.1/jquery.min.js".to_string(),
            )]
            .into(),
            content: None,
        },
        ScriptElement {
            attributes: [("type".to_string(), "text/whatever".to_string())].into(),
            content: Some("\n            some other code\n        ".to_string()),
        },
    ];

    let sources = classify_scripts("example.com", &scripts);
    assert_eq!(sources.len(), 5);

    assert_eq!(sources[0].kind, ScriptKind::InlineJs);
    assert_eq!(sources[0].content.as_deref(), Some(INLINE_JS));

    assert_eq!(sources[1].kind, ScriptKind::IncludeLocal);
    assert_eq!(sources[1].src.as_deref(), Some("./include.js"));
    assert_eq!(sources[1].src_path.as_deref(), Some("/include.js"));

    assert_eq!(sources[2].kind, ScriptKind::IncludeLocal);
    assert_eq!(sources[2].src_path.as_deref(), Some("/include_local.js"));
    assert!(sources[2].src_domain.is_none());

    assert_eq!(sources[3].kind, ScriptKind::IncludeExternal);
    assert_eq!(sources[3].src_domain.as_deref(), Some("googleapis.com"));
    assert_eq!(
        sources[3].src_path.as_deref(),
        Some("/ajax/libs/jquery/3.5.1/jquery.min.js")
    );

    assert_eq!(sources[4].kind, ScriptKind::InlineUnknown);

    let json = serde_json::to_value(&sources[3]).unwrap();
    assert_eq!(json["type"], "include-external");
    assert!(json.get("content").is_none());
}

#[test]
fn test_analyze_paths() {
    let cases: &[(&str, &[&str], Option<&str>, Option<&str>, Option<&str>)] = &[
        (
            "/some/path/to/a/file/v5.1.8/include.js",
            &["some", "path", "to", "a", "file", "v5.1.8", "include.js"],
            Some("include.js"),
            Some("js"),
            Some("5.1.8"),
        ),
        ("/some/path/to/", &["some", "path", "to"], None, None, None),
        ("/some//path/to/", &["some", "path", "to"], None, None, None),
        (
            "/some/path/to/a/file/v5/include.js",
            &["some", "path", "to", "a", "file", "v5", "include.js"],
            Some("include.js"),
            Some("js"),
            Some("5"),
        ),
        (
            "/some/path/to/a/file/include-5.1.9.js",
            &["some", "path", "to", "a", "file", "include-5.1.9.js"],
            Some("include-5.1.9.js"),
            Some("js"),
            Some("5.1.9"),
        ),
        (
            "some/path/to/a/file/v5.1.8/include.xml",
            &["some", "path", "to", "a", "file", "v5.1.8", "include.xml"],
            Some("include.xml"),
            Some("xml"),
            Some("5.1.8"),
        ),
        (
            "some/path/to/a/file5/include.xml",
            &["some", "path", "to", "a", "file5", "include.xml"],
            Some("include.xml"),
            Some("xml"),
            None,
        ),
    ];

    for (path, components, file, ext, version) in cases {
        let analysis = analyze_path(path).unwrap().unwrap();
        assert_eq!(analysis.components, *components, "{path}");
        assert_eq!(analysis.file.as_deref(), *file, "{path}");
        assert_eq!(analysis.file_extension.as_deref(), *ext, "{path}");
        assert_eq!(
            analysis.version_number.as_ref().map(VersionNumber::as_str),
            *version,
            "{path}"
        );
    }
}

#[test]
fn test_overlong_path() {
    let path = "/some/path/to/a/file/v5.1.8/include.js/x/y/z/a/b/c/d/e/f/g/h/j/i/k/l/m/n/b/d/f/g/r/e/x"
        .repeat(10);
    assert!(matches!(
        analyze_path(&path),
        Err(ExtractError::PathTooLong { .. })
    ));
}

#[test]
fn test_header_cascade_from_json() {
    let resolver = MetaLanguageResolver::new(AcceptedLanguages::known());
    let headers = HeaderInput::from(r#"[{"h": "Content-Language", "v": "fr-FR"}]"#);
    let found = resolver
        .resolve_with_source(&headers, &DocumentInput::from("<html><body>x</body></html>"))
        .unwrap()
        .unwrap();
    assert_eq!(found.language, "fr");
    assert_eq!(found.source, MetaSource::Header);
}
