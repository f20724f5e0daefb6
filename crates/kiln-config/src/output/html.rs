//! HTML shell generation: template rendering, tag injection and
//! whitespace collapsing.

use std::path::Path;
use std::sync::OnceLock;

use minijinja::{context, Environment};
use regex::Regex;

use crate::error::{ConfigError, Result};
use crate::mode::BuildMode;

pub(crate) struct ShellAssets<'a> {
    pub title: Option<&'a str>,
    pub mode: BuildMode,
    pub scripts: &'a [String],
    pub styles: &'a [String],
}

/// Render `source` and inject tags for the emitted assets.
pub(crate) fn render_shell(
    source: &str,
    template_path: &Path,
    assets: &ShellAssets<'_>,
    collapse_whitespace: bool,
) -> Result<String> {
    let env = Environment::new();
    let rendered = env
        .render_str(
            source,
            context! {
                title => assets.title.unwrap_or_default(),
                mode => assets.mode.as_str(),
                scripts => assets.scripts,
                styles => assets.styles,
            },
        )
        .map_err(|source| ConfigError::Template {
            path: template_path.to_path_buf(),
            source,
        })?;

    let links: String = assets
        .styles
        .iter()
        .map(|href| format!("<link href=\"{}\" rel=\"stylesheet\">", escape_attr(href)))
        .collect();
    let scripts: String = assets
        .scripts
        .iter()
        .map(|src| format!("<script src=\"{}\"></script>", escape_attr(src)))
        .collect();

    let html = inject_before(&rendered, "</head>", &links);
    let html = inject_before(&html, "</body>", &scripts);

    Ok(if collapse_whitespace {
        collapse(&html)
    } else {
        html
    })
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Insert `tags` before the last occurrence of `closing` (ASCII case
/// insensitive), or append them.
pub(crate) fn inject_before(html: &str, closing: &str, tags: &str) -> String {
    if tags.is_empty() {
        return html.to_string();
    }

    // ASCII lowercasing keeps byte offsets.
    match html.to_ascii_lowercase().rfind(&closing.to_ascii_lowercase()) {
        Some(pos) => {
            let mut result = String::with_capacity(html.len() + tags.len());
            result.push_str(&html[..pos]);
            result.push_str(tags);
            result.push_str(&html[pos..]);
            result
        }
        None => format!("{html}{tags}"),
    }
}

fn raw_text_elements() -> &'static Regex {
    static RAW: OnceLock<Regex> = OnceLock::new();
    RAW.get_or_init(|| {
        Regex::new(
            r"(?is)<pre\b.*?</pre\s*>|<textarea\b.*?</textarea\s*>|<script\b.*?</script\s*>|<style\b.*?</style\s*>",
        )
        .expect("valid pattern")
    })
}

/// Drop whitespace between tags and fold every other whitespace run to
/// one space. Bodies of `pre`, `textarea`, `script` and `style` are kept
/// verbatim.
pub(crate) fn collapse(html: &str) -> String {
    let html = html.trim();
    let mut out = String::with_capacity(html.len());
    let mut last = 0;

    for element in raw_text_elements().find_iter(html) {
        let text = collapse_text(&html[last..element.start()], last > 0, true);
        out.push_str(&text);
        out.push_str(element.as_str());
        last = element.end();
    }
    out.push_str(&collapse_text(&html[last..], last > 0, false));
    out
}

/// Collapse one stretch of markup outside raw-text elements. `after_raw`
/// and `before_raw` say whether a preserved element borders it, so that
/// whitespace between it and a neighbouring tag is dropped too.
fn collapse_text(text: &str, after_raw: bool, before_raw: bool) -> String {
    static BETWEEN_TAGS: OnceLock<Regex> = OnceLock::new();
    static RUNS: OnceLock<Regex> = OnceLock::new();

    let between = BETWEEN_TAGS.get_or_init(|| Regex::new(r">\s+<").expect("valid pattern"));
    let runs = RUNS.get_or_init(|| Regex::new(r"\s+").expect("valid pattern"));

    let text = between.replace_all(text, "><");
    let mut text = runs.replace_all(&text, " ").into_owned();

    if before_raw && (text == " " || text.ends_with("> ")) {
        text.pop();
    }
    if after_raw && text.starts_with(" <") {
        text.remove(0);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "<!DOCTYPE html>\n<html>\n  <head>\n    <title>{{ title }}</title>\n  </head>\n  <body>\n    <div id=\"root\"></div>\n  </body>\n</html>\n";

    fn assets<'a>(scripts: &'a [String], styles: &'a [String]) -> ShellAssets<'a> {
        ShellAssets {
            title: Some("Demo"),
            mode: BuildMode::Production,
            scripts,
            styles,
        }
    }

    #[test]
    fn renders_title_and_injects_tags() {
        let scripts = vec!["main.abc123.js".to_string()];
        let styles = vec!["main.abc123.css".to_string()];
        let html =
            render_shell(TEMPLATE, Path::new("index.html"), &assets(&scripts, &styles), false)
                .unwrap();

        assert!(html.contains("<title>Demo</title>"));
        let link = html.find("<link href=\"main.abc123.css\"").unwrap();
        let head_end = html.find("</head>").unwrap();
        assert!(link < head_end);
        let script = html.find("<script src=\"main.abc123.js\">").unwrap();
        let body_end = html.find("</body>").unwrap();
        assert!(script < body_end);
    }

    #[test]
    fn collapses_whitespace_between_tags() {
        let html = render_shell(TEMPLATE, Path::new("index.html"), &assets(&[], &[]), true)
            .unwrap();
        assert!(!html.contains('\n'));
        assert!(html.contains("<head><title>Demo</title></head>"));
    }

    #[test]
    fn collapse_keeps_preformatted_bodies() {
        let html = "<body>\n  <pre>line1\n\n    indented</pre>\n  <p>one\ntwo   three</p>\n</body>";
        assert_eq!(
            collapse(html),
            "<body><pre>line1\n\n    indented</pre><p>one two three</p></body>"
        );
    }

    #[test]
    fn collapse_keeps_script_style_and_textarea_bodies() {
        let html = "<head>\n<style>\n  a { color: red; }\n</style>\n</head>\n<body>\n<TEXTAREA>\n  keep\n</TEXTAREA>\n<script>\n  if (a  &&  b) {}\n</script>\n</body>";
        assert_eq!(
            collapse(html),
            "<head><style>\n  a { color: red; }\n</style></head><body><TEXTAREA>\n  keep\n</TEXTAREA><script>\n  if (a  &&  b) {}\n</script></body>"
        );
    }

    #[test]
    fn collapse_drops_whitespace_between_adjacent_raw_elements() {
        assert_eq!(
            collapse("<pre>a</pre>\n\n<pre>b</pre>"),
            "<pre>a</pre><pre>b</pre>"
        );
    }

    #[test]
    fn asset_names_are_attribute_escaped() {
        let scripts = vec!["a\"b.js".to_string()];
        let styles = vec!["x&y.css".to_string()];
        let html = render_shell(
            "<html><head></head><body></body></html>",
            Path::new("index.html"),
            &assets(&scripts, &styles),
            false,
        )
        .unwrap();
        assert!(html.contains(r#"<script src="a&quot;b.js"></script>"#));
        assert!(html.contains(r#"<link href="x&amp;y.css" rel="stylesheet">"#));
    }

    #[test]
    fn closing_tags_match_any_case() {
        assert_eq!(
            inject_before("<BODY><p>hi</p></BODY></HTML>", "</body>", "<script></script>"),
            "<BODY><p>hi</p><script></script></BODY></HTML>"
        );
    }

    #[test]
    fn appends_when_closing_tag_missing() {
        assert_eq!(
            inject_before("<p>hi</p>", "</body>", "<script></script>"),
            "<p>hi</p><script></script>"
        );
    }

    #[test]
    fn template_errors_carry_path() {
        let err = render_shell(
            "{% if %}",
            Path::new("broken.html"),
            &assets(&[], &[]),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Template { .. }));
        assert!(err.to_string().contains("broken.html"));
    }
}
