//! Per-file-type transform rules.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::mode::BuildMode;
use crate::steps::Loader;
use crate::styles::css_loaders;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Script,
    Style,
    Image,
    Vector,
    Font,
}

/// Files whose path matches `test` run through `loaders`, unless the path
/// contains `exclude` as a substring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub kind: AssetKind,
    pub test: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
    pub loaders: Vec<Loader>,
    #[serde(skip)]
    compiled: CompiledPattern,
}

/// `test` compiled on first use. Ignored by equality.
#[derive(Debug, Clone, Default)]
struct CompiledPattern(OnceLock<Regex>);

impl PartialEq for CompiledPattern {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl Eq for CompiledPattern {}

impl Rule {
    fn new(kind: AssetKind, test: &str, loaders: Vec<Loader>) -> Self {
        Self {
            kind,
            test: test.to_string(),
            exclude: None,
            loaders,
            compiled: CompiledPattern::default(),
        }
    }

    fn excluding(mut self, component: &str) -> Self {
        self.exclude = Some(component.to_string());
        self
    }

    /// The compiled `test` pattern, built once per rule.
    pub fn regex(&self) -> Result<&Regex> {
        if let Some(regex) = self.compiled.0.get() {
            return Ok(regex);
        }

        let regex = Regex::new(&self.test).map_err(|source| ConfigError::InvalidPattern {
            pattern: self.test.clone(),
            source,
        })?;
        Ok(self.compiled.0.get_or_init(|| regex))
    }

    pub fn matches(&self, path: &Path) -> Result<bool> {
        let path = path.to_string_lossy();
        if let Some(exclude) = &self.exclude {
            if path.contains(exclude.as_str()) {
                return Ok(false);
            }
        }

        Ok(self.regex()?.is_match(&path))
    }
}

fn file_rule(kind: AssetKind, test: &str, dir: &str) -> Rule {
    Rule::new(
        kind,
        test,
        vec![Loader::File {
            name: format!("static/{dir}/[name].[ext]"),
        }],
    )
}

/// The five transform rules, in match order: scripts, styles, images,
/// vector graphics, fonts.
pub fn transform_rules(mode: BuildMode) -> Vec<Rule> {
    vec![
        Rule::new(AssetKind::Script, r"\.js$", vec![Loader::Babel]).excluding("node_modules"),
        Rule::new(
            AssetKind::Style,
            r"\.s[ac]ss$",
            css_loaders(mode, Loader::Sass),
        ),
        file_rule(AssetKind::Image, r"\.(png|jpg|jpeg|gif)$", "img"),
        file_rule(AssetKind::Vector, r"\.svg$", "svg"),
        file_rule(AssetKind::Font, r"\.(ttf|woff|woff2|eot)$", "fonts"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(kind: AssetKind) -> Rule {
        transform_rules(BuildMode::Development)
            .into_iter()
            .find(|r| r.kind == kind)
            .unwrap()
    }

    #[test]
    fn five_rules_in_order() {
        let kinds: Vec<_> = transform_rules(BuildMode::Production)
            .iter()
            .map(|r| r.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                AssetKind::Script,
                AssetKind::Style,
                AssetKind::Image,
                AssetKind::Vector,
                AssetKind::Font,
            ]
        );
    }

    #[test]
    fn script_rule_skips_node_modules() {
        let scripts = rule(AssetKind::Script);
        assert!(scripts.matches(Path::new("src/app.js")).unwrap());
        assert!(!scripts.matches(Path::new("node_modules/react/index.js")).unwrap());
        assert!(!scripts.matches(Path::new("src/app.ts")).unwrap());
    }

    #[test]
    fn exclusion_is_a_substring_match() {
        let scripts = rule(AssetKind::Script);
        assert!(!scripts.matches(Path::new("vendor/node_modules_shim/x.js")).unwrap());
        assert!(!scripts.matches(Path::new("lib/my_node_modules/x.js")).unwrap());
        assert!(scripts.matches(Path::new("vendor/node/modules/x.js")).unwrap());
    }

    #[test]
    fn pattern_is_compiled_once() {
        let scripts = rule(AssetKind::Script);
        let first = scripts.regex().unwrap() as *const Regex;
        let second = scripts.regex().unwrap() as *const Regex;
        assert_eq!(first, second);
    }

    #[test]
    fn deserialized_rules_compile_lazily() {
        let rule: Rule = serde_json::from_value(serde_json::json!({
            "kind": "script",
            "test": "\\.mjs$",
            "loaders": [{ "loader": "babel" }]
        }))
        .unwrap();
        assert!(rule.matches(Path::new("src/app.mjs")).unwrap());
        assert_eq!(rule, rule.clone());
    }

    #[test]
    fn style_rule_accepts_sass_and_scss() {
        let styles = rule(AssetKind::Style);
        assert!(styles.matches(Path::new("src/main.scss")).unwrap());
        assert!(styles.matches(Path::new("src/theme.sass")).unwrap());
        assert!(!styles.matches(Path::new("src/plain.css")).unwrap());
    }

    #[test]
    fn asset_rules_route_to_static_subdirectories() {
        let fonts = rule(AssetKind::Font);
        assert!(fonts.matches(Path::new("fonts/Inter.woff2")).unwrap());
        assert_eq!(
            fonts.loaders,
            vec![Loader::File {
                name: "static/fonts/[name].[ext]".to_string()
            }]
        );
        assert!(rule(AssetKind::Vector).matches(Path::new("icons/logo.svg")).unwrap());
        assert!(rule(AssetKind::Image).matches(Path::new("img/hero.jpeg")).unwrap());
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let broken = Rule::new(AssetKind::Image, "(", vec![]);
        let err = broken.matches(Path::new("a.png")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }
}
