/*!
 * Non-translatable content rules.
 *
 * A safety net under the tag classifier: units that fell through to the
 * brand-voice default are re-checked against exact matches and content
 * patterns (URLs, emails, shortcodes, embeds, technical markup) and demoted
 * to pass-through when one fires.
 */

use std::collections::BTreeMap;

use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::xliff::{ClassificationSource, TranslationStrategy, TranslationUnit};

// @struct: Serializable rule data, overridable from the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NonTranslatableRuleSet {
    // @field: Named patterns matched against the whole source text
    #[serde(default = "default_patterns")]
    pub patterns: BTreeMap<String, String>,

    // @field: Literal strings (trimmed comparison) that never get translated
    #[serde(default = "default_exact_matches")]
    pub exact_matches: Vec<String>,

    // @field: Patterns catching technical markup inside longer content
    #[serde(default = "default_content_patterns")]
    pub content_patterns: BTreeMap<String, String>,
}

impl Default for NonTranslatableRuleSet {
    fn default() -> Self {
        NonTranslatableRuleSet {
            patterns: default_patterns(),
            exact_matches: default_exact_matches(),
            content_patterns: default_content_patterns(),
        }
    }
}

fn default_patterns() -> BTreeMap<String, String> {
    [
        ("url", r"^https?://"),
        ("email", r"^[^\s@]+@[^\s@]+\.[^\s@]+$"),
        ("shortcode", r"^\[[\w_-]+.*\]$"),
        ("phone", r"^\+?\d[\d\s-]{8,}$"),
        ("coordinate", r"^-?\d+\.\d+$"),
        ("json_ld", r#"^\s*\{\s*"@context""#),
        ("iframe", r"(?is)<iframe.*</iframe>"),
        ("postal_code", r"^\d{5}(-\d{4})?$"),
        ("youtube_url", r"youtube\.be/|youtu\.be/"),
        ("whatsapp_url", r"wa\.me/"),
        ("google_maps", r"google\.com/maps/embed"),
        ("wordpress_comment", r"(?s)<!--.*-->"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_exact_matches() -> Vec<String> {
    [
        // Hostel names and locations
        "duque-nest",
        "Duque Nest",
        "nestshostels.cloudbeds.com",
        "Tenerife",
        "Teneriffa",
        "Costa Adeje",
        "Playa del Duque",
        "Santa Cruz de Tenerife",
        // Contact details
        "duquenesthostel@gmail.com",
        "+34 655 01 20 55",
        "+34 670 01 20 55",
        "38660",
        "38679",
        // Technical identifiers
        "ES",
        "EUR",
        "Mo-Su 08:00-23:00",
        "13:00:00",
        "10:30:00",
        // Brand elements
        "NEST PASS",
        "Nests Hostels",
        "Medano Nest",
    ]
    .map(String::from)
    .to_vec()
}

fn default_content_patterns() -> BTreeMap<String, String> {
    [
        ("gutenberg_comment", r"<!-- /wp:"),
        ("cdata_section", r"(?s)<!\[CDATA\[.*\]\]>"),
        ("html_entity", r"&[a-zA-Z]+;"),
        ("css_style", r#"(?i)style\s*=\s*["'].*["']"#),
        (
            "html_attributes",
            r#"(?i)(width|height|src|href|alt|title)\s*=\s*["'].*["']"#,
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Rule set with patterns compiled once per session
pub struct NonTranslatableRuleEngine {
    exact_matches: Vec<String>,
    patterns: Vec<(String, Regex)>,
    content_patterns: Vec<(String, Regex)>,
}

impl NonTranslatableRuleEngine {
    /// Compile a rule set. Fails if any configured pattern is invalid.
    pub fn compile(rules: &NonTranslatableRuleSet) -> Result<Self, regex::Error> {
        Ok(NonTranslatableRuleEngine {
            exact_matches: rules.exact_matches.clone(),
            patterns: compile_map(&rules.patterns)?,
            content_patterns: compile_map(&rules.content_patterns)?,
        })
    }

    /// Demote default-classified units whose source trips a rule.
    ///
    /// Units classified from an explicit tag or the SEO heuristic are left
    /// alone; the classifier's decision wins over the pattern tables.
    /// Returns the number of units reclassified.
    pub fn apply(&self, units: &mut [TranslationUnit]) -> usize {
        let mut reclassified = 0;

        for unit in units.iter_mut() {
            if unit.classification_source != Some(ClassificationSource::Default) {
                continue;
            }

            if let Some(rule) = self.matching_rule(&unit.source) {
                debug!(
                    "Unit {}: rule '{}' marks content non-translatable",
                    unit.id, rule
                );
                unit.strategy = Some(TranslationStrategy::NonTranslatable);
                reclassified += 1;
            }
        }

        if reclassified > 0 {
            info!("Rule engine reclassified {} units as non-translatable", reclassified);
        }

        reclassified
    }

    /// Name of the first rule matching the text, checked in order:
    /// exact matches, whole-text patterns, content patterns.
    pub fn matching_rule(&self, text: &str) -> Option<&str> {
        let trimmed = text.trim();

        if self.exact_matches.iter().any(|m| m == trimmed) {
            return Some("exact_match");
        }

        for (name, pattern) in &self.patterns {
            if pattern.is_match(text) {
                return Some(name);
            }
        }

        for (name, pattern) in &self.content_patterns {
            if pattern.is_match(text) {
                return Some(name);
            }
        }

        None
    }
}

fn compile_map(patterns: &BTreeMap<String, String>) -> Result<Vec<(String, Regex)>, regex::Error> {
    patterns
        .iter()
        .map(|(name, pattern)| Ok((name.clone(), Regex::new(pattern)?)))
        .collect()
}
