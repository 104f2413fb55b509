/*!
 * Content classification.
 *
 * Assigns a translation strategy to every extracted unit based on its WPML
 * content-type tag, with an SEO heuristic and a brand-voice default for tags
 * the rule tables do not know.
 */

pub mod rules;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::xliff::{ClassificationSource, TranslationStrategy, TranslationUnit};

pub use rules::{NonTranslatableRuleEngine, NonTranslatableRuleSet};

// @struct: Content-type tag sets driving strategy assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentTypeRules {
    // @field: Tags translated with the brand voice prompt
    #[serde(default = "default_brand_voice_tags")]
    pub brand_voice: Vec<String>,

    // @field: SEO-facing tags translated with the metadata prompt
    #[serde(default = "default_metadata_tags")]
    pub metadata: Vec<String>,

    // @field: Tags passed through untouched
    #[serde(default = "default_non_translatable_tags")]
    pub non_translatable: Vec<String>,
}

impl Default for ContentTypeRules {
    fn default() -> Self {
        ContentTypeRules {
            brand_voice: default_brand_voice_tags(),
            metadata: default_metadata_tags(),
            non_translatable: default_non_translatable_tags(),
        }
    }
}

fn default_brand_voice_tags() -> Vec<String> {
    [
        "Paragraph",
        "Heading (H2)",
        "Heading (H3)",
        "Hostel Content",
        "Hostel Services",
        "Hostel Feature Description",
        "Hostel Services Description H4",
        "excerpt",
        "Yoast Faq Block",
    ]
    .map(String::from)
    .to_vec()
}

fn default_metadata_tags() -> Vec<String> {
    [
        "Meta Description",
        "Focus Keyword",
        "Twitter Title",
        "Twitter Description",
        "Opengraph Description",
        "Opengraph Title",
        "JSON LD",
        "Title",
        "Alt Text",
        "category",
        "post_tag",
    ]
    .map(String::from)
    .to_vec()
}

fn default_non_translatable_tags() -> Vec<String> {
    [
        "URL",
        "Map IFrame",
        "Hostel Map IFrame",
        "Hostel Slug",
        "Email",
        "Hostel Email",
        "Hostel Number",
        "Hostel Number Url",
        "Hostel Address Url",
        "Hostel City POSTAL CODE",
        "Hostel Header Video",
        "Html",
        "Hostel Name",
        "Hostel Island",
        "Hostel Address 1",
        "Hostel City",
    ]
    .map(String::from)
    .to_vec()
}

/// Assigns a strategy and a classification source to each unit
pub struct ContentClassifier {
    rules: ContentTypeRules,
}

impl ContentClassifier {
    pub fn new(rules: ContentTypeRules) -> Self {
        ContentClassifier { rules }
    }

    /// Classify every unit in place. Total: each unit ends with exactly one
    /// strategy, unknown tags falling through to brand voice.
    pub fn classify(&self, units: &mut [TranslationUnit]) {
        for unit in units.iter_mut() {
            let tag = Self::content_tag(unit);
            let (strategy, source) = self.decide(&tag, unit);

            unit.content_type = (!tag.is_empty()).then(|| tag.clone());
            unit.strategy = Some(strategy);
            unit.classification_source = Some(source);

            debug!(
                "Unit {}: tag '{}' classified as {} ({:?})",
                unit.id, tag, strategy, source
            );
        }
    }

    /// Content-type tag: extradata "unit" entry first, resname as fallback.
    fn content_tag(unit: &TranslationUnit) -> String {
        match unit.extradata.get("unit") {
            Some(tag) if !tag.is_empty() => tag.clone(),
            _ => unit.resname.clone(),
        }
    }

    fn decide(
        &self,
        tag: &str,
        unit: &TranslationUnit,
    ) -> (TranslationStrategy, ClassificationSource) {
        if self.rules.non_translatable.iter().any(|t| t == tag) {
            return (TranslationStrategy::NonTranslatable, ClassificationSource::Tag);
        }

        if self.rules.metadata.iter().any(|t| t == tag) {
            return (TranslationStrategy::Metadata, ClassificationSource::Tag);
        }

        // Yoast exports tag some SEO fields only through purpose/group hints
        if unit.purpose.contains("seo_") || unit.group == "Yoast SEO" {
            return (TranslationStrategy::Metadata, ClassificationSource::Heuristic);
        }

        if self.rules.brand_voice.iter().any(|t| t == tag) {
            return (TranslationStrategy::BrandVoice, ClassificationSource::Tag);
        }

        (TranslationStrategy::BrandVoice, ClassificationSource::Default)
    }
}
