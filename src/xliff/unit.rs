use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// @module: Translation unit model

/// Translation strategy assigned to a unit during classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationStrategy {
    /// Marketing and narrative content, translated with the brand voice prompt
    BrandVoice,
    /// SEO-facing fields (titles, descriptions, keywords)
    Metadata,
    /// Content that must pass through unchanged (URLs, emails, embeds)
    NonTranslatable,
}

impl TranslationStrategy {
    // @returns: Snake-case identifier used in logs and stats
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BrandVoice => "brand_voice",
            Self::Metadata => "metadata",
            Self::NonTranslatable => "non_translatable",
        }
    }
}

impl fmt::Display for TranslationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a unit's strategy was decided.
///
/// The non-translatable rule engine only re-checks units that fell through to
/// the default strategy; explicit tag matches and SEO heuristics are trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationSource {
    /// Content-type tag matched one of the configured sets
    Tag,
    /// SEO purpose/group heuristic matched
    Heuristic,
    /// Unknown tag, defaulted to brand voice
    Default,
}

/// Opaque reference into the parsed document tree.
///
/// Owned exclusively by the document engine; components request mutations
/// through [`crate::xliff::XliffDocument::insert_translations`] rather than
/// touching the tree directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitHandle(pub(crate) usize);

// @struct: Single translatable span extracted from an XLIFF document
#[derive(Debug, Clone)]
pub struct TranslationUnit {
    // @field: Unit id, unique within a document
    pub id: String,

    // @field: Original-language text (trimmed, inline markup preserved verbatim)
    pub source: String,

    // @field: Whether the source was stored as a CDATA block
    pub has_cdata: bool,

    // @field: Flattened extradata metadata
    pub extradata: HashMap<String, String>,

    // @field: resname attribute, classification fallback signal
    pub resname: String,

    // @field: Content-type tag once classified
    pub content_type: Option<String>,

    // @field: Purpose hint from extradata
    pub purpose: String,

    // @field: Group hint from extradata
    pub group: String,

    // @field: Assigned translation strategy
    pub strategy: Option<TranslationStrategy>,

    // @field: Where the strategy decision came from
    pub classification_source: Option<ClassificationSource>,

    // @field: True for every occurrence after the first of identical source text
    pub is_duplicate: bool,

    // @field: Id of the duplicate group representative, if any
    pub duplicate_group: Option<String>,

    // @field: Position handle into the document tree
    pub(crate) handle: UnitHandle,
}

impl TranslationUnit {
    pub(crate) fn new(id: String, source: String, has_cdata: bool, handle: UnitHandle) -> Self {
        TranslationUnit {
            id,
            source,
            has_cdata,
            extradata: HashMap::new(),
            resname: String::new(),
            content_type: None,
            purpose: String::new(),
            group: String::new(),
            strategy: None,
            classification_source: None,
            is_duplicate: false,
            duplicate_group: None,
            handle,
        }
    }

    /// Strategy accessor that treats an unclassified unit as brand voice.
    /// Classification always runs before translation, so this is a safety net
    /// for direct library use rather than a code path the pipeline relies on.
    pub fn strategy_or_default(&self) -> TranslationStrategy {
        self.strategy.unwrap_or(TranslationStrategy::BrandVoice)
    }
}

/// Per-strategy unit counts reported after classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrategyStats {
    pub brand_voice: usize,
    pub metadata: usize,
    pub non_translatable: usize,
}

impl StrategyStats {
    pub fn total(&self) -> usize {
        self.brand_voice + self.metadata + self.non_translatable
    }

    pub fn count(&mut self, strategy: TranslationStrategy) {
        match strategy {
            TranslationStrategy::BrandVoice => self.brand_voice += 1,
            TranslationStrategy::Metadata => self.metadata += 1,
            TranslationStrategy::NonTranslatable => self.non_translatable += 1,
        }
    }
}

impl fmt::Display for StrategyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "brand_voice: {} | metadata: {} | non_translatable: {}",
            self.brand_voice, self.metadata, self.non_translatable
        )
    }
}
