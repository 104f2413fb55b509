/*!
 * Tests for the content classifier and the non-translatable rule engine.
 */

use xliffwai::classification::{
    ContentClassifier, ContentTypeRules, NonTranslatableRuleEngine, NonTranslatableRuleSet,
};
use xliffwai::xliff::{TranslationStrategy, XliffDocument};

use crate::common::SAMPLE_XLIFF;

fn classified_doc() -> XliffDocument {
    let mut doc = XliffDocument::parse_str(SAMPLE_XLIFF).unwrap();
    ContentClassifier::new(ContentTypeRules::default()).classify(doc.units_mut());
    doc
}

#[test]
fn test_classifier_classify_shouldAssignStrategyToEveryUnit() {
    let doc = classified_doc();

    assert!(doc.units().iter().all(|u| u.strategy.is_some()));
}

#[test]
fn test_classifier_classify_shouldUseExtradataTagFirst() {
    let doc = classified_doc();

    assert_eq!(
        doc.unit("10").unwrap().strategy,
        Some(TranslationStrategy::BrandVoice)
    );
    assert_eq!(
        doc.unit("10").unwrap().content_type.as_deref(),
        Some("Paragraph")
    );
}

#[test]
fn test_classifier_classify_shouldFallBackToResname() {
    let doc = classified_doc();

    // Unit 42 has no extradata, its resname "URL" decides
    assert_eq!(
        doc.unit("42").unwrap().strategy,
        Some(TranslationStrategy::NonTranslatable)
    );
    assert_eq!(
        doc.unit("50").unwrap().strategy,
        Some(TranslationStrategy::Metadata)
    );
}

#[test]
fn test_classifier_classify_withUnknownTag_shouldDefaultToBrandVoice() {
    let doc = classified_doc();

    assert_eq!(
        doc.unit("60").unwrap().strategy,
        Some(TranslationStrategy::BrandVoice)
    );
}

#[test]
fn test_classifier_classify_withSeoPurpose_shouldUseMetadataHeuristic() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff version="1.2">
  <file original="p" source-language="es" target-language="en">
    <body>
      <trans-unit id="1">
        <source>Hostal con encanto</source>
        <extradata key="extradata">{"unit":"Custom Widget","purpose":"seo_title"}</extradata>
      </trans-unit>
      <trans-unit id="2">
        <source>Otra cosa</source>
        <extradata key="extradata">{"unit":"Custom Widget","group":"Yoast SEO"}</extradata>
      </trans-unit>
    </body>
  </file>
</xliff>"#;

    let mut doc = XliffDocument::parse_str(xml).unwrap();
    ContentClassifier::new(ContentTypeRules::default()).classify(doc.units_mut());

    assert_eq!(
        doc.unit("1").unwrap().strategy,
        Some(TranslationStrategy::Metadata)
    );
    assert_eq!(
        doc.unit("2").unwrap().strategy,
        Some(TranslationStrategy::Metadata)
    );
}

#[test]
fn test_ruleEngine_apply_shouldDemoteUntaggedTechnicalContent() {
    let mut doc = classified_doc();
    let engine = NonTranslatableRuleEngine::compile(&NonTranslatableRuleSet::default()).unwrap();

    let reclassified = engine.apply(doc.units_mut());

    // Unit 60 (untagged email) is demoted; unit 10's explicit Paragraph tag
    // is trusted even though glossary-adjacent content could match patterns
    assert_eq!(reclassified, 1);
    assert_eq!(
        doc.unit("60").unwrap().strategy,
        Some(TranslationStrategy::NonTranslatable)
    );
    assert_eq!(
        doc.unit("10").unwrap().strategy,
        Some(TranslationStrategy::BrandVoice)
    );
}

#[test]
fn test_ruleEngine_afterClassification_statsShouldAddUp() {
    let mut doc = classified_doc();
    let engine = NonTranslatableRuleEngine::compile(&NonTranslatableRuleSet::default()).unwrap();
    engine.apply(doc.units_mut());

    let stats = doc.stats_by_strategy();

    assert_eq!(stats.brand_voice, 2);
    assert_eq!(stats.metadata, 1);
    assert_eq!(stats.non_translatable, 2);
    assert_eq!(stats.total(), doc.units().len());
}
