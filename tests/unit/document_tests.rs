/*!
 * Tests for the XLIFF document engine: parsing, extraction, round-trip
 * fidelity and translation insertion.
 */

use std::collections::HashMap;

use xliffwai::duplicates::DuplicateDetector;
use xliffwai::errors::XliffError;
use xliffwai::xliff::XliffDocument;

use crate::common::SAMPLE_XLIFF;

#[test]
fn test_document_parseStr_shouldExtractNonEmptyUnits() {
    let doc = XliffDocument::parse_str(SAMPLE_XLIFF).unwrap();

    // Unit 70 has a whitespace-only source and is dropped
    assert_eq!(doc.units().len(), 5);
    assert!(doc.unit("70").is_none());

    let ids: Vec<&str> = doc.units().iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["10", "11", "42", "50", "60"]);
}

#[test]
fn test_document_parseStr_shouldReadFileLanguages() {
    let doc = XliffDocument::parse_str(SAMPLE_XLIFF).unwrap();

    assert_eq!(doc.source_language, "es");
    assert_eq!(doc.target_language, "en");
}

#[test]
fn test_document_parseStr_shouldFlattenExtradataJson() {
    let doc = XliffDocument::parse_str(SAMPLE_XLIFF).unwrap();
    let unit = doc.unit("10").unwrap();

    assert_eq!(unit.extradata.get("unit").map(String::as_str), Some("Paragraph"));
    assert_eq!(unit.purpose, "body");
    assert_eq!(unit.group, "Content");
}

#[test]
fn test_document_parseStr_shouldRecordCdataEncoding() {
    let doc = XliffDocument::parse_str(SAMPLE_XLIFF).unwrap();

    assert!(doc.unit("10").unwrap().has_cdata);
    assert!(!doc.unit("42").unwrap().has_cdata);
    assert_eq!(doc.unit("10").unwrap().source, "Ven a la playa");
}

#[test]
fn test_document_parseStr_withInlineMarkup_shouldReserializeElementChildren() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff version="1.2">
  <file original="p" source-language="es" target-language="en">
    <body>
      <trans-unit id="1" resname="Paragraph">
        <source>Hola <strong>mundo</strong> y <br/>adios</source>
      </trans-unit>
    </body>
  </file>
</xliff>"#;

    let doc = XliffDocument::parse_str(xml).unwrap();
    let unit = doc.unit("1").unwrap();

    assert_eq!(unit.source, "Hola <strong>mundo</strong> y <br/>adios");
    assert!(!unit.has_cdata);
    assert_eq!(doc.to_xml().unwrap(), xml);
}

#[test]
fn test_document_parseStr_withCdataAndElement_shouldKeepCdataEncoding() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff version="1.2">
  <file original="p" source-language="es" target-language="en">
    <body>
      <trans-unit id="1" resname="Paragraph">
        <source><![CDATA[Texto ]]><em>destacado</em></source>
      </trans-unit>
    </body>
  </file>
</xliff>"#;

    let doc = XliffDocument::parse_str(xml).unwrap();
    let unit = doc.unit("1").unwrap();

    // One CDATA child is enough to keep the CDATA encoding for the target
    assert_eq!(unit.source, "Texto <em>destacado</em>");
    assert!(unit.has_cdata);
    assert_eq!(doc.to_xml().unwrap(), xml);
}

#[test]
fn test_document_toXml_withoutMutations_shouldRoundTripVerbatim() {
    let doc = XliffDocument::parse_str(SAMPLE_XLIFF).unwrap();

    assert_eq!(doc.to_xml().unwrap(), SAMPLE_XLIFF);
}

#[test]
fn test_document_parse_withMissingFile_shouldReturnNotFound() {
    let result = XliffDocument::parse("no/such/file.xliff");

    assert!(matches!(result, Err(XliffError::NotFound(_))));
}

#[test]
fn test_document_parseStr_withoutFileElement_shouldFail() {
    let result = XliffDocument::parse_str("<xliff version=\"1.2\"><body></body></xliff>");

    assert!(matches!(result, Err(XliffError::MissingFileElement)));
}

#[test]
fn test_document_insertTranslations_shouldRewriteExistingTarget() {
    let mut doc = XliffDocument::parse_str(SAMPLE_XLIFF).unwrap();
    let mut map = HashMap::new();
    map.insert("42".to_string(), "https://nestshostels.com/duque".to_string());

    let report = doc.insert_translations(&map);
    let xml = doc.to_xml().unwrap();

    assert_eq!(report.applied, 1);
    assert!(xml.contains("<target state=\"translated\">https://nestshostels.com/duque</target>"));
    assert!(!xml.contains("stale"));
    assert!(!xml.contains("state-qualifier"));
}

#[test]
fn test_document_insertTranslations_shouldCreateTargetAfterSource() {
    let mut doc = XliffDocument::parse_str(SAMPLE_XLIFF).unwrap();
    let mut map = HashMap::new();
    map.insert("50".to_string(), "The best hostel in Tenerife".to_string());

    doc.insert_translations(&map);
    let xml = doc.to_xml().unwrap();

    let source_pos = xml.find("El mejor hostal de Tenerife</source>").unwrap();
    let target_pos = xml
        .find("<target state=\"translated\">The best hostel in Tenerife</target>")
        .unwrap();
    assert!(target_pos > source_pos);
}

#[test]
fn test_document_insertTranslations_shouldPreserveCdataEncoding() {
    let mut doc = XliffDocument::parse_str(SAMPLE_XLIFF).unwrap();
    let mut map = HashMap::new();
    map.insert("10".to_string(), "Come to the beach".to_string());

    doc.insert_translations(&map);
    let xml = doc.to_xml().unwrap();

    assert!(xml.contains("<target state=\"translated\"><![CDATA[Come to the beach]]></target>"));
}

#[test]
fn test_document_insertTranslations_shouldPropagateToDuplicates() {
    let mut doc = XliffDocument::parse_str(SAMPLE_XLIFF).unwrap();
    let groups = DuplicateDetector::detect(doc.units_mut());
    doc.set_duplicate_groups(groups);

    let mut map = HashMap::new();
    map.insert("10".to_string(), "Come to the beach".to_string());

    let report = doc.insert_translations(&map);
    let xml = doc.to_xml().unwrap();

    assert_eq!(report.applied, 1);
    assert_eq!(report.propagated, 1);
    assert_eq!(xml.matches("Come to the beach").count(), 2);
}

#[test]
fn test_document_insertTranslations_withUnknownId_shouldLeaveUnitAlone() {
    let mut doc = XliffDocument::parse_str(SAMPLE_XLIFF).unwrap();
    let mut map = HashMap::new();
    map.insert("999".to_string(), "ghost".to_string());

    let report = doc.insert_translations(&map);

    assert_eq!(report.applied, 0);
    assert_eq!(doc.to_xml().unwrap(), SAMPLE_XLIFF);
}

#[test]
fn test_document_withInsertionConfig_shouldHonorStateSettings() {
    let mut doc = XliffDocument::parse_str(SAMPLE_XLIFF)
        .unwrap()
        .with_insertion_config("final", false);

    let mut map = HashMap::new();
    map.insert("42".to_string(), "https://nestshostels.com/duque".to_string());
    doc.insert_translations(&map);
    let xml = doc.to_xml().unwrap();

    assert!(xml.contains("state=\"final\""));
    // Qualifier survives when removal is disabled
    assert!(xml.contains("state-qualifier=\"mt-suggestion\""));
}

#[test]
fn test_document_save_shouldCreateParentDirectories() {
    let dir = crate::common::create_temp_dir().unwrap();
    let mut doc = XliffDocument::parse_str(SAMPLE_XLIFF).unwrap();
    let mut map = HashMap::new();
    map.insert("50".to_string(), "The best hostel".to_string());
    doc.insert_translations(&map);

    let nested = dir.path().join("en").join("out.xliff");
    doc.save(&nested).unwrap();

    let written = std::fs::read_to_string(&nested).unwrap();
    assert!(written.contains("The best hostel"));
}
