/*!
 * Tests for glossary loading and term protection.
 */

use xliffwai::glossary::{Glossary, TermProtector};

#[test]
fn test_glossary_default_shouldCarryBrandAndLocationTerms() {
    let glossary = Glossary::default();

    assert!(glossary.categories.contains_key("brand_terms"));
    assert!(glossary.categories.contains_key("locations"));
    let protector = TermProtector::new(&glossary).unwrap();
    assert!(protector.term_count() >= 20);
}

#[test]
fn test_glossary_fromJson_shouldDeserializeCategories() {
    let glossary: Glossary = serde_json::from_str(
        r#"{"categories":{"brand":{"Nest Pass":"Nest Pass"},"contact":{"+34 655 01 20 55":"+34 655 01 20 55"}}}"#,
    )
    .unwrap();

    let protector = TermProtector::new(&glossary).unwrap();
    assert_eq!(protector.term_count(), 2);
}

#[test]
fn test_termProtector_protect_shouldFixCasingMidSentence() {
    let glossary: Glossary =
        serde_json::from_str(r#"{"categories":{"brand":{"Nest Pass":"Nest Pass"}}}"#).unwrap();
    let protector = TermProtector::new(&glossary).unwrap();

    let (text, corrections) = protector.protect(
        "Reserva tu Nest Pass este mes",
        "Book your nest pass month now",
    );

    assert_eq!(text, "Book your Nest Pass month now");
    assert_eq!(corrections, 1);
}

#[test]
fn test_termProtector_protect_withLeadingPlusTerm_shouldMatch() {
    let glossary: Glossary = serde_json::from_str(
        r#"{"categories":{"contact":{"+34 655 01 20 55":"+34 655 01 20 55"}}}"#,
    )
    .unwrap();
    let protector = TermProtector::new(&glossary).unwrap();

    // Case-normalization cannot drift for digits, but boundary detection must
    // still accept the '+' start without a regex word boundary
    let (text, corrections) =
        protector.protect("Llama al +34 655 01 20 55", "Call +34 655 01 20 55 today");

    assert_eq!(text, "Call +34 655 01 20 55 today");
    assert_eq!(corrections, 0);
}

#[test]
fn test_termProtector_protect_shouldCountMultipleCorrections() {
    let protector = TermProtector::new(&Glossary::default()).unwrap();

    let (text, corrections) = protector.protect(
        "Duque Nest en Costa Adeje",
        "duque nest is in costa adeje",
    );

    assert_eq!(text, "Duque Nest is in Costa Adeje");
    assert_eq!(corrections, 2);
}
