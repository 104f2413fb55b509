/*!
 * End-to-end pipeline tests: parse, classify, translate with a mock provider,
 * insert and save.
 */

use xliffwai::app_config::Config;
use xliffwai::app_controller::Controller;
use xliffwai::providers::MockProvider;

use crate::common::{create_sample_xliff, create_temp_dir};

fn test_config() -> Config {
    let mut config = Config::default();
    // Keep the rate limiter effectively off so tests do not sleep
    config.rate_limit_rpm = 60_000;
    config
}

fn scripted_provider() -> MockProvider {
    MockProvider::working()
        .with_response("Ven a la playa", "Come to the beach")
        .with_response("El mejor hostal de Tenerife", "The best hostel in Tenerife")
}

#[tokio::test]
async fn test_pipeline_translateFile_shouldPopulateEveryTarget() {
    let dir = create_temp_dir().unwrap();
    let input = create_sample_xliff(dir.path(), "page-export.xliff").unwrap();
    let output_dir = dir.path().join("out");

    let mut controller =
        Controller::with_service_and_config(test_config(), Box::new(scripted_provider())).unwrap();
    let output = controller
        .translate_file(&input, &output_dir, Some("en"), false)
        .await
        .unwrap()
        .expect("pipeline should produce an output file");

    assert_eq!(output, output_dir.join("en").join("page-export_en.xliff"));
    let xml = std::fs::read_to_string(&output).unwrap();

    // Brand-voice representative and its duplicate both carry the translation
    assert_eq!(xml.matches("Come to the beach").count(), 2);
    // Metadata unit translated with the SEO prompt
    assert!(xml.contains("The best hostel in Tenerife"));
    // Non-translatable URL passes through with the terminal state
    assert!(xml.contains("<target state=\"translated\">https://nestshostels.com/duque</target>"));
    assert!(!xml.contains("state-qualifier"));
    // Untagged email demoted by the rule engine also gets a populated target
    assert!(xml.contains("<target state=\"translated\">duquenesthostel@gmail.com</target>"));
}

#[tokio::test]
async fn test_pipeline_translateFile_shouldCallProviderOncePerRepresentative() {
    let dir = create_temp_dir().unwrap();
    let input = create_sample_xliff(dir.path(), "page-export.xliff").unwrap();

    let provider = scripted_provider();
    let counter = provider.clone();
    let mut controller =
        Controller::with_service_and_config(test_config(), Box::new(provider)).unwrap();
    controller
        .translate_file(&input, &dir.path().join("out"), Some("en"), false)
        .await
        .unwrap();

    // Only units 10 (representative) and 50 reach the provider: the duplicate,
    // the URL and the email never do
    assert_eq!(counter.request_count(), 2);
}

#[tokio::test]
async fn test_pipeline_withFailingProvider_shouldFallBackAndStillSave() {
    let dir = create_temp_dir().unwrap();
    let input = create_sample_xliff(dir.path(), "page-export.xliff").unwrap();

    let mut controller =
        Controller::with_service_and_config(test_config(), Box::new(MockProvider::failing()))
            .unwrap();
    let output = controller
        .translate_file(&input, &dir.path().join("out"), Some("en"), false)
        .await
        .unwrap()
        .expect("fallback must not abort the file");

    let xml = std::fs::read_to_string(&output).unwrap();
    // Failed units keep their original text, duplicates included
    assert_eq!(xml.matches("<![CDATA[Ven a la playa]]></target>").count(), 2);
    assert!(xml.contains("El mejor hostal de Tenerife</target>"));

    let stats = controller.translation_stats();
    assert_eq!(stats.translated, 0);
    assert_eq!(stats.fallbacks, 2);
}

#[tokio::test]
async fn test_pipeline_translateFile_withExistingOutput_shouldSkip() {
    let dir = create_temp_dir().unwrap();
    let input = create_sample_xliff(dir.path(), "page-export.xliff").unwrap();
    let output_dir = dir.path().join("out");

    let mut controller =
        Controller::with_service_and_config(test_config(), Box::new(scripted_provider())).unwrap();

    let first = controller
        .translate_file(&input, &output_dir, Some("en"), false)
        .await
        .unwrap();
    assert!(first.is_some());

    let second = controller
        .translate_file(&input, &output_dir, Some("en"), false)
        .await
        .unwrap();
    assert!(second.is_none());
}

#[tokio::test]
async fn test_pipeline_checkProvider_withFailingProvider_shouldError() {
    let controller =
        Controller::with_service_and_config(test_config(), Box::new(MockProvider::failing()))
            .unwrap();

    assert!(controller.check_provider().await.is_err());
}
