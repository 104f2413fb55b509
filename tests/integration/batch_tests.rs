/*!
 * Batch processing tests: discovery, ledger checkpointing and resume.
 */

use xliffwai::app_config::Config;
use xliffwai::app_controller::Controller;
use xliffwai::batch::BatchProcessor;
use xliffwai::providers::MockProvider;

use crate::common::{create_sample_xliff, create_temp_dir};

fn test_controller() -> Controller {
    let mut config = Config::default();
    config.rate_limit_rpm = 60_000;
    Controller::with_service_and_config(config, Box::new(MockProvider::working())).unwrap()
}

#[tokio::test]
async fn test_batch_run_shouldProcessEveryFileAndLanguage() {
    let dir = create_temp_dir().unwrap();
    let input_dir = dir.path().join("input");
    std::fs::create_dir_all(&input_dir).unwrap();
    create_sample_xliff(&input_dir, "alpha.xliff").unwrap();
    create_sample_xliff(&input_dir, "beta.xliff").unwrap();

    let ledger = dir.path().join("logs").join("batch-progress.json");
    let mut processor = BatchProcessor::new(test_controller(), ledger.clone(), true);
    let outcome = processor
        .run(
            &input_dir,
            &dir.path().join("out"),
            &["en".to_string(), "de".to_string()],
            false,
        )
        .await
        .unwrap();

    assert_eq!(outcome.success, 4);
    assert_eq!(outcome.failed, 0);
    assert!(dir.path().join("out/en/alpha_en.xliff").exists());
    assert!(dir.path().join("out/de/beta_de.xliff").exists());

    let ledger_content = std::fs::read_to_string(&ledger).unwrap();
    assert!(ledger_content.contains("alpha_en"));
    assert!(ledger_content.contains("beta_de"));
    assert!(ledger_content.contains("\"status\": \"success\""));
}

#[tokio::test]
async fn test_batch_run_withLedger_shouldResumeWithoutRepeatingWork() {
    let dir = create_temp_dir().unwrap();
    let input_dir = dir.path().join("input");
    std::fs::create_dir_all(&input_dir).unwrap();
    create_sample_xliff(&input_dir, "alpha.xliff").unwrap();

    let ledger = dir.path().join("batch-progress.json");
    let languages = vec!["en".to_string()];

    let mut first = BatchProcessor::new(test_controller(), ledger.clone(), true);
    let first_outcome = first
        .run(&input_dir, &dir.path().join("out"), &languages, false)
        .await
        .unwrap();
    assert_eq!(first_outcome.success, 1);

    let mut second = BatchProcessor::new(test_controller(), ledger.clone(), true);
    let second_outcome = second
        .run(&input_dir, &dir.path().join("out"), &languages, false)
        .await
        .unwrap();

    assert_eq!(second_outcome.success, 0);
    assert_eq!(second_outcome.skipped, 1);
}

#[tokio::test]
async fn test_batch_run_withNoResume_shouldIgnoreLedgerButSkipExistingOutput() {
    let dir = create_temp_dir().unwrap();
    let input_dir = dir.path().join("input");
    std::fs::create_dir_all(&input_dir).unwrap();
    create_sample_xliff(&input_dir, "alpha.xliff").unwrap();

    let ledger = dir.path().join("batch-progress.json");
    let languages = vec!["en".to_string()];

    let mut first = BatchProcessor::new(test_controller(), ledger.clone(), true);
    first
        .run(&input_dir, &dir.path().join("out"), &languages, false)
        .await
        .unwrap();

    // Fresh ledger, but the output file from the first run still exists
    let mut second = BatchProcessor::new(test_controller(), ledger.clone(), false);
    let outcome = second
        .run(&input_dir, &dir.path().join("out"), &languages, false)
        .await
        .unwrap();

    assert_eq!(outcome.success, 0);
    assert_eq!(outcome.skipped, 1);
}

#[tokio::test]
async fn test_batch_run_withEmptyFolder_shouldReturnZeroOutcome() {
    let dir = create_temp_dir().unwrap();
    let input_dir = dir.path().join("input");
    std::fs::create_dir_all(&input_dir).unwrap();

    let mut processor = BatchProcessor::new(
        test_controller(),
        dir.path().join("ledger.json"),
        true,
    );
    let outcome = processor
        .run(&input_dir, &dir.path().join("out"), &["en".to_string()], false)
        .await
        .unwrap();

    assert_eq!(outcome.total(), 0);
}
