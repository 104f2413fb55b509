/*!
 * # xliffwai - XLIFF Brand-Voice Translator
 *
 * A Rust library for translating WPML XLIFF 1.2 exports with AI while keeping
 * a consistent brand voice.
 *
 * ## Features
 *
 * - Parse WPML XLIFF exports with byte-level round-trip fidelity
 * - Classify units into brand-voice, metadata (SEO) and non-translatable content
 * - Translate once per distinct source string, propagating to duplicates
 * - Protect glossary terms (brand names, places) in translated output
 * - Fall back to the original text when a provider call fails
 * - Batch processing with a resumable progress ledger
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `xliff`: XLIFF document parsing and reconstruction:
 *   - `xliff::document`: Event-stream document engine
 *   - `xliff::unit`: Translation unit model
 * - `duplicates`: Duplicate source detection
 * - `classification`: Content-type classifier and non-translatable rules
 * - `glossary`: Glossary term protection
 * - `translation`: AI-powered translation services:
 *   - `translation::core`: Core translation service
 *   - `translation::prompts`: Prompt templates per language
 *   - `translation::cache`: Per-session translation cache
 * - `providers`: Client implementations for LLM providers:
 *   - `providers::openai`: OpenAI API client
 *   - `providers::anthropic`: Anthropic API client
 *   - `providers::mock`: Deterministic provider for tests
 * - `file_utils`: File system operations
 * - `batch`: Folder-level batch processing
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod batch;
pub mod classification;
pub mod duplicates;
pub mod errors;
pub mod file_utils;
pub mod glossary;
pub mod providers;
pub mod translation;
pub mod xliff;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use batch::{BatchOutcome, BatchProcessor};
pub use duplicates::{DuplicateDetector, DuplicateMap};
pub use errors::{AppError, ProviderError, TranslationError, XliffError};
pub use glossary::{Glossary, TermProtector};
pub use translation::TranslationService;
pub use xliff::{TranslationStrategy, TranslationUnit, XliffDocument};
