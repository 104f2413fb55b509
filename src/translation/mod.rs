/*!
 * Translation service.
 *
 * Routes units to the configured provider with the brand-voice or metadata
 * prompt, rate-limits requests, caches results for the session and falls back
 * to the original text when a provider call fails.
 */

pub mod cache;
pub mod core;
pub mod prompts;

pub use cache::{CacheStats, SessionCache};
pub use core::{TranslationService, TranslationStats};
pub use prompts::PromptLibrary;
