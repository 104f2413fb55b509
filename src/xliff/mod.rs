/*!
 * XLIFF 1.2 document model.
 *
 * Parsing, unit extraction and translation insertion for WPML-flavoured
 * XLIFF exports. The document keeps the original XML event stream verbatim
 * so untouched regions round-trip byte-identically.
 */

pub mod document;
pub mod unit;

pub use document::{InsertionReport, XliffDocument};
pub use unit::{
    ClassificationSource, StrategyStats, TranslationStrategy, TranslationUnit, UnitHandle,
};
