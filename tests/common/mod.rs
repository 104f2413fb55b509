/*!
 * Common test utilities for the xliffwai test suite
 */

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tempfile::TempDir;

/// WPML-style XLIFF export used across the suite.
///
/// Units 10 and 11 share the same source text (duplicate pair), unit 42 is a
/// tagged URL carrying a pre-filled target, unit 50 is SEO metadata, unit 60
/// has no tag but matches the email rule, and unit 70 has an empty source.
pub const SAMPLE_XLIFF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff xmlns="urn:oasis:names:tc:xliff:document:1.2" version="1.2">
  <file original="page-42" source-language="es" target-language="en" datatype="plaintext">
    <header></header>
    <body>
      <trans-unit id="10" resname="Paragraph">
        <source><![CDATA[Ven a la playa]]></source>
        <extradata key="extradata">{"unit":"Paragraph","purpose":"body","group":"Content"}</extradata>
      </trans-unit>
      <trans-unit id="11" resname="Paragraph">
        <source><![CDATA[Ven a la playa]]></source>
      </trans-unit>
      <trans-unit id="42" resname="URL">
        <source>https://nestshostels.com/duque</source>
        <target state="needs-translation" state-qualifier="mt-suggestion">stale</target>
      </trans-unit>
      <trans-unit id="50" resname="Meta Description">
        <source>El mejor hostal de Tenerife</source>
      </trans-unit>
      <trans-unit id="60">
        <source>duquenesthostel@gmail.com</source>
      </trans-unit>
      <trans-unit id="70" resname="Paragraph">
        <source>   </source>
      </trans-unit>
    </body>
  </file>
</xliff>
"#;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Writes the sample XLIFF export under the given name
pub fn create_sample_xliff(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_XLIFF)
}
