use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::duplicates::DuplicateMap;
use crate::errors::XliffError;
use crate::xliff::unit::{StrategyStats, TranslationUnit, UnitHandle};

// @module: XLIFF document parsing and reconstruction

// @const: Default languages when the file element omits the attributes
const DEFAULT_SOURCE_LANGUAGE: &str = "es";
const DEFAULT_TARGET_LANGUAGE: &str = "en";

/// Span of a target element in the event stream (start and end event index)
#[derive(Debug, Clone, Copy)]
struct TargetSpan {
    start: usize,
    end: usize,
}

/// Translation waiting to be written into a target slot at save time
#[derive(Debug, Clone)]
struct PendingTarget {
    text: String,
    via_duplicate: bool,
}

/// Geometry of one trans-unit inside the event stream.
///
/// Event indices stay valid for the lifetime of the document because the
/// stream is never spliced; mutations are applied during serialization.
#[derive(Debug)]
struct UnitSlot {
    id: String,
    /// Index of the `</source>` event, the insertion anchor for a new target
    source_end: usize,
    /// Existing target element, if the export already carried one
    target: Option<TargetSpan>,
    /// Original target start tag, kept so unrelated attributes survive rewrite
    target_start: Option<BytesStart<'static>>,
    has_cdata: bool,
    pending: Option<PendingTarget>,
}

/// Everything pulled out of one trans-unit subtree during extraction
struct ExtractedUnit {
    id: String,
    resname: String,
    source: String,
    has_cdata: bool,
    source_end: usize,
    target: Option<TargetSpan>,
    target_start: Option<BytesStart<'static>>,
    extradata: HashMap<String, String>,
}

/// Counts reported by [`XliffDocument::insert_translations`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertionReport {
    /// Units whose translation came straight from the mapping
    pub applied: usize,
    /// Units filled by duplicate-group propagation
    pub propagated: usize,
}

/// An XLIFF 1.2 document loaded for translation.
///
/// The file is kept as the verbatim event stream produced by quick-xml; every
/// region that is not a rewritten target slot round-trips byte-identically.
pub struct XliffDocument {
    source_path: PathBuf,
    events: Vec<Event<'static>>,
    slots: Vec<UnitSlot>,
    units: Vec<TranslationUnit>,
    index_by_id: HashMap<String, usize>,
    duplicate_map: DuplicateMap,
    pub source_language: String,
    pub target_language: String,
    target_state: String,
    remove_state_qualifier: bool,
}

impl XliffDocument {
    /// Load and parse an XLIFF file.
    ///
    /// Fails with [`XliffError::NotFound`] if the path does not exist and
    /// [`XliffError::Malformed`] / [`XliffError::MissingFileElement`] if the
    /// XML cannot be parsed or lacks the expected root structure.
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self, XliffError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(XliffError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let mut doc = Self::parse_str(&content)?;
        doc.source_path = path.to_path_buf();
        Ok(doc)
    }

    /// Parse an XLIFF document from a string.
    pub fn parse_str(content: &str) -> Result<Self, XliffError> {
        let events = read_events(content)?;

        let mut doc = XliffDocument {
            source_path: PathBuf::new(),
            events,
            slots: Vec::new(),
            units: Vec::new(),
            index_by_id: HashMap::new(),
            duplicate_map: DuplicateMap::new(),
            source_language: DEFAULT_SOURCE_LANGUAGE.to_string(),
            target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
            target_state: "translated".to_string(),
            remove_state_qualifier: true,
        };

        doc.extract()?;
        Ok(doc)
    }

    /// Configure how target slots are rewritten on insertion.
    pub fn with_insertion_config(mut self, target_state: &str, remove_state_qualifier: bool) -> Self {
        self.target_state = target_state.to_string();
        self.remove_state_qualifier = remove_state_qualifier;
        self
    }

    /// Walk the event stream and extract every trans-unit with non-empty source.
    fn extract(&mut self) -> Result<(), XliffError> {
        let mut seen_file = false;
        let mut i = 0;

        while i < self.events.len() {
            match &self.events[i] {
                Event::Start(e) | Event::Empty(e) if local_name_is(e, b"file") => {
                    if !seen_file {
                        seen_file = true;
                        if let Some(lang) = attribute_value(e, b"source-language")? {
                            if !lang.is_empty() {
                                self.source_language = lang;
                            }
                        }
                        if let Some(lang) = attribute_value(e, b"target-language")? {
                            if !lang.is_empty() {
                                self.target_language = lang;
                            }
                        }
                    }
                    i += 1;
                }
                Event::Start(e) if local_name_is(e, b"trans-unit") => {
                    let (extracted, next) = parse_trans_unit(&self.events, e, i)?;
                    if let Some(extracted) = extracted {
                        let handle = UnitHandle(self.slots.len());
                        let mut unit = TranslationUnit::new(
                            extracted.id.clone(),
                            extracted.source,
                            extracted.has_cdata,
                            handle,
                        );
                        unit.resname = extracted.resname;
                        unit.purpose = extracted.extradata.get("purpose").cloned().unwrap_or_default();
                        unit.group = extracted.extradata.get("group").cloned().unwrap_or_default();
                        unit.extradata = extracted.extradata;

                        self.slots.push(UnitSlot {
                            id: extracted.id.clone(),
                            source_end: extracted.source_end,
                            target: extracted.target,
                            target_start: extracted.target_start,
                            has_cdata: extracted.has_cdata,
                            pending: None,
                        });
                        self.index_by_id.insert(extracted.id, self.units.len());
                        self.units.push(unit);
                    }
                    i = next;
                }
                _ => i += 1,
            }
        }

        if !seen_file {
            return Err(XliffError::MissingFileElement);
        }

        Ok(())
    }

    /// All extracted units, in document order.
    pub fn units(&self) -> &[TranslationUnit] {
        &self.units
    }

    /// Mutable access for the classification and duplicate-detection passes.
    pub fn units_mut(&mut self) -> &mut [TranslationUnit] {
        &mut self.units
    }

    /// Look up a unit by id.
    pub fn unit(&self, id: &str) -> Option<&TranslationUnit> {
        self.index_by_id.get(id).map(|idx| &self.units[*idx])
    }

    /// Record the duplicate groups detected for this document.
    pub fn set_duplicate_groups(&mut self, map: DuplicateMap) {
        self.duplicate_map = map;
    }

    /// Duplicate groups: representative id mapped to ordered member ids.
    pub fn duplicate_groups(&self) -> &DuplicateMap {
        &self.duplicate_map
    }

    /// Per-strategy unit counts after classification.
    pub fn stats_by_strategy(&self) -> StrategyStats {
        let mut stats = StrategyStats::default();
        for unit in &self.units {
            if let Some(strategy) = unit.strategy {
                stats.count(strategy);
            }
        }
        stats
    }

    /// Insert translated text for every unit id present in the mapping and
    /// propagate each representative's text to the rest of its duplicate group.
    ///
    /// Units absent from the mapping are left untouched; their source region
    /// is never mutated.
    pub fn insert_translations(&mut self, translations: &HashMap<String, String>) -> InsertionReport {
        let mut report = InsertionReport::default();

        for idx in 0..self.units.len() {
            let unit_id = self.units[idx].id.clone();
            let Some(text) = translations.get(&unit_id) else {
                continue;
            };

            self.stage_translation(idx, text.clone(), false);
            report.applied += 1;

            // Propagation happens immediately after the representative, not in
            // a deferred pass.
            if let Some(members) = self.duplicate_map.get(&unit_id).cloned() {
                for member_id in members {
                    if member_id == unit_id {
                        continue;
                    }
                    let Some(&member_idx) = self.index_by_id.get(&member_id) else {
                        continue;
                    };
                    self.stage_translation(member_idx, text.clone(), true);
                    report.propagated += 1;
                }
            }
        }

        report
    }

    fn stage_translation(&mut self, unit_idx: usize, text: String, via_duplicate: bool) {
        let slot_idx = self.units[unit_idx].handle.0;
        let slot = &mut self.slots[slot_idx];

        if via_duplicate {
            debug!("Unit {}: translation propagated from duplicate group", slot.id);
        }

        slot.pending = Some(PendingTarget { text, via_duplicate });
    }

    /// Number of staged targets that came from duplicate propagation.
    pub fn propagated_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.pending.as_ref().is_some_and(|p| p.via_duplicate))
            .count()
    }

    /// Serialize the document to a string, applying staged target rewrites.
    pub fn to_xml(&self) -> Result<String, XliffError> {
        let mut replace_at: HashMap<usize, (usize, usize)> = HashMap::new();
        let mut insert_after: HashMap<usize, usize> = HashMap::new();

        for (slot_idx, slot) in self.slots.iter().enumerate() {
            if slot.pending.is_none() {
                continue;
            }
            match slot.target {
                Some(span) => {
                    replace_at.insert(span.start, (slot_idx, span.end));
                }
                None => {
                    // No target slot yet: create one immediately following the
                    // source element in document order.
                    insert_after.insert(slot.source_end, slot_idx);
                }
            }
        }

        let mut writer = Writer::new(Vec::new());
        let mut i = 0;
        while i < self.events.len() {
            if let Some(&(slot_idx, span_end)) = replace_at.get(&i) {
                self.write_target(&mut writer, &self.slots[slot_idx])?;
                i = span_end + 1;
                continue;
            }

            writer
                .write_event(self.events[i].clone())
                .map_err(|e| XliffError::Malformed(e.to_string()))?;

            if let Some(&slot_idx) = insert_after.get(&i) {
                self.write_target(&mut writer, &self.slots[slot_idx])?;
            }

            i += 1;
        }

        String::from_utf8(writer.into_inner())
            .map_err(|e| XliffError::Malformed(format!("serialized document is not UTF-8: {e}")))
    }

    /// Write a rewritten target element for one slot.
    fn write_target(&self, writer: &mut Writer<Vec<u8>>, slot: &UnitSlot) -> Result<(), XliffError> {
        let Some(pending) = slot.pending.as_ref() else {
            return Ok(());
        };

        let mut start = BytesStart::new("target");
        if let Some(original) = &slot.target_start {
            for attr in original.attributes().flatten() {
                let key = attr.key.as_ref();
                if key == b"state" {
                    continue;
                }
                if self.remove_state_qualifier && key == b"state-qualifier" {
                    continue;
                }
                start.push_attribute(attr);
            }
        }
        start.push_attribute(("state", self.target_state.as_str()));

        writer
            .write_event(Event::Start(start))
            .map_err(|e| XliffError::Malformed(e.to_string()))?;

        // The unit's original content encoding is preserved: CDATA sources get
        // CDATA targets, plain text gets escaped text.
        if slot.has_cdata {
            writer
                .write_event(Event::CData(BytesCData::new(pending.text.as_str())))
                .map_err(|e| XliffError::Malformed(e.to_string()))?;
        } else {
            writer
                .write_event(Event::Text(BytesText::new(pending.text.as_str())))
                .map_err(|e| XliffError::Malformed(e.to_string()))?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("target")))
            .map_err(|e| XliffError::Malformed(e.to_string()))?;

        Ok(())
    }

    /// Serialize the full document to disk, creating intermediate directories.
    pub fn save<P: AsRef<Path>>(&self, output_path: P) -> Result<(), XliffError> {
        let output_path = output_path.as_ref();
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let xml = self.to_xml()?;
        fs::write(output_path, xml)?;

        debug!("Saved XLIFF document to {:?}", output_path);
        Ok(())
    }

    /// Path the document was loaded from (empty when parsed from a string).
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }
}

/// Collect the whole event stream into owned events.
fn read_events(content: &str) -> Result<Vec<Event<'static>>, XliffError> {
    let mut reader = Reader::from_str(content);
    let mut events = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(event) => events.push(event.into_owned()),
            Err(e) => return Err(XliffError::Malformed(e.to_string())),
        }
    }

    Ok(events)
}

fn local_name_is(e: &BytesStart<'_>, name: &[u8]) -> bool {
    e.local_name().as_ref() == name
}

/// Read an attribute value from a start tag, unescaping entities.
fn attribute_value(e: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>, XliffError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| XliffError::Malformed(e.to_string()))?;
        if attr.key.local_name().as_ref() == name {
            let value = attr
                .unescape_value()
                .map_err(|e| XliffError::Malformed(e.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Parse one trans-unit subtree starting at its Start event.
/// Returns the extracted unit (None when the source is missing or empty) and
/// the index just past the closing `</trans-unit>` event.
fn parse_trans_unit(
    events: &[Event<'static>],
    start: &BytesStart<'_>,
    start_idx: usize,
) -> Result<(Option<ExtractedUnit>, usize), XliffError> {
    let unit_id = attribute_value(start, b"id")?.unwrap_or_default();
    let resname = attribute_value(start, b"resname")?.unwrap_or_default();

    let mut depth = 0usize;
    let mut source: Option<(String, bool, usize)> = None;
    let mut target: Option<(TargetSpan, BytesStart<'static>)> = None;
    let mut extradata: HashMap<String, String> = HashMap::new();

    let mut j = start_idx + 1;
    loop {
        let Some(event) = events.get(j) else {
            return Err(XliffError::Malformed(format!(
                "unterminated trans-unit '{unit_id}'"
            )));
        };

        match event {
            Event::Start(e) if depth == 0 && local_name_is(e, b"source") && source.is_none() => {
                let (text, has_cdata, end_idx) = read_mixed_content(events, j)?;
                source = Some((text, has_cdata, end_idx));
                j = end_idx + 1;
            }
            Event::Start(e) if depth == 0 && local_name_is(e, b"target") && target.is_none() => {
                let end_idx = find_matching_end(events, j)?;
                target = Some((TargetSpan { start: j, end: end_idx }, e.clone().into_owned()));
                j = end_idx + 1;
            }
            Event::Empty(e) if depth == 0 && local_name_is(e, b"target") && target.is_none() => {
                target = Some((TargetSpan { start: j, end: j }, e.clone().into_owned()));
                j += 1;
            }
            Event::Start(e) if depth == 0 && local_name_is(e, b"extradata") => {
                let key = attribute_value(e, b"key")?.unwrap_or_default();
                let (value, _, end_idx) = read_mixed_content(events, j)?;
                merge_extradata(&mut extradata, &key, &value);
                j = end_idx + 1;
            }
            Event::Empty(e) if depth == 0 && local_name_is(e, b"extradata") => {
                let key = attribute_value(e, b"key")?.unwrap_or_default();
                merge_extradata(&mut extradata, &key, "");
                j += 1;
            }
            Event::Start(_) => {
                depth += 1;
                j += 1;
            }
            Event::End(_) if depth == 0 => break,
            Event::End(_) => {
                depth -= 1;
                j += 1;
            }
            _ => j += 1,
        }
    }

    let Some((text, has_cdata, source_end)) = source else {
        warn!("No source found for unit: {}", unit_id);
        return Ok((None, j + 1));
    };

    // Empty-source units are dropped at extraction time
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok((None, j + 1));
    }

    let (target_span, target_start) = match target {
        Some((span, start_tag)) => (Some(span), Some(start_tag)),
        None => (None, None),
    };

    Ok((
        Some(ExtractedUnit {
            id: unit_id,
            resname,
            source: trimmed.to_string(),
            has_cdata,
            source_end,
            target: target_span,
            target_start,
            extradata,
        }),
        j + 1,
    ))
}

/// Reconstruct the text of an element with mixed content, starting at its
/// Start event. CDATA children contribute raw character data, text nodes are
/// unescaped, and element children are re-serialized verbatim so inline HTML
/// survives. Returns (text, had_cdata, index of the End event).
fn read_mixed_content(
    events: &[Event<'static>],
    start_idx: usize,
) -> Result<(String, bool, usize), XliffError> {
    let mut text = String::new();
    let mut has_cdata = false;
    let mut depth = 0usize;
    let mut markup: Option<Writer<Vec<u8>>> = None;

    let mut j = start_idx + 1;
    loop {
        let Some(event) = events.get(j) else {
            return Err(XliffError::Malformed("unterminated element".to_string()));
        };

        match event {
            Event::Start(_) => {
                depth += 1;
                markup
                    .get_or_insert_with(|| Writer::new(Vec::new()))
                    .write_event(event.clone())
                    .map_err(|e| XliffError::Malformed(e.to_string()))?;
            }
            Event::End(_) if depth == 0 => {
                return Ok((text, has_cdata, j));
            }
            Event::End(_) => {
                depth -= 1;
                let writer = markup
                    .as_mut()
                    .ok_or_else(|| XliffError::Malformed("unbalanced element content".to_string()))?;
                writer
                    .write_event(event.clone())
                    .map_err(|e| XliffError::Malformed(e.to_string()))?;
                if depth == 0 {
                    if let Some(finished) = markup.take() {
                        text.push_str(&String::from_utf8_lossy(&finished.into_inner()));
                    }
                }
            }
            Event::Text(t) if depth == 0 => {
                let value = t
                    .unescape()
                    .map_err(|e| XliffError::Malformed(e.to_string()))?;
                text.push_str(&value);
            }
            Event::CData(c) if depth == 0 => {
                has_cdata = true;
                text.push_str(&String::from_utf8_lossy(c.as_ref()));
            }
            Event::Empty(_) | Event::Comment(_) if depth == 0 => {
                // Standalone inline element or comment, serialized verbatim
                let mut one_shot = Writer::new(Vec::new());
                one_shot
                    .write_event(event.clone())
                    .map_err(|e| XliffError::Malformed(e.to_string()))?;
                text.push_str(&String::from_utf8_lossy(&one_shot.into_inner()));
            }
            _ if depth > 0 => {
                if let Some(writer) = markup.as_mut() {
                    writer
                        .write_event(event.clone())
                        .map_err(|e| XliffError::Malformed(e.to_string()))?;
                }
            }
            _ => {}
        }

        j += 1;
    }
}

/// Find the End event matching the Start event at `start_idx`.
fn find_matching_end(events: &[Event<'static>], start_idx: usize) -> Result<usize, XliffError> {
    let mut depth = 0usize;
    let mut j = start_idx + 1;
    loop {
        let Some(event) = events.get(j) else {
            return Err(XliffError::Malformed("unterminated element".to_string()));
        };
        match event {
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => return Ok(j),
            Event::End(_) => depth -= 1,
            _ => {}
        }
        j += 1;
    }
}

/// Merge one extradata entry into the flat metadata map.
///
/// WPML nests a JSON object under the "extradata" key; it is parsed and
/// flattened one level, with values stringified.
fn merge_extradata(map: &mut HashMap<String, String>, key: &str, value: &str) {
    if key == "extradata" && value.trim_start().starts_with('{') {
        if let Ok(serde_json::Value::Object(object)) = serde_json::from_str(value) {
            for (nested_key, nested_value) in object {
                let rendered = match nested_value {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                map.insert(nested_key, rendered);
            }
            return;
        }
    }
    map.insert(key.to_string(), value.to_string());
}
