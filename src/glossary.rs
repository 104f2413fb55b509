/*!
 * Glossary term protection.
 *
 * Brand names, place names and product terms must survive translation
 * letter-for-letter. The model occasionally "fixes" their casing or spelling;
 * this pass restores the canonical form in the translated text for every
 * glossary term that appeared in the original source.
 */

use std::collections::BTreeMap;

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

// @struct: Glossary organized by category, term -> canonical form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Glossary {
    #[serde(default = "default_categories")]
    pub categories: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for Glossary {
    fn default() -> Self {
        Glossary {
            categories: default_categories(),
        }
    }
}

fn default_categories() -> BTreeMap<String, BTreeMap<String, String>> {
    let identity = |terms: &[&str]| -> BTreeMap<String, String> {
        terms
            .iter()
            .map(|t| (t.to_string(), t.to_string()))
            .collect()
    };

    BTreeMap::from([
        (
            "brand_terms".to_string(),
            identity(&[
                "Nests Hostels",
                "Las Eras Nest",
                "NEST PASS",
                "Duque Nest",
                "Medano Nest",
                "Nests",
                "NestsHostels",
                "nestshostels.com",
                "nestshostels.cloudbeds.com",
            ]),
        ),
        (
            "locations".to_string(),
            identity(&[
                "Costa Adeje",
                "Las Eras",
                "Playa del Duque",
                "Santa Cruz de Tenerife",
                "El Médano",
                "Los Cristianos",
            ]),
        ),
        (
            "technical_terms".to_string(),
            identity(&[
                "WordPress",
                "WPML",
                "Instagram",
                "Facebook",
                "WhatsApp",
                "Google Maps",
                "TripAdvisor",
                "Hostelworld",
            ]),
        ),
    ])
}

struct TermEntry {
    canonical: String,
    matcher: Regex,
}

/// Restores canonical glossary forms in translated text.
///
/// Matchers are compiled once per session; matching is case-insensitive with
/// explicit word-boundary checks. `\b` is avoided on purpose: it misbehaves
/// for terms starting with '+' and for accented characters.
pub struct TermProtector {
    entries: Vec<TermEntry>,
}

impl TermProtector {
    /// Flatten a glossary into a matcher list, longest terms first so that
    /// "Nests Hostels" is enforced before "Nests" touches its substring.
    pub fn new(glossary: &Glossary) -> Result<Self, regex::Error> {
        let mut terms: Vec<(&String, &String)> = glossary
            .categories
            .values()
            .flat_map(|category| category.iter())
            .collect();
        terms.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()).then(a.0.cmp(b.0)));

        let mut entries = Vec::with_capacity(terms.len());
        for (term, canonical) in terms {
            let matcher = Regex::new(&format!("(?i){}", regex::escape(term)))?;
            entries.push(TermEntry {
                canonical: canonical.clone(),
                matcher,
            });
        }

        Ok(TermProtector { entries })
    }

    /// Enforce glossary terms on a candidate translation.
    ///
    /// A term is enforced only when it occurs in the original source text, so
    /// the protector never injects terms the author did not use. Entries are
    /// walked longest-first and each match claims its byte span; a shorter
    /// term overlapping a claimed span is skipped, so "Nests" can never
    /// rewrite the inside of an enforced "Nests Hostels". Returns the
    /// corrected text and the number of corrections made. Idempotent.
    pub fn protect(&self, original: &str, candidate: &str) -> (String, usize) {
        let mut claimed: Vec<(usize, usize, &TermEntry)> = Vec::new();

        for entry in &self.entries {
            if !self.occurs_in(entry, original) {
                continue;
            }
            for m in entry.matcher.find_iter(candidate) {
                if !is_whole_word(candidate, m.start(), m.end()) {
                    continue;
                }
                if claimed.iter().any(|&(s, e, _)| m.start() < e && s < m.end()) {
                    continue;
                }
                claimed.push((m.start(), m.end(), entry));
            }
        }

        claimed.sort_by_key(|&(start, _, _)| start);

        let mut corrections = 0;
        let mut result = String::with_capacity(candidate.len());
        let mut last = 0;
        for (start, end, entry) in claimed {
            result.push_str(&candidate[last..start]);
            if candidate[start..end] != entry.canonical {
                corrections += 1;
            }
            result.push_str(&entry.canonical);
            last = end;
        }
        result.push_str(&candidate[last..]);

        if corrections > 0 {
            debug!("Glossary pass made {} corrections", corrections);
        }

        (result, corrections)
    }

    /// Number of terms the protector watches
    pub fn term_count(&self) -> usize {
        self.entries.len()
    }

    fn occurs_in(&self, entry: &TermEntry, text: &str) -> bool {
        entry
            .matcher
            .find_iter(text)
            .any(|m| is_whole_word(text, m.start(), m.end()))
    }
}

/// A match is a whole word when its neighbors are absent or non-alphanumeric.
fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .is_none_or(|c| !c.is_alphanumeric());
    let after_ok = text[end..]
        .chars()
        .next()
        .is_none_or(|c| !c.is_alphanumeric());
    before_ok && after_ok
}
