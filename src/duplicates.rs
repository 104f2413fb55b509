/*!
 * Duplicate source detection.
 *
 * WPML exports repeat identical strings across posts (menu labels, button
 * captions, footer copy). Each distinct source text is translated once; the
 * result is propagated to every other occurrence at insertion time.
 */

use std::collections::{BTreeMap, HashMap};

use log::{debug, info};
use sha2::{Digest, Sha256};

use crate::xliff::TranslationUnit;

/// Representative unit id mapped to the ordered ids of its group,
/// representative first. Groups of size one are not recorded.
pub type DuplicateMap = BTreeMap<String, Vec<String>>;

/// Groups units whose trimmed source text is identical
pub struct DuplicateDetector;

impl DuplicateDetector {
    /// Scan units in document order and mark duplicates in place.
    ///
    /// The first occurrence of each distinct source text becomes the group
    /// representative and is never flagged; every later occurrence gets
    /// `is_duplicate = true` and points at the representative.
    pub fn detect(units: &mut [TranslationUnit]) -> DuplicateMap {
        let mut first_by_fingerprint: HashMap<String, String> = HashMap::new();
        let mut groups: DuplicateMap = DuplicateMap::new();

        for unit in units.iter_mut() {
            let fingerprint = Self::fingerprint(&unit.source);

            match first_by_fingerprint.get(&fingerprint) {
                None => {
                    first_by_fingerprint.insert(fingerprint, unit.id.clone());
                    unit.is_duplicate = false;
                    unit.duplicate_group = None;
                }
                Some(representative) => {
                    unit.is_duplicate = true;
                    unit.duplicate_group = Some(representative.clone());
                    groups
                        .entry(representative.clone())
                        .or_insert_with(|| vec![representative.clone()])
                        .push(unit.id.clone());
                    debug!(
                        "Unit {} is a duplicate of unit {}",
                        unit.id, representative
                    );
                }
            }
        }

        if !groups.is_empty() {
            let members: usize = groups.values().map(|g| g.len() - 1).sum();
            info!(
                "Found {} duplicate groups covering {} repeated units",
                groups.len(),
                members
            );
        }

        groups
    }

    /// Content fingerprint of a source text, whitespace-insensitive at the ends
    fn fingerprint(source: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(source.trim().as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
