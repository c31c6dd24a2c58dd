//! Suspect index: which suspect a clue points to
//!
//! A fixed-size hash table with separate chaining. New entries go to the head
//! of their bucket's chain, so a later insert for the same clue shadows the
//! earlier one on lookup without removing it.

use tracing::debug;

/// Number of buckets in the index
pub const TABLE_SIZE: usize = 10;

/// One link of a bucket chain
#[derive(Debug)]
struct IndexEntry {
    clue: String,
    suspect: String,
    next: Option<Box<IndexEntry>>,
}

/// Hash table mapping clue text to the suspect it implicates
#[derive(Debug)]
pub struct SuspectIndex {
    buckets: Vec<Option<Box<IndexEntry>>>,
    len: usize,
}

/// Bucket for a piece of text: the sum of its bytes modulo [`TABLE_SIZE`].
///
/// Defined for every string; the empty string lands in bucket 0.
pub fn hash(text: &str) -> usize {
    let sum = text
        .bytes()
        .fold(0usize, |acc, byte| acc.wrapping_add(byte as usize));
    sum % TABLE_SIZE
}

impl SuspectIndex {
    pub fn new() -> Self {
        Self {
            buckets: (0..TABLE_SIZE).map(|_| None).collect(),
            len: 0,
        }
    }

    /// Register a clue as pointing at a suspect.
    ///
    /// There is no uniqueness check: inserting the same clue again prepends a
    /// second entry that wins on lookup.
    pub fn insert(&mut self, clue: &str, suspect: &str) {
        let bucket = hash(clue);
        let head = self.buckets[bucket].take();
        self.buckets[bucket] = Some(Box::new(IndexEntry {
            clue: clue.to_string(),
            suspect: suspect.to_string(),
            next: head,
        }));
        self.len += 1;
        debug!(bucket, clue, suspect, "clue registered in suspect index");
    }

    /// Find the suspect a clue points to.
    ///
    /// Matching is exact and case-sensitive. `None` means the clue was never
    /// registered.
    pub fn lookup(&self, clue: &str) -> Option<&str> {
        let mut cursor = self.buckets[hash(clue)].as_deref();
        while let Some(entry) = cursor {
            if entry.clue == clue {
                return Some(&entry.suspect);
            }
            cursor = entry.next.as_deref();
        }
        None
    }

    /// Total number of entries across all chains, shadowed ones included
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Length of one bucket's chain (0 for an out-of-range bucket)
    pub fn chain_len(&self, bucket: usize) -> usize {
        let mut count = 0;
        let mut cursor = self.buckets.get(bucket).and_then(|slot| slot.as_deref());
        while let Some(entry) = cursor {
            count += 1;
            cursor = entry.next.as_deref();
        }
        count
    }

    /// Release every entry of every chain. Returns how many were released;
    /// calling it again on an emptied index releases nothing.
    pub fn teardown(&mut self) -> usize {
        let mut released = 0;
        for slot in &mut self.buckets {
            // Unlink one entry at a time so long chains never recurse on drop.
            let mut cursor = slot.take();
            while let Some(mut entry) = cursor {
                cursor = entry.next.take();
                released += 1;
            }
        }
        self.len = 0;
        if released > 0 {
            debug!(released, "suspect index released");
        }
        released
    }
}

impl Default for SuspectIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SuspectIndex {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_byte_sum_modulo_table_size() {
        assert_eq!(hash(""), 0);
        // 'a' + 'b' = 97 + 98 = 195
        assert_eq!(hash("ab"), 5);
        assert_eq!(hash("ab"), hash("ba"));
        assert!(hash("Encontrado um ticket de onibus na lareira.") < TABLE_SIZE);
    }

    #[test]
    fn lookup_returns_registered_suspect() {
        let mut index = SuspectIndex::new();
        index.insert("Uma luva de seda preta no chao.", "Mordomo");
        index.insert("O cofre estava aberto e vazio.", "Empregado");

        assert_eq!(index.lookup("Uma luva de seda preta no chao."), Some("Mordomo"));
        assert_eq!(index.lookup("O cofre estava aberto e vazio."), Some("Empregado"));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn lookup_misses_unregistered_and_case_variants() {
        let mut index = SuspectIndex::new();
        assert_eq!(index.lookup("anything"), None);

        index.insert("Muddy boots", "Chef");
        assert_eq!(index.lookup("muddy boots"), None);
        assert_eq!(index.lookup("Muddy boots "), None);
        assert_eq!(index.lookup(""), None);
    }

    #[test]
    fn colliding_keys_share_a_chain() {
        // 'a' = 97 and 'k' = 107 both land in bucket 7
        let mut index = SuspectIndex::new();
        index.insert("a", "Senhora");
        index.insert("k", "Chef");

        assert_eq!(hash("a"), hash("k"));
        assert_eq!(index.chain_len(7), 2);
        assert_eq!(index.lookup("a"), Some("Senhora"));
        assert_eq!(index.lookup("k"), Some("Chef"));
        assert_eq!(index.chain_len(TABLE_SIZE + 3), 0);
    }

    #[test]
    fn later_insert_shadows_earlier_one() {
        let mut index = SuspectIndex::new();
        index.insert("Torn letter", "Senhora");
        index.insert("Torn letter", "Mordomo");

        assert_eq!(index.lookup("Torn letter"), Some("Mordomo"));
        // The shadowed entry is still stored
        assert_eq!(index.len(), 2);
        assert_eq!(index.chain_len(hash("Torn letter")), 2);
    }

    #[test]
    fn teardown_releases_everything_once() {
        let mut index = SuspectIndex::new();
        index.insert("a", "Senhora");
        index.insert("k", "Chef");
        index.insert("Torn letter", "Mordomo");

        assert_eq!(index.teardown(), 3);
        assert!(index.is_empty());
        assert_eq!(index.lookup("a"), None);
        assert_eq!(index.teardown(), 0);
    }
}
