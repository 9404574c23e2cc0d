// ID Provider Port (pluggable ID-generation policy)
//
// The engine only requires global uniqueness; it does not depend on the ID
// format or length.

use rand::Rng;

/// ID provider interface (allows deterministic IDs in tests)
pub trait IdProvider: Send + Sync {
    /// Generate a new unique ID
    fn generate_id(&self) -> String;
}

/// UUID v4 provider
pub struct UuidProvider;

impl IdProvider for UuidProvider {
    fn generate_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Short alphabet-constrained ID provider (production default)
///
/// Generates fixed-length IDs from a restricted alphabet so they stay
/// readable over the phone and in SMS.
pub struct ShortIdProvider {
    alphabet: &'static [u8],
    length: usize,
}

const QUEUE_ID_ALPHABET: &[u8] = b"LGXHFKPDS1234567890";
const ENTRY_ID_ALPHABET: &[u8] = b"ADFPHSMR1234567890";

impl ShortIdProvider {
    /// Provider for queue IDs (length 6)
    pub fn for_queues() -> Self {
        Self {
            alphabet: QUEUE_ID_ALPHABET,
            length: 6,
        }
    }

    /// Provider for entry IDs (length 8)
    pub fn for_entries() -> Self {
        Self {
            alphabet: ENTRY_ID_ALPHABET,
            length: 8,
        }
    }
}

impl IdProvider for ShortIdProvider {
    fn generate_id(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| self.alphabet[rng.gen_range(0..self.alphabet.len())] as char)
            .collect()
    }
}
