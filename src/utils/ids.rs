//! Batch operation identifier generation

use rand::Rng;

const SUFFIX_LEN: usize = 6;
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a batch operation id: `batch_<kind>_<unix-millis>_<suffix>`.
///
/// Uniqueness is best-effort (millisecond timestamp plus a random base36
/// suffix); the registry never assumes ids are globally unique, only that
/// collisions within one process lifetime are vanishingly unlikely.
pub fn operation_id(kind: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    format!("batch_{}_{}_{}", kind, millis, random_suffix(SUFFIX_LEN))
}

fn random_suffix(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
