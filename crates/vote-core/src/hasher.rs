use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// SHA-256 over the plain concatenation of `parts`, lowercase hex.
pub fn digest(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Digest of a raw voter identifier. The ledger and registry only ever see this,
/// never the identifier itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of_voter(voter_id: &str) -> Self {
        Self(digest(&[voter_id]))
    }

    /// Wraps an already computed digest, e.g. one read back from a mirror file.
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::HASH_HEX_SIZE;

    #[test]
    fn digest_known_vector() {
        // sha256("abc")
        assert_eq!(
            digest(&["abc"]),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn digest_is_plain_concatenation() {
        assert_eq!(digest(&["a", "bc"]), digest(&["abc"]));
        assert_eq!(digest(&["ab", "", "c"]), digest(&["abc"]));
    }

    #[test]
    fn digest_of_empty_input() {
        assert_eq!(
            digest(&[]),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn fingerprint_is_fixed_length_hex() {
        let fp = Fingerprint::of_voter("alice");
        assert_eq!(fp.as_str().len(), HASH_HEX_SIZE);
        assert!(fp.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(fp, Fingerprint::of_voter("alice"));
        assert_ne!(fp, Fingerprint::of_voter("bob"));
    }

    #[test]
    fn fingerprint_serializes_as_plain_string() {
        let fp = Fingerprint::from_hex("00ff");
        assert_eq!(serde_json::to_string(&fp).unwrap(), r#""00ff""#);
    }
}
