//! Domain-separated BLAKE3 hashing for the tessera protocol.
//!
//! Share commitments and coin identifiers use BLAKE3's key derivation mode
//! with registered context strings, so a commitment can never collide with a
//! plain content hash of the same bytes.
//!
//! ## Modes
//!
//! - [`hash`] — Pure hashing
//! - [`derive_key`] — Context-bound derivation (commitments, guids)

/// Registered BLAKE3 context strings.
/// Using an unregistered context string is a protocol violation.
pub mod contexts {
    pub const SHARE_COMMITMENT: &str = "Tessera v1 share-commitment";
    pub const COIN_GUID: &str = "Tessera v1 coin-guid";

    /// All registered context strings. Used for validation.
    pub const ALL_CONTEXTS: &[&str] = &[SHARE_COMMITMENT, COIN_GUID];
}

/// Length in bytes of every digest produced by this module.
pub const DIGEST_LEN: usize = 32;

/// Compute BLAKE3 hash of the input data.
pub fn hash(data: &[u8]) -> [u8; DIGEST_LEN] {
    *::blake3::hash(data).as_bytes()
}

/// Derive a key using BLAKE3's built-in key derivation mode.
///
/// # Arguments
///
/// * `context` - A registered context string (must start with "Tessera v1 ")
/// * `key_material` - The input key material
pub fn derive_key(context: &str, key_material: &[u8]) -> [u8; DIGEST_LEN] {
    let mut hasher = ::blake3::Hasher::new_derive_key(context);
    hasher.update(key_material);
    *hasher.finalize().as_bytes()
}

/// Verify that a context string is registered in the tessera protocol.
pub fn is_registered_context(context: &str) -> bool {
    contexts::ALL_CONTEXTS.contains(&context)
}

/// Commit to a secret share preimage.
///
/// `commitment = BLAKE3::derive_key("Tessera v1 share-commitment", preimage)`
pub fn commit(preimage: &[u8]) -> [u8; DIGEST_LEN] {
    derive_key(contexts::SHARE_COMMITMENT, preimage)
}

/// Check a preimage against a stored commitment.
pub fn verify_commitment(preimage: &[u8], commitment: &[u8; DIGEST_LEN]) -> bool {
    &commit(preimage) == commitment
}

/// Derive a coin guid from fresh random seed material.
pub fn derive_guid(seed: &[u8]) -> [u8; 16] {
    let digest = derive_key(contexts::COIN_GUID, seed);
    let mut guid = [0u8; 16];
    guid.copy_from_slice(&digest[..16]);
    guid
}
