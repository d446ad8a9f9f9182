//! In-memory and byte-encoded signatures produced by the chain tree.

use crate::address::Address;
use crate::errors::Error;
use crate::wotsp;
use sha2::{Digest, Sha256};

#[cfg(feature = "serde_enabled")]
use serde::{Deserialize, Serialize};

/// Minimum byte size of an encoded signature: the W-OTS+ signature followed
/// by the public seed. Child public key hashes, if any, follow in 32-byte
/// records.
pub const MIN_SIG_BYTES: usize = wotsp::SIG_LEN + 32;

/// A signature created by a chain tree node.
///
/// The actual W-OTS+ signature covers the chained message
/// `H(message || child hashes...)`, binding the commitments to the child
/// public keys into the signature itself. A signature created by a one-time
/// tree carries no child hashes, so its chained message is `H(message)`.
///
/// The message is not part of the byte encoding; it travels out-of-band and
/// is supplied again on decoding.
#[cfg_attr(feature = "serde_enabled", serde_with::serde_as)]
#[cfg_attr(feature = "serde_enabled", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    #[cfg_attr(feature = "serde_enabled", serde_as(as = "serde_with::Bytes"))]
    sig_bytes: [u8; wotsp::SIG_LEN],
    pub_seed: [u8; 32],
    message: Vec<u8>,
    child_hashes: Vec<[u8; 32]>,
}

impl Signature {
    pub(crate) fn new(
        sig_bytes: [u8; wotsp::SIG_LEN],
        pub_seed: [u8; 32],
        message: Vec<u8>,
        child_hashes: Vec<[u8; 32]>,
    ) -> Self {
        Signature {
            sig_bytes,
            pub_seed,
            message,
            child_hashes,
        }
    }

    /// Decode a signature from its byte representation. The message is not
    /// part of the encoding and is supplied separately by the caller.
    ///
    /// # Errors
    /// The function fails with [`Error::InvalidSignatureEncoding`] if `bytes`
    /// is shorter than the minimum encoding, or if the child hash section is
    /// not a multiple of 32 bytes.
    pub fn from_bytes(bytes: &[u8], msg: &[u8]) -> Result<Self, Error> {
        if bytes.len() < MIN_SIG_BYTES || (bytes.len() - MIN_SIG_BYTES) % 32 != 0 {
            return Err(Error::InvalidSignatureEncoding(bytes.len()));
        }

        let mut sig_bytes = [0u8; wotsp::SIG_LEN];
        sig_bytes.copy_from_slice(&bytes[..wotsp::SIG_LEN]);

        let mut pub_seed = [0u8; 32];
        pub_seed.copy_from_slice(&bytes[wotsp::SIG_LEN..MIN_SIG_BYTES]);

        let child_hashes = bytes[MIN_SIG_BYTES..]
            .chunks_exact(32)
            .map(|chunk| {
                let mut hash = [0u8; 32];
                hash.copy_from_slice(chunk);
                hash
            })
            .collect();

        Ok(Signature {
            sig_bytes,
            pub_seed,
            message: msg.to_vec(),
            child_hashes,
        })
    }

    /// Encode the signature as
    /// `( sig_bytes || pub_seed || child hash... )`. The message is not part
    /// of the encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(MIN_SIG_BYTES + self.child_hashes.len() * 32);
        out.extend_from_slice(&self.sig_bytes);
        out.extend_from_slice(&self.pub_seed);
        for hash in &self.child_hashes {
            out.extend_from_slice(hash);
        }

        out
    }

    /// Recompute the W-OTS+ public key of the node that created this
    /// signature. Verification succeeds when the result equals the expected
    /// public key, or when its SHA-256 hash is among the child hashes of the
    /// parent signature.
    ///
    /// # Errors
    /// The function fails with [`Error::SignatureMessageMissing`] when the
    /// message was never set.
    pub fn public_key(&self) -> Result<[u8; wotsp::PUB_KEY_LEN], Error> {
        if self.message.is_empty() {
            return Err(Error::SignatureMessageMissing);
        }

        let mut hash = Sha256::new();
        hash.update(&self.message);
        for child in &self.child_hashes {
            hash.update(child);
        }
        let chained: [u8; 32] = hash.finalize().into();

        Ok(wotsp::pk_from_sig(
            &self.sig_bytes,
            &chained,
            &self.pub_seed,
            Address::default(),
        ))
    }

    /// Return the raw W-OTS+ signature bytes.
    pub fn sig_bytes(&self) -> &[u8; wotsp::SIG_LEN] {
        &self.sig_bytes
    }

    /// Return the public seed of the node that created this signature.
    pub fn pub_seed(&self) -> &[u8; 32] {
        &self.pub_seed
    }

    /// Return the original (un-chained) message, empty when unset.
    pub fn message(&self) -> &[u8] {
        &self.message
    }

    /// Return the commitments to the child public keys, in the order the
    /// children were appended to the tree.
    pub fn child_hashes(&self) -> &[[u8; 32]] {
        &self.child_hashes
    }
}


#[cfg(all(test, feature = "serde_enabled"))]
mod test_serde {
    use super::*;

    #[test]
    fn serde_round_trip() {
        let sig = Signature::new(
            [0x5a; wotsp::SIG_LEN],
            [0x21; 32],
            b"a message".to_vec(),
            vec![[1u8; 32], [2u8; 32]],
        );

        let json = serde_json::to_string(&sig).unwrap();
        let deser: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(sig, deser);
    }
}
