//! Nodes of the Naor-Yung chain tree. Each node owns one W-OTS+ key pair and
//! remembers the transaction that created it along with its confirmation
//! count.

use crate::address::Address;
use crate::errors::Error;
use crate::signature::Signature;
use crate::wotsp;
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Byte size of an encoded node:
/// `( priv_seed || pub_seed || txid || confirms )`.
pub(crate) const NODE_BYTE_LEN: usize = 32 + 32 + 32 + 1;

#[derive(Debug, Zeroize, ZeroizeOnDrop)]
pub(crate) struct NyNode {
    pub(crate) priv_seed: [u8; 32],
    pub(crate) pub_seed: [u8; 32],
    pub(crate) txid: [u8; 32],
    pub(crate) confirms: u8,
}

impl NyNode {
    pub(crate) fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < NODE_BYTE_LEN {
            return Err(Error::InvalidNodeInput(bytes.len()));
        }

        let mut node = NyNode {
            priv_seed: [0u8; 32],
            pub_seed: [0u8; 32],
            txid: [0u8; 32],
            confirms: bytes[96],
        };
        node.priv_seed.copy_from_slice(&bytes[0..32]);
        node.pub_seed.copy_from_slice(&bytes[32..64]);
        node.txid.copy_from_slice(&bytes[64..96]);

        Ok(node)
    }

    pub(crate) fn to_bytes(&self) -> [u8; NODE_BYTE_LEN] {
        let mut out = [0u8; NODE_BYTE_LEN];
        out[0..32].copy_from_slice(&self.priv_seed);
        out[32..64].copy_from_slice(&self.pub_seed);
        out[64..96].copy_from_slice(&self.txid);
        out[96] = self.confirms;

        out
    }

    pub(crate) fn gen_pub_key(&self) -> [u8; wotsp::PUB_KEY_LEN] {
        wotsp::gen_public_key(&self.priv_seed, &self.pub_seed, Address::default())
    }

    pub(crate) fn pub_key_hash(&self) -> [u8; 32] {
        Sha256::digest(&self.gen_pub_key()[..]).into()
    }

    // Generates the child nodes that replace this node once it has signed.
    // Every child draws a fresh key pair from the CSPRNG and starts
    // unconfirmed.
    fn child_nodes<R>(&self, txid: &[u8; 32], branches: u8, rng: &mut R) -> Result<Vec<NyNode>, Error>
    where
        R: CryptoRng + RngCore,
    {
        let mut random = vec![0u8; branches as usize * 64];
        rng.try_fill_bytes(&mut random)?;

        let children = random
            .chunks_exact(64)
            .map(|chunk| {
                let mut child = NyNode {
                    priv_seed: [0u8; 32],
                    pub_seed: [0u8; 32],
                    txid: *txid,
                    confirms: 0,
                };
                child.priv_seed.copy_from_slice(&chunk[..32]);
                child.pub_seed.copy_from_slice(&chunk[32..]);
                child
            })
            .collect();

        random.zeroize();
        Ok(children)
    }

    // Signs the chained message `H(msg || child pkh...)` and returns the
    // signature together with the freshly generated children. In one-time
    // mode no children are generated and the chained message is `H(msg)`.
    pub(crate) fn sign<R>(
        &self,
        msg: &[u8],
        txid: &[u8; 32],
        ots: bool,
        branches: u8,
        rng: &mut R,
    ) -> Result<(Signature, Vec<NyNode>), Error>
    where
        R: CryptoRng + RngCore,
    {
        let children = if ots {
            Vec::new()
        } else {
            self.child_nodes(txid, branches, rng)?
        };
        let child_hashes: Vec<[u8; 32]> = children.iter().map(NyNode::pub_key_hash).collect();

        let mut hash = Sha256::new();
        hash.update(msg);
        for child in &child_hashes {
            hash.update(child);
        }
        let chained: [u8; 32] = hash.finalize().into();

        let sig_bytes = wotsp::sign(&chained, &self.priv_seed, &self.pub_seed, Address::default());
        let sig = Signature::new(sig_bytes, self.pub_seed, msg.to_vec(), child_hashes);

        Ok((sig, children))
    }

    pub(crate) fn wipe(&mut self) {
        self.priv_seed.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    fn test_node() -> NyNode {
        NyNode {
            priv_seed: [3u8; 32],
            pub_seed: [4u8; 32],
            txid: [5u8; 32],
            confirms: 2,
        }
    }

    #[test]
    fn byte_round_trip() {
        let node = test_node();
        let bytes = node.to_bytes();
        let loaded = NyNode::from_bytes(&bytes).unwrap();

        assert_eq!(loaded.priv_seed, node.priv_seed);
        assert_eq!(loaded.pub_seed, node.pub_seed);
        assert_eq!(loaded.txid, node.txid);
        assert_eq!(loaded.confirms, node.confirms);
    }

    #[test]
    fn from_bytes_rejects_short_input() {
        let err = NyNode::from_bytes(&[0u8; NODE_BYTE_LEN - 1]).unwrap_err();
        assert_eq!(err, Error::InvalidNodeInput(NODE_BYTE_LEN - 1));
    }

    #[test]
    fn children_inherit_txid_and_start_unconfirmed() {
        let node = test_node();
        let txid = [9u8; 32];
        let children = node.child_nodes(&txid, 3, &mut OsRng).unwrap();

        assert_eq!(children.len(), 3);
        for child in &children {
            assert_eq!(child.txid, txid);
            assert_eq!(child.confirms, 0);
            assert_ne!(child.priv_seed, node.priv_seed);
        }
    }

    #[test]
    fn signature_commits_to_children() {
        let node = test_node();
        let msg = [7u8; 32];
        let (sig, children) = node.sign(&msg, &[9u8; 32], false, 3, &mut OsRng).unwrap();

        assert_eq!(sig.child_hashes().len(), 3);
        for (hash, child) in sig.child_hashes().iter().zip(children.iter()) {
            assert_eq!(*hash, child.pub_key_hash());
        }
        assert_eq!(sig.public_key().unwrap()[..], node.gen_pub_key()[..]);
    }

    #[test]
    fn one_time_signature_has_no_children() {
        let node = test_node();
        let (sig, children) = node.sign(b"short msg", &[9u8; 32], true, 3, &mut OsRng).unwrap();

        assert!(children.is_empty());
        assert!(sig.child_hashes().is_empty());
        assert_eq!(sig.public_key().unwrap()[..], node.gen_pub_key()[..]);
    }

    #[test]
    fn wipe_clears_the_private_seed() {
        let mut node = test_node();
        node.wipe();
        assert_eq!(node.priv_seed, [0u8; 32]);
        assert_ne!(node.pub_seed, [0u8; 32]);
    }
}
