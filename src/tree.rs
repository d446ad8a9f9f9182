//! The Naor-Yung chain tree: a pool of one-time signing nodes grown from a
//! single root key pair.
//!
//! Every signature consumes one node and commits to the public keys of the
//! child nodes it appends, so the chain of signatures can be validated from
//! the long-term root key alone. Child nodes become usable once the
//! transaction that created them has gathered enough confirmations, or
//! earlier for further inputs of that same transaction.

use crate::address::Address;
use crate::errors::Error;
use crate::node::{NyNode, NODE_BYTE_LEN};
use crate::signature::Signature;
use crate::wotsp;
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Number of child nodes appended to the tree per signature, unless a tree
/// is configured otherwise.
pub const DEFAULT_BRANCHES: u8 = 3;

/// Number of confirmations a node requires before it may sign for new
/// transactions, unless a tree is configured otherwise.
pub const DEFAULT_CONFIRMS_REQUIRED: u8 = 1;

/// Maximum byte size of messages passed to [`NyTree::sign`].
pub const MSG_LEN: usize = wotsp::MSG_LEN;

// Byte size of the serialized tree header: the one-time flag and the two
// root seeds.
const TREE_HEADER_LEN: usize = 1 + 32 + 32;

/// A Naor-Yung chain tree.
///
/// A tree is created from a root key pair and holds the pool of signing
/// nodes that grew out of it. It is a single-owner value: all mutating
/// operations take `&mut self`, and it is not meant to be shared between
/// threads. Dropping the tree zeroizes its key material.
#[derive(Debug, Zeroize, ZeroizeOnDrop)]
pub struct NyTree {
    nodes: Vec<NyNode>,
    root_seed: [u8; 32],
    root_pub_seed: [u8; 32],
    ots: bool,
    branches: u8,
    confirms_required: u8,
}

impl NyTree {
    /// Creates a new chain tree using the given secret and public seeds,
    /// with the default branching factor and confirmation requirement.
    pub fn new(seed: &[u8; 32], pub_seed: &[u8; 32], ots: bool) -> Self {
        Self::with_params(seed, pub_seed, ots, DEFAULT_BRANCHES, DEFAULT_CONFIRMS_REQUIRED)
    }

    /// Creates a new chain tree with an explicit branching factor and
    /// confirmation requirement. Both are fixed for the life of the tree.
    ///
    /// The root node shares the tree's key pair and can be used immediately.
    /// A tree created with `ots` signs exactly once: its signatures carry no
    /// child commitments and no children are appended.
    pub fn with_params(
        seed: &[u8; 32],
        pub_seed: &[u8; 32],
        ots: bool,
        branches: u8,
        confirms_required: u8,
    ) -> Self {
        let root = NyNode {
            priv_seed: *seed,
            pub_seed: *pub_seed,
            txid: [0u8; 32],
            confirms: confirms_required,
        };

        NyTree {
            nodes: vec![root],
            root_seed: *seed,
            root_pub_seed: *pub_seed,
            ots,
            branches,
            confirms_required,
        }
    }

    /// Returns the long-term public key of the tree.
    pub fn public_key(&self) -> [u8; wotsp::PUB_KEY_LEN] {
        wotsp::gen_public_key(&self.root_seed, &self.root_pub_seed, Address::default())
    }

    // Searches for a node that can be used to create a new signature. First
    // goes through all nodes to find one with a matching txid, so that all
    // inputs of one transaction are signed in one subtree and use up only
    // one node. Only then are confirmed nodes considered.
    fn get_sign_node(&self, txid: &[u8; 32]) -> Option<usize> {
        self.nodes
            .iter()
            .position(|node| node.txid == *txid)
            .or_else(|| {
                self.nodes
                    .iter()
                    .position(|node| node.confirms >= self.confirms_required)
            })
    }

    /// Creates a signature for the given message, which must be at most 32
    /// bytes. The consumed node is removed from the pool; outside of
    /// one-time mode the freshly generated child nodes are appended at the
    /// tail.
    ///
    /// # Errors
    /// Fails with [`Error::InvalidMessageLength`] for an over-long message,
    /// [`Error::NoNodeAvailable`] when no node matches the txid and none is
    /// confirmed, and [`Error::RngFailure`] when the CSPRNG fails. The pool
    /// is unchanged on failure.
    pub fn sign<R>(&mut self, msg: &[u8], txid: &[u8; 32], rng: &mut R) -> Result<Signature, Error>
    where
        R: CryptoRng + RngCore,
    {
        if msg.len() > MSG_LEN {
            return Err(Error::InvalidMessageLength(msg.len()));
        }

        let index = self.get_sign_node(txid).ok_or(Error::NoNodeAvailable)?;

        // The children are generated before the pool is touched; a failing
        // RNG must leave the tree unchanged.
        let (sig, children) = self.nodes[index].sign(msg, txid, self.ots, self.branches, rng)?;

        self.nodes.remove(index);
        self.nodes.extend(children);

        Ok(sig)
    }

    /// Sets the confirmation count of every node whose public key hash
    /// equals `pkh` and that has not yet reached the required count. Nodes
    /// that are already confirmed are never set back.
    pub fn confirm(&mut self, pkh: &[u8; 32], confirms: u8) {
        let required = self.confirms_required;
        for node in self.nodes.iter_mut() {
            if node.confirms < required && node.pub_key_hash() == *pkh {
                node.confirms = confirms;
            }
        }
    }

    /// Returns the public key hashes of all unconfirmed nodes, in pool
    /// order.
    pub fn unconfirmed(&self) -> Vec<[u8; 32]> {
        self.nodes
            .iter()
            .filter(|node| node.confirms < self.confirms_required)
            .map(|node| node.pub_key_hash())
            .collect()
    }

    /// Returns the number of signatures that can be created right now. When
    /// a txid is given, unconfirmed nodes carrying that txid count as well,
    /// since further inputs of one transaction may share its subtree. A
    /// `None` or all-zero txid matches no node, so only confirmed nodes are
    /// counted.
    pub fn available(&self, txid: Option<&[u8; 32]>) -> usize {
        let txid = txid.filter(|t| **t != [0u8; 32]);
        self.nodes
            .iter()
            .filter(|node| {
                txid.map_or(false, |t| node.txid == *t) || node.confirms >= self.confirms_required
            })
            .count()
    }

    /// Splits off `count` confirmed nodes into a fresh tree that shares the
    /// root key pair. Nodes moved to the backup no longer exist in `self`,
    /// so the two trees can never consume the same node.
    ///
    /// # Errors
    /// Fails with [`Error::BackupOneTime`] on a one-time tree and with
    /// [`Error::BackupInsufficient`] unless strictly more than `count`
    /// confirmed nodes remain.
    pub fn backup(&mut self, count: usize) -> Result<NyTree, Error> {
        if self.ots {
            return Err(Error::BackupOneTime);
        }

        let available = self.available(None);
        if count >= available {
            return Err(Error::BackupInsufficient(count, available));
        }

        let mut nodes = Vec::with_capacity(count);
        for _ in 0..count {
            let index = self
                .nodes
                .iter()
                .position(|node| node.confirms >= self.confirms_required)
                .expect("internal error: confirmed node count was checked above");
            nodes.push(self.nodes.remove(index));
        }

        Ok(NyTree {
            nodes,
            root_seed: self.root_seed,
            root_pub_seed: self.root_pub_seed,
            ots: self.ots,
            branches: self.branches,
            confirms_required: self.confirms_required,
        })
    }

    /// Returns the byte representation of the tree:
    /// `( ots || root_seed || root_pub_seed || node... )`.
    pub fn bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(TREE_HEADER_LEN + self.nodes.len() * NODE_BYTE_LEN);
        out.push(self.ots as u8);
        out.extend_from_slice(&self.root_seed);
        out.extend_from_slice(&self.root_pub_seed);
        for node in &self.nodes {
            out.extend_from_slice(&node.to_bytes());
        }

        out
    }

    /// Loads an existing chain tree from its byte representation. The
    /// branching factor and confirmation requirement are not part of the
    /// encoding; the defaults apply.
    ///
    /// # Errors
    /// Fails with [`Error::InvalidTreeInput`] when the input cannot contain
    /// the tree header, and with [`Error::InvalidNodeInput`] when the node
    /// section is not a multiple of the node size.
    pub fn load(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < TREE_HEADER_LEN {
            return Err(Error::InvalidTreeInput(bytes.len()));
        }

        let mut root_seed = [0u8; 32];
        let mut root_pub_seed = [0u8; 32];
        root_seed.copy_from_slice(&bytes[1..33]);
        root_pub_seed.copy_from_slice(&bytes[33..65]);

        let node_bytes = &bytes[TREE_HEADER_LEN..];
        if node_bytes.len() % NODE_BYTE_LEN != 0 {
            return Err(Error::InvalidNodeInput(node_bytes.len()));
        }

        let nodes = node_bytes
            .chunks_exact(NODE_BYTE_LEN)
            .map(NyNode::from_bytes)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NyTree {
            nodes,
            root_seed,
            root_pub_seed,
            ots: bytes[0] != 0,
            branches: DEFAULT_BRANCHES,
            confirms_required: DEFAULT_CONFIRMS_REQUIRED,
        })
    }

    /// Wipes all secret data from the tree. The tree can no longer create
    /// valid signatures afterwards, but remains observable.
    pub fn wipe(&mut self) {
        for node in self.nodes.iter_mut() {
            node.wipe();
        }
        self.root_seed.zeroize();
    }
}
