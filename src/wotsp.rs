//! Implementation of W-OTS+ using SHA-256 and Winternitz parameter w = 256,
//! following the hash chain construction of the XMSS family.
//!
//! "W-OTS+ -- Shorter Signatures for Hash-Based Signature Schemes"
//! By Andreas Hülsing
//! <https://eprint.iacr.org/2017/965>

use crate::address::Address;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

/// Security parameter: byte size of the hash output.
pub const N: usize = 32;
/// Winternitz parameter: the radix of the message digit decomposition.
pub const W: usize = 256;

const L1: usize = 32;
const L2: usize = 2;

/// Total number of hash chains, covering message and checksum digits.
pub const L: usize = L1 + L2;

/// Byte size of messages accepted by the chain engine.
pub const MSG_LEN: usize = N;
/// Byte size of a W-OTS+ signature.
pub const SIG_LEN: usize = L * N;
/// Byte size of a W-OTS+ public key.
pub const PUB_KEY_LEN: usize = L * N;

// Generic pad-then-hash function, returning an n-byte output. The input is
// hashed as ( toByte(pad, 32) || key || input ).
fn pad_and_hash(input: &[u8], key: &[u8; N], pad: u16) -> [u8; N] {
    let mut padding = [0u8; N];
    padding[N - 2..].copy_from_slice(&pad.to_be_bytes());

    let mut hash = Sha256::new();
    hash.update(&padding);
    hash.update(key);
    hash.update(input);
    hash.finalize().into()
}

// Generates n-byte pseudo random outputs from a 32-byte input and an n-byte
// key.
fn prf(input: &[u8; 32], key: &[u8; N]) -> [u8; N] {
    pad_and_hash(input, key, 3)
}

// Keyed hash function F over an n-byte input and an n-byte key.
fn hash_f(input: &[u8; N], key: &[u8; N]) -> [u8; N] {
    pad_and_hash(input, key, 0)
}

// Performs the chaining operation on an n-byte input. Assumes the input is
// the <start>-th element in the chain, and performs <steps> iterations. Both
// a key and a bitmask are derived from the public seed for every step.
fn chain(
    input: &[u8; N],
    start: usize,
    steps: usize,
    adrs: &mut Address,
    pub_seed: &[u8; N],
) -> [u8; N] {
    let mut out = *input;

    for i in start..start + steps {
        adrs.set_hash(i as u32);

        adrs.set_key_and_mask(0);
        let key = prf(adrs.as_bytes(), pub_seed);
        adrs.set_key_and_mask(1);
        let bitmask = prf(adrs.as_bytes(), pub_seed);

        for (out_byte, mask_byte) in out.iter_mut().zip(bitmask.iter()) {
            *out_byte ^= mask_byte;
        }
        out = hash_f(&out, &key);
    }

    out
}

// Expands a 32-byte seed into the l chain heads of the private key.
fn expand_seed(seed: &[u8; N]) -> [[u8; N]; L] {
    let mut priv_key = [[0u8; N]; L];
    let mut ctr = [0u8; 32];

    for (i, head) in priv_key.iter_mut().enumerate() {
        ctr[30..].copy_from_slice(&(i as u16).to_be_bytes());
        *head = prf(&ctr, seed);
    }

    priv_key
}

// Computes the base-256 digits of the message followed by the two big-endian
// checksum digits. For w = 256 the message digits are the message bytes
// themselves, and the maximum checksum is l1 * (w - 1) = 8160, which always
// fits in a u16.
fn lengths(msg: &[u8; MSG_LEN]) -> [u8; L] {
    let mut lens = [0u8; L];
    lens[..L1].copy_from_slice(msg);

    let mut csum: u16 = 0;
    for &digit in msg.iter() {
        csum += (W - 1) as u16 - u16::from(digit);
    }
    lens[L1..].copy_from_slice(&csum.to_be_bytes());

    lens
}

/// Computes the public key that corresponds to the private key expanded from
/// `seed`.
pub fn gen_public_key(seed: &[u8; N], pub_seed: &[u8; N], mut adrs: Address) -> [u8; PUB_KEY_LEN] {
    let mut priv_key = expand_seed(seed);
    let mut pub_key = [0u8; PUB_KEY_LEN];

    for (i, head) in priv_key.iter().enumerate() {
        adrs.set_chain(i as u32);
        pub_key[i * N..(i + 1) * N].copy_from_slice(&chain(head, 0, W - 1, &mut adrs, pub_seed));
    }

    priv_key.zeroize();
    pub_key
}

/// Signs a 32-byte message using the private key expanded from `seed`.
pub fn sign(
    msg: &[u8; MSG_LEN],
    seed: &[u8; N],
    pub_seed: &[u8; N],
    mut adrs: Address,
) -> [u8; SIG_LEN] {
    let mut priv_key = expand_seed(seed);
    let lens = lengths(msg);
    let mut sig = [0u8; SIG_LEN];

    for (i, head) in priv_key.iter().enumerate() {
        adrs.set_chain(i as u32);
        sig[i * N..(i + 1) * N]
            .copy_from_slice(&chain(head, 0, lens[i] as usize, &mut adrs, pub_seed));
    }

    priv_key.zeroize();
    sig
}

/// Generates the candidate public key from a signature by completing every
/// chain to its full length.
pub fn pk_from_sig(
    sig: &[u8; SIG_LEN],
    msg: &[u8; MSG_LEN],
    pub_seed: &[u8; N],
    mut adrs: Address,
) -> [u8; PUB_KEY_LEN] {
    let lens = lengths(msg);
    let mut pub_key = [0u8; PUB_KEY_LEN];

    for i in 0..L {
        adrs.set_chain(i as u32);

        let mut head = [0u8; N];
        head.copy_from_slice(&sig[i * N..(i + 1) * N]);

        let start = lens[i] as usize;
        pub_key[i * N..(i + 1) * N]
            .copy_from_slice(&chain(&head, start, W - 1 - start, &mut adrs, pub_seed));
    }

    pub_key
}

/// Verifies the given signature on the given message. Both the public key
/// and the signature are public data, so the comparison is not constant
/// time.
pub fn verify(
    pk: &[u8; PUB_KEY_LEN],
    sig: &[u8; SIG_LEN],
    msg: &[u8; MSG_LEN],
    pub_seed: &[u8; N],
    adrs: Address,
) -> bool {
    pk[..] == pk_from_sig(sig, msg, pub_seed, adrs)[..]
}
