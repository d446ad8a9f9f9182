//! An extended Naor-Yung signature scheme implementation.
//!
//! A W-OTS+ key pair may sign a single message only. By committing to the
//! public keys of freshly generated child key pairs inside every signature,
//! a single root key grows into a tree of signing nodes whose signatures can
//! all be validated against the long-term root public key, which makes the
//! scheme usable many times in settings where each output key is consumed at
//! most once.
//!
//! W-OTS+: "W-OTS+ -- Shorter Signatures for Hash-Based Signature Schemes"
//! By Andreas Hülsing
//! <https://eprint.iacr.org/2017/965>
#![warn(missing_docs, rust_2018_idioms)]

pub mod address;
pub mod errors;
mod node;
pub mod signature;
pub mod tree;
pub mod wotsp;
