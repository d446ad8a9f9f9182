//! Errors specific to the chain tree and its signatures.
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Enum of errors associated with the chain tree, its nodes and the byte
/// encodings of trees and signatures.
pub enum Error {
    /// Error occurs when the message passed to a signing operation exceeds
    /// 32 bytes.
    InvalidMessageLength(usize),
    /// Error occurs when the tree holds no node that is confirmed or matches
    /// the requested txid.
    NoNodeAvailable,
    /// This error occurs when the CSPRNG fails to produce the requested
    /// amount of bytes.
    RngFailure(String),
    /// Error occurs when a backup is requested on a one-time tree.
    BackupOneTime,
    /// Error occurs when a backup requests more nodes than are available.
    /// Carries the requested count and the number of available nodes.
    BackupInsufficient(usize, usize),
    /// Error occurs when a tree blob is too short to contain the one-time
    /// flag and the two root seeds.
    InvalidTreeInput(usize),
    /// Error occurs when a node blob is too short, or when a tree blob
    /// carries a node section that is not a multiple of the node size.
    InvalidNodeInput(usize),
    /// Error occurs when a signature blob is shorter than the minimum or its
    /// child hash section is not 32-byte aligned.
    InvalidSignatureEncoding(usize),
    /// Error occurs when recovering a public key from a signature whose
    /// message was never set.
    SignatureMessageMissing,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidMessageLength(len) => {
                write!(f, "invalid message length {} (must be at most 32 bytes)", len)
            }
            Error::NoNodeAvailable => write!(f, "no signature nodes available"),
            Error::RngFailure(reason) => write!(f, "random number generator failure: {}", reason),
            Error::BackupOneTime => write!(f, "cannot back up a one-time tree"),
            Error::BackupInsufficient(requested, available) => write!(
                f,
                "cannot back up {} nodes, only {} available",
                requested, available
            ),
            Error::InvalidTreeInput(len) => write!(
                f,
                "invalid tree input of {} bytes, must contain at least a flag and two seeds",
                len
            ),
            Error::InvalidNodeInput(len) => {
                write!(f, "input of {} bytes is not a valid node", len)
            }
            Error::InvalidSignatureEncoding(len) => {
                write!(f, "invalid signature encoding of {} bytes", len)
            }
            Error::SignatureMessageMissing => write!(f, "signature message is not set"),
        }
    }
}

impl std::error::Error for Error {}

impl From<rand::Error> for Error {
    fn from(err: rand::Error) -> Error {
        Error::RngFailure(format!("{:?}", err))
    }
}
