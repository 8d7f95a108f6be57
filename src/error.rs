//! Error types.
//!
//! The trees themselves can only fail in three ways, all of them on queries
//! whose answer does not exist. Everything else is total.

use thiserror::Error;

/// A query on a tree that has no answer.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeError {
    /// `kth(k)` was called with `k == 0` or `k > size`.
    #[error("k is out of range")]
    OutOfRange,
    /// `prev(key)` was called but no stored key is smaller than `key`.
    #[error("no prev value")]
    NoPrevValue,
    /// `next(key)` was called but no stored key is bigger than `key`.
    #[error("no next value")]
    NoNextValue,
}

/// Failures at the command-stream boundary.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("malformed input: {0}")]
    Parse(String),
    #[error("unknown opcode {0}")]
    UnknownOpcode(i64),
    #[error("unknown engine `{0}`, expected one of: splay, treap, fhq")]
    UnknownEngine(String),
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
