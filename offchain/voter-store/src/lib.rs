//! # Off-chain Voter Store
//!
//! The authoritative identity -> record mapping and the fixed-depth
//! authenticated tree the on-chain voting contract commits to. The ledger
//! only ever holds the tree root; this crate owns the full state and produces
//! the (record, witness, index) triples a vote transaction needs, then
//! mirrors updates the ledger has accepted.
//!
//! Hashing is abstracted behind [`RecordHasher`] so the same structure runs
//! over the Soroban BN254 Poseidon host function in integration tests and
//! over an ordinary hash in unit tests. The implementation must match the
//! contract's leaf and node hashing exactly or the roots will never line up.

mod error;
mod store;
mod tree;

pub use error::StoreError;
pub use store::VoterStore;
pub use tree::{MembershipWitness, VoterTree};

/// Fixed height of the authenticated tree (up to 256 voters).
pub const TREE_DEPTH: usize = 8;

/// Maximum number of voter records the tree can commit to.
pub const MAX_VOTERS: usize = 1 << TREE_DEPTH;

/// Decision tag for a seeded record that has not voted.
pub const DECISION_UNSET: u32 = 0;
/// Decision tag for an agree vote.
pub const DECISION_AGREE: u32 = 1;
/// Decision tag for a disagree vote.
pub const DECISION_DISAGREE: u32 = 2;

/// A single voter's record: an opaque identity and a decision tag.
///
/// At rest the decision is one of [`DECISION_UNSET`], [`DECISION_AGREE`] or
/// [`DECISION_DISAGREE`]; anything else is rejected at the store boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoterRecord<N> {
    pub identity: N,
    pub decision: u32,
}

impl<N> VoterRecord<N> {
    /// A freshly seeded, unvoted record.
    pub fn unvoted(identity: N) -> Self {
        Self {
            identity,
            decision: DECISION_UNSET,
        }
    }
}

/// Hashing scheme shared by the tree and the on-chain contract.
pub trait RecordHasher {
    type Node: Clone + PartialEq + Eq + core::fmt::Debug;

    /// Value of an unoccupied leaf.
    fn empty(&self) -> Self::Node;

    /// Leaf hash of a voter record.
    fn hash_record(&self, record: &VoterRecord<Self::Node>) -> Self::Node;

    /// Compression of two sibling nodes into their parent.
    fn hash_pair(&self, left: &Self::Node, right: &Self::Node) -> Self::Node;
}
