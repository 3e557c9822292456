use tracing::debug;

use crate::{
    MembershipWitness, RecordHasher, StoreError, VoterRecord, VoterTree, DECISION_DISAGREE,
    MAX_VOTERS,
};

/// Authoritative off-chain mapping of voter identities to records, kept in
/// lock-step with the authenticated tree the contract commits to.
///
/// The store is the single writer of its tree: [`VoterStore::register`] seeds
/// unvoted records, and [`VoterStore::commit`] mirrors updates the ledger has
/// already accepted. Single-actor, single-threaded usage is assumed; there is
/// no internal locking.
pub struct VoterStore<H: RecordHasher> {
    records: Vec<VoterRecord<H::Node>>,
    tree: VoterTree<H>,
}

impl<H: RecordHasher> VoterStore<H> {
    pub fn new(hasher: H) -> Self {
        Self {
            records: Vec::new(),
            tree: VoterTree::new(hasher),
        }
    }

    /// Seed a new voter with an unset decision; returns the assigned leaf
    /// index.
    pub fn register(&mut self, identity: H::Node) -> Result<usize, StoreError> {
        if let Some(index) = self.index_of(&identity) {
            return Err(StoreError::DuplicateIdentity { index });
        }
        if self.records.len() >= MAX_VOTERS {
            return Err(StoreError::TreeFull { max: MAX_VOTERS });
        }
        let index = self.records.len();
        let record = VoterRecord::unvoted(identity);
        self.tree.commit_record(index, &record)?;
        self.records.push(record);
        debug!(index, "voter registered");
        Ok(index)
    }

    /// Record for `identity`.
    pub fn get(&self, identity: &H::Node) -> Result<&VoterRecord<H::Node>, StoreError> {
        self.index_of(identity)
            .map(|index| &self.records[index])
            .ok_or(StoreError::UnknownVoter)
    }

    /// Leaf index of `identity`, if registered.
    pub fn index_of(&self, identity: &H::Node) -> Option<usize> {
        self.records.iter().position(|r| &r.identity == identity)
    }

    /// Record at leaf `index`.
    pub fn record_at(&self, index: usize) -> Result<&VoterRecord<H::Node>, StoreError> {
        self.records
            .get(index)
            .ok_or(StoreError::IndexOutOfRange { index })
    }

    /// Membership witness for the leaf at `index`.
    pub fn witness_for(&self, index: usize) -> Result<MembershipWitness<H::Node>, StoreError> {
        if index >= self.records.len() {
            return Err(StoreError::IndexOutOfRange { index });
        }
        self.tree.witness(index)
    }

    /// Mirror a confirmed update: replace the record at `index` and advance
    /// the tree. Call only after the ledger accepted the corresponding vote;
    /// mirroring anything else forks the store from the on-chain commitment.
    pub fn commit(&mut self, index: usize, record: VoterRecord<H::Node>) -> Result<(), StoreError> {
        if record.decision > DECISION_DISAGREE {
            return Err(StoreError::InvalidDecision(record.decision));
        }
        if index >= self.records.len() {
            return Err(StoreError::IndexOutOfRange { index });
        }
        self.tree.commit_record(index, &record)?;
        self.records[index] = record;
        debug!(index, "confirmed update mirrored");
        Ok(())
    }

    /// Current tree root, the value the contract should be committing to.
    pub fn root(&self) -> H::Node {
        self.tree.root()
    }

    pub fn tree(&self) -> &VoterTree<H> {
        &self.tree
    }

    /// All records in leaf order.
    pub fn records(&self) -> &[VoterRecord<H::Node>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
