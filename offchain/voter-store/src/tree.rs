use crate::{RecordHasher, StoreError, VoterRecord, MAX_VOTERS, TREE_DEPTH};

/// Sibling path from a leaf to the root.
///
/// `siblings[i]` is the other child at level `i`; `path[i]` is 0 when the
/// authenticated node sits as the left child at that level, 1 when it sits as
/// the right child. Matches the layout the contract's witness walk expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipWitness<N> {
    pub siblings: Vec<N>,
    pub path: Vec<u32>,
}

/// Fixed-depth binary hash tree over voter record hashes.
///
/// Level 0 holds the [`MAX_VOTERS`] leaves, level [`TREE_DEPTH`] the single
/// root. Unoccupied leaves carry the hasher's empty value; empty internal
/// nodes chain as `zeros[l + 1] = H(zeros[l], zeros[l])`, so a freshly built
/// tree needs one hash per level rather than one per node.
pub struct VoterTree<H: RecordHasher> {
    hasher: H,
    levels: Vec<Vec<H::Node>>,
}

impl<H: RecordHasher> VoterTree<H> {
    pub fn new(hasher: H) -> Self {
        let mut zero = hasher.empty();
        let mut levels = Vec::with_capacity(TREE_DEPTH + 1);
        for level in 0..=TREE_DEPTH {
            levels.push(vec![zero.clone(); MAX_VOTERS >> level]);
            if level < TREE_DEPTH {
                zero = hasher.hash_pair(&zero, &zero);
            }
        }
        Self { hasher, levels }
    }

    /// Current root commitment over all leaves.
    pub fn root(&self) -> H::Node {
        self.levels[TREE_DEPTH][0].clone()
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Leaf hash at `index`.
    pub fn leaf(&self, index: usize) -> Result<&H::Node, StoreError> {
        self.levels[0]
            .get(index)
            .ok_or(StoreError::IndexOutOfRange { index })
    }

    /// Replace the leaf at `index` and recompute the root along its path.
    pub fn set_leaf(&mut self, index: usize, leaf: H::Node) -> Result<(), StoreError> {
        if index >= MAX_VOTERS {
            return Err(StoreError::IndexOutOfRange { index });
        }
        self.levels[0][index] = leaf;
        let mut node = index;
        for level in 0..TREE_DEPTH {
            let parent = node / 2;
            let combined = self.hasher.hash_pair(
                &self.levels[level][parent * 2],
                &self.levels[level][parent * 2 + 1],
            );
            self.levels[level + 1][parent] = combined;
            node = parent;
        }
        Ok(())
    }

    /// Hash `record` and commit it as the leaf at `index`.
    pub fn commit_record(
        &mut self,
        index: usize,
        record: &VoterRecord<H::Node>,
    ) -> Result<(), StoreError> {
        let leaf = self.hasher.hash_record(record);
        self.set_leaf(index, leaf)
    }

    /// Sibling path for the leaf at `index`.
    pub fn witness(&self, index: usize) -> Result<MembershipWitness<H::Node>, StoreError> {
        if index >= MAX_VOTERS {
            return Err(StoreError::IndexOutOfRange { index });
        }
        let mut siblings = Vec::with_capacity(TREE_DEPTH);
        let mut path = Vec::with_capacity(TREE_DEPTH);
        let mut node = index;
        for level in 0..TREE_DEPTH {
            let is_left = node % 2 == 0;
            let sibling = if is_left { node + 1 } else { node - 1 };
            siblings.push(self.levels[level][sibling].clone());
            path.push(if is_left { 0 } else { 1 });
            node /= 2;
        }
        Ok(MembershipWitness { siblings, path })
    }

    /// Walk a witness from a leaf hash up to the root it implies.
    ///
    /// Mirrors the contract-side recomputation: a witness is valid for a leaf
    /// exactly when this equals the committed root.
    pub fn recompute_root(
        hasher: &H,
        leaf: &H::Node,
        witness: &MembershipWitness<H::Node>,
    ) -> H::Node {
        let mut current = leaf.clone();
        for (sibling, bit) in witness.siblings.iter().zip(&witness.path) {
            current = if *bit == 0 {
                hasher.hash_pair(&current, sibling)
            } else {
                hasher.hash_pair(sibling, &current)
            };
        }
        current
    }
}
