//! # Off-chain Commitment Voting Contract
//!
//! Tracks aggregate agree/disagree tallies on-chain while the individual
//! voter records live in an off-chain store, committed to by a single Merkle
//! root held in contract state. Each vote must prove that the voter's
//! *unvoted* record is an authenticated member of the tree under the current
//! root, then advances the root to cover the updated record.
//!
//! Record hashing and sibling compression both use the Soroban BN254 Poseidon
//! host function, so an off-chain replica built over the same hash produces
//! byte-identical roots. The witness walk in [`Voting::vote`] is exactly the
//! membership predicate a proving circuit would enforce; on this platform the
//! host verifies it by re-execution.

#![no_std]
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, Env, Symbol, Vec, U256,
};

/// Fixed height of the authenticated voter tree (up to 256 leaves).
pub const TREE_DEPTH: u32 = 8;

/// Decision tag for a seeded record that has not voted.
pub const DECISION_UNSET: u32 = 0;
/// Decision tag for an agree vote.
pub const DECISION_AGREE: u32 = 1;
/// Decision tag for a disagree vote.
pub const DECISION_DISAGREE: u32 = 2;

#[contracterror]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum VotingError {
    /// Decision outside {1 = agree, 2 = disagree}
    InvalidDecision = 1,
    /// Witness does not carry exactly TREE_DEPTH siblings and path bits
    WitnessDepthMismatch = 2,
    /// Recomputed root does not match the committed root (stale witness,
    /// wrong record, or the leaf no longer holds the unvoted pre-image)
    RootMismatch = 3,
}

/// A voter's record as the off-chain tree hashes it.
#[contracttype]
#[derive(Clone)]
pub struct VoterRecord {
    pub identity: U256,
    pub decision: u32,
}

/// Sibling path from a leaf to the root.
/// `path[i]` is 0 when the node at level `i` is the left child, 1 otherwise.
#[contracttype]
#[derive(Clone)]
pub struct MembershipWitness {
    pub siblings: Vec<U256>,
    pub path: Vec<u32>,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Root,
    AgreeVotes,
    DisagreeVotes,
    Title,
    Description,
}

// Typed Events
#[soroban_sdk::contractevent]
#[derive(Clone, Debug, PartialEq)]
pub struct InitEvent {
    #[topic]
    pub root: U256,
}

#[soroban_sdk::contractevent]
#[derive(Clone, Debug, PartialEq)]
pub struct VoteEvent {
    #[topic]
    pub decision: u32,
    pub new_root: U256,
}

#[contract]
pub struct Voting;

#[contractimpl]
impl Voting {
    /// Constructor: seed the contract with the off-chain tree's root and the
    /// opaque title/description hashes. Both tallies start at zero.
    /// One-time initialization is enforced by the ledger's constructor
    /// semantics, not by this logic.
    pub fn __constructor(env: Env, root: U256, title: U256, description: U256) {
        env.storage().instance().set(&DataKey::Root, &root);
        env.storage().instance().set(&DataKey::AgreeVotes, &0u64);
        env.storage().instance().set(&DataKey::DisagreeVotes, &0u64);
        env.storage().instance().set(&DataKey::Title, &title);
        env.storage().instance().set(&DataKey::Description, &description);

        InitEvent { root }.publish(&env);
    }

    /// Cast a vote for the record proven to sit, unvoted, under the
    /// committed root.
    ///
    /// The caller's claimed `decision` field on the record is not trusted:
    /// the record is re-hashed with the decision zeroed before the membership
    /// check, so the witness must authenticate the voter's unvoted state
    /// rather than identity-with-a-particular-vote. A witness built before a
    /// prior vote advanced the root fails here and must be rebuilt against
    /// the fresh root.
    ///
    /// Either the whole state delta (root plus one tally) commits, or none
    /// of it does.
    pub fn vote(env: Env, voter: VoterRecord, decision: u32, witness: MembershipWitness) {
        if decision <= DECISION_UNSET || decision > DECISION_DISAGREE {
            panic_with_error!(&env, VotingError::InvalidDecision);
        }
        if witness.siblings.len() != TREE_DEPTH || witness.path.len() != TREE_DEPTH {
            panic_with_error!(&env, VotingError::WitnessDepthMismatch);
        }

        // Authenticate identity-without-vote, never the caller's claim.
        let unvoted = VoterRecord {
            identity: voter.identity.clone(),
            decision: DECISION_UNSET,
        };
        let leaf = Self::hash_record(&env, &unvoted);
        let committed: U256 = env.storage().instance().get(&DataKey::Root).unwrap();
        if Self::recompute_root(&env, leaf, &witness) != committed {
            panic_with_error!(&env, VotingError::RootMismatch);
        }

        // Same witness, updated leaf: the next commitment.
        let voted = VoterRecord {
            identity: voter.identity,
            decision,
        };
        let new_leaf = Self::hash_record(&env, &voted);
        let new_root = Self::recompute_root(&env, new_leaf, &witness);

        if decision == DECISION_AGREE {
            let agree: u64 = env
                .storage()
                .instance()
                .get(&DataKey::AgreeVotes)
                .unwrap_or(0);
            env.storage().instance().set(&DataKey::AgreeVotes, &(agree + 1));
        } else {
            let disagree: u64 = env
                .storage()
                .instance()
                .get(&DataKey::DisagreeVotes)
                .unwrap_or(0);
            env.storage()
                .instance()
                .set(&DataKey::DisagreeVotes, &(disagree + 1));
        }
        env.storage().instance().set(&DataKey::Root, &new_root);

        VoteEvent { decision, new_root }.publish(&env);
    }

    /// Current committed root
    pub fn get_root(env: Env) -> U256 {
        env.storage().instance().get(&DataKey::Root).unwrap()
    }

    /// Number of accepted agree votes
    pub fn agree_votes(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::AgreeVotes)
            .unwrap_or(0)
    }

    /// Number of accepted disagree votes
    pub fn disagree_votes(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::DisagreeVotes)
            .unwrap_or(0)
    }

    /// Get tallies as (agree, disagree)
    pub fn get_results(env: Env) -> (u64, u64) {
        (
            Self::agree_votes(env.clone()),
            Self::disagree_votes(env),
        )
    }

    /// Opaque title hash fixed at deployment
    pub fn title(env: Env) -> U256 {
        env.storage().instance().get(&DataKey::Title).unwrap()
    }

    /// Opaque description hash fixed at deployment
    pub fn description(env: Env) -> U256 {
        env.storage().instance().get(&DataKey::Description).unwrap()
    }

    // Internal: walk the witness from a leaf hash up to the root it implies
    fn recompute_root(env: &Env, leaf: U256, witness: &MembershipWitness) -> U256 {
        let mut current = leaf;
        for level in 0..TREE_DEPTH {
            let sibling = witness.siblings.get(level).unwrap();
            current = if witness.path.get(level).unwrap() == 0 {
                Self::hash_pair(env, &current, &sibling)
            } else {
                Self::hash_pair(env, &sibling, &current)
            };
        }
        current
    }

    // Internal: leaf hash of a voter record
    fn hash_record(env: &Env, record: &VoterRecord) -> U256 {
        let decision = U256::from_u32(env, record.decision);
        let inputs = soroban_sdk::vec![env, record.identity.clone(), decision];
        let field = Symbol::new(env, "BN254");
        env.crypto().poseidon_hash(&inputs, field)
    }

    // Internal: Poseidon hash of two U256 values
    fn hash_pair(env: &Env, left: &U256, right: &U256) -> U256 {
        let field = Symbol::new(env, "BN254");
        let inputs = soroban_sdk::vec![env, left.clone(), right.clone()];
        env.crypto().poseidon_hash(&inputs, field)
    }
}

// Test-only functions in separate contractimpl block
// This prevents the macro from generating references to these functions in production builds
#[cfg(any(test, feature = "testutils"))]
#[contractimpl]
impl Voting {
    /// Test helper: leaf hash of a voter record, for building off-chain
    /// replicas over the host Poseidon
    pub fn test_hash_record(env: Env, identity: U256, decision: u32) -> U256 {
        Self::hash_record(&env, &VoterRecord { identity, decision })
    }

    /// Test helper: Poseidon compression of two tree nodes
    pub fn test_hash_pair(env: Env, a: U256, b: U256) -> U256 {
        Self::hash_pair(&env, &a, &b)
    }
}
