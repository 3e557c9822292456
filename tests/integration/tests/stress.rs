// Ignored larger-scale smoke to gauge capacity (many voters, full tally).
// Run manually with `cargo test --test stress -- --ignored` when profiling.

use soroban_sdk::{Env, Symbol, U256};

use voter_store::{MembershipWitness as StoreWitness, RecordHasher, VoterRecord, VoterStore};
use voting::{
    MembershipWitness, VoterRecord as ContractRecord, Voting, VotingClient, DECISION_AGREE,
    DECISION_DISAGREE,
};

#[derive(Clone)]
struct PoseidonHasher {
    env: Env,
}

impl RecordHasher for PoseidonHasher {
    type Node = U256;

    fn empty(&self) -> U256 {
        U256::from_u32(&self.env, 0)
    }

    fn hash_record(&self, record: &VoterRecord<U256>) -> U256 {
        let decision = U256::from_u32(&self.env, record.decision);
        let inputs = soroban_sdk::vec![&self.env, record.identity.clone(), decision];
        let field = Symbol::new(&self.env, "BN254");
        self.env.crypto().poseidon_hash(&inputs, field)
    }

    fn hash_pair(&self, left: &U256, right: &U256) -> U256 {
        let field = Symbol::new(&self.env, "BN254");
        let inputs = soroban_sdk::vec![&self.env, left.clone(), right.clone()];
        self.env.crypto().poseidon_hash(&inputs, field)
    }
}

fn contract_witness(env: &Env, witness: &StoreWitness<U256>) -> MembershipWitness {
    let mut siblings = soroban_sdk::Vec::new(env);
    let mut path = soroban_sdk::Vec::new(env);
    for sibling in &witness.siblings {
        siblings.push_back(sibling.clone());
    }
    for bit in &witness.path {
        path.push_back(*bit);
    }
    MembershipWitness { siblings, path }
}

#[test]
#[ignore]
fn stress_full_voter_set() {
    const VOTERS: u32 = 64;

    let env = Env::default();
    env.mock_all_auths();
    env.cost_estimate().budget().reset_unlimited();

    let mut store = VoterStore::new(PoseidonHasher { env: env.clone() });
    for id in 0..VOTERS {
        store.register(U256::from_u32(&env, 1000 + id)).unwrap();
    }

    let voting = env.register(
        Voting,
        (
            store.root(),
            U256::from_u32(&env, 1),
            U256::from_u32(&env, 2),
        ),
    );
    let client = VotingClient::new(&env, &voting);

    for index in 0..VOTERS as usize {
        let decision = if index % 2 == 0 {
            DECISION_AGREE
        } else {
            DECISION_DISAGREE
        };

        let record = store.record_at(index).unwrap().clone();
        let witness = store.witness_for(index).unwrap();
        client.vote(
            &ContractRecord {
                identity: record.identity.clone(),
                decision: record.decision,
            },
            &decision,
            &contract_witness(&env, &witness),
        );
        store
            .commit(
                index,
                VoterRecord {
                    identity: record.identity,
                    decision,
                },
            )
            .unwrap();
    }

    assert_eq!(
        client.get_results(),
        (u64::from(VOTERS) / 2, u64::from(VOTERS) / 2)
    );
    assert_eq!(client.get_root(), store.root());
}
