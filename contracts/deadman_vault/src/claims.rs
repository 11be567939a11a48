//! Claim registry: the committed digest and the set of honoured leaves.

use common::extend_persistent_ttl;
use soroban_sdk::{BytesN, Env};

use crate::types::DataKey;

pub fn committed_digest(env: &Env) -> Option<BytesN<32>> {
    env.storage().instance().get(&DataKey::CommittedDigest)
}

pub fn set_committed_digest(env: &Env, digest: &BytesN<32>) {
    env.storage()
        .instance()
        .set(&DataKey::CommittedDigest, digest);
}

pub fn is_claimed(env: &Env, leaf: &BytesN<32>) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Claimed(leaf.clone()))
        .unwrap_or(false)
}

/// Insert-only; nothing ever removes a claimed leaf.
pub fn mark_claimed(env: &Env, leaf: &BytesN<32>) {
    let key = DataKey::Claimed(leaf.clone());
    env.storage().persistent().set(&key, &true);
    extend_persistent_ttl(env, &key);
}
