//! One-way unlock latch. Once set it stays set.

use soroban_sdk::Env;

use crate::types::DataKey;

pub fn is_unlocked(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Unlocked)
        .unwrap_or(false)
}

pub fn latch(env: &Env) {
    env.storage().instance().set(&DataKey::Unlocked, &true);
}
