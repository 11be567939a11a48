use soroban_sdk::{Env, IntoVal, Val};

pub const TTL_THRESHOLD: u32 = 17_280; // ~1 day (@ ~5s/ledger)
pub const TTL_EXTEND_TO: u32 = 518_400; // ~30 days

/// Keeps the contract instance (and every instance-storage entry) alive.
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Keeps a single persistent entry alive. The key must already exist.
pub fn extend_persistent_ttl<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
