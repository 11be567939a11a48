//! Owner liveness timer.
//!
//! The vault is **Active** while `now ≤ last_attested_at + inactivity_period`
//! and **Inactive** afterwards. Only the owner's `attest` call moves
//! `last_attested_at`, and it never moves backward.

use soroban_sdk::Env;

use crate::types::{DataKey, VaultConfig};

pub fn last_attested_at(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::LastAttestedAt)
        .unwrap_or(0)
}

/// Records an attestation at the current ledger time and returns the stored
/// timestamp.
pub fn attest(env: &Env) -> u64 {
    let now = env.ledger().timestamp();
    let attested_at = now.max(last_attested_at(env));
    env.storage()
        .instance()
        .set(&DataKey::LastAttestedAt, &attested_at);
    attested_at
}

/// Last instant at which the owner still counts as active.
pub fn active_until(last_attested_at: u64, inactivity_period: u64) -> u64 {
    last_attested_at.saturating_add(inactivity_period)
}

pub fn is_active_at(now: u64, last_attested_at: u64, inactivity_period: u64) -> bool {
    now <= active_until(last_attested_at, inactivity_period)
}

pub fn is_active(env: &Env, config: &VaultConfig) -> bool {
    is_active_at(
        env.ledger().timestamp(),
        last_attested_at(env),
        config.inactivity_period,
    )
}

/// First ledger timestamp at which `emergency_unlock` can succeed.
pub fn unlock_eligible_at(env: &Env, config: &VaultConfig) -> u64 {
    active_until(last_attested_at(env), config.inactivity_period).saturating_add(1)
}
