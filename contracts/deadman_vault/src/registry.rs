//! Beneficiary registry.
//!
//! Entries live in an ordered `Vec<Beneficiary>`; a `Position(identity)`
//! index maps each identity to its slot for O(1) membership checks,
//! updates and removals. Removal swaps the last entry into the freed slot,
//! so order only matters as the dust tie-break in distribution.
//!
//! Invariant after every mutation: `total_share_bps() == Σ share_bps ≤ 10 000`.

use common::extend_persistent_ttl;
use soroban_sdk::{Address, Env, Vec};

use crate::errors::VaultError;
use crate::types::{Beneficiary, DataKey, MAX_SHARE_BPS};

pub fn load(env: &Env) -> Vec<Beneficiary> {
    env.storage()
        .persistent()
        .get(&DataKey::Beneficiaries)
        .unwrap_or_else(|| Vec::new(env))
}

fn store(env: &Env, beneficiaries: &Vec<Beneficiary>) {
    let key = DataKey::Beneficiaries;
    env.storage().persistent().set(&key, beneficiaries);
    extend_persistent_ttl(env, &key);
}

fn set_position(env: &Env, identity: &Address, index: u32) {
    let key = DataKey::Position(identity.clone());
    env.storage().persistent().set(&key, &index);
    extend_persistent_ttl(env, &key);
}

/// Re-extends the beneficiary list and every position entry. Called on the
/// owner's calls so the registry outlives a long silence.
pub fn extend_ttl(env: &Env) {
    let key = DataKey::Beneficiaries;
    if !env.storage().persistent().has(&key) {
        return;
    }
    extend_persistent_ttl(env, &key);
    for entry in load(env).iter() {
        extend_persistent_ttl(env, &DataKey::Position(entry.identity));
    }
}

pub fn total_share_bps(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::TotalShareBps)
        .unwrap_or(0)
}

fn set_total_share_bps(env: &Env, total: u32) {
    env.storage().instance().set(&DataKey::TotalShareBps, &total);
}

pub fn position(env: &Env, identity: &Address) -> Option<u32> {
    env.storage()
        .persistent()
        .get(&DataKey::Position(identity.clone()))
}

pub fn contains(env: &Env, identity: &Address) -> bool {
    position(env, identity).is_some()
}

pub fn get(env: &Env, identity: &Address) -> Option<Beneficiary> {
    let index = position(env, identity)?;
    load(env).get(index)
}

/// `current - removed + added`, rejected when it leaves `[0, 10 000]`.
fn next_total(current: u32, removed: u32, added: u32) -> Result<u32, VaultError> {
    current
        .checked_sub(removed)
        .and_then(|t| t.checked_add(added))
        .filter(|t| *t <= MAX_SHARE_BPS)
        .ok_or(VaultError::ShareExceeded)
}

pub fn add(env: &Env, identity: &Address, share_bps: u32) -> Result<(), VaultError> {
    if *identity == env.current_contract_address() {
        return Err(VaultError::InvalidIdentity);
    }
    if contains(env, identity) {
        return Err(VaultError::DuplicateBeneficiary);
    }
    let total = next_total(total_share_bps(env), 0, share_bps)?;

    let mut beneficiaries = load(env);
    let index = beneficiaries.len();
    beneficiaries.push_back(Beneficiary {
        identity: identity.clone(),
        share_bps,
    });

    store(env, &beneficiaries);
    set_position(env, identity, index);
    set_total_share_bps(env, total);
    Ok(())
}

/// Replaces a share in place and returns the previous value.
pub fn update(env: &Env, identity: &Address, new_share_bps: u32) -> Result<u32, VaultError> {
    let index = position(env, identity).ok_or(VaultError::NotRegistered)?;
    let mut beneficiaries = load(env);
    let mut entry = beneficiaries.get(index).ok_or(VaultError::NotRegistered)?;

    let previous = entry.share_bps;
    let total = next_total(total_share_bps(env), previous, new_share_bps)?;

    entry.share_bps = new_share_bps;
    beneficiaries.set(index, entry);

    store(env, &beneficiaries);
    set_total_share_bps(env, total);
    Ok(previous)
}

/// Swap-removes an entry and returns the share it held.
pub fn remove(env: &Env, identity: &Address) -> Result<u32, VaultError> {
    let index = position(env, identity).ok_or(VaultError::NotRegistered)?;
    let mut beneficiaries = load(env);
    let removed = beneficiaries.get(index).ok_or(VaultError::NotRegistered)?;

    let last = beneficiaries.len().saturating_sub(1);
    if index != last {
        let moved = beneficiaries.get(last).ok_or(VaultError::NotRegistered)?;
        set_position(env, &moved.identity, index);
        beneficiaries.set(index, moved);
    }
    beneficiaries.pop_back();

    store(env, &beneficiaries);
    env.storage()
        .persistent()
        .remove(&DataKey::Position(identity.clone()));
    let total = next_total(total_share_bps(env), removed.share_bps, 0)?;
    set_total_share_bps(env, total);
    Ok(removed.share_bps)
}
