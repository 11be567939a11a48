//! Audit-trail events emitted by the vault. The contract never reads them.

use soroban_sdk::{symbol_short, Address, BytesN, Env, IntoVal, Symbol, Val};

use crate::types::Enforcement;

// ── Internal helper ───────────────────────────────────────────────────────────

fn emit<T: IntoVal<Env, Val>>(env: &Env, topic: &str, data: T) {
    #[allow(deprecated)]
    env.events()
        .publish((symbol_short!("VAULT"), Symbol::new(env, topic)), data);
}

// ── Event structs ─────────────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub inactivity_period: u64,
    pub native_asset: Address,
    pub enforcement: Enforcement,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttestedEvent {
    pub owner: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferEvent {
    pub counterparty: Address,
    pub asset: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnlockedEvent {
    pub last_attested_at: u64,
    pub total_share_bps: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BeneficiaryEvent {
    pub identity: Address,
    pub previous_share_bps: u32,
    pub share_bps: u32,
    pub total_share_bps: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DigestSetEvent {
    pub digest: BytesN<32>,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributedEvent {
    pub asset: Address,
    pub balance: i128,
    pub dust: i128,
    pub recipients: u32,
    pub triggered_by: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimedEvent {
    pub claimant: Address,
    pub leaf: BytesN<32>,
    pub amount: i128,
    pub timestamp: u64,
}

// ── Publishers ────────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    owner: &Address,
    inactivity_period: u64,
    native_asset: &Address,
    enforcement: Enforcement,
) {
    emit(
        env,
        "initialized",
        InitializedEvent {
            owner: owner.clone(),
            inactivity_period,
            native_asset: native_asset.clone(),
            enforcement,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_attested(env: &Env, owner: &Address, attested_at: u64) {
    emit(
        env,
        "attested",
        AttestedEvent {
            owner: owner.clone(),
            timestamp: attested_at,
        },
    );
}

pub fn publish_deposited(env: &Env, from: &Address, asset: &Address, amount: i128) {
    emit(
        env,
        "deposited",
        TransferEvent {
            counterparty: from.clone(),
            asset: asset.clone(),
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, owner: &Address, asset: &Address, amount: i128) {
    emit(
        env,
        "withdrawn",
        TransferEvent {
            counterparty: owner.clone(),
            asset: asset.clone(),
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unlocked(env: &Env, last_attested_at: u64, total_share_bps: u32) {
    emit(
        env,
        "unlocked",
        UnlockedEvent {
            last_attested_at,
            total_share_bps,
            timestamp: env.ledger().timestamp(),
        },
    );
}

/// `topic` is one of `ben_added`, `ben_updated`, `ben_removed`.
pub fn publish_beneficiary(
    env: &Env,
    topic: &str,
    identity: &Address,
    previous_share_bps: u32,
    share_bps: u32,
    total_share_bps: u32,
) {
    emit(
        env,
        topic,
        BeneficiaryEvent {
            identity: identity.clone(),
            previous_share_bps,
            share_bps,
            total_share_bps,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_digest_set(env: &Env, digest: &BytesN<32>) {
    emit(
        env,
        "digest_set",
        DigestSetEvent {
            digest: digest.clone(),
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_distributed(
    env: &Env,
    asset: &Address,
    balance: i128,
    dust: i128,
    recipients: u32,
    triggered_by: &Address,
) {
    emit(
        env,
        "distributed",
        DistributedEvent {
            asset: asset.clone(),
            balance,
            dust,
            recipients,
            triggered_by: triggered_by.clone(),
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_claimed(env: &Env, claimant: &Address, leaf: &BytesN<32>, amount: i128) {
    emit(
        env,
        "claimed",
        ClaimedEvent {
            claimant: claimant.clone(),
            leaf: leaf.clone(),
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}
