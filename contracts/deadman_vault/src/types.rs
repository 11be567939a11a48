use soroban_sdk::{contracttype, Address, BytesN, Vec};

/// 10 000 basis points == 100 %.
pub const MAX_SHARE_BPS: u32 = 10_000;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Config,
    LastAttestedAt,
    Beneficiaries,
    Position(Address),
    TotalShareBps,
    Unlocked,
    CommittedDigest,
    Claimed(BytesN<32>),
    Receipt(Address),
}

/// Invariant strictness, fixed when the vault is created.
///
/// | Check                                         | Strict | Lenient |
/// |-----------------------------------------------|--------|---------|
/// | unlock needs ≥1 beneficiary and 10 000 bps    | yes    | no      |
/// | only beneficiaries may trigger distribution   | yes    | no      |
/// | owner loses withdrawal once inactive/unlocked | yes    | no      |
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Enforcement {
    Strict = 0,
    Lenient = 1,
}

/// Which asset an operation moves. `Native` resolves to the native asset
/// contract recorded in [`VaultConfig`].
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Asset {
    Native,
    Token(Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultConfig {
    pub owner: Address,
    /// Seconds of owner silence after which the vault may be unlocked.
    pub inactivity_period: u64,
    pub native_asset: Address,
    pub enforcement: Enforcement,
    pub created_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Beneficiary {
    pub identity: Address,
    pub share_bps: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Payout {
    pub recipient: Address,
    pub amount: i128,
}

/// Result of splitting a balance across the registry.
///
/// `payouts` follows registry order and already includes `dust` in the last
/// entry, so the amounts always sum to `balance`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributionPlan {
    pub balance: i128,
    pub dust: i128,
    pub payouts: Vec<Payout>,
}

/// Persisted record of the latest distribution of one asset.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributionReceipt {
    pub asset: Address,
    pub balance: i128,
    pub dust: i128,
    pub recipients: u32,
    pub triggered_by: Address,
    pub distributed_at: u64,
}
