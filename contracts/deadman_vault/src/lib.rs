#![no_std]
#![allow(clippy::arithmetic_side_effects)]

//! # Dead-man's-switch vault
//!
//! A single owner deposits assets and must periodically `attest` that they
//! are still in control. Once the owner has been silent for longer than the
//! configured inactivity period the vault can be unlocked, after which:
//!
//! - **Distribution**: the whole balance of an asset is split across the
//!   registered beneficiaries by basis-point share, with the integer-division
//!   dust going to the last beneficiary in registry order.
//! - **Claims**: anyone holding a Merkle proof for `(caller, amount)` against
//!   the committed digest can withdraw that amount of the native asset, once.
//!
//! Every entry point that moves value holds a [`ReentrancyGuard`] for its
//! whole duration and writes all of its bookkeeping before calling into a
//! token contract.
//!
//! The invariant strictness is chosen once at `initialize` through
//! [`Enforcement`].

pub mod claims;
pub mod custody;
pub mod distribution;
pub mod errors;
pub mod events;
pub mod gate;
pub mod liveness;
pub mod merkle;
pub mod registry;
pub mod types;


pub use errors::VaultError;
pub use types::*;

use common::{extend_instance_ttl, extend_persistent_ttl, ReentrancyGuard};
use custody::{Custodian, TokenCustodian};
use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, Vec};

#[contract]
pub struct VaultContract;

#[contractimpl]
impl VaultContract {
    // ── Initialisation ────────────────────────────────────────────────────────

    /// Create the vault.
    ///
    /// * `inactivity_period`: seconds of owner silence before unlock is
    ///   possible; must be non-zero.
    /// * `native_asset`: token contract that holds the native currency (the
    ///   native Stellar Asset Contract on-chain). Claims are paid in it.
    /// * `enforcement`: invariant strictness, immutable afterwards.
    pub fn initialize(
        env: Env,
        owner: Address,
        inactivity_period: u64,
        native_asset: Address,
        enforcement: Enforcement,
    ) -> Result<(), VaultError> {
        if env.storage().instance().has(&DataKey::Config) {
            return Err(VaultError::AlreadyInitialized);
        }
        owner.require_auth();

        if inactivity_period == 0 {
            return Err(VaultError::InvalidConfig);
        }

        let now = env.ledger().timestamp();
        let config = VaultConfig {
            owner: owner.clone(),
            inactivity_period,
            native_asset: native_asset.clone(),
            enforcement,
            created_at: now,
        };

        let storage = env.storage().instance();
        storage.set(&DataKey::Config, &config);
        storage.set(&DataKey::LastAttestedAt, &now);
        storage.set(&DataKey::TotalShareBps, &0u32);
        storage.set(&DataKey::Unlocked, &false);
        extend_instance_ttl(&env);

        events::publish_initialized(&env, &owner, inactivity_period, &native_asset, enforcement);
        Ok(())
    }

    // ── Liveness ──────────────────────────────────────────────────────────────

    /// Owner proof of life. Resets the inactivity clock and returns the
    /// recorded timestamp.
    pub fn attest(env: Env, caller: Address) -> Result<u64, VaultError> {
        caller.require_auth();
        let config = Self::require_owner(&env, &caller)?;

        let attested_at = liveness::attest(&env);
        extend_instance_ttl(&env);
        registry::extend_ttl(&env);

        events::publish_attested(&env, &config.owner, attested_at);
        Ok(attested_at)
    }

    pub fn is_active(env: Env) -> Result<bool, VaultError> {
        let config = Self::load_config(&env)?;
        Ok(liveness::is_active(&env, &config))
    }

    pub fn get_last_attested_at(env: Env) -> Result<u64, VaultError> {
        Self::load_config(&env)?;
        Ok(liveness::last_attested_at(&env))
    }

    pub fn get_inactivity_period(env: Env) -> Result<u64, VaultError> {
        Ok(Self::load_config(&env)?.inactivity_period)
    }

    /// First ledger timestamp at which `emergency_unlock` stops failing with
    /// `StillActive`.
    pub fn unlock_eligible_at(env: Env) -> Result<u64, VaultError> {
        let config = Self::load_config(&env)?;
        Ok(liveness::unlock_eligible_at(&env, &config))
    }

    // ── Beneficiary registry ──────────────────────────────────────────────────

    pub fn add_beneficiary(
        env: Env,
        caller: Address,
        identity: Address,
        share_bps: u32,
    ) -> Result<(), VaultError> {
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        registry::add(&env, &identity, share_bps)?;
        extend_instance_ttl(&env);

        events::publish_beneficiary(
            &env,
            "ben_added",
            &identity,
            0,
            share_bps,
            registry::total_share_bps(&env),
        );
        Ok(())
    }

    pub fn update_beneficiary(
        env: Env,
        caller: Address,
        identity: Address,
        share_bps: u32,
    ) -> Result<(), VaultError> {
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let previous = registry::update(&env, &identity, share_bps)?;
        extend_instance_ttl(&env);

        events::publish_beneficiary(
            &env,
            "ben_updated",
            &identity,
            previous,
            share_bps,
            registry::total_share_bps(&env),
        );
        Ok(())
    }

    pub fn remove_beneficiary(
        env: Env,
        caller: Address,
        identity: Address,
    ) -> Result<(), VaultError> {
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let removed = registry::remove(&env, &identity)?;
        extend_instance_ttl(&env);

        events::publish_beneficiary(
            &env,
            "ben_removed",
            &identity,
            removed,
            0,
            registry::total_share_bps(&env),
        );
        Ok(())
    }

    /// Beneficiaries in registry order (the last one receives the dust).
    pub fn get_beneficiaries(env: Env) -> Vec<Beneficiary> {
        registry::load(&env)
    }

    pub fn get_beneficiary(env: Env, identity: Address) -> Option<Beneficiary> {
        registry::get(&env, &identity)
    }

    pub fn is_beneficiary(env: Env, identity: Address) -> bool {
        registry::contains(&env, &identity)
    }

    pub fn get_total_share_bps(env: Env) -> u32 {
        registry::total_share_bps(&env)
    }

    // ── Unlock gate ───────────────────────────────────────────────────────────

    /// Flip the vault into its terminal Unlocked state.
    ///
    /// Requires the owner to have been inactive past the window. Under
    /// [`Enforcement::Strict`] the registry must also be non-empty and fully
    /// allocated. Fails with `StillActive` inside the window even on an
    /// unlocked vault; past it, a repeat call succeeds without effect.
    pub fn emergency_unlock(env: Env, caller: Address) -> Result<(), VaultError> {
        caller.require_auth();
        let config = Self::require_owner(&env, &caller)?;

        if liveness::is_active(&env, &config) {
            return Err(VaultError::StillActive);
        }
        if gate::is_unlocked(&env) {
            return Ok(());
        }

        let total_share_bps = registry::total_share_bps(&env);
        if config.enforcement == Enforcement::Strict {
            if registry::load(&env).is_empty() {
                return Err(VaultError::NoBeneficiaries);
            }
            if total_share_bps != MAX_SHARE_BPS {
                return Err(VaultError::IncompleteAllocation);
            }
        }

        gate::latch(&env);
        extend_instance_ttl(&env);
        registry::extend_ttl(&env);

        events::publish_unlocked(&env, liveness::last_attested_at(&env), total_share_bps);
        Ok(())
    }

    pub fn is_unlocked(env: Env) -> bool {
        gate::is_unlocked(&env)
    }

    // ── Asset custody ─────────────────────────────────────────────────────────

    /// Pull `amount` of `asset` from `from` into the vault. Open to anyone at
    /// any time.
    pub fn deposit_asset(
        env: Env,
        from: Address,
        asset: Asset,
        amount: i128,
    ) -> Result<(), VaultError> {
        from.require_auth();
        let _guard = ReentrancyGuard::acquire(&env)?;
        let config = Self::load_config(&env)?;

        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        let token = Self::resolve(&config, &asset);

        TokenCustodian::new(&env).receive(&token, &from, amount)?;

        events::publish_deposited(&env, &from, &token, amount);
        Ok(())
    }

    /// Owner withdrawal. Under [`Enforcement::Strict`] this stops working as
    /// soon as the owner is inactive or the vault is unlocked.
    pub fn withdraw(
        env: Env,
        caller: Address,
        asset: Asset,
        amount: i128,
    ) -> Result<(), VaultError> {
        caller.require_auth();
        let _guard = ReentrancyGuard::acquire(&env)?;
        let config = Self::require_owner(&env, &caller)?;

        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        if config.enforcement == Enforcement::Strict
            && (!liveness::is_active(&env, &config) || gate::is_unlocked(&env))
        {
            return Err(VaultError::OwnerInactive);
        }

        let custodian = TokenCustodian::new(&env);
        let token = Self::resolve(&config, &asset);
        // Other tokens enforce their own balance check on transfer.
        if token == config.native_asset && custodian.balance(&token)? < amount {
            return Err(VaultError::InsufficientBalance);
        }

        custodian.send(&token, &config.owner, amount)?;

        events::publish_withdrawn(&env, &config.owner, &token, amount);
        Ok(())
    }

    pub fn get_balance(env: Env, asset: Asset) -> Result<i128, VaultError> {
        let config = Self::load_config(&env)?;
        TokenCustodian::new(&env).balance(&Self::resolve(&config, &asset))
    }

    // ── Distribution ──────────────────────────────────────────────────────────

    /// Pay out the vault's entire balance of `asset` to the beneficiaries.
    ///
    /// Under [`Enforcement::Strict`] only a registered beneficiary may
    /// trigger it; under [`Enforcement::Lenient`] anyone may. A failed
    /// transfer aborts the whole call, which can then be retried as is.
    pub fn distribute_asset(
        env: Env,
        caller: Address,
        asset: Asset,
    ) -> Result<DistributionPlan, VaultError> {
        caller.require_auth();
        let _guard = ReentrancyGuard::acquire(&env)?;
        let config = Self::load_config(&env)?;

        if !gate::is_unlocked(&env) {
            return Err(VaultError::NotUnlocked);
        }
        let beneficiaries = registry::load(&env);
        if beneficiaries.is_empty() {
            return Err(VaultError::NoBeneficiaries);
        }
        if config.enforcement == Enforcement::Strict && !registry::contains(&env, &caller) {
            return Err(VaultError::Unauthorized);
        }

        let custodian = TokenCustodian::new(&env);
        let token = Self::resolve(&config, &asset);
        let balance = custodian.balance(&token)?;
        let plan = distribution::plan(&env, balance, &beneficiaries)?;

        // Effects.
        let receipt = DistributionReceipt {
            asset: token.clone(),
            balance: plan.balance,
            dust: plan.dust,
            recipients: distribution::recipient_count(&plan),
            triggered_by: caller.clone(),
            distributed_at: env.ledger().timestamp(),
        };
        let key = DataKey::Receipt(token.clone());
        env.storage().persistent().set(&key, &receipt);
        extend_persistent_ttl(&env, &key);
        extend_instance_ttl(&env);

        // Interactions.
        distribution::execute(&custodian, &token, &plan)?;

        events::publish_distributed(
            &env,
            &token,
            plan.balance,
            plan.dust,
            receipt.recipients,
            &caller,
        );
        Ok(plan)
    }

    /// What `distribute_asset` would pay right now. Read-only and available
    /// before unlock.
    pub fn preview_distribution(env: Env, asset: Asset) -> Result<DistributionPlan, VaultError> {
        let config = Self::load_config(&env)?;
        let balance = TokenCustodian::new(&env).balance(&Self::resolve(&config, &asset))?;
        distribution::plan(&env, balance, &registry::load(&env))
    }

    pub fn get_distribution_receipt(
        env: Env,
        asset: Asset,
    ) -> Result<Option<DistributionReceipt>, VaultError> {
        let config = Self::load_config(&env)?;
        let token = Self::resolve(&config, &asset);
        Ok(env.storage().persistent().get(&DataKey::Receipt(token)))
    }

    // ── Claims ────────────────────────────────────────────────────────────────

    /// Replace the committed claim digest. Allowed at any time, including
    /// after unlock; the digest is not validated.
    pub fn set_committed_digest(
        env: Env,
        caller: Address,
        digest: BytesN<32>,
    ) -> Result<(), VaultError> {
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        claims::set_committed_digest(&env, &digest);
        extend_instance_ttl(&env);

        events::publish_digest_set(&env, &digest);
        Ok(())
    }

    pub fn get_committed_digest(env: Env) -> Option<BytesN<32>> {
        claims::committed_digest(&env)
    }

    /// Claim `amount` of the native asset with a membership proof for
    /// `(claimant, amount)`. Each leaf pays out at most once; a replay fails
    /// with `AlreadyClaimed` whatever proof accompanies it.
    ///
    /// Returns the leaf that was consumed.
    pub fn claim(
        env: Env,
        claimant: Address,
        proof: Vec<BytesN<32>>,
        amount: i128,
    ) -> Result<BytesN<32>, VaultError> {
        claimant.require_auth();
        let _guard = ReentrancyGuard::acquire(&env)?;
        let config = Self::load_config(&env)?;

        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        if !gate::is_unlocked(&env) {
            return Err(VaultError::NotUnlocked);
        }

        let leaf = merkle::claim_leaf(&env, &claimant, amount);
        if claims::is_claimed(&env, &leaf) {
            return Err(VaultError::AlreadyClaimed);
        }
        let digest = claims::committed_digest(&env).ok_or(VaultError::InvalidProof)?;
        if !merkle::verify(&env, &digest, &leaf, &proof) {
            return Err(VaultError::InvalidProof);
        }

        // Effects.
        claims::mark_claimed(&env, &leaf);
        extend_instance_ttl(&env);

        // Interactions.
        TokenCustodian::new(&env).send(&config.native_asset, &claimant, amount)?;

        events::publish_claimed(&env, &claimant, &leaf, amount);
        Ok(leaf)
    }

    pub fn is_claimed(env: Env, leaf: BytesN<32>) -> bool {
        claims::is_claimed(&env, &leaf)
    }

    /// The leaf a claim for `(claimant, amount)` consumes.
    pub fn claim_leaf(env: Env, claimant: Address, amount: i128) -> BytesN<32> {
        merkle::claim_leaf(&env, &claimant, amount)
    }

    // ── Views ─────────────────────────────────────────────────────────────────

    pub fn get_config(env: Env) -> Result<VaultConfig, VaultError> {
        Self::load_config(&env)
    }

    pub fn get_owner(env: Env) -> Result<Address, VaultError> {
        Ok(Self::load_config(&env)?.owner)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn load_config(env: &Env) -> Result<VaultConfig, VaultError> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(VaultError::NotInitialized)
    }

    fn require_owner(env: &Env, caller: &Address) -> Result<VaultConfig, VaultError> {
        let config = Self::load_config(env)?;
        if *caller != config.owner {
            return Err(VaultError::Unauthorized);
        }
        Ok(config)
    }

    fn resolve(config: &VaultConfig, asset: &Asset) -> Address {
        match asset {
            Asset::Native => config.native_asset.clone(),
            Asset::Token(token) => token.clone(),
        }
    }
}
