//! Asset custody: the only place the vault talks to token contracts.
//!
//! Every entry point finishes its checks and bookkeeping before calling into
//! a [`Custodian`]. Token contracts are reached with `try_invoke_contract`
//! so a failing or panicking token surfaces as
//! [`VaultError::TransferFailed`] instead of trapping the vault.

use soroban_sdk::{symbol_short, vec, Address, Env, IntoVal, InvokeError, Val, Vec};

use crate::errors::VaultError;

pub trait Custodian {
    /// Balance of `asset` held by the vault.
    fn balance(&self, asset: &Address) -> Result<i128, VaultError>;

    /// Moves `amount` of `asset` out of the vault to `to`.
    fn send(&self, asset: &Address, to: &Address, amount: i128) -> Result<(), VaultError>;

    /// Pulls `amount` of `asset` from `from` into the vault. `from` must have
    /// authorised the invocation.
    fn receive(&self, asset: &Address, from: &Address, amount: i128) -> Result<(), VaultError>;
}

/// [`Custodian`] over SEP-41 token contracts (including Stellar Asset
/// Contracts, which is how the native currency is held).
pub struct TokenCustodian<'a> {
    env: &'a Env,
}

impl<'a> TokenCustodian<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    fn transfer(
        &self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), VaultError> {
        let env = self.env;
        let args: Vec<Val> = vec![
            env,
            from.clone().into_val(env),
            to.clone().into_val(env),
            amount.into_val(env),
        ];
        match env.try_invoke_contract::<(), InvokeError>(asset, &symbol_short!("transfer"), args) {
            Ok(Ok(())) => Ok(()),
            _ => Err(VaultError::TransferFailed),
        }
    }
}

impl Custodian for TokenCustodian<'_> {
    fn balance(&self, asset: &Address) -> Result<i128, VaultError> {
        let env = self.env;
        let args: Vec<Val> = vec![env, env.current_contract_address().into_val(env)];
        match env.try_invoke_contract::<i128, InvokeError>(asset, &symbol_short!("balance"), args) {
            Ok(Ok(balance)) => Ok(balance),
            _ => Err(VaultError::TransferFailed),
        }
    }

    fn send(&self, asset: &Address, to: &Address, amount: i128) -> Result<(), VaultError> {
        let vault = self.env.current_contract_address();
        self.transfer(asset, &vault, to, amount)
    }

    fn receive(&self, asset: &Address, from: &Address, amount: i128) -> Result<(), VaultError> {
        let vault = self.env.current_contract_address();
        self.transfer(asset, from, &vault, amount)
    }
}
