//! Proportional distribution engine.
//!
//! Each beneficiary receives `floor(balance × share_bps / 10 000)`. Integer
//! flooring leaves a remainder (dust), which is added to the **last**
//! beneficiary in registry order so the whole balance always leaves the
//! vault.
//!
//! Planning is pure; [`execute`] only issues transfers for a finished plan.

use soroban_sdk::{Address, Env, Vec};

use crate::custody::Custodian;
use crate::errors::VaultError;
use crate::types::{Beneficiary, DistributionPlan, Payout, MAX_SHARE_BPS};

/// `floor(total × share_bps / 10 000)` without overflowing for large
/// balances: `total = q·10 000 + r`, so the product splits into `q·bps`
/// plus `floor(r·bps / 10 000)`.
pub fn proportional_share(total: i128, share_bps: u32) -> i128 {
    let bps = share_bps as i128;
    let denom = MAX_SHARE_BPS as i128;
    (total / denom) * bps + (total % denom) * bps / denom
}

pub fn plan(
    env: &Env,
    balance: i128,
    beneficiaries: &Vec<Beneficiary>,
) -> Result<DistributionPlan, VaultError> {
    if beneficiaries.is_empty() {
        return Err(VaultError::NoBeneficiaries);
    }
    let balance = balance.max(0);

    let mut payouts: Vec<Payout> = Vec::new(env);
    let mut distributed: i128 = 0;
    for b in beneficiaries.iter() {
        let amount = proportional_share(balance, b.share_bps);
        distributed += amount;
        payouts.push_back(Payout {
            recipient: b.identity,
            amount,
        });
    }

    let dust = balance - distributed;
    if dust > 0 {
        let last_index = payouts.len() - 1;
        if let Some(mut last) = payouts.get(last_index) {
            last.amount += dust;
            payouts.set(last_index, last);
        }
    }

    Ok(DistributionPlan {
        balance,
        dust,
        payouts,
    })
}

/// Number of payouts that actually move value.
pub fn recipient_count(plan: &DistributionPlan) -> u32 {
    plan.payouts.iter().filter(|p| p.amount > 0).count() as u32
}

/// Sends every non-zero payout of `plan`. The first failure aborts the
/// whole distribution.
pub fn execute<C: Custodian>(
    custodian: &C,
    asset: &Address,
    plan: &DistributionPlan,
) -> Result<(), VaultError> {
    for payout in plan.payouts.iter().filter(|p| p.amount > 0) {
        custodian.send(asset, &payout.recipient, payout.amount)?;
    }
    Ok(())
}
