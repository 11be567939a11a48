#![no_main]

use arbitrary::Arbitrary;
use deadman_vault::{merkle, Asset, Enforcement, VaultContract, VaultContractClient, VaultError};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token::{StellarAssetClient, TokenClient},
    Address, Env, Vec as SorobanVec,
};

const PERIOD: u64 = 3_600;

/// Every vault entry point that changes state, plus time advancement.
///
/// `who` picks from the user pool; amounts are bounded so most actions get
/// past input validation.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Attest,
    AdvanceTime { delta: u16 },
    AddBeneficiary { who: u8, share_bps: u16 },
    UpdateBeneficiary { who: u8, share_bps: u16 },
    RemoveBeneficiary { who: u8 },
    Deposit { who: u8, amount: u32 },
    Withdraw { amount: u32 },
    EmergencyUnlock,
    Distribute { who: u8 },
    Claim { who: u8, forged: bool },
}

#[derive(Arbitrary, Debug)]
pub struct FuzzInput {
    pub lenient: bool,
    pub actions: Vec<FuzzAction>,
}

fuzz_target!(|input: FuzzInput| {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let native = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(VaultContract, ());
    let client = VaultContractClient::new(&env, &contract_id);

    let enforcement = if input.lenient {
        Enforcement::Lenient
    } else {
        Enforcement::Strict
    };
    if client
        .try_initialize(&owner, &PERIOD, &native, &enforcement)
        .is_err()
    {
        return;
    }

    let users: Vec<Address> = (0..4).map(|_| Address::generate(&env)).collect();
    let claim_amounts: [i128; 4] = [10, 20, 30, 40];

    // Every user can claim a fixed amount.
    let mut leaves = SorobanVec::new(&env);
    for (u, amount) in users.iter().zip(claim_amounts) {
        leaves.push_back(merkle::claim_leaf(&env, u, amount));
    }
    let Some(root) = merkle::build_root(&env, &leaves) else {
        return;
    };
    client.set_committed_digest(&owner, &root);

    let token = TokenClient::new(&env, &native);
    let supply = || -> i128 {
        token.balance(&contract_id)
            + token.balance(&owner)
            + users.iter().map(|u| token.balance(u)).sum::<i128>()
    };
    let mut minted: i128 = 0;
    let mut was_unlocked = false;
    let mut was_claimed = [false; 4];
    let mut last_attested = client.get_last_attested_at();

    for action in input.actions.into_iter().take(64) {
        let pick = |who: u8| &users[who as usize % users.len()];
        match action {
            FuzzAction::Attest => {
                let _ = client.try_attest(&owner);
            }
            FuzzAction::AdvanceTime { delta } => {
                let ts = env.ledger().timestamp().saturating_add(delta as u64);
                env.ledger().set_timestamp(ts);
            }
            FuzzAction::AddBeneficiary { who, share_bps } => {
                let _ = client.try_add_beneficiary(&owner, pick(who), &(share_bps as u32));
            }
            FuzzAction::UpdateBeneficiary { who, share_bps } => {
                let _ = client.try_update_beneficiary(&owner, pick(who), &(share_bps as u32));
            }
            FuzzAction::RemoveBeneficiary { who } => {
                let _ = client.try_remove_beneficiary(&owner, pick(who));
            }
            FuzzAction::Deposit { who, amount } => {
                let amt = (amount as i128).max(1);
                StellarAssetClient::new(&env, &native).mint(pick(who), &amt);
                minted += amt;
                let _ = client.try_deposit_asset(pick(who), &Asset::Native, &amt);
            }
            FuzzAction::Withdraw { amount } => {
                let _ = client.try_withdraw(&owner, &Asset::Native, &(amount as i128));
            }
            FuzzAction::EmergencyUnlock => {
                let active = client.is_active();
                let result = client.try_emergency_unlock(&owner);
                if active {
                    assert_eq!(
                        result,
                        Err(Ok(VaultError::StillActive)),
                        "INVARIANT VIOLATION: unlock accepted while owner active"
                    );
                }
            }
            FuzzAction::Distribute { who } => {
                let _ = client.try_distribute_asset(pick(who), &Asset::Native);
            }
            FuzzAction::Claim { who, forged } => {
                let index = who as usize % users.len();
                let proof = merkle::build_proof(&env, &leaves, index as u32)
                    .unwrap_or_else(|| SorobanVec::new(&env));
                let amount = if forged {
                    claim_amounts[index] + 1
                } else {
                    claim_amounts[index]
                };
                let _ = client.try_claim(&users[index], &proof, &amount);
            }
        }

        // ── Post-action invariant checks ──
        let total = client.get_total_share_bps();
        let sum: u32 = client.get_beneficiaries().iter().map(|b| b.share_bps).sum();
        assert_eq!(total, sum, "INVARIANT VIOLATION: stored total != sum of shares");
        assert!(total <= 10_000, "INVARIANT VIOLATION: registry over-allocated");

        let unlocked = client.is_unlocked();
        assert!(!was_unlocked || unlocked, "INVARIANT VIOLATION: vault relocked");
        was_unlocked = unlocked;

        for (i, u) in users.iter().enumerate() {
            let claimed = client.is_claimed(&client.claim_leaf(u, &claim_amounts[i]));
            assert!(!was_claimed[i] || claimed, "INVARIANT VIOLATION: claim released");
            was_claimed[i] = claimed;
        }

        let attested = client.get_last_attested_at();
        assert!(attested >= last_attested, "INVARIANT VIOLATION: attestation went backwards");
        last_attested = attested;

        assert_eq!(supply(), minted, "INVARIANT VIOLATION: native supply not conserved");
    }
});
