//! # State Space Explorer
//!
//! Runs vault action sequences and verifies snapshot and transition
//! invariants after every step.
//!
//! Each explored state is a [`VaultSnapshot`]; edges are [`VaultAction`]s.
//! Supply conservation is checked per step with the amount the step minted
//! from outside the system.

extern crate std;

use soroban_sdk::{Address, ConversionError, InvokeError};
use std::string::String;
use std::vec::Vec;

use deadman_vault::{Asset, VaultError};

use super::generators::VaultAction;
use super::invariants::{InvariantSet, SupplyConservation, TransitionInvariant, TransitionInvariantSet};
use super::{ActionOutcome, TestRunSummary, VaultSnapshot, VaultTestHarness};

// ── Explorer Configuration ───────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// Maximum number of actions executed in a single run.
    pub max_steps: usize,
    /// Halt on the first invariant violation.
    pub fail_fast: bool,
    pub record_snapshots: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            max_steps: 100,
            fail_fast: true,
            record_snapshots: false,
        }
    }
}

// ── Exploration Result ───────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ExplorationResult {
    pub summary: TestRunSummary,
    pub snapshots: Vec<VaultSnapshot>,
    pub action_log: Vec<(VaultAction, ActionOutcome)>,
}

impl ExplorationResult {
    pub fn passed(&self) -> bool {
        self.summary.passed()
    }

    /// Number of actions the contract accepted.
    pub fn accepted(&self) -> usize {
        self.action_log
            .iter()
            .filter(|(_, o)| matches!(o, ActionOutcome::Ok))
            .count()
    }
}

// ── State Space Explorer ─────────────────────────────────────────────────────

/// Drives a [`VaultTestHarness`] through action sequences.
///
/// `users` doubles as the beneficiary candidate pool and the depositor
/// pool; every one of them is tracked for supply conservation.
pub struct StateExplorer<'h, 'a> {
    harness: &'h VaultTestHarness<'a>,
    invariants: InvariantSet,
    transitions: TransitionInvariantSet,
    config: ExplorerConfig,
    users: Vec<Address>,
}

type TryResult<T, C = ConversionError> = Result<Result<T, C>, Result<VaultError, InvokeError>>;

fn outcome<T, C>(result: TryResult<T, C>) -> ActionOutcome {
    match result {
        Ok(_) => ActionOutcome::Ok,
        Err(Ok(e)) => ActionOutcome::ExpectedError(e as u32),
        Err(Err(e)) => ActionOutcome::UnexpectedError(std::format!("{:?}", e)),
    }
}

impl<'h, 'a> StateExplorer<'h, 'a> {
    pub fn new(
        harness: &'h VaultTestHarness<'a>,
        invariants: InvariantSet,
        transitions: TransitionInvariantSet,
        config: ExplorerConfig,
        users: Vec<Address>,
    ) -> Self {
        Self {
            harness,
            invariants,
            transitions,
            config,
            users,
        }
    }

    /// Explorer with default configuration and every built-in invariant.
    pub fn with_defaults(harness: &'h VaultTestHarness<'a>, users: Vec<Address>) -> Self {
        Self::new(
            harness,
            InvariantSet::vault_defaults(harness.period),
            TransitionInvariantSet::vault_defaults(),
            ExplorerConfig::default(),
            users,
        )
    }

    pub fn explore(&mut self, actions: &[VaultAction]) -> ExplorationResult {
        let mut summary = TestRunSummary::new();
        let mut snapshots = Vec::new();
        let mut action_log = Vec::new();

        let mut before = self.harness.snapshot(&self.users);
        if self.config.record_snapshots {
            snapshots.push(before.clone());
        }

        let steps = actions.len().min(self.config.max_steps);

        for action in actions.iter().take(steps) {
            let (outcome, minted) = self.execute_action(action);
            summary.entry_points_hit.insert(action_entry_point(action));
            summary.actions_executed += 1;
            summary.transitions_observed += 1;

            if let ActionOutcome::UnexpectedError(msg) = &outcome {
                summary.invariant_violations.push(std::format!(
                    "Action #{} ({:?}) trapped: {}",
                    summary.actions_executed,
                    action,
                    msg
                ));
            }
            action_log.push((action.clone(), outcome));

            let after = self.harness.snapshot(&self.users);
            let mut violations = self.invariants.check_all(&after);
            violations.extend(self.transitions.check_all(&before, &after));
            let conservation = SupplyConservation { minted };
            if let Err(msg) = conservation.check(&before, &after) {
                violations.push((conservation.name().into(), msg));
            }
            summary.invariant_checks += 1;

            for (name, msg) in violations {
                summary.invariant_violations.push(std::format!(
                    "After action #{} ({:?}): [{}] {}",
                    summary.actions_executed,
                    action,
                    name,
                    msg
                ));
            }

            if self.config.record_snapshots {
                snapshots.push(after.clone());
            }
            if self.config.fail_fast && !summary.passed() {
                break;
            }
            before = after;
        }

        ExplorationResult {
            summary,
            snapshots,
            action_log,
        }
    }

    fn user(&self, index: usize) -> &Address {
        &self.users[index % self.users.len()]
    }

    /// Runs one action; returns its outcome and the amount minted into the
    /// tracked set.
    fn execute_action(&self, action: &VaultAction) -> (ActionOutcome, i128) {
        let h = self.harness;
        let client = &h.client;
        match action {
            VaultAction::Attest => (outcome(client.try_attest(&h.owner)), 0),
            VaultAction::AdvanceTime { delta } => {
                h.env.advance_time(*delta);
                (ActionOutcome::Ok, 0)
            }
            VaultAction::AddBeneficiary { user_index, share_bps } => {
                let user = self.user(*user_index);
                (outcome(client.try_add_beneficiary(&h.owner, user, share_bps)), 0)
            }
            VaultAction::UpdateBeneficiary { user_index, share_bps } => {
                let user = self.user(*user_index);
                (outcome(client.try_update_beneficiary(&h.owner, user, share_bps)), 0)
            }
            VaultAction::RemoveBeneficiary { user_index } => {
                let user = self.user(*user_index);
                (outcome(client.try_remove_beneficiary(&h.owner, user)), 0)
            }
            VaultAction::Deposit { user_index, amount } => {
                let user = self.user(*user_index);
                h.env.mint_tokens(&h.native, user, *amount);
                (outcome(client.try_deposit_asset(user, &Asset::Native, amount)), *amount)
            }
            VaultAction::Withdraw { amount } => (
                outcome(client.try_withdraw(&h.owner, &Asset::Native, amount)),
                0,
            ),
            VaultAction::EmergencyUnlock => (outcome(client.try_emergency_unlock(&h.owner)), 0),
            VaultAction::Distribute { user_index } => {
                let user = self.user(*user_index);
                (outcome(client.try_distribute_asset(user, &Asset::Native)), 0)
            }
            VaultAction::Claim { claim_index } => match self.claim(*claim_index) {
                Some((claimant, amount)) => {
                    let proof = h.claim_proof(*claim_index % h.claim_count());
                    (outcome(client.try_claim(&claimant, &proof, &amount)), 0)
                }
                None => (ActionOutcome::Ok, 0),
            },
            VaultAction::ForgedClaim { claim_index } => match self.claim(*claim_index) {
                Some((claimant, amount)) => {
                    let proof = h.claim_proof(*claim_index % h.claim_count());
                    let inflated = amount.saturating_mul(2);
                    (outcome(client.try_claim(&claimant, &proof, &inflated)), 0)
                }
                None => (ActionOutcome::Ok, 0),
            },
        }
    }

    fn claim(&self, index: usize) -> Option<(Address, i128)> {
        let count = self.harness.claim_count();
        if count == 0 {
            return None;
        }
        self.harness.claim_entry(index % count)
    }
}

/// Entry point name of an action, for coverage tracking.
fn action_entry_point(action: &VaultAction) -> String {
    match action {
        VaultAction::Attest => "attest".into(),
        VaultAction::AdvanceTime { .. } => "advance_time".into(),
        VaultAction::AddBeneficiary { .. } => "add_beneficiary".into(),
        VaultAction::UpdateBeneficiary { .. } => "update_beneficiary".into(),
        VaultAction::RemoveBeneficiary { .. } => "remove_beneficiary".into(),
        VaultAction::Deposit { .. } => "deposit_asset".into(),
        VaultAction::Withdraw { .. } => "withdraw".into(),
        VaultAction::EmergencyUnlock => "emergency_unlock".into(),
        VaultAction::Distribute { .. } => "distribute_asset".into(),
        VaultAction::Claim { .. } | VaultAction::ForgedClaim { .. } => "claim".into(),
    }
}

/// Every state-changing vault entry point, for coverage calculation.
pub const VAULT_ENTRY_POINTS: &[&str] = &[
    "attest",
    "add_beneficiary",
    "update_beneficiary",
    "remove_beneficiary",
    "deposit_asset",
    "withdraw",
    "emergency_unlock",
    "distribute_asset",
    "claim",
];
