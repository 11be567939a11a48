use common::CommonError;
use soroban_sdk::contracterror;

/// Every failure the vault can surface. All of them abort the invocation;
/// the host discards any storage written before the error.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 1 – 9   | Lifecycle / configuration      |
/// | 10 – 19 | Access control & call safety   |
/// | 20 – 29 | Beneficiary registry           |
/// | 30 – 39 | Liveness timer & unlock gate   |
/// | 40 – 49 | Claim registry                 |
/// | 50 – 59 | Amounts & asset custody        |
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidConfig = 3,

    Unauthorized = 10,
    OwnerInactive = 11,
    Reentrant = 12,

    InvalidIdentity = 20,
    DuplicateBeneficiary = 21,
    NotRegistered = 22,
    ShareExceeded = 23,
    NoBeneficiaries = 24,
    IncompleteAllocation = 25,

    StillActive = 30,
    NotUnlocked = 31,

    AlreadyClaimed = 40,
    InvalidProof = 41,

    InvalidAmount = 50,
    InsufficientBalance = 51,
    TransferFailed = 52,
}

impl From<CommonError> for VaultError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::Reentrant => VaultError::Reentrant,
        }
    }
}
