//! Scoped reentrancy lock.
//!
//! A [`ReentrancyGuard`] sets a flag in instance storage when acquired and
//! clears it when dropped, so every exit path of the guarded function
//! (including `?` early returns) releases the lock. A second acquisition
//! while the flag is set fails with [`CommonError::Reentrant`].
//!
//! ```rust,ignore
//! pub fn payout(env: Env, caller: Address) -> Result<(), MyError> {
//!     caller.require_auth();
//!     let _guard = ReentrancyGuard::acquire(&env)?;
//!     // checks, effects, then the external call
//!     Ok(())
//! }
//! ```
//!
//! Bind the guard to a named variable (`_guard`, not `_`): `let _ = ...`
//! drops it immediately.

use soroban_sdk::{symbol_short, Env, Symbol};

use crate::CommonError;

const ENTERED: Symbol = symbol_short!("ENTERED");

/// Returns `true` while a guarded call is in progress.
pub fn is_entered(env: &Env) -> bool {
    env.storage().instance().get(&ENTERED).unwrap_or(false)
}

pub struct ReentrancyGuard<'a> {
    env: &'a Env,
}

impl<'a> ReentrancyGuard<'a> {
    pub fn acquire(env: &'a Env) -> Result<Self, CommonError> {
        if is_entered(env) {
            return Err(CommonError::Reentrant);
        }
        env.storage().instance().set(&ENTERED, &true);
        Ok(Self { env })
    }
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        self.env.storage().instance().remove(&ENTERED);
    }
}
