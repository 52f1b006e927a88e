//! Fixtures shared by the unit tests of the record types.

use std::sync::Mutex;

use anchor_lang::prelude::*;
use anchor_lang::solana_program::entrypoint::SUCCESS;
use anchor_lang::solana_program::program_pack::Pack;
use anchor_lang::solana_program::program_stubs::{set_syscall_stubs, SyscallStubs};
use anchor_spl::token::spl_token;

use crate::constants::SECONDS_PER_DAY;
use crate::error::StakingError;
use crate::state::{CentralState, StakePool};

/// Serializes the tests that install a clock, the stubs are process-wide.
static CLOCK_LOCK: Mutex<()> = Mutex::new(());

struct FixedClock(i64);

impl SyscallStubs for FixedClock {
    fn sol_get_clock_sysvar(&self, var_addr: *mut u8) -> u64 {
        let clock = Clock {
            unix_timestamp: self.0,
            ..Clock::default()
        };
        unsafe { *(var_addr as *mut Clock) = clock };
        SUCCESS
    }
}

/// Runs `f` with `Clock::get` returning `unix_timestamp`.
pub fn with_clock<R>(unix_timestamp: i64, f: impl FnOnce() -> R) -> R {
    let _guard = CLOCK_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    set_syscall_stubs(Box::new(FixedClock(unix_timestamp)));
    f()
}

/// Packed SPL token account data.
pub fn token_account_data(mint: Pubkey, owner: Pubkey, amount: u64) -> Vec<u8> {
    let account = spl_token::state::Account {
        mint,
        owner,
        amount,
        state: spl_token::state::AccountState::Initialized,
        ..Default::default()
    };
    let mut data = vec![0; spl_token::state::Account::LEN];
    spl_token::state::Account::pack(account, &mut data).unwrap();
    data
}

pub const DAY: i64 = SECONDS_PER_DAY;
pub const INFLATION: u64 = 200_000_000_000;

/// Serialized account data, discriminator included.
pub fn account_data<T: AccountSerialize>(account: &T) -> Vec<u8> {
    let mut data = Vec::new();
    account.try_serialize(&mut data).unwrap();
    data
}

/// Account info owned by `owner`, writable, for building handler contexts.
pub fn account_info<'a>(
    key: &'a Pubkey,
    is_signer: bool,
    lamports: &'a mut u64,
    data: &'a mut [u8],
    owner: &'a Pubkey,
) -> AccountInfo<'a> {
    AccountInfo::new(key, is_signer, true, lamports, data, owner, false, 0)
}

/// Asserts that `result` failed with `expected`.
#[track_caller]
pub fn assert_err<T: std::fmt::Debug>(result: Result<T>, expected: StakingError) {
    let expected: anchor_lang::error::Error = expected.into();
    assert_eq!(result.unwrap_err(), expected);
}

/// Central state created at timestamp zero.
pub fn central() -> CentralState {
    let mut central = CentralState::default();
    central.initialize(Pubkey::new_unique(), Pubkey::new_unique(), INFLATION, 0, 255);
    central
}

/// Pool activated at `now`, without minimum or unstake period.
pub fn active_pool(central: &CentralState, stakers_part: u64, now: i64) -> StakePool {
    let mut pool = StakePool::default();
    pool.initialize(
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        0,
        stakers_part,
        0,
        254,
        253,
    )
    .unwrap();
    pool.activate(central, now).unwrap();
    pool
}
