//! Pool admin instruction handlers.
//!
//! Activation and freezing of stake pools, reserved to the protocol authority.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::state::{CentralState, StakePool};
use crate::utils::crank_pool;

/// Accounts required for pool admin operations.
#[derive(Accounts)]
pub struct PoolAdmin<'info> {
    /// The admin authority.
    pub authority: Signer<'info>,

    /// The central state.
    #[account(
        mut,
        seeds = [CENTRAL_STATE_SEED],
        bump = central_state.bump,
        has_one = authority @ StakingError::Unauthorized
    )]
    pub central_state: Account<'info, CentralState>,

    /// The stake pool to modify.
    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.owner.as_ref()],
        bump = stake_pool.bump
    )]
    pub stake_pool: Box<Account<'info, StakePool>>,
}

/// Activate a pool. Accrual starts at the current day.
pub fn activate_pool_handler(mut ctx: Context<PoolAdmin>) -> Result<()> {
    let clock = Clock::get()?;
    let accounts = &mut ctx.accounts;

    accounts
        .stake_pool
        .activate(&accounts.central_state, clock.unix_timestamp)?;

    msg!(
        "Stake pool {} activated on day {}",
        accounts.stake_pool.key(),
        accounts.stake_pool.current_day_index
    );

    Ok(())
}

/// Freeze or unfreeze a pool.
///
/// Frozen pools keep accruing and allow exits and claims, but reject new
/// stakes, airdrops and bond activations.
///
/// # Arguments
/// * `ctx` - PoolAdmin accounts context
/// * `frozen` - True to freeze, false to unfreeze
pub fn freeze_pool_handler(mut ctx: Context<PoolAdmin>, frozen: bool) -> Result<()> {
    let clock = Clock::get()?;
    let accounts = &mut ctx.accounts;
    let pool_key = accounts.stake_pool.key();

    crank_pool(
        pool_key,
        &mut accounts.stake_pool,
        &mut accounts.central_state,
        clock.unix_timestamp,
    )?;
    accounts.stake_pool.freeze(frozen)?;

    msg!(
        "Stake pool {} {}",
        pool_key,
        if frozen { "FROZEN" } else { "UNFROZEN" }
    );

    Ok(())
}
