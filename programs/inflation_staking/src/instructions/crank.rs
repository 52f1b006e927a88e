//! Crank instruction handler.
//!
//! Advances a pool's reward history to the current day. Anyone may call it.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::{CentralState, InstructionKind, StakePool};
use crate::utils::crank_pool;

/// Accounts required to crank a pool.
#[derive(Accounts)]
pub struct Crank<'info> {
    /// The central state.
    #[account(
        mut,
        seeds = [CENTRAL_STATE_SEED],
        bump = central_state.bump
    )]
    pub central_state: Account<'info, CentralState>,

    /// The stake pool to crank.
    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.owner.as_ref()],
        bump = stake_pool.bump
    )]
    pub stake_pool: Box<Account<'info, StakePool>>,
}

pub fn handler(mut ctx: Context<Crank>) -> Result<()> {
    let clock = Clock::get()?;
    let accounts = &mut ctx.accounts;
    accounts
        .central_state
        .assert_instruction_allowed(InstructionKind::Crank)?;
    let pool_key = accounts.stake_pool.key();

    let outcome = crank_pool(
        pool_key,
        &mut accounts.stake_pool,
        &mut accounts.central_state,
        clock.unix_timestamp,
    )?;
    if outcome.days() == 0 {
        msg!("Pool {} already at day {}", pool_key, outcome.to_day);
    }

    Ok(())
}
