//! Pool owner instruction handlers.
//!
//! Parameter changes and closing of a stake pool by its owner. Accruing pools
//! are cranked first so that a change only applies from the current day on.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::state::{CentralState, InstructionKind, StakePool};
use crate::utils::crank_pool;

/// Accounts required for pool owner operations.
#[derive(Accounts)]
pub struct PoolOwnerControl<'info> {
    /// The pool owner.
    pub owner: Signer<'info>,

    /// The central state.
    #[account(
        mut,
        seeds = [CENTRAL_STATE_SEED],
        bump = central_state.bump
    )]
    pub central_state: Account<'info, CentralState>,

    /// The stake pool to modify.
    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, owner.key().as_ref()],
        bump = stake_pool.bump,
        has_one = owner @ StakingError::Unauthorized
    )]
    pub stake_pool: Box<Account<'info, StakePool>>,
}

impl<'info> PoolOwnerControl<'info> {
    fn crank_if_accruing(&mut self, now: i64) -> Result<()> {
        if self.stake_pool.is_accruing() {
            let pool_key = self.stake_pool.key();
            crank_pool(pool_key, &mut self.stake_pool, &mut self.central_state, now)?;
        }
        Ok(())
    }
}

/// Set the smallest balance new stake accounts must hold.
///
/// Existing positions keep the minimum in force when they opened.
pub fn set_minimum_stake_amount_handler(
    mut ctx: Context<PoolOwnerControl>,
    amount: u64,
) -> Result<()> {
    let clock = Clock::get()?;
    let accounts = &mut ctx.accounts;
    accounts
        .central_state
        .assert_instruction_allowed(InstructionKind::ChangePoolSettings)?;
    accounts.crank_if_accruing(clock.unix_timestamp)?;

    let previous = accounts.stake_pool.minimum_stake_amount;
    accounts.stake_pool.set_minimum_stake_amount(
        &mut accounts.central_state,
        amount,
        clock.unix_timestamp,
    )?;

    msg!("Minimum stake amount: {} -> {}", previous, amount);

    Ok(())
}

/// Set the percentage of the pool's rewards paid to stakers.
pub fn set_stakers_part_handler(mut ctx: Context<PoolOwnerControl>, stakers_part: u64) -> Result<()> {
    let clock = Clock::get()?;
    let accounts = &mut ctx.accounts;
    accounts
        .central_state
        .assert_instruction_allowed(InstructionKind::ChangePoolSettings)?;
    accounts.crank_if_accruing(clock.unix_timestamp)?;

    let previous = accounts.stake_pool.stakers_part;
    accounts.stake_pool.set_stakers_part(
        &mut accounts.central_state,
        stakers_part,
        clock.unix_timestamp,
    )?;

    msg!("Stakers part: {}% -> {}%", previous, stakers_part);

    Ok(())
}

/// Close an empty pool.
///
/// # Errors
/// Returns an error if the pool still holds stake, bonds or airdrops, or if
/// the owner has rewards left to claim.
pub fn close_pool_handler(mut ctx: Context<PoolOwnerControl>) -> Result<()> {
    let clock = Clock::get()?;
    let accounts = &mut ctx.accounts;
    accounts
        .central_state
        .assert_instruction_allowed(InstructionKind::ChangePoolSettings)?;
    accounts.crank_if_accruing(clock.unix_timestamp)?;

    accounts
        .stake_pool
        .mark_closed(&mut accounts.central_state, clock.unix_timestamp)?;

    msg!("Stake pool {} closed", accounts.stake_pool.key());

    Ok(())
}
