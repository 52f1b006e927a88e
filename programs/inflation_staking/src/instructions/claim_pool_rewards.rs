//! Claim pool rewards instruction handler.
//!
//! Pays the pool owner's share of the inflation accrued since the last claim.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::PoolRewardsClaimed;
use crate::state::{CentralState, InstructionKind, StakePool};
use crate::utils::{crank_pool, mint_from_central};

/// Accounts required for claiming the owner's rewards.
#[derive(Accounts)]
pub struct ClaimPoolRewards<'info> {
    /// The pool owner.
    pub owner: Signer<'info>,

    /// The central state, mint authority of the staking token.
    #[account(
        mut,
        seeds = [CENTRAL_STATE_SEED],
        bump = central_state.bump,
        has_one = token_mint @ StakingError::MintMismatch
    )]
    pub central_state: Account<'info, CentralState>,

    /// The owner's stake pool.
    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, owner.key().as_ref()],
        bump = stake_pool.bump,
        has_one = owner @ StakingError::Unauthorized
    )]
    pub stake_pool: Box<Account<'info, StakePool>>,

    /// The staking token mint.
    #[account(mut)]
    pub token_mint: Account<'info, Mint>,

    /// Account receiving the rewards.
    #[account(
        mut,
        constraint = destination.mint == token_mint.key() @ StakingError::MintMismatch
    )]
    pub destination: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Claim the pool owner's rewards.
///
/// # Arguments
/// * `ctx` - ClaimPoolRewards accounts context
/// * `allow_zero_rewards` - Succeed even when nothing accrued
pub fn handler(mut ctx: Context<ClaimPoolRewards>, allow_zero_rewards: bool) -> Result<()> {
    let clock = Clock::get()?;
    let accounts = &mut ctx.accounts;
    accounts
        .central_state
        .assert_instruction_allowed(InstructionKind::ClaimPoolRewards)?;
    let pool_key = accounts.stake_pool.key();

    crank_pool(
        pool_key,
        &mut accounts.stake_pool,
        &mut accounts.central_state,
        clock.unix_timestamp,
    )?;
    let reward = accounts.stake_pool.claim_owner_rewards(
        &mut accounts.central_state,
        clock.unix_timestamp,
        allow_zero_rewards,
    )?;

    mint_from_central(
        &accounts.token_program,
        &accounts.token_mint,
        &accounts.destination,
        &accounts.central_state,
        reward,
    )?;

    msg!("Pool owner claimed {} tokens", reward);
    emit!(PoolRewardsClaimed {
        stake_pool: pool_key,
        owner: accounts.owner.key(),
        amount: reward,
        day: accounts.stake_pool.current_day_index,
    });

    Ok(())
}
