//! Claim rewards instruction handler.
//!
//! Handles claiming the stakers' rewards of a stake account without
//! unstaking. Rewards are minted by the central state.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::RewardsClaimed;
use crate::state::{CentralState, InstructionKind, StakeAccount, StakePool};
use crate::utils::{crank_pool, mint_from_central};

/// Accounts required for claiming rewards.
#[derive(Accounts)]
pub struct ClaimRewards<'info> {
    /// The staker.
    pub owner: Signer<'info>,

    /// The central state, mint authority of the staking token.
    #[account(
        mut,
        seeds = [CENTRAL_STATE_SEED],
        bump = central_state.bump,
        has_one = token_mint @ StakingError::MintMismatch
    )]
    pub central_state: Account<'info, CentralState>,

    /// The stake pool.
    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.owner.as_ref()],
        bump = stake_pool.bump
    )]
    pub stake_pool: Box<Account<'info, StakePool>>,

    /// The staker's stake account in this pool.
    #[account(
        mut,
        seeds = [STAKE_ACCOUNT_SEED, owner.key().as_ref(), stake_pool.key().as_ref()],
        bump = stake_account.bump,
        has_one = owner @ StakingError::Unauthorized,
        has_one = stake_pool @ StakingError::PoolMismatch
    )]
    pub stake_account: Account<'info, StakeAccount>,

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

/// Claim accumulated rewards.
///
/// # Arguments
/// * `ctx` - ClaimRewards accounts context
/// * `allow_zero_rewards` - Succeed even when nothing accrued
///
/// # Errors
/// Returns `NoClaimableRewards` when the account was already settled today or
/// nothing accrued, unless `allow_zero_rewards` is set.
pub fn handler(mut ctx: Context<ClaimRewards>, allow_zero_rewards: bool) -> Result<()> {
    let clock = Clock::get()?;
    let accounts = &mut ctx.accounts;
    accounts
        .central_state
        .assert_instruction_allowed(InstructionKind::ClaimRewards)?;
    let pool_key = accounts.stake_pool.key();

    crank_pool(
        pool_key,
        &mut accounts.stake_pool,
        &mut accounts.central_state,
        clock.unix_timestamp,
    )?;
    let reward = accounts.stake_account.claim_rewards(
        &mut accounts.stake_pool,
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

    msg!("Claimed {} tokens in rewards", reward);
    emit!(RewardsClaimed {
        position: accounts.stake_account.key(),
        owner: accounts.owner.key(),
        stake_pool: pool_key,
        amount: reward,
        day: accounts.stake_pool.current_day_index,
    });

    Ok(())
}
