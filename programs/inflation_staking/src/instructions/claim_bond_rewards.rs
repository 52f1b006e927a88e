//! Claim bond rewards instruction handler.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::RewardsClaimed;
use crate::state::{BondAccount, CentralState, InstructionKind, StakePool};
use crate::utils::{crank_pool, mint_from_central};

/// Accounts required to claim the rewards of a bond.
#[derive(Accounts)]
pub struct ClaimBondRewards<'info> {
    /// The bond owner.
    pub buyer: Signer<'info>,

    /// The central state, mint authority of the staking token.
    #[account(
        mut,
        seeds = [CENTRAL_STATE_SEED],
        bump = central_state.bump,
        has_one = token_mint @ StakingError::MintMismatch
    )]
    pub central_state: Account<'info, CentralState>,

    /// The pool the bond stakes into.
    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.owner.as_ref()],
        bump = stake_pool.bump
    )]
    pub stake_pool: Box<Account<'info, StakePool>>,

    /// The bond.
    #[account(
        mut,
        has_one = stake_pool @ StakingError::PoolMismatch,
        constraint = bond_account.owner == buyer.key() @ StakingError::Unauthorized
    )]
    pub bond_account: Box<Account<'info, BondAccount>>,

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

pub fn handler(mut ctx: Context<ClaimBondRewards>, allow_zero_rewards: bool) -> Result<()> {
    let clock = Clock::get()?;
    let accounts = &mut ctx.accounts;
    accounts
        .central_state
        .assert_instruction_allowed(InstructionKind::ClaimBondRewards)?;
    let pool_key = accounts.stake_pool.key();

    crank_pool(
        pool_key,
        &mut accounts.stake_pool,
        &mut accounts.central_state,
        clock.unix_timestamp,
    )?;
    let reward = accounts.bond_account.claim_rewards(
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

    msg!("Claimed {} tokens in bond rewards", reward);
    emit!(RewardsClaimed {
        position: accounts.bond_account.key(),
        owner: accounts.buyer.key(),
        stake_pool: pool_key,
        amount: reward,
        day: accounts.stake_pool.current_day_index,
    });

    Ok(())
}
