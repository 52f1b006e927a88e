//! Execute unstake instruction handler.
//!
//! Pays out every unstake request whose period has elapsed.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::state::{CentralState, InstructionKind, StakeAccount, StakePool};
use crate::utils::transfer_from_pool_vault;

/// Accounts required to execute matured unstake requests.
#[derive(Accounts)]
pub struct ExecuteUnstake<'info> {
    /// The staker.
    pub owner: Signer<'info>,

    /// The central state holding the instruction gate.
    #[account(
        seeds = [CENTRAL_STATE_SEED],
        bump = central_state.bump
    )]
    pub central_state: Account<'info, CentralState>,

    /// The stake pool.
    #[account(
        seeds = [STAKE_POOL_SEED, stake_pool.owner.as_ref()],
        bump = stake_pool.bump,
        has_one = vault @ StakingError::VaultMismatch
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

    /// Account receiving the unstaked tokens.
    #[account(
        mut,
        constraint = destination.mint == vault.mint @ StakingError::MintMismatch
    )]
    pub destination: Account<'info, TokenAccount>,

    /// The pool's vault.
    #[account(mut)]
    pub vault: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<ExecuteUnstake>) -> Result<()> {
    let clock = Clock::get()?;
    ctx.accounts
        .central_state
        .assert_instruction_allowed(InstructionKind::ExecuteUnstake)?;
    let amount = ctx.accounts.stake_account.execute_unstake(clock.unix_timestamp)?;

    transfer_from_pool_vault(
        &ctx.accounts.token_program,
        &ctx.accounts.vault,
        &ctx.accounts.destination,
        &ctx.accounts.stake_pool,
        amount,
    )?;

    msg!("Executed unstake of {} tokens", amount);
    msg!(
        "Pending requests: {}",
        ctx.accounts.stake_account.pending_unstake_requests.len()
    );

    Ok(())
}
