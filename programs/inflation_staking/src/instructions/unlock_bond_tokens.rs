//! Unlock bond tokens instruction handler.
//!
//! Releases the vested part of a bond from the pool vault to its owner.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::BondTokensUnlocked;
use crate::state::{BondAccount, CentralState, InstructionKind, StakePool};
use crate::utils::{crank_pool, transfer_from_pool_vault};

/// Accounts required to unlock vested bond tokens.
#[derive(Accounts)]
pub struct UnlockBondTokens<'info> {
    /// The bond owner.
    pub buyer: Signer<'info>,

    /// The central state.
    #[account(
        mut,
        seeds = [CENTRAL_STATE_SEED],
        bump = central_state.bump
    )]
    pub central_state: Account<'info, CentralState>,

    /// The pool the bond stakes into.
    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.owner.as_ref()],
        bump = stake_pool.bump,
        has_one = vault @ StakingError::VaultMismatch
    )]
    pub stake_pool: Box<Account<'info, StakePool>>,

    /// The bond.
    #[account(
        mut,
        has_one = stake_pool @ StakingError::PoolMismatch,
        constraint = bond_account.owner == buyer.key() @ StakingError::Unauthorized
    )]
    pub bond_account: Box<Account<'info, BondAccount>>,

    /// Account receiving the unlocked tokens.
    #[account(
        mut,
        constraint = destination.mint == central_state.token_mint @ StakingError::MintMismatch
    )]
    pub destination: Account<'info, TokenAccount>,

    /// The pool's vault.
    #[account(mut)]
    pub vault: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Unlock every vesting period elapsed since the last unlock.
///
/// # Errors
/// Returns an error if:
/// - Rewards accrued since the last settlement were not claimed
/// - No full period elapsed, or the schedule has not started
/// - Every bond token was already unlocked
pub fn handler(mut ctx: Context<UnlockBondTokens>) -> Result<()> {
    let clock = Clock::get()?;
    let accounts = &mut ctx.accounts;
    accounts
        .central_state
        .assert_instruction_allowed(InstructionKind::UnlockBondTokens)?;
    let pool_key = accounts.stake_pool.key();

    crank_pool(
        pool_key,
        &mut accounts.stake_pool,
        &mut accounts.central_state,
        clock.unix_timestamp,
    )?;
    let amount = accounts.bond_account.unlock(
        &mut accounts.stake_pool,
        &mut accounts.central_state,
        clock.unix_timestamp,
    )?;

    transfer_from_pool_vault(
        &accounts.token_program,
        &accounts.vault,
        &accounts.destination,
        &accounts.stake_pool,
        amount,
    )?;

    msg!(
        "Unlocked {} bond tokens, {} still locked",
        amount,
        accounts.bond_account.total_staked
    );
    emit!(BondTokensUnlocked {
        bond: accounts.bond_account.key(),
        owner: accounts.buyer.key(),
        amount,
        remaining: accounts.bond_account.total_staked,
    });

    Ok(())
}
