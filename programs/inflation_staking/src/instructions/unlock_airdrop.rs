//! Unlock airdrop instruction handler.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::AirdropUnlocked;
use crate::state::{AirdropAccount, CentralState, InstructionKind, StakePool};
use crate::utils::{crank_pool, transfer_from_pool_vault};

/// Accounts required to release matured airdrop entries.
#[derive(Accounts)]
pub struct UnlockAirdrop<'info> {
    /// The recipient.
    pub recipient: Signer<'info>,

    /// The central state.
    #[account(
        mut,
        seeds = [CENTRAL_STATE_SEED],
        bump = central_state.bump
    )]
    pub central_state: Account<'info, CentralState>,

    /// The pool the airdrop is attributed to.
    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.owner.as_ref()],
        bump = stake_pool.bump,
        has_one = vault @ StakingError::VaultMismatch
    )]
    pub stake_pool: Box<Account<'info, StakePool>>,

    /// The recipient's airdrop account.
    #[account(
        mut,
        has_one = recipient @ StakingError::Unauthorized,
        has_one = stake_pool @ StakingError::PoolMismatch
    )]
    pub airdrop_account: Account<'info, AirdropAccount>,

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

pub fn handler(mut ctx: Context<UnlockAirdrop>) -> Result<()> {
    let clock = Clock::get()?;
    let accounts = &mut ctx.accounts;
    accounts
        .central_state
        .assert_instruction_allowed(InstructionKind::UnlockAirdrop)?;
    let pool_key = accounts.stake_pool.key();

    crank_pool(
        pool_key,
        &mut accounts.stake_pool,
        &mut accounts.central_state,
        clock.unix_timestamp,
    )?;
    let amount = accounts.airdrop_account.unlock(
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
        "Unlocked {} airdropped tokens, {} remaining",
        amount,
        accounts.airdrop_account.remaining
    );
    emit!(AirdropUnlocked {
        recipient: accounts.recipient.key(),
        stake_pool: pool_key,
        amount,
        remaining: accounts.airdrop_account.remaining,
    });

    Ok(())
}
