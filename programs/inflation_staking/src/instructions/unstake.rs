//! Unstake instruction handler.
//!
//! Removes tokens from a stake account. Pools without an unstake period pay
//! out at once, the others queue a request paid by `execute_unstake`.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::Unstaked;
use crate::state::{
    AirdropAccount, BondAccount, CentralState, InstructionKind, StakeAccount, StakePool,
    UnstakeOutcome,
};
use crate::utils::{crank_pool, stake_backing, transfer_from_pool_vault};

/// Accounts required for unstaking.
#[derive(Accounts)]
pub struct Unstake<'info> {
    /// The staker.
    pub owner: Signer<'info>,

    /// The central state.
    #[account(
        mut,
        seeds = [CENTRAL_STATE_SEED],
        bump = central_state.bump
    )]
    pub central_state: Account<'info, CentralState>,

    /// The stake pool.
    #[account(
        mut,
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
        constraint = destination.mint == central_state.token_mint @ StakingError::MintMismatch
    )]
    pub destination: Account<'info, TokenAccount>,

    /// The pool's vault.
    #[account(mut)]
    pub vault: Account<'info, TokenAccount>,

    /// The staker's rewarded airdrop in this pool, counted towards the minimum.
    #[account(
        seeds = [AIRDROP_SEED, owner.key().as_ref(), stake_pool.key().as_ref(), [1u8].as_ref()],
        bump = rewarded_airdrop.bump
    )]
    pub rewarded_airdrop: Option<Account<'info, AirdropAccount>>,

    /// The staker's unrewarded airdrop in this pool, counted towards the minimum.
    #[account(
        seeds = [AIRDROP_SEED, owner.key().as_ref(), stake_pool.key().as_ref(), [0u8].as_ref()],
        bump = unrewarded_airdrop.bump
    )]
    pub unrewarded_airdrop: Option<Account<'info, AirdropAccount>>,

    /// One of the staker's bonds in this pool, counted towards the minimum.
    #[account(
        has_one = owner @ StakingError::Unauthorized,
        has_one = stake_pool @ StakingError::PoolMismatch
    )]
    pub bond_account: Option<Account<'info, BondAccount>>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Unstake tokens from the pool.
///
/// # Errors
/// Returns an error if:
/// - Amount is zero, or leaves a balance that, with the staker's airdrops
///   and bond, is below the retained minimum
/// - Amount exceeds the staked balance
/// - Rewards accrued since the last settlement were not claimed
/// - The unstake queue is full
pub fn handler(mut ctx: Context<Unstake>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let accounts = &mut ctx.accounts;
    accounts
        .central_state
        .assert_instruction_allowed(InstructionKind::Unstake)?;
    let pool_key = accounts.stake_pool.key();
    let backing = stake_backing(
        accounts.rewarded_airdrop.as_deref(),
        accounts.unrewarded_airdrop.as_deref(),
        accounts.bond_account.as_deref(),
    )?;

    crank_pool(
        pool_key,
        &mut accounts.stake_pool,
        &mut accounts.central_state,
        clock.unix_timestamp,
    )?;
    let outcome = accounts.stake_account.unstake(
        &mut accounts.stake_pool,
        &mut accounts.central_state,
        amount,
        backing,
        clock.unix_timestamp,
    )?;

    let unlock_time = match outcome {
        UnstakeOutcome::Immediate(amount) => {
            transfer_from_pool_vault(
                &accounts.token_program,
                &accounts.vault,
                &accounts.destination,
                &accounts.stake_pool,
                amount,
            )?;
            msg!("Unstaked {} tokens", amount);
            0
        }
        UnstakeOutcome::Queued(request) => {
            msg!(
                "Unstake of {} tokens queued until {}",
                request.amount,
                request.unlock_time
            );
            request.unlock_time
        }
    };
    msg!("Remaining stake: {}", accounts.stake_account.stake_amount);

    emit!(Unstaked {
        owner: accounts.owner.key(),
        stake_pool: pool_key,
        amount,
        unlock_time,
    });

    Ok(())
}
