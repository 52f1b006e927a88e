//! Stake instruction handler.
//!
//! Handles staking tokens into a pool. A fee is charged on top of the staked
//! amount and collected in the protocol fee vault.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::Staked;
use crate::state::{
    AirdropAccount, BondAccount, CentralState, InstructionKind, StakeAccount, StakePool,
};
use crate::utils::{crank_pool, stake_backing, transfer_from_signer};

/// Accounts required for staking.
#[derive(Accounts)]
pub struct Stake<'info> {
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

    /// Staker's token account paying the stake and the fee.
    #[account(
        mut,
        constraint = source.mint == central_state.token_mint @ StakingError::MintMismatch,
        constraint = source.owner == owner.key() @ StakingError::Unauthorized
    )]
    pub source: Account<'info, TokenAccount>,

    /// The pool's vault.
    #[account(mut)]
    pub vault: Account<'info, TokenAccount>,

    /// Protocol fee vault.
    #[account(
        mut,
        seeds = [FEE_VAULT_SEED],
        bump
    )]
    pub fee_vault: Account<'info, TokenAccount>,

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

/// Stake tokens into the pool.
///
/// # Arguments
/// * `ctx` - Stake accounts context
/// * `amount` - Amount of tokens to stake, the fee is paid on top
///
/// # Errors
/// Returns an error if:
/// - Amount is zero or leaves the balance, with the staker's airdrops and
///   bond, below the minimum
/// - The pool is not active, or frozen
/// - Rewards accrued since the last settlement were not claimed
pub fn handler(mut ctx: Context<Stake>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let accounts = &mut ctx.accounts;
    accounts
        .central_state
        .assert_instruction_allowed(InstructionKind::Stake)?;
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
    let fee = accounts.stake_account.stake(
        &mut accounts.stake_pool,
        &mut accounts.central_state,
        amount,
        backing,
        clock.unix_timestamp,
    )?;

    transfer_from_signer(
        &accounts.token_program,
        &accounts.source,
        &accounts.vault,
        &accounts.owner,
        amount,
    )?;
    transfer_from_signer(
        &accounts.token_program,
        &accounts.source,
        &accounts.fee_vault,
        &accounts.owner,
        fee,
    )?;

    msg!("Staked {} tokens, fee {}", amount, fee);
    msg!("Total staked by owner: {}", accounts.stake_account.stake_amount);
    emit!(Staked {
        owner: accounts.owner.key(),
        stake_pool: pool_key,
        amount,
        fee,
        stake_amount: accounts.stake_account.stake_amount,
    });

    Ok(())
}
