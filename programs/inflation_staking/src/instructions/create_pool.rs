//! Create pool instruction handler.
//!
//! Creates an inactive stake pool and its token vault. The pool starts
//! accruing once the administrator activates it.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::state::{CentralState, InstructionKind, StakePool};

/// Accounts required for pool creation.
#[derive(Accounts)]
pub struct CreatePool<'info> {
    /// The pool owner, receiver of the owner's share of the rewards.
    #[account(mut)]
    pub owner: Signer<'info>,

    /// The central state.
    #[account(
        seeds = [CENTRAL_STATE_SEED],
        bump = central_state.bump,
        has_one = token_mint @ StakingError::MintMismatch
    )]
    pub central_state: Account<'info, CentralState>,

    /// The stake pool to be created, one per owner.
    #[account(
        init_if_needed,
        payer = owner,
        space = StakePool::LEN,
        seeds = [STAKE_POOL_SEED, owner.key().as_ref()],
        bump
    )]
    pub stake_pool: Box<Account<'info, StakePool>>,

    /// The vault holding staked, bonded and airdropped tokens.
    #[account(
        init_if_needed,
        payer = owner,
        seeds = [POOL_VAULT_SEED, stake_pool.key().as_ref()],
        bump,
        token::mint = token_mint,
        token::authority = stake_pool
    )]
    pub vault: Account<'info, TokenAccount>,

    /// The staking token mint.
    pub token_mint: Account<'info, Mint>,

    /// System program.
    pub system_program: Program<'info, System>,

    /// Token program.
    pub token_program: Program<'info, Token>,

    /// Rent sysvar.
    pub rent: Sysvar<'info, Rent>,
}

/// Create a stake pool.
///
/// # Arguments
/// * `ctx` - CreatePool accounts context
/// * `minimum_stake_amount` - Smallest balance a stake account may hold
/// * `stakers_part` - Percentage of the pool's rewards paid to stakers
/// * `unstake_period` - Seconds between an unstake and its payout
///
/// # Errors
/// Returns an error if the pool already exists or the split is above 100.
pub fn handler(
    ctx: Context<CreatePool>,
    minimum_stake_amount: u64,
    stakers_part: u64,
    unstake_period: i64,
) -> Result<()> {
    ctx.accounts
        .central_state
        .assert_instruction_allowed(InstructionKind::CreatePool)?;
    let vault = ctx.accounts.vault.key();
    let stake_pool = &mut ctx.accounts.stake_pool;

    stake_pool.initialize(
        ctx.accounts.owner.key(),
        vault,
        minimum_stake_amount,
        stakers_part,
        unstake_period,
        ctx.bumps.stake_pool,
        ctx.bumps.vault,
    )?;

    msg!("Stake pool created for owner {}", ctx.accounts.owner.key());
    msg!("Vault: {}", vault);
    msg!(
        "Minimum stake: {}, stakers part: {}%, unstake period: {}s",
        minimum_stake_amount,
        stakers_part,
        unstake_period
    );

    Ok(())
}
