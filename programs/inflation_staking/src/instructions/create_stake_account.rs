//! Create stake account instruction handler.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::{CentralState, InstructionKind, StakeAccount, StakePool};

/// Accounts required to open a stake account in a pool.
#[derive(Accounts)]
pub struct CreateStakeAccount<'info> {
    /// The staker.
    #[account(mut)]
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
        bump = stake_pool.bump
    )]
    pub stake_pool: Box<Account<'info, StakePool>>,

    /// The stake account to be created, one per (owner, pool).
    #[account(
        init,
        payer = owner,
        space = StakeAccount::LEN,
        seeds = [STAKE_ACCOUNT_SEED, owner.key().as_ref(), stake_pool.key().as_ref()],
        bump
    )]
    pub stake_account: Account<'info, StakeAccount>,

    /// System program.
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateStakeAccount>) -> Result<()> {
    ctx.accounts
        .central_state
        .assert_instruction_allowed(InstructionKind::CreateStakeAccount)?;
    let stake_pool = &ctx.accounts.stake_pool;
    let stake_account = &mut ctx.accounts.stake_account;

    stake_account.initialize(
        ctx.accounts.owner.key(),
        stake_pool.key(),
        stake_pool.current_day_index,
        ctx.bumps.stake_account,
    );

    msg!(
        "Stake account created for {} in pool {}",
        ctx.accounts.owner.key(),
        stake_pool.key()
    );

    Ok(())
}
