//! Close stake account instruction handler.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::state::{CentralState, InstructionKind, StakeAccount};

/// Accounts required to close an empty stake account.
#[derive(Accounts)]
pub struct CloseStakeAccount<'info> {
    /// The staker, receiver of the rent.
    #[account(mut)]
    pub owner: Signer<'info>,

    /// The central state holding the instruction gate.
    #[account(
        seeds = [CENTRAL_STATE_SEED],
        bump = central_state.bump
    )]
    pub central_state: Account<'info, CentralState>,

    /// The stake account to close.
    #[account(
        mut,
        close = owner,
        has_one = owner @ StakingError::Unauthorized
    )]
    pub stake_account: Account<'info, StakeAccount>,
}

/// Close a stake account with no balance and no pending unstake request.
pub fn handler(ctx: Context<CloseStakeAccount>) -> Result<()> {
    ctx.accounts
        .central_state
        .assert_instruction_allowed(InstructionKind::CloseStakeAccount)?;
    ctx.accounts.stake_account.assert_closable()?;

    msg!("Stake account {} closed", ctx.accounts.stake_account.key());

    Ok(())
}
