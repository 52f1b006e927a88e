//! Sign bond instruction handler.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::{BondAccount, CentralState, InstructionKind};

/// Accounts required for an additional seller to approve a bond.
#[derive(Accounts)]
pub struct SignBond<'info> {
    /// The approving seller.
    pub seller: Signer<'info>,

    /// The central state holding the authorized sellers.
    #[account(
        seeds = [CENTRAL_STATE_SEED],
        bump = central_state.bump
    )]
    pub central_state: Account<'info, CentralState>,

    /// The bond to sign.
    #[account(mut)]
    pub bond_account: Account<'info, BondAccount>,
}

pub fn handler(ctx: Context<SignBond>) -> Result<()> {
    ctx.accounts
        .central_state
        .assert_instruction_allowed(InstructionKind::SignBond)?;
    let bond_account = &mut ctx.accounts.bond_account;
    bond_account.sign(&ctx.accounts.central_state, ctx.accounts.seller.key())?;

    msg!(
        "Bond signed by {} ({}/{})",
        ctx.accounts.seller.key(),
        bond_account.sellers.len(),
        ctx.accounts.central_state.bond_signer_threshold
    );

    Ok(())
}
