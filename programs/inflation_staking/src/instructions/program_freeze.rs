//! Program freeze instruction handler.
//!
//! Opens or closes the instruction gate. The authority may set any gate; the
//! freeze authority may only freeze the whole program.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::InstructionGateChanged;
use crate::state::CentralState;

/// Accounts required to change the instruction gate.
#[derive(Accounts)]
pub struct ProgramFreeze<'info> {
    /// The authority or the freeze authority.
    pub signer: Signer<'info>,

    /// The central state holding the gate.
    #[account(
        mut,
        seeds = [CENTRAL_STATE_SEED],
        bump = central_state.bump
    )]
    pub central_state: Account<'info, CentralState>,
}

/// Set the instruction gate.
///
/// # Arguments
/// * `ctx` - ProgramFreeze accounts context
/// * `ix_gate` - Bit `i` set allows the instruction of kind `i`
///
/// # Errors
/// Returns `Unauthorized` when the signer is neither authority, or when the
/// freeze authority tries to open any instruction.
pub fn handler(ctx: Context<ProgramFreeze>, ix_gate: u128) -> Result<()> {
    let signer = ctx.accounts.signer.key();
    ctx.accounts.central_state.set_ix_gate(&signer, ix_gate)?;

    msg!("Instruction gate set to {:#x} by {}", ix_gate, signer);
    emit!(InstructionGateChanged { signer, ix_gate });

    Ok(())
}
