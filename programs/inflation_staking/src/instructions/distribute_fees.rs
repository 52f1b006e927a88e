//! Distribute fees instruction handler.
//!
//! Pays the fee vault out to the recipients of the fee split. Anyone may call
//! it. Recipient token accounts are passed as remaining accounts, in split
//! order.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::FeesDistributed;
use crate::state::{CentralState, InstructionKind};
use crate::utils::transfer_from_fee_vault;

/// Accounts required to distribute the protocol fees.
#[derive(Accounts)]
pub struct DistributeFees<'info> {
    /// The central state, authority of the fee vault.
    #[account(
        mut,
        seeds = [CENTRAL_STATE_SEED],
        bump = central_state.bump
    )]
    pub central_state: Account<'info, CentralState>,

    /// Protocol fee vault.
    #[account(
        mut,
        seeds = [FEE_VAULT_SEED],
        bump
    )]
    pub fee_vault: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Distribute the fee vault balance.
///
/// Each recipient receives its percentage of the balance, the remainder stays
/// in the vault.
///
/// # Errors
/// Returns an error if no split is set, or if a recipient token account is
/// missing, owned by someone else or holds another mint.
pub fn handler<'info>(ctx: Context<'_, '_, 'info, 'info, DistributeFees<'info>>) -> Result<()> {
    let clock = Clock::get()?;
    let accounts = &ctx.accounts;
    accounts
        .central_state
        .assert_instruction_allowed(InstructionKind::DistributeFees)?;

    let balance = accounts.fee_vault.amount;
    let shares = accounts.central_state.fee_shares(balance)?;
    require!(
        ctx.remaining_accounts.len() >= shares.len(),
        StakingError::FeeRecipientMismatch
    );

    let mut total: u64 = 0;
    for ((recipient, info), share) in accounts
        .central_state
        .fee_recipients
        .iter()
        .zip(ctx.remaining_accounts)
        .zip(shares)
    {
        let destination = Account::<TokenAccount>::try_from(info)?;
        require!(
            destination.owner == recipient.owner
                && destination.mint == accounts.central_state.token_mint,
            StakingError::FeeRecipientMismatch
        );
        transfer_from_fee_vault(
            &accounts.token_program,
            &accounts.fee_vault,
            info.clone(),
            &accounts.central_state,
            share,
        )?;
        total = total.checked_add(share).ok_or(StakingError::MathOverflow)?;
    }

    let recipients = accounts.central_state.fee_recipients.len() as u8;
    ctx.accounts.central_state.last_fee_distribution_time = clock.unix_timestamp;

    msg!("Distributed {} of {} fee tokens", total, balance);
    emit!(FeesDistributed { total, recipients });

    Ok(())
}
