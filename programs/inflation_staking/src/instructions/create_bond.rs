//! Create bond instruction handler.
//!
//! An authorized seller offers a bond to a buyer: tokens sold at a quote
//! price, staked in a pool and released by a vesting schedule.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::{BondAccount, BondTerms, CentralState, InstructionKind, StakePool};

/// Accounts required to create a bond.
#[derive(Accounts)]
#[instruction(terms: BondTerms)]
pub struct CreateBond<'info> {
    /// The seller creating the bond, first signer.
    #[account(mut)]
    pub seller: Signer<'info>,

    /// CHECK: Only used as a seed and recorded as the bond owner.
    pub buyer: UncheckedAccount<'info>,

    /// The central state holding the authorized sellers.
    #[account(
        seeds = [CENTRAL_STATE_SEED],
        bump = central_state.bump
    )]
    pub central_state: Account<'info, CentralState>,

    /// The pool the bond stakes into.
    #[account(
        seeds = [STAKE_POOL_SEED, stake_pool.owner.as_ref()],
        bump = stake_pool.bump
    )]
    pub stake_pool: Box<Account<'info, StakePool>>,

    /// The bond to be created.
    #[account(
        init,
        payer = seller,
        space = BondAccount::LEN,
        seeds = [
            BOND_ACCOUNT_SEED,
            buyer.key().as_ref(),
            stake_pool.key().as_ref(),
            terms.total_amount_sold.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub bond_account: Account<'info, BondAccount>,

    /// System program.
    pub system_program: Program<'info, System>,
}

/// Create an inactive bond signed by its seller.
///
/// # Errors
/// Returns an error if the seller is not authorized or the vesting schedule
/// has a zero period or zero amounts.
pub fn handler(ctx: Context<CreateBond>, terms: BondTerms) -> Result<()> {
    ctx.accounts
        .central_state
        .assert_instruction_allowed(InstructionKind::CreateBond)?;
    let bond_account = &mut ctx.accounts.bond_account;

    bond_account.create(
        &ctx.accounts.central_state,
        ctx.accounts.buyer.key(),
        ctx.accounts.seller.key(),
        ctx.accounts.stake_pool.key(),
        terms,
        ctx.bumps.bond_account,
    )?;

    msg!(
        "Bond created: {} tokens for {} quote tokens",
        terms.total_amount_sold,
        terms.total_quote_amount
    );
    msg!("Buyer: {}", ctx.accounts.buyer.key());
    msg!("Seller: {}", ctx.accounts.seller.key());

    Ok(())
}
