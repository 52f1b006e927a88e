//! Revoke airdrop instruction handler.
//!
//! Takes the remaining ladder of an airdrop back to the protocol authority.
//! Rewards the recipient left unsettled are forfeited.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::AirdropRevoked;
use crate::state::{AirdropAccount, CentralState, StakePool};
use crate::utils::{crank_pool, transfer_from_pool_vault};

/// Accounts required to revoke an airdrop.
#[derive(Accounts)]
pub struct RevokeAirdrop<'info> {
    /// The admin authority.
    pub authority: Signer<'info>,

    /// The central state.
    #[account(
        mut,
        seeds = [CENTRAL_STATE_SEED],
        bump = central_state.bump,
        has_one = authority @ StakingError::Unauthorized
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

    /// The airdrop to revoke.
    #[account(
        mut,
        has_one = stake_pool @ StakingError::PoolMismatch
    )]
    pub airdrop_account: Account<'info, AirdropAccount>,

    /// Authority's token account receiving the revoked tokens.
    #[account(
        mut,
        constraint = destination.mint == central_state.token_mint @ StakingError::MintMismatch,
        constraint = destination.owner == authority.key() @ StakingError::Unauthorized
    )]
    pub destination: Account<'info, TokenAccount>,

    /// The pool's vault.
    #[account(mut)]
    pub vault: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Revoke the remaining entries of an airdrop.
///
/// The pool is cranked in every case. A drained airdrop is then left as is.
pub fn handler(mut ctx: Context<RevokeAirdrop>) -> Result<()> {
    let clock = Clock::get()?;
    let accounts = &mut ctx.accounts;
    let pool_key = accounts.stake_pool.key();

    crank_pool(
        pool_key,
        &mut accounts.stake_pool,
        &mut accounts.central_state,
        clock.unix_timestamp,
    )?;
    let amount = accounts.airdrop_account.revoke(
        &mut accounts.stake_pool,
        &mut accounts.central_state,
        clock.unix_timestamp,
    )?;
    if amount == 0 {
        msg!("Nothing left to revoke");
        return Ok(());
    }

    transfer_from_pool_vault(
        &accounts.token_program,
        &accounts.vault,
        &accounts.destination,
        &accounts.stake_pool,
        amount,
    )?;

    msg!(
        "Revoked {} airdropped tokens from {}",
        amount,
        accounts.airdrop_account.recipient
    );
    emit!(AirdropRevoked {
        recipient: accounts.airdrop_account.recipient,
        stake_pool: pool_key,
        amount,
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        account_data, account_info, active_pool, central, token_account_data, with_clock, DAY,
    };

    #[test]
    fn test_revoke_drained_airdrop_still_cranks() {
        let mut central = central();
        let authority = central.authority;
        let mint = central.token_mint;
        let mut pool = active_pool(&central, 40, 0);
        pool.add_staked(&mut central, 10_000_000_000).unwrap();
        let mut airdrop = AirdropAccount::default();
        airdrop.initialize(Pubkey::new_unique(), Pubkey::new_unique(), true, 0, 1);

        let keys: Vec<Pubkey> = (0..5).map(|_| Pubkey::new_unique()).collect();
        let system = anchor_lang::system_program::ID;
        let token_program_id = anchor_spl::token::ID;
        let mut lamports = [1u64; 7];
        let [authority_lamports, central_lamports, pool_lamports, airdrop_lamports, destination_lamports, vault_lamports, program_lamports] =
            &mut lamports;
        let mut authority_data: Vec<u8> = Vec::new();
        let mut central_data = account_data(&central);
        let mut pool_data = account_data(&pool);
        let mut airdrop_data = account_data(&airdrop);
        let mut destination_data = token_account_data(mint, authority, 0);
        let mut vault_data = token_account_data(mint, keys[1], 0);
        let mut program_data: Vec<u8> = Vec::new();

        let authority_info = account_info(&authority, true, authority_lamports, &mut authority_data, &system);
        let central_info = account_info(&keys[0], false, central_lamports, &mut central_data, &crate::ID);
        let pool_info = account_info(&keys[1], false, pool_lamports, &mut pool_data, &crate::ID);
        let airdrop_info = account_info(&keys[2], false, airdrop_lamports, &mut airdrop_data, &crate::ID);
        let destination_info =
            account_info(&keys[3], false, destination_lamports, &mut destination_data, &token_program_id);
        let vault_info = account_info(&keys[4], false, vault_lamports, &mut vault_data, &token_program_id);
        let program_info = AccountInfo::new(
            &token_program_id,
            false,
            false,
            program_lamports,
            &mut program_data,
            &system,
            true,
            0,
        );

        let mut accounts = RevokeAirdrop {
            authority: Signer::try_from(&authority_info).unwrap(),
            central_state: Account::try_from(&central_info).unwrap(),
            stake_pool: Box::new(Account::try_from(&pool_info).unwrap()),
            airdrop_account: Account::try_from(&airdrop_info).unwrap(),
            destination: Account::try_from(&destination_info).unwrap(),
            vault: Account::try_from(&vault_info).unwrap(),
            token_program: Program::try_from(&program_info).unwrap(),
        };

        with_clock(5 * DAY, || {
            handler(Context::new(&crate::ID, &mut accounts, &[], Default::default()))
        })
        .unwrap();
        assert_eq!(accounts.stake_pool.current_day_index, 5);
        assert_eq!(accounts.central_state.current_day_index, 5);
        assert_eq!(accounts.airdrop_account.remaining, 0);
    }
}
