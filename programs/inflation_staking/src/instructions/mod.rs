//! Instruction handlers for the Inflation Staking program.
//!
//! This module contains all instruction implementations.

pub mod admin;
pub mod admin_mint;
pub mod airdrop;
pub mod claim_airdrop_rewards;
pub mod claim_bond;
pub mod claim_bond_rewards;
pub mod claim_pool_rewards;
pub mod claim_rewards;
pub mod close_stake_account;
pub mod crank;
pub mod create_bond;
pub mod create_central_state;
pub mod create_pool;
pub mod create_stake_account;
pub mod distribute_fees;
pub mod execute_unstake;
pub mod pool_admin;
pub mod pool_settings;
pub mod program_freeze;
pub mod revoke_airdrop;
pub mod sign_bond;
pub mod stake;
pub mod unlock_airdrop;
pub mod unlock_bond_tokens;
pub mod unstake;

pub use admin::*;
pub use admin_mint::*;
pub use airdrop::*;
pub use claim_airdrop_rewards::*;
pub use claim_bond::*;
pub use claim_bond_rewards::*;
pub use claim_pool_rewards::*;
pub use claim_rewards::*;
pub use close_stake_account::*;
pub use crank::*;
pub use create_bond::*;
pub use create_central_state::*;
pub use create_pool::*;
pub use create_stake_account::*;
pub use distribute_fees::*;
pub use execute_unstake::*;
pub use pool_admin::*;
pub use pool_settings::*;
pub use program_freeze::*;
pub use revoke_airdrop::*;
pub use sign_bond::*;
pub use stake::*;
pub use unlock_airdrop::*;
pub use unlock_bond_tokens::*;
pub use unstake::*;
