//! State structures for the Inflation Staking program.
//!
//! Every accounting transition is a method on a record type. Methods take the
//! current unix timestamp explicitly and return the token movement the
//! instruction handler must perform.

pub mod airdrop_account;
pub mod bond_account;
pub mod central_state;
pub mod stake_account;
pub mod stake_pool;

pub use airdrop_account::*;
pub use bond_account::*;
pub use central_state::*;
pub use stake_account::*;
pub use stake_pool::*;
