use anchor_lang::prelude::*;

// Events
#[event]
pub struct PoolCranked {
    pub stake_pool: Pubkey,
    pub from_day: u64,
    pub to_day: u64,
    pub cumulative_pool_reward: u128,
    pub cumulative_stakers_reward: u128,
}

#[event]
pub struct Staked {
    pub owner: Pubkey,
    pub stake_pool: Pubkey,
    pub amount: u64,
    pub fee: u64,
    pub stake_amount: u64,
}

#[event]
pub struct Unstaked {
    pub owner: Pubkey,
    pub stake_pool: Pubkey,
    pub amount: u64,
    /// Zero when the tokens were paid out at once
    pub unlock_time: i64,
}

#[event]
pub struct RewardsClaimed {
    /// Stake, bond or airdrop account that was settled
    pub position: Pubkey,
    pub owner: Pubkey,
    pub stake_pool: Pubkey,
    pub amount: u64,
    pub day: u64,
}

#[event]
pub struct PoolRewardsClaimed {
    pub stake_pool: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub day: u64,
}

#[event]
pub struct AirdropGranted {
    pub recipient: Pubkey,
    pub stake_pool: Pubkey,
    pub rewarded: bool,
    pub amount: u64,
    pub remaining: u64,
}

#[event]
pub struct AirdropUnlocked {
    pub recipient: Pubkey,
    pub stake_pool: Pubkey,
    pub amount: u64,
    pub remaining: u64,
}

#[event]
pub struct AirdropRevoked {
    pub recipient: Pubkey,
    pub stake_pool: Pubkey,
    pub amount: u64,
}

#[event]
pub struct BondActivated {
    pub bond: Pubkey,
    pub owner: Pubkey,
    pub stake_pool: Pubkey,
    pub amount: u64,
    pub quote_amount: u64,
}

#[event]
pub struct BondTokensUnlocked {
    pub bond: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub remaining: u64,
}

#[event]
pub struct InflationChanged {
    pub daily_inflation: u64,
    pub effective_day: u64,
}

#[event]
pub struct FeesDistributed {
    pub total: u64,
    pub recipients: u8,
}

#[event]
pub struct InstructionGateChanged {
    pub signer: Pubkey,
    pub ix_gate: u128,
}
