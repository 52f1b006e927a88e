use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::math;

/// One share of the protocol fee split.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeRecipient {
    pub owner: Pubkey,
    /// Percentage of the fee vault balance paid at each distribution
    pub percentage: u64,
}

impl FeeRecipient {
    pub const LEN: usize = 32 + 8;
}

/// Instructions that can be disabled through the program gate.
///
/// Bit `kind as u8` of `CentralState::ix_gate` allows the instruction.
/// Instructions signed by the central authority are never gated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstructionKind {
    CreatePool,
    ChangePoolSettings,
    ClaimPoolRewards,
    CreateStakeAccount,
    Stake,
    Unstake,
    ExecuteUnstake,
    ClaimRewards,
    CloseStakeAccount,
    CreateBond,
    SignBond,
    ClaimBond,
    ClaimBondRewards,
    UnlockBondTokens,
    UnlockAirdrop,
    ClaimAirdropRewards,
    Crank,
    DistributeFees,
}

impl InstructionKind {
    pub fn mask(self) -> u128 {
        1u128 << (self as u8)
    }
}

/// Protocol-wide singleton: inflation schedule, token identity, fee settings
/// and the reward accumulator shared by every pool.
#[account]
#[derive(Default)]
pub struct CentralState {
    pub authority: Pubkey,
    /// May only close the program gate
    pub freeze_authority: Pubkey,
    pub token_mint: Pubkey,

    pub creation_time: i64,

    /// Inflation used for days before `inflation_change_day`
    pub daily_inflation: u64,
    /// Inflation used from `inflation_change_day` onwards
    pub next_daily_inflation: u64,
    pub inflation_change_day: u64,

    /// Sum of the weights of every pool
    pub total_staked: u64,

    /// First day not yet added to `cumulative_reward_per_weight`
    pub current_day_index: u64,
    /// Inflation distributed per unit of rewardable weight, fixed-point
    pub cumulative_reward_per_weight: u128,
    /// `reward_history[d % HISTORY_LEN]` holds the cumulative value at the start of day `d`
    pub reward_history: Vec<u128>,

    pub fee_basis_points: u16,
    pub fee_recipients: Vec<FeeRecipient>,
    pub last_fee_distribution_time: i64,

    pub ix_gate: u128,

    pub bond_signer_threshold: u8,
    pub bond_sellers: Vec<Pubkey>,

    pub bump: u8,
}

impl CentralState {
    pub const LEN: usize = 8
        + (32 * 3)
        + 8
        + (8 * 3)
        + 8
        + 8
        + 16
        + (4 + 16 * HISTORY_LEN)
        + 2
        + (4 + FeeRecipient::LEN * MAX_FEE_RECIPIENTS)
        + 8
        + 16
        + 1
        + (4 + 32 * MAX_BOND_SELLERS)
        + 1;

    pub fn initialize(
        &mut self,
        authority: Pubkey,
        token_mint: Pubkey,
        daily_inflation: u64,
        now: i64,
        bump: u8,
    ) {
        self.authority = authority;
        self.freeze_authority = authority;
        self.token_mint = token_mint;
        self.creation_time = now;
        self.daily_inflation = daily_inflation;
        self.next_daily_inflation = daily_inflation;
        self.inflation_change_day = 0;
        self.total_staked = 0;
        self.current_day_index = 0;
        self.cumulative_reward_per_weight = 0;
        self.reward_history = vec![0; HISTORY_LEN];
        self.fee_basis_points = DEFAULT_FEE_BASIS_POINTS;
        self.fee_recipients = Vec::new();
        self.last_fee_distribution_time = now;
        self.ix_gate = u128::MAX;
        self.bond_signer_threshold = 1;
        self.bond_sellers = Vec::new();
        self.bump = bump;
    }

    /// Number of whole days elapsed since the protocol was created.
    pub fn current_offset(&self, now: i64) -> u64 {
        (now.saturating_sub(self.creation_time).max(0) / SECONDS_PER_DAY) as u64
    }

    /// Adds every finished day to the protocol accumulator and returns the
    /// current day.
    ///
    /// A day is distributed over the protocol weight in force when it is
    /// first passed, so this must run before any weight changes. Days that
    /// would leave the history ring before the current day are added in bulk
    /// per inflation segment.
    pub fn advance(&mut self, now: i64) -> Result<u64> {
        let offset = self.current_offset(now);
        let mut day = self.current_day_index;
        if day >= offset {
            return Ok(day);
        }

        let first_recorded = offset.saturating_sub(HISTORY_LEN as u64);
        if day < first_recorded {
            let change_day = self.inflation_change_day.clamp(day, first_recorded);
            self.accrue(self.daily_inflation, change_day - day)?;
            self.accrue(self.next_daily_inflation, first_recorded - change_day)?;
            day = first_recorded;
        }

        while day < offset {
            let cumulative = self.cumulative_reward_per_weight;
            *self.history_entry_mut(day)? = cumulative;
            self.accrue(self.inflation_for_day(day), 1)?;
            day += 1;
        }

        self.current_day_index = offset;
        Ok(offset)
    }

    fn accrue(&mut self, daily_inflation: u64, days: u64) -> Result<()> {
        if days == 0 {
            return Ok(());
        }
        let reward = math::reward_per_weight(daily_inflation, self.total_staked)?
            .checked_mul(days as u128)
            .ok_or(StakingError::MathOverflow)?;
        self.cumulative_reward_per_weight = self
            .cumulative_reward_per_weight
            .checked_add(reward)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    fn history_entry_mut(&mut self, day: u64) -> Result<&mut u128> {
        self.reward_history
            .get_mut(day as usize % HISTORY_LEN)
            .ok_or_else(|| error!(StakingError::PoolNotReady))
    }

    /// Cumulative reward per weight at the start of `day`.
    ///
    /// Only the last `HISTORY_LEN` days before `current_day_index` are kept.
    pub fn reward_per_weight_at(&self, day: u64) -> Result<u128> {
        if day >= self.current_day_index {
            return Ok(self.cumulative_reward_per_weight);
        }
        require!(
            day + HISTORY_LEN as u64 >= self.current_day_index,
            StakingError::MathOverflow
        );
        self.reward_history
            .get(day as usize % HISTORY_LEN)
            .copied()
            .ok_or_else(|| error!(StakingError::PoolNotReady))
    }

    pub fn inflation_for_day(&self, day: u64) -> u64 {
        if day >= self.inflation_change_day {
            self.next_daily_inflation
        } else {
            self.daily_inflation
        }
    }

    /// Schedules `daily_inflation` for the next day boundary and returns the
    /// day it takes effect.
    ///
    /// Finished days are distributed first, at the rates that applied to them.
    pub fn set_daily_inflation(&mut self, daily_inflation: u64, now: i64) -> Result<u64> {
        let offset = self.advance(now)?;
        if offset >= self.inflation_change_day {
            self.daily_inflation = self.next_daily_inflation;
        }
        self.next_daily_inflation = daily_inflation;
        self.inflation_change_day = offset + 1;
        Ok(self.inflation_change_day)
    }

    /// Replaces one pool's contribution to the protocol total.
    pub fn reweigh(&mut self, old_weight: u64, new_weight: u64) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_sub(old_weight)
            .ok_or(StakingError::MathOverflow)?
            .checked_add(new_weight)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    pub fn set_bond_sellers(&mut self, sellers: Vec<Pubkey>, threshold: u8) -> Result<()> {
        require!(
            sellers.len() <= MAX_BOND_SELLERS,
            StakingError::TooManySellers
        );
        require!(
            threshold >= 1 && threshold as usize <= sellers.len(),
            StakingError::TooManySellers
        );
        self.bond_sellers = sellers;
        self.bond_signer_threshold = threshold;
        Ok(())
    }

    pub fn is_authorized_seller(&self, seller: &Pubkey) -> bool {
        self.bond_sellers.contains(seller)
    }

    pub fn set_fee_basis_points(&mut self, fee_basis_points: u16) -> Result<()> {
        require!(
            fee_basis_points as u64 <= BASIS_POINTS_DENOMINATOR,
            StakingError::InvalidAmount
        );
        self.fee_basis_points = fee_basis_points;
        Ok(())
    }

    /// Fee owed on top of a stake of `amount`.
    pub fn stake_fee(&self, amount: u64) -> Result<u64> {
        math::stake_fee(amount, self.fee_basis_points)
    }

    /// Replaces the fee split.
    ///
    /// Only allowed within `MAX_FEE_SPLIT_SETUP_DELAY` of the last
    /// distribution, so fees collected under the old split are paid under it.
    pub fn setup_fee_split(&mut self, recipients: Vec<FeeRecipient>, now: i64) -> Result<()> {
        require!(
            !recipients.is_empty() && recipients.len() <= MAX_FEE_RECIPIENTS,
            StakingError::InvalidFeeSplit
        );
        let mut total: u64 = 0;
        for recipient in &recipients {
            require!(recipient.percentage > 0, StakingError::InvalidFeeSplit);
            total = total
                .checked_add(recipient.percentage)
                .ok_or(StakingError::MathOverflow)?;
        }
        require!(total <= PERCENT_DENOMINATOR, StakingError::InvalidFeeSplit);
        require!(
            now.saturating_sub(self.last_fee_distribution_time) <= MAX_FEE_SPLIT_SETUP_DELAY,
            StakingError::FeesNotDistributed
        );
        self.fee_recipients = recipients;
        Ok(())
    }

    /// Shares of `balance` owed to each recipient, in split order.
    pub fn fee_shares(&self, balance: u64) -> Result<Vec<u64>> {
        require!(!self.fee_recipients.is_empty(), StakingError::InvalidFeeSplit);
        self.fee_recipients
            .iter()
            .map(|recipient| math::percent_of(balance, recipient.percentage))
            .collect()
    }

    pub fn is_instruction_allowed(&self, kind: InstructionKind) -> bool {
        self.ix_gate & kind.mask() != 0
    }

    pub fn assert_instruction_allowed(&self, kind: InstructionKind) -> Result<()> {
        require!(
            self.is_instruction_allowed(kind),
            StakingError::InstructionFrozen
        );
        Ok(())
    }

    /// Sets the program gate.
    ///
    /// The authority may set any gate, the freeze authority may only freeze
    /// every instruction at once.
    pub fn set_ix_gate(&mut self, signer: &Pubkey, ix_gate: u128) -> Result<()> {
        if *signer != self.authority {
            require!(
                *signer == self.freeze_authority && ix_gate == 0,
                StakingError::Unauthorized
            );
        }
        self.ix_gate = ix_gate;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_err;

    const DAY: i64 = SECONDS_PER_DAY;
    const ONE: u128 = 1 << 64;

    fn central(inflation: u64) -> CentralState {
        let mut central = CentralState::default();
        central.initialize(Pubkey::new_unique(), Pubkey::new_unique(), inflation, 1_000, 255);
        central
    }

    #[test]
    fn test_current_offset() {
        let central = central(1);
        assert_eq!(central.current_offset(1_000), 0);
        assert_eq!(central.current_offset(1_000 + DAY - 1), 0);
        assert_eq!(central.current_offset(1_000 + DAY), 1);
        assert_eq!(central.current_offset(0), 0);
    }

    #[test]
    fn test_inflation_change_takes_effect_next_day() {
        let mut central = central(100);
        let now = 1_000 + 3 * DAY + 5;

        assert_eq!(central.set_daily_inflation(250, now).unwrap(), 4);
        assert_eq!(central.inflation_for_day(3), 100);
        assert_eq!(central.inflation_for_day(4), 250);

        // A second change on a later day promotes the pending rate first
        assert_eq!(central.set_daily_inflation(400, now + 2 * DAY).unwrap(), 6);
        assert_eq!(central.inflation_for_day(5), 250);
        assert_eq!(central.inflation_for_day(6), 400);
    }

    #[test]
    fn test_inflation_change_same_day_overrides_pending() {
        let mut central = central(100);
        central.set_daily_inflation(250, 1_000).unwrap();
        central.set_daily_inflation(300, 1_000 + 10).unwrap();
        assert_eq!(central.inflation_for_day(0), 100);
        assert_eq!(central.inflation_for_day(1), 300);
    }

    #[test]
    fn test_advance_uses_weight_of_each_day() {
        let mut central = central(1_000);
        central.reweigh(0, 500).unwrap();
        assert_eq!(central.advance(1_000 + DAY).unwrap(), 1);
        assert_eq!(central.cumulative_reward_per_weight, 2 * ONE);

        central.reweigh(500, 250).unwrap();
        // Already advanced today
        central.advance(1_000 + DAY + 10).unwrap();
        assert_eq!(central.cumulative_reward_per_weight, 2 * ONE);

        central.advance(1_000 + 3 * DAY).unwrap();
        assert_eq!(central.cumulative_reward_per_weight, 10 * ONE);
        assert_eq!(central.reward_per_weight_at(0).unwrap(), 0);
        assert_eq!(central.reward_per_weight_at(1).unwrap(), 2 * ONE);
        assert_eq!(central.reward_per_weight_at(2).unwrap(), 6 * ONE);
        assert_eq!(central.reward_per_weight_at(3).unwrap(), 10 * ONE);
    }

    #[test]
    fn test_two_inflation_changes_are_both_applied() {
        let mut central = central(1_000);
        central.reweigh(0, 1_000).unwrap();
        central.set_daily_inflation(2_000, 1_000 + 3 * DAY).unwrap();
        central.set_daily_inflation(3_000, 1_000 + 6 * DAY).unwrap();
        central.advance(1_000 + 10 * DAY).unwrap();

        // Days 0..=3 at 1x, 4..=6 at 2x, 7..=9 at 3x
        assert_eq!(central.cumulative_reward_per_weight, (4 + 6 + 9) * ONE);
    }

    #[test]
    fn test_advance_beyond_history_matches_daily() {
        let mut daily = central(123_456_789);
        daily.reweigh(0, 7_777).unwrap();
        let mut lazy = daily.clone();

        for day in 1..=400 {
            if day == 50 {
                daily.set_daily_inflation(41_152_263, 1_000 + day * DAY).unwrap();
                lazy.set_daily_inflation(41_152_263, 1_000 + day * DAY).unwrap();
            }
            daily.advance(1_000 + day * DAY).unwrap();
        }
        lazy.advance(1_000 + 400 * DAY).unwrap();

        assert_eq!(lazy.cumulative_reward_per_weight, daily.cumulative_reward_per_weight);
        assert_eq!(lazy.reward_history, daily.reward_history);
        assert_err(lazy.reward_per_weight_at(100), StakingError::MathOverflow);
    }

    #[test]
    fn test_reweigh_underflow() {
        let mut central = central(1);
        assert_err(central.reweigh(1, 0), StakingError::MathOverflow);
    }

    #[test]
    fn test_bond_sellers() {
        let mut central = central(1);
        let sellers: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();
        central.set_bond_sellers(sellers.clone(), 2).unwrap();
        assert!(central.is_authorized_seller(&sellers[1]));
        assert!(!central.is_authorized_seller(&Pubkey::new_unique()));

        assert_err(central.set_bond_sellers(sellers.clone(), 4), StakingError::TooManySellers);
        assert_err(central.set_bond_sellers(sellers, 0), StakingError::TooManySellers);
        let too_many: Vec<Pubkey> = (0..6).map(|_| Pubkey::new_unique()).collect();
        assert_err(central.set_bond_sellers(too_many, 1), StakingError::TooManySellers);
    }

    #[test]
    fn test_protocol_fee() {
        let mut central = central(1);
        assert_eq!(central.stake_fee(10_000_000_000).unwrap(), 200_000_000);

        central.set_fee_basis_points(50).unwrap();
        assert_eq!(central.stake_fee(10_000_000_000).unwrap(), 50_000_000);
        assert_err(central.set_fee_basis_points(10_001), StakingError::InvalidAmount);
    }

    fn recipient(percentage: u64) -> FeeRecipient {
        FeeRecipient {
            owner: Pubkey::new_unique(),
            percentage,
        }
    }

    #[test]
    fn test_fee_split_validation() {
        let mut central = central(1);
        assert_err(central.fee_shares(100), StakingError::InvalidFeeSplit);
        assert_err(central.setup_fee_split(vec![], 1_000), StakingError::InvalidFeeSplit);
        assert_err(
            central.setup_fee_split(vec![recipient(0)], 1_000),
            StakingError::InvalidFeeSplit,
        );
        assert_err(
            central.setup_fee_split(vec![recipient(60), recipient(41)], 1_000),
            StakingError::InvalidFeeSplit,
        );
        assert_err(
            central.setup_fee_split(vec![recipient(1); MAX_FEE_RECIPIENTS + 1], 1_000),
            StakingError::InvalidFeeSplit,
        );
        assert_err(
            central.setup_fee_split(vec![recipient(50)], 1_000 + MAX_FEE_SPLIT_SETUP_DELAY + 1),
            StakingError::FeesNotDistributed,
        );

        central
            .setup_fee_split(vec![recipient(50), recipient(30)], 1_000 + MAX_FEE_SPLIT_SETUP_DELAY)
            .unwrap();
        assert_eq!(central.fee_shares(1_001).unwrap(), vec![500, 300]);
    }

    #[test]
    fn test_ix_gate() {
        let mut central = central(1);
        let authority = central.authority;
        let freezer = Pubkey::new_unique();
        central.freeze_authority = freezer;
        central.assert_instruction_allowed(InstructionKind::Stake).unwrap();

        assert_err(
            central.set_ix_gate(&freezer, InstructionKind::Crank.mask()),
            StakingError::Unauthorized,
        );
        assert_err(
            central.set_ix_gate(&Pubkey::new_unique(), 0),
            StakingError::Unauthorized,
        );
        central.set_ix_gate(&freezer, 0).unwrap();
        assert_err(
            central.assert_instruction_allowed(InstructionKind::Stake),
            StakingError::InstructionFrozen,
        );

        central
            .set_ix_gate(&authority, u128::MAX & !InstructionKind::Unstake.mask())
            .unwrap();
        central.assert_instruction_allowed(InstructionKind::Stake).unwrap();
        assert_err(
            central.assert_instruction_allowed(InstructionKind::Unstake),
            StakingError::InstructionFrozen,
        );
    }
}
