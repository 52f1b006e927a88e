//! Fixed-point reward math.
//!
//! Every reward accumulator is an unsigned 128-bit value with 64 fractional
//! bits. Divisions always multiply first, then shift, then divide, so the
//! rounding direction is the same wherever a rate is produced. Payouts are
//! converted back to whole token units by rounding half up.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;

/// Rewards accrued by a pool over one day, in fixed-point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DailyRates {
    /// Absolute reward of the pool owner
    pub pool_reward: u128,
    /// Reward per rewardable token held in the pool
    pub stakers_reward: u128,
}

/// Computes `floor(numerator * 2^64 / denominator)`.
///
/// Returns zero for a zero denominator. The fractional part is produced by
/// long division in two 32-bit digits, which keeps every intermediate below
/// 2^128 as long as the denominator is below 2^96.
pub fn fp_div(numerator: u128, denominator: u128) -> Result<u128> {
    if denominator == 0 {
        return Ok(0);
    }
    require!(denominator >> 96 == 0, StakingError::MathOverflow);

    let quotient = numerator / denominator;
    require!(quotient >> FP_SHIFT == 0, StakingError::MathOverflow);

    let remainder = numerator % denominator;
    let high = (remainder << 32) / denominator;
    let remainder = (remainder << 32) % denominator;
    let low = (remainder << 32) / denominator;

    Ok((quotient << FP_SHIFT) | (high << 32) | low)
}

/// Converts a fixed-point amount to whole token units, rounding half up.
pub fn fp_to_amount(value: u128) -> Result<u64> {
    let rounded = ((value >> (FP_SHIFT - 1)) + 1) >> 1;
    u64::try_from(rounded).map_err(|_| error!(StakingError::MathOverflow))
}

/// `amount * percent / 100`, truncated.
pub fn percent_of(amount: u64, percent: u64) -> Result<u64> {
    let value = (amount as u128)
        .checked_mul(percent as u128)
        .ok_or(StakingError::MathOverflow)?
        / PERCENT_DENOMINATOR as u128;
    u64::try_from(value).map_err(|_| error!(StakingError::MathOverflow))
}

/// Fee paid on top of a stake of `amount`, rounded up.
pub fn stake_fee(amount: u64, fee_basis_points: u16) -> Result<u64> {
    let value = (amount as u128)
        .checked_mul(fee_basis_points as u128)
        .ok_or(StakingError::MathOverflow)?
        .checked_add(BASIS_POINTS_DENOMINATOR as u128 - 1)
        .ok_or(StakingError::MathOverflow)?
        / BASIS_POINTS_DENOMINATOR as u128;
    u64::try_from(value).map_err(|_| error!(StakingError::MathOverflow))
}

/// Share of an unrewarded airdrop balance counted in the rewardable totals.
pub fn unrewarded_weight(amount: u64) -> Result<u64> {
    percent_of(amount, UNREWARDED_AIRDROP_WEIGHT_PERCENT)
}

/// Inflation of one day per unit of rewardable weight, in fixed-point.
///
/// Nothing is distributed on a day the protocol holds no weight.
pub fn reward_per_weight(daily_inflation: u64, protocol_weight: u64) -> Result<u128> {
    fp_div(daily_inflation as u128, protocol_weight as u128)
}

/// Splits the reward of `pool_weight` tokens between the owner and stakers.
///
/// * `reward_per_weight` - Protocol reward per unit of weight over the period
/// * `stakers_part` - Percentage of the pool share going to stakers
/// * `pool_weight` - Rewardable weight of the pool
///
/// The pool owner receives `reward_per_weight * pool_weight * (100 -
/// stakers_part)%`; every rewardable token in the pool receives
/// `reward_per_weight * stakers_part%`.
pub fn pool_rates(
    reward_per_weight: u128,
    stakers_part: u64,
    pool_weight: u64,
) -> Result<DailyRates> {
    require!(
        stakers_part <= PERCENT_DENOMINATOR,
        StakingError::StakersPartOutOfBounds
    );
    if pool_weight == 0 {
        return Ok(DailyRates::default());
    }

    let stakers_reward = reward_per_weight
        .checked_mul(stakers_part as u128)
        .ok_or(StakingError::MathOverflow)?
        / PERCENT_DENOMINATOR as u128;

    let pool_reward = reward_per_weight
        .checked_mul(pool_weight as u128)
        .ok_or(StakingError::MathOverflow)?
        .checked_mul((PERCENT_DENOMINATOR - stakers_part) as u128)
        .ok_or(StakingError::MathOverflow)?
        / PERCENT_DENOMINATOR as u128;

    Ok(DailyRates {
        pool_reward,
        stakers_reward,
    })
}

/// Fixed-point reward of `amount` tokens between two cumulative values.
pub fn accrued(amount: u64, from: u128, to: u128) -> Result<u128> {
    to.checked_sub(from)
        .ok_or(StakingError::MathOverflow)?
        .checked_mul(amount as u128)
        .ok_or(StakingError::MathOverflow)
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_err;

    const ONE: u128 = 1 << 64;

    #[test]
    fn test_fp_div_exact_and_truncated() {
        assert_eq!(fp_div(3, 1).unwrap(), 3 * ONE);
        assert_eq!(fp_div(1, 2).unwrap(), ONE / 2);
        // 1/3 truncates towards zero
        assert_eq!(fp_div(1, 3).unwrap(), ONE / 3);
        assert_eq!(fp_div(7, 0).unwrap(), 0);
    }

    #[test]
    fn test_fp_div_large_denominator() {
        // Denominator above 2^64 still divides exactly
        let denominator = 100u128 * (u64::MAX as u128);
        let numerator = denominator * 5 + denominator / 2;
        assert_eq!(fp_div(numerator, denominator).unwrap(), 5 * ONE + ONE / 2);
    }

    #[test]
    fn test_fp_div_overflow() {
        assert_err(fp_div(u128::MAX, 1), StakingError::MathOverflow);
    }

    #[test]
    fn test_fp_to_amount_rounds_half_up() {
        assert_eq!(fp_to_amount(5 * ONE).unwrap(), 5);
        assert_eq!(fp_to_amount(5 * ONE + ONE / 2).unwrap(), 6);
        assert_eq!(fp_to_amount(5 * ONE + ONE / 2 - 1).unwrap(), 5);
        assert_eq!(fp_to_amount(ONE - 1).unwrap(), 1);
        assert_eq!(fp_to_amount(0).unwrap(), 0);
    }

    #[test]
    fn test_percentages() {
        assert_eq!(unrewarded_weight(10_000_000_000).unwrap(), 6_000_000_000);
        assert_eq!(percent_of(99, 50).unwrap(), 49);
    }

    #[test]
    fn test_stake_fee_rounds_up() {
        assert_eq!(stake_fee(10_000_000_000, 200).unwrap(), 200_000_000);
        assert_eq!(stake_fee(1, 200).unwrap(), 1);
        assert_eq!(stake_fee(49_999, 2).unwrap(), 10);
        assert_eq!(stake_fee(1_000, 0).unwrap(), 0);
        assert_eq!(stake_fee(1_000, 10_000).unwrap(), 1_000);
    }

    #[test]
    fn test_pool_rates_single_pool_split() {
        let inflation = 200_000_000_000;
        let staked = 10_000_000_000;
        let per_weight = reward_per_weight(inflation, staked).unwrap();
        let rates = pool_rates(per_weight, 40, staked).unwrap();

        let stakers = accrued(staked, 0, rates.stakers_reward).unwrap();
        assert_eq!(fp_to_amount(stakers).unwrap(), inflation * 40 / 100);
        assert_eq!(fp_to_amount(rates.pool_reward).unwrap(), inflation * 60 / 100);
    }

    #[test]
    fn test_pool_rates_share_of_protocol() {
        // The pool holds a quarter of the protocol weight
        let per_weight = reward_per_weight(1_000_000, 1_000).unwrap();
        let rates = pool_rates(per_weight, 50, 250).unwrap();
        let stakers = accrued(250, 0, rates.stakers_reward).unwrap();
        assert_eq!(fp_to_amount(stakers).unwrap(), 125_000);
        assert_eq!(fp_to_amount(rates.pool_reward).unwrap(), 125_000);
    }

    #[test]
    fn test_empty_protocol_has_no_rate() {
        assert_eq!(reward_per_weight(1_000_000, 0).unwrap(), 0);
        assert_eq!(pool_rates(ONE, 50, 0).unwrap(), DailyRates::default());
    }

    #[test]
    fn test_pool_rates_rejects_split_above_hundred() {
        assert_err(pool_rates(ONE, 101, 1), StakingError::StakersPartOutOfBounds);
    }

    #[test]
    fn test_accrued_rejects_decreasing_accumulator() {
        assert_err(accrued(1, 10, 5), StakingError::MathOverflow);
    }
}
