//! Daily bonus - one random payout per calendar day

use crate::config::DailyConstants;
use crate::economy;
use crate::error::EngineError;
use crate::state::BattleState;
use chrono::NaiveDate;
use rand::Rng;

pub fn is_daily_available(state: &BattleState, today: NaiveDate) -> bool {
    state.daily_bonus_claimed_date != Some(today)
}

/// Grant a uniform reward in [min_reward, max_reward] once per `today`
pub fn claim_daily_bonus(
    state: &mut BattleState,
    today: NaiveDate,
    daily: &DailyConstants,
    rng: &mut impl Rng,
) -> Result<u64, EngineError> {
    if !is_daily_available(state, today) {
        return Err(EngineError::DailyAlreadyClaimed);
    }

    let (low, high) = if daily.min_reward <= daily.max_reward {
        (daily.min_reward, daily.max_reward)
    } else {
        (daily.max_reward, daily.min_reward)
    };
    let reward = rng.gen_range(low..=high);

    state.daily_bonus_claimed_date = Some(today);
    economy::credit(state, reward);
    Ok(reward)
}
