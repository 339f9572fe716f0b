use crate::types::*;
use soroban_sdk::{token::Client as TokenClient, Address, Env, Symbol, I256};

/// One-shot SHT configuration. The coinbase dispatches the full ecosystem
/// allocation; it seeds the reserve and is released to stakers epoch by
/// epoch from here on.
pub fn set_up_sht(env: Env, caller: Address, payment: TokenPayment) -> Result<(), Error> {
    caller.require_auth();

    let coinbase: Address = env
        .storage()
        .instance()
        .get(&DataKey::Coinbase)
        .ok_or(Error::NotInitialized)?;
    if caller != coinbase {
        return Err(Error::Unauthorized);
    }

    let phase: SetupPhase = env
        .storage()
        .instance()
        .get(&DataKey::ShtPhase)
        .unwrap_or(SetupPhase::Pending);
    if phase == SetupPhase::Configured {
        return Err(Error::ShtAlreadySet);
    }
    if payment.amount != ECOSYSTEM_DISTRIBUTION_FUNDS {
        return Err(Error::WrongAmount);
    }

    env.storage().instance().set(&DataKey::Sht, &payment.token);
    env.storage()
        .instance()
        .set(&DataKey::ShtPhase, &SetupPhase::Configured);
    env.storage()
        .instance()
        .set(&DataKey::RewardsReserve, &payment.amount);
    env.storage()
        .instance()
        .set(&DataKey::LastEmissionEpoch, &current_epoch(&env));

    TokenClient::new(&env, &payment.token).transfer(
        &caller,
        &env.current_contract_address(),
        &payment.amount,
    );

    env.events()
        .publish((Symbol::new(&env, "ShtConfigured"),), payment.amount);

    Ok(())
}

/// Folds the emission due since the last run into the accumulator.
/// Emission accrued while no weight is staked is parked and released with
/// the next run that finds stakers. Called lazily from stake and claim.
pub fn generate_rewards(env: &Env) -> Result<(), Error> {
    let last_epoch: u64 = env
        .storage()
        .instance()
        .get(&DataKey::LastEmissionEpoch)
        .unwrap_or(0);
    let now_epoch = current_epoch(env);
    if now_epoch <= last_epoch {
        return Ok(());
    }
    env.storage()
        .instance()
        .set(&DataKey::LastEmissionEpoch, &now_epoch);

    let emission = pending_emission(env, last_epoch, now_epoch)?;
    let emitted: i128 = env
        .storage()
        .instance()
        .get(&DataKey::EmittedRewards)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::EmittedRewards, &(emitted + emission));

    let undistributed: i128 = env
        .storage()
        .instance()
        .get(&DataKey::UndistributedRewards)
        .unwrap_or(0);
    let total_weight: i128 = env
        .storage()
        .instance()
        .get(&DataKey::TotalStakeWeight)
        .unwrap_or(0);

    if total_weight == 0 {
        env.storage()
            .instance()
            .set(&DataKey::UndistributedRewards, &(undistributed + emission));
        return Ok(());
    }

    let distributable = undistributed + emission;
    if distributable == 0 {
        return Ok(());
    }

    let reward_per_share: i128 = env
        .storage()
        .instance()
        .get(&DataKey::RewardPerShare)
        .unwrap_or(0);
    let increase = mul_div(env, distributable, RPS_SCALE, total_weight)?;
    env.storage()
        .instance()
        .set(&DataKey::RewardPerShare, &(reward_per_share + increase));
    if undistributed != 0 {
        env.storage()
            .instance()
            .set(&DataKey::UndistributedRewards, &0i128);
    }

    Ok(())
}

/// Accumulator value a view would observe after the pending emission,
/// without mutating state.
pub fn projected_reward_per_share(env: &Env) -> Result<i128, Error> {
    let reward_per_share: i128 = env
        .storage()
        .instance()
        .get(&DataKey::RewardPerShare)
        .unwrap_or(0);
    let total_weight: i128 = env
        .storage()
        .instance()
        .get(&DataKey::TotalStakeWeight)
        .unwrap_or(0);
    if total_weight == 0 {
        return Ok(reward_per_share);
    }

    let last_epoch: u64 = env
        .storage()
        .instance()
        .get(&DataKey::LastEmissionEpoch)
        .unwrap_or(0);
    let emission = pending_emission(env, last_epoch, current_epoch(env))?;
    let undistributed: i128 = env
        .storage()
        .instance()
        .get(&DataKey::UndistributedRewards)
        .unwrap_or(0);

    let increase = mul_div(env, undistributed + emission, RPS_SCALE, total_weight)?;
    Ok(reward_per_share + increase)
}

pub fn current_epoch(env: &Env) -> u64 {
    env.ledger().timestamp() / EPOCH_LENGTH
}

pub fn sht_token(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Sht)
        .ok_or(Error::ShtNotSet)
}

// Widened multiply-before-divide; scaled accumulator deltas overflow i128.
pub fn mul_div(env: &Env, a: i128, b: i128, denominator: i128) -> Result<i128, Error> {
    I256::from_i128(env, a)
        .mul(&I256::from_i128(env, b))
        .div(&I256::from_i128(env, denominator))
        .to_i128()
        .ok_or(Error::MathOverflow)
}

fn pending_emission(env: &Env, from_epoch: u64, to_epoch: u64) -> Result<i128, Error> {
    let elapsed = to_epoch.saturating_sub(from_epoch);
    let emitted: i128 = env
        .storage()
        .instance()
        .get(&DataKey::EmittedRewards)
        .unwrap_or(0);
    let remaining = ECOSYSTEM_DISTRIBUTION_FUNDS - emitted;

    let emission = (elapsed as i128)
        .checked_mul(REWARDS_PER_EPOCH)
        .ok_or(Error::MathOverflow)?;
    Ok(emission.min(remaining))
}
