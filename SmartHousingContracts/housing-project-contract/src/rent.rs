use crate::external::SmartHousingClient;
use crate::sft;
use crate::types::*;
use soroban_sdk::{token::Client as TokenClient, Address, Env, Symbol, I256};

/// Accepts a rent payment in SHT and applies the protocol split: 75% to
/// the holders' rewards reserve, 7% to the facility fund, the rest burned.
///
/// The reward share is folded into the rewards-per-share accumulator. If
/// no shares have been minted yet it is parked in the undistributed bucket
/// and released with the next rent inflow once supply exists.
pub fn receive_rent(env: Env, tenant: Address, payment: TokenPayment) -> Result<(), Error> {
    tenant.require_auth();

    let details: ProjectDetails = env
        .storage()
        .instance()
        .get(&DataKey::Details)
        .ok_or(Error::DetailsNotSet)?;
    if payment.token != details.sht_token {
        return Err(Error::InvalidPaymentToken);
    }
    if payment.amount <= 0 {
        return Err(Error::InsufficientRent);
    }

    let reward_amount = payment
        .amount
        .checked_mul(RENT_REWARD_PERCENT)
        .ok_or(Error::MathOverflow)?
        / 100;
    let facility_amount = payment
        .amount
        .checked_mul(RENT_FACILITY_PERCENT)
        .ok_or(Error::MathOverflow)?
        / 100;
    let burn_amount = payment.amount - reward_amount - facility_amount;

    let total_rent: i128 = env
        .storage()
        .instance()
        .get(&DataKey::TotalRentReceived)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::TotalRentReceived, &(total_rent + payment.amount));

    let reserve: i128 = env
        .storage()
        .instance()
        .get(&DataKey::RewardsReserve)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::RewardsReserve, &(reserve + reward_amount));

    let facility: i128 = env
        .storage()
        .instance()
        .get(&DataKey::FacilityFunds)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::FacilityFunds, &(facility + facility_amount));

    update_reward_per_share(&env, reward_amount)?;

    let token = TokenClient::new(&env, &payment.token);
    token.transfer(&tenant, &env.current_contract_address(), &payment.amount);
    if burn_amount > 0 {
        token.burn(&env.current_contract_address(), &burn_amount);
    }

    env.events().publish(
        (Symbol::new(&env, "RentReceived"), tenant),
        (payment.amount, reward_amount, facility_amount, burn_amount),
    );

    Ok(())
}

/// Rent claimable by the position at `(owner, nonce)`. Pure view.
pub fn rent_claimable(env: Env, owner: Address, nonce: u64) -> Result<i128, Error> {
    let attributes = sft::get_live_position(&env, &owner, nonce)?;
    let reward_per_share: i128 = env
        .storage()
        .instance()
        .get(&DataKey::RewardPerShare)
        .unwrap_or(0);
    claimable_amount(&env, &attributes, reward_per_share)
}

/// Claims accrued rent for the caller's position at `nonce`.
///
/// A zero claimable amount succeeds as a no-op and leaves the position
/// untouched. Otherwise the nonce is retired and a fresh one appended with
/// the current accumulator snapshot, the reserve is debited, and the payout
/// is transferred, with a 0.3% carve-out to the claimer's referrer when a
/// referral relationship exists. Returns the live nonce.
pub fn claim_rent_reward(env: Env, caller: Address, nonce: u64) -> Result<u64, Error> {
    caller.require_auth();

    let attributes = sft::get_live_position(&env, &caller, nonce)?;
    let reward_per_share: i128 = env
        .storage()
        .instance()
        .get(&DataKey::RewardPerShare)
        .unwrap_or(0);
    let claimable = claimable_amount(&env, &attributes, reward_per_share)?;
    if claimable == 0 {
        return Ok(nonce);
    }

    let details: ProjectDetails = env
        .storage()
        .instance()
        .get(&DataKey::Details)
        .ok_or(Error::DetailsNotSet)?;

    // Effects before interactions: the position moves to its new snapshot
    // and the reserve is debited before any token leaves custody.
    sft::retire_position(&env, &caller, nonce);
    let new_nonce = sft::append_position(
        &env,
        &caller,
        HousingAttributes {
            rewards_per_share: reward_per_share,
            token_weight: attributes.token_weight,
            original_owner: attributes.original_owner,
        },
    );

    let reserve: i128 = env
        .storage()
        .instance()
        .get(&DataKey::RewardsReserve)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::RewardsReserve, &(reserve - claimable));

    let referrer = referrer_of(&env, &caller);
    let bonus = match &referrer {
        Some(_) => claimable * REFERRAL_BONUS_BPS / BPS_DENOMINATOR,
        None => 0,
    };

    let token = TokenClient::new(&env, &details.sht_token);
    token.transfer(
        &env.current_contract_address(),
        &caller,
        &(claimable - bonus),
    );
    if let Some(referrer) = referrer {
        if bonus > 0 {
            token.transfer(&env.current_contract_address(), &referrer, &bonus);
        }
    }

    env.events().publish(
        (Symbol::new(&env, "RentClaimed"), caller),
        (nonce, new_nonce, claimable, bonus),
    );

    Ok(new_nonce)
}

fn claimable_amount(
    env: &Env,
    attributes: &HousingAttributes,
    reward_per_share: i128,
) -> Result<i128, Error> {
    let delta = reward_per_share - attributes.rewards_per_share;
    mul_div(env, delta, attributes.token_weight, RPS_SCALE)
}

// Widened multiply-before-divide; scaled accumulator deltas overflow i128.
fn mul_div(env: &Env, a: i128, b: i128, denominator: i128) -> Result<i128, Error> {
    I256::from_i128(env, a)
        .mul(&I256::from_i128(env, b))
        .div(&I256::from_i128(env, denominator))
        .to_i128()
        .ok_or(Error::MathOverflow)
}

fn update_reward_per_share(env: &Env, reward_amount: i128) -> Result<(), Error> {
    let undistributed: i128 = env
        .storage()
        .instance()
        .get(&DataKey::UndistributedRewards)
        .unwrap_or(0);
    let total_supply: i128 = env
        .storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0);

    if total_supply == 0 {
        env.storage()
            .instance()
            .set(&DataKey::UndistributedRewards, &(undistributed + reward_amount));
        return Ok(());
    }

    let distributable = undistributed + reward_amount;
    let reward_per_share: i128 = env
        .storage()
        .instance()
        .get(&DataKey::RewardPerShare)
        .unwrap_or(0);
    let increase = mul_div(env, distributable, RPS_SCALE, total_supply)?;

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

fn referrer_of(env: &Env, user: &Address) -> Option<Address> {
    let smart_housing: Address = env.storage().instance().get(&DataKey::SmartHousing)?;
    SmartHousingClient::new(env, &smart_housing).get_referrer_address(user)
}
