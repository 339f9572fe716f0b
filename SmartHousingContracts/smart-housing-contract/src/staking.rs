use crate::external::{HousingProjectClient, ProjectFundingClient};
use crate::rewards;
use crate::types::*;
use crate::users;
use soroban_sdk::{token::Client as TokenClient, Address, Env, Symbol, Vec};

/// Locks a heterogeneous bundle of assets for `epochs_lock` epochs and
/// mints a stake position with their aggregated weight. The position's
/// accumulator snapshot is taken after the pending emission is folded in,
/// so late stakers never accrue retroactively.
pub fn stake(
    env: Env,
    user: Address,
    payments: Vec<StakingPayment>,
    epochs_lock: u64,
    referrer_id: u64,
) -> Result<u64, Error> {
    user.require_auth();

    rewards::sht_token(&env)?;
    if payments.is_empty() {
        return Err(Error::NoPayments);
    }
    if !(MIN_EPOCHS_LOCK..=MAX_EPOCHS_LOCK).contains(&epochs_lock) {
        return Err(Error::InvalidLockPeriod);
    }

    rewards::generate_rewards(&env)?;
    users::register_user(&env, &user, referrer_id)?;

    let mut token_weight: i128 = 0;
    let mut deposits: Vec<StakingPayment> = Vec::new(&env);
    for payment in payments.iter() {
        let (weight, custody) = take_custody(&env, &user, &payment)?;
        token_weight += weight;
        deposits.push_back(custody);
    }
    if token_weight <= 0 {
        return Err(Error::InsufficientPayment);
    }

    let reward_per_share: i128 = env
        .storage()
        .instance()
        .get(&DataKey::RewardPerShare)
        .unwrap_or(0);
    let unlock_timestamp = env.ledger().timestamp() + epochs_lock * EPOCH_LENGTH;

    let nonce: u64 = env
        .storage()
        .instance()
        .get(&DataKey::NextStakeNonce)
        .unwrap_or(0u64)
        + 1;
    env.storage().instance().set(&DataKey::NextStakeNonce, &nonce);
    env.storage().persistent().set(
        &DataKey::StakePosition(user.clone(), nonce),
        &StakePosition {
            token_weight,
            epochs_locked: epochs_lock,
            unlock_timestamp,
            rewards_per_share: reward_per_share,
            claimed: false,
            deposits,
        },
    );

    let total_weight: i128 = env
        .storage()
        .instance()
        .get(&DataKey::TotalStakeWeight)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::TotalStakeWeight, &(total_weight + token_weight));

    env.events().publish(
        (Symbol::new(&env, "Staked"), user),
        (nonce, token_weight, unlock_timestamp),
    );

    Ok(nonce)
}

/// Pays out a matured stake: the accrued rewards (less the referral
/// carve-out when a referrer exists) plus the deposited assets. Terminal;
/// a position claims exactly once.
pub fn claim_rewards(
    env: Env,
    user: Address,
    stake_nonce: u64,
    referrer_id: u64,
) -> Result<i128, Error> {
    user.require_auth();

    let mut position: StakePosition = env
        .storage()
        .persistent()
        .get(&DataKey::StakePosition(user.clone(), stake_nonce))
        .ok_or(Error::StakeNotFound)?;
    if env.ledger().timestamp() < position.unlock_timestamp {
        return Err(Error::LockNotExpired);
    }
    if position.claimed {
        return Err(Error::AlreadyClaimed);
    }

    rewards::generate_rewards(&env)?;
    users::register_user(&env, &user, referrer_id)?;

    let reward_per_share: i128 = env
        .storage()
        .instance()
        .get(&DataKey::RewardPerShare)
        .unwrap_or(0);
    let payout = rewards::mul_div(
        &env,
        reward_per_share - position.rewards_per_share,
        position.token_weight,
        RPS_SCALE,
    )?;

    // Effects before interactions: the position is terminal and the pool
    // shrinks before any asset leaves custody.
    position.claimed = true;
    env.storage().persistent().set(
        &DataKey::StakePosition(user.clone(), stake_nonce),
        &position,
    );

    let total_weight: i128 = env
        .storage()
        .instance()
        .get(&DataKey::TotalStakeWeight)
        .unwrap_or(0);
    env.storage().instance().set(
        &DataKey::TotalStakeWeight,
        &(total_weight - position.token_weight),
    );

    let sht = rewards::sht_token(&env)?;
    let token = TokenClient::new(&env, &sht);

    if payout > 0 {
        let reserve: i128 = env
            .storage()
            .instance()
            .get(&DataKey::RewardsReserve)
            .unwrap_or(0);
        env.storage()
            .instance()
            .set(&DataKey::RewardsReserve, &(reserve - payout));

        let referrer = users::get_referrer(&env, &user).referrer_address;
        let bonus = match &referrer {
            Some(_) => payout * REFERRAL_BONUS_BPS / BPS_DENOMINATOR,
            None => 0,
        };
        token.transfer(&env.current_contract_address(), &user, &(payout - bonus));
        if let Some(referrer) = referrer {
            if bonus > 0 {
                token.transfer(&env.current_contract_address(), &referrer, &bonus);
            }
        }
    }

    return_deposits(&env, &user, &position.deposits, &token)?;

    env.events().publish(
        (Symbol::new(&env, "RewardsClaimed"), user),
        (stake_nonce, payout),
    );

    Ok(payout)
}

/// True iff the position exists, belongs to `user`, has matured, and has
/// not been claimed.
pub fn user_can_claim(env: &Env, user: Address, nonce: u64) -> bool {
    env.storage()
        .persistent()
        .get::<_, StakePosition>(&DataKey::StakePosition(user, nonce))
        .map_or(false, |position| {
            !position.claimed && env.ledger().timestamp() >= position.unlock_timestamp
        })
}

pub fn get_stake_position(env: &Env, user: Address, nonce: u64) -> Result<StakePosition, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::StakePosition(user, nonce))
        .ok_or(Error::StakeNotFound)
}

/// Rewards the position would receive if claimed now, pending emission
/// included. Pure view.
pub fn pending_rewards(env: &Env, user: Address, nonce: u64) -> Result<i128, Error> {
    let position = get_stake_position(env, user, nonce)?;
    if position.claimed {
        return Ok(0);
    }
    let reward_per_share = rewards::projected_reward_per_share(env)?;
    rewards::mul_div(
        env,
        reward_per_share - position.rewards_per_share,
        position.token_weight,
        RPS_SCALE,
    )
}

// Normalizes one payment to weight units and moves it into custody.
// Returns the weight and the deposit record under its custody nonce.
fn take_custody(
    env: &Env,
    user: &Address,
    payment: &StakingPayment,
) -> Result<(i128, StakingPayment), Error> {
    match payment.kind {
        AssetKind::Sht => {
            let sht = rewards::sht_token(env)?;
            if payment.token != sht {
                return Err(Error::InvalidPaymentToken);
            }
            if payment.amount <= 0 {
                return Err(Error::InsufficientPayment);
            }
            TokenClient::new(env, &sht).transfer(
                user,
                &env.current_contract_address(),
                &payment.amount,
            );
            Ok((payment.amount, payment.clone()))
        }
        AssetKind::LockedSht => {
            let project_funding: Address = env
                .storage()
                .instance()
                .get(&DataKey::ProjectFunding)
                .ok_or(Error::NotInitialized)?;
            if payment.token != project_funding {
                return Err(Error::InvalidPaymentToken);
            }
            let client = ProjectFundingClient::new(env, &project_funding);
            let amount = client.locked_sht(user, &payment.nonce).amount;
            let custody_nonce = client.transfer_locked_sht(
                user,
                &env.current_contract_address(),
                &payment.nonce,
            );
            Ok((
                amount,
                StakingPayment {
                    kind: AssetKind::LockedSht,
                    token: payment.token.clone(),
                    nonce: custody_nonce,
                    amount,
                },
            ))
        }
        AssetKind::ProjectSft => {
            if !users::is_permitted_project(env, &payment.token) {
                return Err(Error::UnknownProject);
            }
            let client = HousingProjectClient::new(env, &payment.token);
            let weight = client.get_user_sft(user, &payment.nonce).token_weight;
            let custody_nonce =
                client.transfer_sft(user, &env.current_contract_address(), &payment.nonce);
            Ok((
                weight,
                StakingPayment {
                    kind: AssetKind::ProjectSft,
                    token: payment.token.clone(),
                    nonce: custody_nonce,
                    amount: weight,
                },
            ))
        }
    }
}

// Hands the deposited assets back: SHT as-is, LkSHT redeemed to liquid
// SHT (the lock has been served through the stake), SFTs transferred.
fn return_deposits(
    env: &Env,
    user: &Address,
    deposits: &Vec<StakingPayment>,
    token: &TokenClient<'_>,
) -> Result<(), Error> {
    for deposit in deposits.iter() {
        match deposit.kind {
            AssetKind::Sht => {
                token.transfer(&env.current_contract_address(), user, &deposit.amount);
            }
            AssetKind::LockedSht => {
                let project_funding: Address = env
                    .storage()
                    .instance()
                    .get(&DataKey::ProjectFunding)
                    .ok_or(Error::NotInitialized)?;
                let client = ProjectFundingClient::new(env, &project_funding);
                let amount =
                    client.redeem_locked_sht(&env.current_contract_address(), &deposit.nonce);
                token.transfer(&env.current_contract_address(), user, &amount);
            }
            AssetKind::ProjectSft => {
                HousingProjectClient::new(env, &deposit.token).transfer_sft(
                    &env.current_contract_address(),
                    user,
                    &deposit.nonce,
                );
            }
        }
    }
    Ok(())
}
