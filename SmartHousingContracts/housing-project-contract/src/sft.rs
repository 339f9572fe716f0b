use crate::types::*;
use soroban_sdk::{Address, Env, Symbol, Vec};

/// Mints an SFT position for `depositor`. Only the funding contract may
/// call this; the deposit is the amount the user paid during funding and
/// converts to share units via `deposit * MAX_SUPPLY / amount_raised`.
pub fn mint_sft(env: Env, depositor: Address, deposit_amount: i128) -> Result<u64, Error> {
    let project_funding: Address = env
        .storage()
        .instance()
        .get(&DataKey::ProjectFunding)
        .ok_or(Error::NotInitialized)?;
    project_funding.require_auth();

    let details: ProjectDetails = env
        .storage()
        .instance()
        .get(&DataKey::Details)
        .ok_or(Error::DetailsNotSet)?;

    let token_weight = deposit_amount
        .checked_mul(MAX_SUPPLY)
        .ok_or(Error::MathOverflow)?
        / details.amount_raised;
    if token_weight <= 0 {
        return Err(Error::InsufficientDeposit);
    }

    let total_supply: i128 = env
        .storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0);
    if total_supply + token_weight > MAX_SUPPLY {
        return Err(Error::MaxSupplyExceeded);
    }

    // New positions snapshot the accumulator as it stands; during the
    // funding phase this is zero, so holders earn from first rent onwards.
    let reward_per_share: i128 = env
        .storage()
        .instance()
        .get(&DataKey::RewardPerShare)
        .unwrap_or(0);

    let nonce = append_position(
        &env,
        &depositor,
        HousingAttributes {
            rewards_per_share: reward_per_share,
            token_weight,
            original_owner: depositor.clone(),
        },
    );

    env.storage()
        .instance()
        .set(&DataKey::TotalSupply, &(total_supply + token_weight));

    env.events().publish(
        (Symbol::new(&env, "SftMinted"), depositor),
        (nonce, token_weight),
    );

    Ok(nonce)
}

/// Moves a live position from `from` to `to`. The position is re-keyed
/// under a fresh nonce for the recipient; weight, accumulator snapshot and
/// original owner travel with it. Used by the staking ledger for custody.
pub fn transfer_sft(env: Env, from: Address, to: Address, nonce: u64) -> Result<u64, Error> {
    from.require_auth();

    let attributes = get_live_position(&env, &from, nonce)?;
    retire_position(&env, &from, nonce);
    let new_nonce = append_position(&env, &to, attributes);

    env.events().publish(
        (Symbol::new(&env, "SftTransferred"), from, to),
        (nonce, new_nonce),
    );

    Ok(new_nonce)
}

/// Weight held by `owner` at `nonce`; zero for retired or unknown nonces.
pub fn balance_of(env: Env, owner: Address, nonce: u64) -> i128 {
    if !is_active(&env, &owner, nonce) {
        return 0;
    }
    env.storage()
        .persistent()
        .get::<_, HousingAttributes>(&DataKey::Sft(owner, nonce))
        .map_or(0, |attr| attr.token_weight)
}

/// Attributes of the live position at `(owner, nonce)`. Retired nonces
/// are not visible here, matching `balance_of`.
pub fn get_user_sft(env: Env, owner: Address, nonce: u64) -> Result<HousingAttributes, Error> {
    get_live_position(&env, &owner, nonce)
}

pub fn active_nonces(env: Env, owner: Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::ActiveNonces(owner))
        .unwrap_or_else(|| Vec::new(&env))
}

// Arena internals. Positions are append-only: retired records stay in
// storage under their old key for auditability, only the live set shrinks.

pub(crate) fn get_live_position(
    env: &Env,
    owner: &Address,
    nonce: u64,
) -> Result<HousingAttributes, Error> {
    if !is_active(env, owner, nonce) {
        return Err(Error::InvalidSftNonce);
    }
    env.storage()
        .persistent()
        .get(&DataKey::Sft(owner.clone(), nonce))
        .ok_or(Error::InvalidSftNonce)
}

pub(crate) fn append_position(env: &Env, owner: &Address, attributes: HousingAttributes) -> u64 {
    let nonce: u64 = env
        .storage()
        .instance()
        .get(&DataKey::NextSftNonce)
        .unwrap_or(0u64)
        + 1;
    env.storage().instance().set(&DataKey::NextSftNonce, &nonce);

    env.storage()
        .persistent()
        .set(&DataKey::Sft(owner.clone(), nonce), &attributes);

    let mut nonces: Vec<u64> = env
        .storage()
        .persistent()
        .get(&DataKey::ActiveNonces(owner.clone()))
        .unwrap_or_else(|| Vec::new(env));
    nonces.push_back(nonce);
    env.storage()
        .persistent()
        .set(&DataKey::ActiveNonces(owner.clone()), &nonces);

    nonce
}

pub(crate) fn retire_position(env: &Env, owner: &Address, nonce: u64) {
    let nonces: Vec<u64> = env
        .storage()
        .persistent()
        .get(&DataKey::ActiveNonces(owner.clone()))
        .unwrap_or_else(|| Vec::new(env));
    if let Some(index) = nonces.first_index_of(nonce) {
        let mut nonces = nonces;
        nonces.remove(index);
        env.storage()
            .persistent()
            .set(&DataKey::ActiveNonces(owner.clone()), &nonces);
    }
}

pub(crate) fn is_active(env: &Env, owner: &Address, nonce: u64) -> bool {
    env.storage()
        .persistent()
        .get::<_, Vec<u64>>(&DataKey::ActiveNonces(owner.clone()))
        .map_or(false, |nonces| nonces.contains(&nonce))
}
