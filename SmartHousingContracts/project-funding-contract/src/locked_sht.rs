use crate::types::*;
use soroban_sdk::{token::Client as TokenClient, Address, Env, Symbol};

/// LkSHT ledger. Records are semi-fungible `(owner, nonce)` entries backed
/// one-to-one by the ICO SHT allocation held in this contract's custody.

pub fn mint_locked(env: &Env, owner: &Address, amount: i128) -> u64 {
    let nonce: u64 = env
        .storage()
        .instance()
        .get(&DataKey::NextLkNonce)
        .unwrap_or(0u64)
        + 1;
    env.storage().instance().set(&DataKey::NextLkNonce, &nonce);

    env.storage().persistent().set(
        &DataKey::LockedSht(owner.clone(), nonce),
        &LockedShtAttributes {
            amount,
            original_owner: owner.clone(),
        },
    );

    env.events().publish(
        (Symbol::new(env, "LockedShtMinted"), owner.clone()),
        (nonce, amount),
    );

    nonce
}

/// Moves an LkSHT record between holders; used by the staking ledger to
/// take custody. The record is re-keyed under a fresh nonce.
pub fn transfer_locked_sht(env: Env, from: Address, to: Address, nonce: u64) -> Result<u64, Error> {
    from.require_auth();

    let attributes: LockedShtAttributes = env
        .storage()
        .persistent()
        .get(&DataKey::LockedSht(from.clone(), nonce))
        .ok_or(Error::InvalidLkNonce)?;
    env.storage()
        .persistent()
        .remove(&DataKey::LockedSht(from, nonce));

    let new_nonce: u64 = env
        .storage()
        .instance()
        .get(&DataKey::NextLkNonce)
        .unwrap_or(0u64)
        + 1;
    env.storage()
        .instance()
        .set(&DataKey::NextLkNonce, &new_nonce);
    env.storage()
        .persistent()
        .set(&DataKey::LockedSht(to, new_nonce), &attributes);

    Ok(new_nonce)
}

/// Burns the holder's LkSHT record and releases the backing SHT to them.
/// The staking ledger calls this after a lock has been served.
pub fn redeem_locked_sht(env: Env, owner: Address, nonce: u64) -> Result<i128, Error> {
    owner.require_auth();

    let attributes: LockedShtAttributes = env
        .storage()
        .persistent()
        .get(&DataKey::LockedSht(owner.clone(), nonce))
        .ok_or(Error::InvalidLkNonce)?;
    env.storage()
        .persistent()
        .remove(&DataKey::LockedSht(owner.clone(), nonce));

    let sht: Address = env
        .storage()
        .instance()
        .get(&DataKey::Sht)
        .ok_or(Error::NotInitialized)?;
    TokenClient::new(&env, &sht).transfer(
        &env.current_contract_address(),
        &owner,
        &attributes.amount,
    );

    env.events().publish(
        (Symbol::new(&env, "LockedShtRedeemed"), owner),
        (nonce, attributes.amount),
    );

    Ok(attributes.amount)
}

pub fn locked_sht(env: &Env, owner: Address, nonce: u64) -> Result<LockedShtAttributes, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::LockedSht(owner, nonce))
        .ok_or(Error::InvalidLkNonce)
}
