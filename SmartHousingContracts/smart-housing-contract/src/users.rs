use crate::types::*;
use soroban_sdk::{Address, Env, Symbol, Vec};

/// Registers `user` on behalf of a permitted proxy (the funding contract
/// or an ecosystem project). Ids are sequential and 1-based; the referrer
/// binding is one-shot and never overwritten by later calls.
pub fn create_ref_id_via_proxy(
    env: Env,
    caller: Address,
    user: Address,
    referrer_id: u64,
) -> Result<u64, Error> {
    caller.require_auth();

    let project_funding: Address = env
        .storage()
        .instance()
        .get(&DataKey::ProjectFunding)
        .ok_or(Error::NotInitialized)?;
    if caller != project_funding && !is_permitted_project(&env, &caller) {
        return Err(Error::Unauthorized);
    }

    register_user(&env, &user, referrer_id)
}

/// Shared registration path: proxy calls and the staking ledger both land
/// here. Assigns an id on first sight and binds the referrer if the user
/// has none yet and `referrer_id` names a valid, distinct user.
pub fn register_user(env: &Env, user: &Address, referrer_id: u64) -> Result<u64, Error> {
    let user_id = match get_user_id(env, user) {
        0 => {
            let id: u64 = user_count(env) + 1;
            env.storage().instance().set(&DataKey::UserCount, &id);
            env.storage()
                .persistent()
                .set(&DataKey::UserId(user.clone()), &id);
            env.storage()
                .persistent()
                .set(&DataKey::UserAddress(id), user);
            env.events()
                .publish((Symbol::new(env, "UserRegistered"), user.clone()), id);
            id
        }
        id => id,
    };

    if referrer_id != 0 && get_referrer(env, user).referrer_id == 0 {
        let referrer_address: Address = env
            .storage()
            .persistent()
            .get(&DataKey::UserAddress(referrer_id))
            .ok_or(Error::InvalidReferrerId)?;
        if referrer_address == *user {
            return Err(Error::SelfReferral);
        }

        env.storage().persistent().set(
            &DataKey::Referrer(user.clone()),
            &ReferrerRecord {
                referrer_id,
                referrer_address: Some(referrer_address.clone()),
            },
        );

        let mut referrals: Vec<Address> = env
            .storage()
            .persistent()
            .get(&DataKey::Referrals(referrer_address.clone()))
            .unwrap_or_else(|| Vec::new(env));
        referrals.push_back(user.clone());
        env.storage()
            .persistent()
            .set(&DataKey::Referrals(referrer_address.clone()), &referrals);

        env.events().publish(
            (Symbol::new(env, "ReferrerBound"), user.clone()),
            referrer_id,
        );
    }

    Ok(user_id)
}

pub fn get_user_id(env: &Env, user: &Address) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::UserId(user.clone()))
        .unwrap_or(0)
}

pub fn get_user_address(env: &Env, user_id: u64) -> Option<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::UserAddress(user_id))
}

pub fn get_referrer(env: &Env, user: &Address) -> ReferrerRecord {
    env.storage()
        .persistent()
        .get(&DataKey::Referrer(user.clone()))
        .unwrap_or(ReferrerRecord {
            referrer_id: 0,
            referrer_address: None,
        })
}

pub fn get_referrals(env: &Env, user: &Address) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Referrals(user.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn user_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::UserCount)
        .unwrap_or(0)
}

pub fn is_permitted_project(env: &Env, address: &Address) -> bool {
    permitted_projects(env).contains(address)
}

pub fn permitted_projects(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::PermittedProjects)
        .unwrap_or_else(|| Vec::new(env))
}

/// Adds a project contract to the ecosystem; funding contract only.
pub fn add_project(env: Env, caller: Address, project_address: Address) -> Result<(), Error> {
    caller.require_auth();

    let project_funding: Address = env
        .storage()
        .instance()
        .get(&DataKey::ProjectFunding)
        .ok_or(Error::NotInitialized)?;
    if caller != project_funding {
        return Err(Error::Unauthorized);
    }

    let mut projects = permitted_projects(&env);
    if projects.contains(&project_address) {
        return Err(Error::ProjectAlreadyAdded);
    }
    projects.push_back(project_address.clone());
    env.storage()
        .instance()
        .set(&DataKey::PermittedProjects, &projects);

    env.events()
        .publish((Symbol::new(&env, "ProjectAdded"),), project_address);

    Ok(())
}
