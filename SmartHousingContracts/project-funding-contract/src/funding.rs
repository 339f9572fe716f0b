use crate::external::{HousingProjectClient, SmartHousingClient};
use crate::locked_sht;
use crate::projects;
use crate::types::*;
use soroban_sdk::{token::Client as TokenClient, Address, Env, Symbol};

/// Accepts a funding payment towards a project. The funder's deposit
/// accumulates in the ledger; their first interaction also registers them
/// with the referral graph under `referrer_id` (0 = no referrer).
pub fn fund_project(
    env: Env,
    funder: Address,
    payment: TokenPayment,
    project_id: u32,
    referrer_id: u64,
) -> Result<(), Error> {
    funder.require_auth();

    let mut project = projects::get_project(&env, project_id)?;
    if env.ledger().timestamp() > project.funding_deadline {
        return Err(Error::FundingDeadlinePassed);
    }
    if payment.token != project.funding_token {
        return Err(Error::InvalidPaymentToken);
    }
    if payment.amount <= 0 {
        return Err(Error::InsufficientPayment);
    }

    // Deposits convert to ownership at `deposit * MAX_SUPPLY / goal`, so
    // collected funds may never exceed the goal or late claimers would
    // overflow the share supply with no refund path.
    project.collected_funds = project
        .collected_funds
        .checked_add(payment.amount)
        .ok_or(Error::MathOverflow)?;
    if project.collected_funds > project.funding_goal {
        return Err(Error::FundingGoalExceeded);
    }
    env.storage()
        .persistent()
        .set(&DataKey::Project(project_id), &project);

    let deposit: i128 = env
        .storage()
        .persistent()
        .get(&DataKey::Deposit(project_id, funder.clone()))
        .unwrap_or(0);
    env.storage().persistent().set(
        &DataKey::Deposit(project_id, funder.clone()),
        &(deposit + payment.amount),
    );

    register_funder(&env, &funder, referrer_id)?;

    TokenClient::new(&env, &payment.token).transfer(
        &funder,
        &env.current_contract_address(),
        &payment.amount,
    );

    env.events().publish(
        (Symbol::new(&env, "ProjectFunded"), project_id, funder),
        payment.amount,
    );

    Ok(())
}

/// Converts the caller's recorded deposit into project ownership tokens.
/// The deposit is zeroed before the mint call goes out, so a claim can
/// never be replayed. ICO (project 1) claims additionally mint LkSHT at
/// the deposit's share of the ICO allocation.
pub fn claim_project_tokens(env: Env, claimer: Address, project_id: u32) -> Result<u64, Error> {
    claimer.require_auth();

    let project = projects::get_project(&env, project_id)?;
    if !projects::is_tokens_claimable(&project) {
        return Err(Error::ProjectNotSuccessful);
    }

    let deposit: i128 = env
        .storage()
        .persistent()
        .get(&DataKey::Deposit(project_id, claimer.clone()))
        .unwrap_or(0);
    if deposit == 0 {
        return Err(Error::NothingToClaim);
    }
    env.storage()
        .persistent()
        .set(&DataKey::Deposit(project_id, claimer.clone()), &0i128);

    let sft_nonce =
        HousingProjectClient::new(&env, &project.project_address).mint_sft(&claimer, &deposit);

    if project_id == 1 {
        let lk_amount = deposit
            .checked_mul(ICO_FUNDS)
            .ok_or(Error::MathOverflow)?
            / project.funding_goal;
        if lk_amount > 0 {
            locked_sht::mint_locked(&env, &claimer, lk_amount);
        }
    }

    env.events().publish(
        (Symbol::new(&env, "ProjectTokensClaimed"), project_id, claimer),
        (deposit, sft_nonce),
    );

    Ok(sft_nonce)
}

pub fn user_deposit(env: &Env, project_id: u32, user: Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Deposit(project_id, user))
        .unwrap_or(0)
}

fn register_funder(env: &Env, funder: &Address, referrer_id: u64) -> Result<(), Error> {
    let smart_housing: Address = env
        .storage()
        .instance()
        .get(&DataKey::SmartHousing)
        .ok_or(Error::NotInitialized)?;
    SmartHousingClient::new(env, &smart_housing).create_ref_id_via_proxy(
        &env.current_contract_address(),
        funder,
        &referrer_id,
    );
    Ok(())
}
