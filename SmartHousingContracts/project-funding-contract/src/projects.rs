use crate::external::{HousingProjectClient, SmartHousingClient};
use crate::types::*;
use soroban_sdk::{token::Client as TokenClient, Address, Env, String, Symbol};

/// Registers the first project. Coinbase-only, exactly once; the payment
/// must be the full ICO SHT allocation, which stays in custody here and
/// backs every LkSHT minted to ICO participants.
#[allow(clippy::too_many_arguments)]
pub fn init_first_project(
    env: Env,
    payment: TokenPayment,
    name: String,
    symbol: String,
    project_address: Address,
    funding_token: Address,
    funding_goal: i128,
    funding_deadline: u64,
) -> Result<u32, Error> {
    let coinbase = require_coinbase(&env)?;

    if projects_count(&env) != 0 {
        return Err(Error::FirstProjectInitialized);
    }
    if payment.amount != ICO_FUNDS {
        return Err(Error::WrongAmount);
    }

    env.storage().instance().set(&DataKey::Sht, &payment.token);

    let id = register_project(
        &env,
        name,
        symbol,
        project_address,
        funding_token,
        funding_goal,
        funding_deadline,
    )?;

    TokenClient::new(&env, &payment.token).transfer(
        &coinbase,
        &env.current_contract_address(),
        &payment.amount,
    );

    Ok(id)
}

/// Permissionless registration of a new funding round for an already
/// deployed housing-project contract.
pub fn deploy_project(
    env: Env,
    name: String,
    symbol: String,
    project_address: Address,
    funding_token: Address,
    funding_goal: i128,
    funding_deadline: u64,
) -> Result<u32, Error> {
    if projects_count(&env) == 0 {
        // The ICO round must exist before permissionless rounds open.
        return Err(Error::NotInitialized);
    }
    register_project(
        &env,
        name,
        symbol,
        project_address,
        funding_token,
        funding_goal,
        funding_deadline,
    )
}

/// Marks a project as part of the platform ecosystem, granting its
/// contract referral-proxy rights and staking eligibility.
pub fn add_project_to_ecosystem(env: Env, project_id: u32) -> Result<(), Error> {
    require_coinbase(&env)?;
    let project = get_project(&env, project_id)?;
    let smart_housing: Address = env
        .storage()
        .instance()
        .get(&DataKey::SmartHousing)
        .ok_or(Error::NotInitialized)?;

    SmartHousingClient::new(&env, &smart_housing).add_project(
        &env.current_contract_address(),
        &project.project_address,
    );
    Ok(())
}

/// Pushes token details into the project contract once funding resolves.
/// The recorded goal becomes the project's `amount_raised`, fixing the
/// deposit-to-weight conversion for claims.
pub fn set_project_token(env: Env, project_id: u32) -> Result<(), Error> {
    require_coinbase(&env)?;
    let project = get_project(&env, project_id)?;
    if !is_tokens_claimable(&project) {
        return Err(Error::ProjectNotSuccessful);
    }
    let sht: Address = env
        .storage()
        .instance()
        .get(&DataKey::Sht)
        .ok_or(Error::NotInitialized)?;

    HousingProjectClient::new(&env, &project.project_address).set_token_details(
        &project.name,
        &project.symbol,
        &project.funding_goal,
        &sht,
    );
    Ok(())
}

pub fn get_project(env: &Env, project_id: u32) -> Result<ProjectData, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Project(project_id))
        .ok_or(Error::InvalidProjectId)
}

pub fn projects_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::ProjectsCount)
        .unwrap_or(0)
}

pub fn is_tokens_claimable(project: &ProjectData) -> bool {
    project.collected_funds >= project.funding_goal
}

pub(crate) fn require_coinbase(env: &Env) -> Result<Address, Error> {
    let coinbase: Address = env
        .storage()
        .instance()
        .get(&DataKey::Coinbase)
        .ok_or(Error::NotInitialized)?;
    coinbase.require_auth();
    Ok(coinbase)
}

fn register_project(
    env: &Env,
    name: String,
    symbol: String,
    project_address: Address,
    funding_token: Address,
    funding_goal: i128,
    funding_deadline: u64,
) -> Result<u32, Error> {
    if funding_goal <= 0 {
        return Err(Error::InvalidFundingGoal);
    }
    if funding_deadline <= env.ledger().timestamp() {
        return Err(Error::InvalidDeadline);
    }

    let id = projects_count(env) + 1;
    env.storage().instance().set(&DataKey::ProjectsCount, &id);

    let project = ProjectData {
        id,
        name,
        symbol,
        project_address: project_address.clone(),
        funding_token,
        funding_goal,
        funding_deadline,
        collected_funds: 0,
    };
    env.storage()
        .persistent()
        .set(&DataKey::Project(id), &project);

    env.events().publish(
        (Symbol::new(env, "ProjectDeployed"), id),
        (project_address, funding_goal, funding_deadline),
    );

    Ok(id)
}
