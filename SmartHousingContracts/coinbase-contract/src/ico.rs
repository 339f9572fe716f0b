use crate::external::{ProjectFundingClient, SmartHousingClient, TokenPayment};
use crate::types::*;
use soroban_sdk::{
    auth::{ContractContext, InvokerContractAuthEntry, SubContractInvocation},
    vec, Address, Env, IntoVal, String, Symbol,
};

/// Opens the ICO: registers project 1 with the funding contract and moves
/// the ICO allocation into its custody. Owner only, exactly once.
#[allow(clippy::too_many_arguments)]
pub fn start_ico(
    env: Env,
    caller: Address,
    name: String,
    symbol: String,
    project_funding: Address,
    project_address: Address,
    funding_token: Address,
    funding_goal: i128,
    funding_deadline: u64,
) -> Result<u32, Error> {
    require_owner(&env, &caller)?;

    let phase = current_phase(&env);
    if phase != DistributionPhase::Pending {
        return Err(Error::IcoAlreadyStarted);
    }
    let sht = sht_token(&env)?;

    env.storage()
        .instance()
        .set(&DataKey::Phase, &DistributionPhase::IcoStarted);

    // The funding contract pulls the allocation from us inside
    // init_first_project; pre-authorize that nested transfer.
    authorize_sht_transfer(&env, &sht, &project_funding, ICO_FUNDS);
    let project_id = ProjectFundingClient::new(&env, &project_funding).init_first_project(
        &TokenPayment {
            token: sht,
            amount: ICO_FUNDS,
        },
        &name,
        &symbol,
        &project_address,
        &funding_token,
        &funding_goal,
        &funding_deadline,
    );

    env.events().publish(
        (Symbol::new(&env, "IcoStarted"), project_id),
        (project_funding, ICO_FUNDS),
    );

    Ok(project_id)
}

/// Dispatches the ecosystem allocation to the SmartHousing hub, arming
/// its staking emission. Owner only, after the ICO, exactly once.
pub fn feed_smart_housing(env: Env, caller: Address, smart_housing: Address) -> Result<(), Error> {
    require_owner(&env, &caller)?;

    match current_phase(&env) {
        DistributionPhase::Pending => return Err(Error::IcoNotStarted),
        DistributionPhase::Dispatched => return Err(Error::AlreadyDispatched),
        DistributionPhase::IcoStarted => {}
    }
    let sht = sht_token(&env)?;

    env.storage()
        .instance()
        .set(&DataKey::Phase, &DistributionPhase::Dispatched);

    authorize_sht_transfer(&env, &sht, &smart_housing, ECOSYSTEM_DISTRIBUTION_FUNDS);
    SmartHousingClient::new(&env, &smart_housing).set_up_sht(
        &env.current_contract_address(),
        &TokenPayment {
            token: sht,
            amount: ECOSYSTEM_DISTRIBUTION_FUNDS,
        },
    );

    env.events().publish(
        (Symbol::new(&env, "EcosystemDispatched"), smart_housing),
        ECOSYSTEM_DISTRIBUTION_FUNDS,
    );

    Ok(())
}

pub fn current_phase(env: &Env) -> DistributionPhase {
    env.storage()
        .instance()
        .get(&DataKey::Phase)
        .unwrap_or(DistributionPhase::Pending)
}

pub fn sht_token(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Sht)
        .ok_or(Error::NotInitialized)
}

pub fn owner(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(Error::NotInitialized)
}

fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if *caller != owner(env)? {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

// Collaborators debit our SHT from inside their own invocation, one level
// below them in the call tree; record the matching invoker auth entry.
fn authorize_sht_transfer(env: &Env, sht: &Address, to: &Address, amount: i128) {
    env.authorize_as_current_contract(vec![
        env,
        InvokerContractAuthEntry::Contract(SubContractInvocation {
            context: ContractContext {
                contract: sht.clone(),
                fn_name: Symbol::new(env, "transfer"),
                args: (env.current_contract_address(), to.clone(), amount).into_val(env),
            },
            sub_invocations: vec![env],
        }),
    ]);
}
