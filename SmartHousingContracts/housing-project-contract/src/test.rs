#![cfg(test)]

use crate::types::*;
use crate::{HousingProjectContract, HousingProjectContractClient};
use soroban_sdk::{
    testutils::Address as _,
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env, String,
};

// Mock SmartHousing hub answering referral lookups.
mod mock_hub {
    use soroban_sdk::{contract, contractimpl, Address, Env};

    #[contract]
    pub struct MockSmartHousing;

    #[contractimpl]
    impl MockSmartHousing {
        pub fn set_referrer(env: Env, user: Address, referrer: Address) {
            env.storage().instance().set(&user, &referrer);
        }

        pub fn get_referrer_address(env: Env, user: Address) -> Option<Address> {
            env.storage().instance().get(&user)
        }
    }
}

const AMOUNT_RAISED: i128 = 1_000_000_000;

struct Fixture {
    env: Env,
    client: HousingProjectContractClient<'static>,
    hub: mock_hub::MockSmartHousingClient<'static>,
    project_funding: Address,
    sht: TokenClient<'static>,
    sht_admin: StellarAssetClient<'static>,
}

impl Fixture {
    fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let project_funding = Address::generate(&env);
        let hub_address = env.register(mock_hub::MockSmartHousing, ());
        let hub = mock_hub::MockSmartHousingClient::new(&env, &hub_address);

        let token_admin = Address::generate(&env);
        let sac = env.register_stellar_asset_contract_v2(token_admin);
        let sht = TokenClient::new(&env, &sac.address());
        let sht_admin = StellarAssetClient::new(&env, &sac.address());

        let contract_address = env.register(HousingProjectContract, ());
        let client = HousingProjectContractClient::new(&env, &contract_address);
        client.initialize(&project_funding, &hub_address);

        Fixture {
            env,
            client,
            hub,
            project_funding,
            sht,
            sht_admin,
        }
    }

    fn set_details(&self) {
        self.client.set_token_details(
            &String::from_str(&self.env, "Incredible Block"),
            &String::from_str(&self.env, "IBLOCK"),
            &AMOUNT_RAISED,
            &self.sht.address,
        );
    }

    fn pay_rent(&self, tenant: &Address, amount: i128) {
        self.sht_admin.mint(tenant, &amount);
        self.client.receive_rent(
            tenant,
            &TokenPayment {
                token: self.sht.address.clone(),
                amount,
            },
        );
    }
}

#[test]
fn test_initialize_once() {
    let f = Fixture::new();
    let result = f
        .client
        .try_initialize(&f.project_funding, &f.hub.address);
    assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
}

#[test]
fn test_set_token_details_once() {
    let f = Fixture::new();
    f.set_details();

    let details = f.client.project_details();
    assert_eq!(details.amount_raised, AMOUNT_RAISED);
    assert_eq!(details.sht_token, f.sht.address);

    let result = f.client.try_set_token_details(
        &String::from_str(&f.env, "Again"),
        &String::from_str(&f.env, "AGN"),
        &AMOUNT_RAISED,
        &f.sht.address,
    );
    assert_eq!(result, Err(Ok(Error::DetailsAlreadySet)));
}

#[test]
fn test_mint_sft_weight_math() {
    let f = Fixture::new();
    f.set_details();
    let investor = Address::generate(&f.env);

    // 10% of the raise converts to 10% of MAX_SUPPLY.
    let nonce = f.client.mint_sft(&investor, &(AMOUNT_RAISED / 10));
    assert_eq!(nonce, 1);
    assert_eq!(f.client.balance_of(&investor, &nonce), MAX_SUPPLY / 10);
    assert_eq!(f.client.total_supply(), MAX_SUPPLY / 10);

    let attributes = f.client.get_user_sft(&investor, &nonce);
    assert_eq!(attributes.rewards_per_share, 0);
    assert_eq!(attributes.token_weight, MAX_SUPPLY / 10);
    assert_eq!(attributes.original_owner, investor);
}

#[test]
fn test_mint_sft_rejects_max_supply_overflow() {
    let f = Fixture::new();
    f.set_details();
    let investor = Address::generate(&f.env);

    let result = f.client.try_mint_sft(&investor, &(AMOUNT_RAISED + 1));
    assert_eq!(result, Err(Ok(Error::MaxSupplyExceeded)));
}

#[test]
fn test_mint_sft_rejects_dust_deposit() {
    let f = Fixture::new();
    f.set_details();
    let investor = Address::generate(&f.env);

    // Below one share unit's worth of deposit.
    let result = f
        .client
        .try_mint_sft(&investor, &(AMOUNT_RAISED / MAX_SUPPLY - 1));
    assert_eq!(result, Err(Ok(Error::InsufficientDeposit)));
}

#[test]
fn test_rent_split_exact() {
    let f = Fixture::new();
    f.set_details();
    let investor = Address::generate(&f.env);
    let tenant = Address::generate(&f.env);
    f.client.mint_sft(&investor, &(AMOUNT_RAISED / 10));

    f.pay_rent(&tenant, 500);

    // 75% reserve, 7% facility, 18% burned.
    assert_eq!(f.client.rewards_reserve(), 375);
    assert_eq!(f.client.facility_funds(), 35);
    assert_eq!(f.client.total_rent_received(), 500);
    assert_eq!(f.sht.balance(&f.client.address), 410);
}

#[test]
fn test_rent_split_remainder_is_burned() {
    let f = Fixture::new();
    f.set_details();
    let investor = Address::generate(&f.env);
    let tenant = Address::generate(&f.env);
    f.client.mint_sft(&investor, &(AMOUNT_RAISED / 10));

    // 503: reward 377 (truncated), facility 35, burn gets the 91 remainder.
    f.pay_rent(&tenant, 503);

    assert_eq!(f.client.rewards_reserve(), 377);
    assert_eq!(f.client.facility_funds(), 35);
    assert_eq!(f.sht.balance(&f.client.address), 412);
}

#[test]
fn test_rent_rejects_wrong_token_and_zero_amount() {
    let f = Fixture::new();
    f.set_details();
    let tenant = Address::generate(&f.env);

    let other_admin = Address::generate(&f.env);
    let other = f.env.register_stellar_asset_contract_v2(other_admin);
    let result = f.client.try_receive_rent(
        &tenant,
        &TokenPayment {
            token: other.address(),
            amount: 100,
        },
    );
    assert_eq!(result, Err(Ok(Error::InvalidPaymentToken)));

    let result = f.client.try_receive_rent(
        &tenant,
        &TokenPayment {
            token: f.sht.address.clone(),
            amount: 0,
        },
    );
    assert_eq!(result, Err(Ok(Error::InsufficientRent)));
}

#[test]
fn test_rent_before_first_mint_is_held() {
    let f = Fixture::new();
    f.set_details();
    let tenant = Address::generate(&f.env);
    let investor = Address::generate(&f.env);

    // No shares yet: the reward share is parked, the accumulator stays flat.
    f.pay_rent(&tenant, 1000);
    assert_eq!(f.client.reward_per_share(), 0);
    assert_eq!(f.client.rewards_reserve(), 750);

    let nonce = f.client.mint_sft(&investor, &(AMOUNT_RAISED / 10));
    assert_eq!(f.client.rent_claimable(&investor, &nonce), 0);

    // The next inflow releases the held rewards together with its own.
    f.pay_rent(&tenant, 1000);
    let expected = (750 + 750) * RPS_SCALE / (MAX_SUPPLY / 10);
    assert_eq!(f.client.reward_per_share(), expected);
    assert_eq!(f.client.rent_claimable(&investor, &nonce), 1500);
}

#[test]
fn test_claim_rent_reward_pays_and_bumps_nonce() {
    let f = Fixture::new();
    f.set_details();
    let investor = Address::generate(&f.env);
    let tenant = Address::generate(&f.env);

    let nonce = f.client.mint_sft(&investor, &(AMOUNT_RAISED / 10));
    f.pay_rent(&tenant, 500_000);

    assert_eq!(f.client.rent_claimable(&investor, &nonce), 375_000);

    let new_nonce = f.client.claim_rent_reward(&investor, &nonce);
    assert_ne!(new_nonce, nonce);
    assert_eq!(f.sht.balance(&investor), 375_000);
    assert_eq!(f.client.rewards_reserve(), 0);

    // Old nonce is retired, the fresh one carries the weight and snapshot.
    assert_eq!(f.client.balance_of(&investor, &nonce), 0);
    assert_eq!(f.client.balance_of(&investor, &new_nonce), MAX_SUPPLY / 10);
    let attributes = f.client.get_user_sft(&investor, &new_nonce);
    assert_eq!(attributes.rewards_per_share, f.client.reward_per_share());
    assert_eq!(attributes.original_owner, investor);
}

#[test]
fn test_claim_without_new_rent_is_noop() {
    let f = Fixture::new();
    f.set_details();
    let investor = Address::generate(&f.env);
    let tenant = Address::generate(&f.env);

    let nonce = f.client.mint_sft(&investor, &(AMOUNT_RAISED / 10));
    f.pay_rent(&tenant, 500_000);
    let nonce = f.client.claim_rent_reward(&investor, &nonce);
    let balance = f.sht.balance(&investor);

    // Same nonce back, no payout, no state change.
    let repeat = f.client.claim_rent_reward(&investor, &nonce);
    assert_eq!(repeat, nonce);
    assert_eq!(f.sht.balance(&investor), balance);

    // New rent accrues again from the updated snapshot.
    f.pay_rent(&tenant, 100_000);
    assert_eq!(f.client.rent_claimable(&investor, &nonce), 75_000);
}

#[test]
fn test_claims_are_proportional_to_weight() {
    let f = Fixture::new();
    f.set_details();
    let small = Address::generate(&f.env);
    let large = Address::generate(&f.env);
    let tenant = Address::generate(&f.env);

    let small_nonce = f.client.mint_sft(&small, &(AMOUNT_RAISED / 10));
    let large_nonce = f.client.mint_sft(&large, &(AMOUNT_RAISED / 5));

    f.pay_rent(&tenant, 900_000);

    f.client.claim_rent_reward(&small, &small_nonce);
    f.client.claim_rent_reward(&large, &large_nonce);

    // 675_000 of rewards over a 1:2 weight split.
    assert_eq!(f.sht.balance(&small), 225_000);
    assert_eq!(f.sht.balance(&large), 450_000);
}

#[test]
fn test_referral_carve_out_on_claim() {
    let f = Fixture::new();
    f.set_details();
    let investor = Address::generate(&f.env);
    let referrer = Address::generate(&f.env);
    let tenant = Address::generate(&f.env);

    f.hub.set_referrer(&investor, &referrer);

    let nonce = f.client.mint_sft(&investor, &(AMOUNT_RAISED / 10));
    f.pay_rent(&tenant, 500_000);

    f.client.claim_rent_reward(&investor, &nonce);

    // 0.3% of the 375_000 payout goes to the referrer.
    assert_eq!(f.sht.balance(&referrer), 1_125);
    assert_eq!(f.sht.balance(&investor), 373_875);
}

#[test]
fn test_no_referrer_full_payout() {
    let f = Fixture::new();
    f.set_details();
    let investor = Address::generate(&f.env);
    let tenant = Address::generate(&f.env);

    let nonce = f.client.mint_sft(&investor, &(AMOUNT_RAISED / 10));
    f.pay_rent(&tenant, 500_000);
    f.client.claim_rent_reward(&investor, &nonce);

    assert_eq!(f.sht.balance(&investor), 375_000);
}

#[test]
fn test_transfer_sft_moves_custody() {
    let f = Fixture::new();
    f.set_details();
    let investor = Address::generate(&f.env);
    let custodian = Address::generate(&f.env);

    let nonce = f.client.mint_sft(&investor, &(AMOUNT_RAISED / 10));
    let moved = f.client.transfer_sft(&investor, &custodian, &nonce);

    assert_eq!(f.client.balance_of(&investor, &nonce), 0);
    assert_eq!(f.client.balance_of(&custodian, &moved), MAX_SUPPLY / 10);

    // Attributes travel with the position, original owner included.
    let attributes = f.client.get_user_sft(&custodian, &moved);
    assert_eq!(attributes.original_owner, investor);

    // The sender can no longer move the retired nonce.
    let result = f.client.try_transfer_sft(&investor, &custodian, &nonce);
    assert_eq!(result, Err(Ok(Error::InvalidSftNonce)));
}

#[test]
fn test_retired_nonce_not_visible() {
    let f = Fixture::new();
    f.set_details();
    let investor = Address::generate(&f.env);
    let tenant = Address::generate(&f.env);

    let nonce = f.client.mint_sft(&investor, &(AMOUNT_RAISED / 10));
    f.pay_rent(&tenant, 500_000);
    let new_nonce = f.client.claim_rent_reward(&investor, &nonce);

    // The retired nonce disappears from every view surface alike.
    assert_eq!(f.client.balance_of(&investor, &nonce), 0);
    let result = f.client.try_get_user_sft(&investor, &nonce);
    assert_eq!(result, Err(Ok(Error::InvalidSftNonce)));
    assert_eq!(
        f.client.get_user_sft(&investor, &new_nonce).token_weight,
        MAX_SUPPLY / 10
    );
}

#[test]
fn test_claim_unknown_nonce_rejected() {
    let f = Fixture::new();
    f.set_details();
    let stranger = Address::generate(&f.env);

    let result = f.client.try_claim_rent_reward(&stranger, &42);
    assert_eq!(result, Err(Ok(Error::InvalidSftNonce)));
}
