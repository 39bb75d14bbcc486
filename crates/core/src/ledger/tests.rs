use super::*;

fn property(code: &str, color: &str, cost: i64, rent: &[i64], house_cost: i64) -> Property {
    Property::new(
        format!("{code} Lot"),
        color.to_string(),
        code.to_string(),
        cost,
        rent.to_vec(),
        house_cost,
    )
}

fn board() -> Catalog {
    Catalog::new(vec![
        property("MA", "brown", 60, &[2, 10, 30, 90, 160, 250], 50),
        property("BA", "brown", 60, &[4, 20, 60, 180, 320, 450], 50),
        property("RL1", "railroad", 200, &[25], 0),
        property("RL2", "railroad", 200, &[25], 0),
        property("RL3", "railroad", 200, &[25], 0),
        property("RL4", "railroad", 200, &[25], 0),
        property("U1", "utility", 150, &[0], 0),
        property("U2", "utility", 150, &[0], 0),
        property("SH", "green", 100, &[10], 50),
        property("PP", "blue", 350, &[35, 175, 500, 1100, 1300, 1500], 200),
        property("BW", "blue", 400, &[50, 200, 600, 1400, 1700, 2000], 200),
    ])
}

fn ledger() -> Ledger {
    let rules = Rules::default();
    let registry = Registry::new(["Ann", "Ben"], rules.starting_cash).expect("registry");
    Ledger::new(board(), registry, rules)
}

fn cash(ledger: &Ledger, name: &str) -> i64 {
    ledger.registry().lookup(name).expect("player").cash
}

fn prop<'a>(ledger: &'a Ledger, code: &str) -> &'a Property {
    ledger.catalog().lookup(code).expect("property")
}

/// Everything a rejected operation must leave alone.
fn snapshot(ledger: &Ledger) -> (Vec<crate::registry::Player>, Vec<Property>) {
    (
        ledger.registry().iter().cloned().collect(),
        ledger.catalog().iter().cloned().collect(),
    )
}

fn buy_all(ledger: &mut Ledger, player: &str, codes: &[&str]) {
    for code in codes {
        ledger.buy(player, code).expect("buy");
    }
}

#[test]
fn buy_debits_cost_and_records_owner() {
    let mut ledger = ledger();
    let receipt = ledger.buy("ANN", "bw").expect("buy");

    assert_eq!(
        receipt,
        Receipt::Bought {
            player: "ann".to_string(),
            property: "BW Lot".to_string(),
            price: 400,
        }
    );
    assert_eq!(cash(&ledger, "ann"), 1600);
    assert_eq!(prop(&ledger, "BW").owner.as_deref(), Some("ann"));
    assert_eq!(ledger.registry().lookup("ann").expect("ann").properties, ["BW"]);
}

#[test]
fn buying_owned_property_changes_nothing() {
    let mut ledger = ledger();
    ledger.buy("ann", "MA").expect("buy");
    let before = snapshot(&ledger);

    let err = ledger.buy("ben", "MA").unwrap_err();
    assert_eq!(
        err,
        LedgerError::AlreadyOwned {
            code: "MA".to_string(),
            owner: "ann".to_string(),
        }
    );
    assert_eq!(snapshot(&ledger), before);
}

#[test]
fn buy_requires_funds_and_known_names() {
    let mut ledger = ledger();
    ledger.remove_cash("ann", 1700).expect("remove");

    assert_eq!(
        ledger.buy("ann", "BW"),
        Err(LedgerError::InsufficientFunds {
            player: "ann".to_string(),
            shortfall: 100,
        })
    );
    assert!(prop(&ledger, "BW").owner.is_none());
    assert_eq!(
        ledger.buy("zed", "BW"),
        Err(LedgerError::UnknownPlayer("zed".to_string()))
    );
    assert_eq!(
        ledger.buy("ann", "XX"),
        Err(LedgerError::UnknownProperty("XX".to_string()))
    );
}

#[test]
fn blue_monopoly_scenario() {
    let mut ledger = ledger();
    buy_all(&mut ledger, "ann", &["BW", "PP"]);
    assert_eq!(ledger.registry().lookup("ann").expect("ann").monopolies, ["blue"]);

    let rent = ledger.rent("ben", "BW").expect("rent");
    assert!(matches!(rent, Receipt::Rent { amount: 100, .. }));
    assert_eq!(cash(&ledger, "ben"), 1900);

    ledger.mortgage("PP").expect("mortgage");
    assert_eq!(ledger.registry().lookup("ann").expect("ann").monopolies, ["blue"]);
    assert_eq!(
        ledger.registry().has_monopoly(ledger.catalog(), "blue", "ann"),
        Ok((true, true))
    );

    assert_eq!(
        ledger.build_houses("BW", 1),
        Err(LedgerError::NoMonopolyOrMortgaged {
            player: "ann".to_string(),
            color: "blue".to_string(),
        })
    );
    let rent = ledger.rent("ben", "BW").expect("rent");
    assert!(matches!(rent, Receipt::Rent { amount: 50, .. }));
}

#[test]
fn mortgage_round_trip_costs_a_twentieth() {
    let mut ledger = ledger();
    ledger.buy("ann", "PP").expect("buy");
    let before = cash(&ledger, "ann");

    let mortgaged = ledger.mortgage("pp").expect("mortgage");
    assert!(matches!(mortgaged, Receipt::Mortgaged { amount: 175, .. }));
    assert!(prop(&ledger, "PP").mortgaged);

    let lifted = ledger.unmortgage("PP").expect("unmortgage");
    assert!(matches!(lifted, Receipt::Unmortgaged { amount: 192, .. }));
    assert!(!prop(&ledger, "PP").mortgaged);
    assert_eq!(before - cash(&ledger, "ann"), 350 / 20);
}

#[test]
fn mortgage_preconditions() {
    let mut ledger = ledger();
    assert_eq!(
        ledger.mortgage("MA"),
        Err(LedgerError::Unowned {
            code: "MA".to_string()
        })
    );

    buy_all(&mut ledger, "ann", &["MA", "BA"]);
    ledger.build_houses("MA", 1).expect("build");
    assert_eq!(
        ledger.mortgage("MA"),
        Err(LedgerError::HasHouses("MA".to_string()))
    );

    ledger.mortgage("BA").expect("mortgage");
    let before = snapshot(&ledger);
    assert_eq!(
        ledger.mortgage("BA"),
        Err(LedgerError::AlreadyMortgaged("BA".to_string()))
    );
    assert_eq!(
        ledger.unmortgage("MA"),
        Err(LedgerError::NotMortgaged("MA".to_string()))
    );
    assert_eq!(snapshot(&ledger), before);
}

#[test]
fn unmortgage_blocks_on_insufficient_cash() {
    let mut ledger = ledger();
    ledger.buy("ann", "BW").expect("buy");
    ledger.mortgage("BW").expect("mortgage");
    let balance = cash(&ledger, "ann");
    ledger.remove_cash("ann", balance).expect("remove");

    let before = snapshot(&ledger);
    assert_eq!(
        ledger.unmortgage("BW"),
        Err(LedgerError::InsufficientFunds {
            player: "ann".to_string(),
            shortfall: 220,
        })
    );
    assert_eq!(snapshot(&ledger), before);
}

#[test]
fn building_needs_an_unmortgaged_monopoly() {
    let mut ledger = ledger();
    ledger.buy("ann", "MA").expect("buy");
    ledger.add_cash("ann", 100_000).expect("add");

    assert_eq!(
        ledger.build_houses("MA", 1),
        Err(LedgerError::NoMonopolyOrMortgaged {
            player: "ann".to_string(),
            color: "brown".to_string(),
        })
    );
    assert_eq!(prop(&ledger, "MA").houses, 0);

    ledger.buy("ann", "BA").expect("buy");
    let built = ledger.build_houses("MA", 3).expect("build");
    assert!(matches!(built, Receipt::HousesBuilt { count: 3, cost: 150, .. }));
    assert_eq!(prop(&ledger, "MA").houses, 3);
}

#[test]
fn house_count_never_exceeds_hotel() {
    let mut ledger = ledger();
    buy_all(&mut ledger, "ann", &["MA", "BA"]);
    ledger.build_houses("MA", 4).expect("build");

    let before = snapshot(&ledger);
    assert_eq!(
        ledger.build_houses("MA", 2),
        Err(LedgerError::TooManyHouses {
            code: "MA".to_string(),
            current: 4,
            max: 5,
        })
    );
    assert_eq!(snapshot(&ledger), before);

    ledger.build_houses("MA", 1).expect("hotel");
    assert_eq!(prop(&ledger, "MA").houses, 5);
    assert_eq!(
        ledger.build_houses("MA", 0),
        Err(LedgerError::InvalidAmount(0))
    );
}

#[test]
fn building_on_transit_or_utility_is_rejected() {
    let mut ledger = ledger();
    buy_all(&mut ledger, "ann", &["RL1", "RL2", "RL3", "RL4", "U1", "U2"]);
    assert_eq!(
        ledger.build_houses("RL1", 1),
        Err(LedgerError::NotBuildable("RL1".to_string()))
    );
    assert_eq!(
        ledger.build_houses("u2", 1),
        Err(LedgerError::NotBuildable("U2".to_string()))
    );
}

#[test]
fn building_is_limited_by_cash() {
    let mut ledger = ledger();
    buy_all(&mut ledger, "ann", &["PP", "BW"]);
    let balance = cash(&ledger, "ann");
    ledger.remove_cash("ann", balance - 300).expect("remove");

    assert_eq!(
        ledger.build_houses("BW", 2),
        Err(LedgerError::InsufficientFunds {
            player: "ann".to_string(),
            shortfall: 100,
        })
    );
    assert_eq!(prop(&ledger, "BW").houses, 0);
}

#[test]
fn rent_follows_house_tier() {
    let mut ledger = ledger();
    buy_all(&mut ledger, "ann", &["MA", "BA"]);
    ledger.build_houses("BA", 2).expect("build");

    let rent = ledger.rent("ben", "BA").expect("rent");
    assert!(matches!(rent, Receipt::Rent { amount: 60, .. }));

    // unimproved member of the same monopoly still doubles
    let rent = ledger.rent("ben", "MA").expect("rent");
    assert!(matches!(rent, Receipt::Rent { amount: 4, .. }));
}

#[test]
fn rent_without_monopoly_uses_schedule() {
    let mut ledger = ledger();
    ledger.buy("ann", "MA").expect("buy");
    ledger.buy("ben", "BA").expect("buy");

    let rent = ledger.rent("ben", "MA").expect("rent");
    assert_eq!(
        rent,
        Receipt::Rent {
            renter: "ben".to_string(),
            owner: "ann".to_string(),
            property: "MA Lot".to_string(),
            amount: 2,
        }
    );
}

#[test]
fn rent_rejections_leave_balances() {
    let mut ledger = ledger();
    assert_eq!(
        ledger.rent("ben", "BW"),
        Err(LedgerError::Unowned {
            code: "BW".to_string()
        })
    );

    ledger.buy("ann", "BW").expect("buy");
    ledger.mortgage("BW").expect("mortgage");
    assert_eq!(
        ledger.rent("ben", "BW"),
        Err(LedgerError::PropertyMortgaged("BW".to_string()))
    );

    ledger.unmortgage("BW").expect("unmortgage");
    ledger.remove_cash("ben", 1990).expect("remove");
    let before = snapshot(&ledger);
    assert_eq!(
        ledger.rent("ben", "BW"),
        Err(LedgerError::InsufficientFunds {
            player: "ben".to_string(),
            shortfall: 40,
        })
    );
    assert_eq!(snapshot(&ledger), before);
}

#[test]
fn short_rent_schedule_is_reported() {
    let mut ledger = ledger();
    ledger.buy("ann", "SH").expect("buy");
    ledger.build_houses("SH", 1).expect("build");

    let before = snapshot(&ledger);
    assert_eq!(
        ledger.rent("ben", "SH"),
        Err(LedgerError::MissingRentTier {
            code: "SH".to_string(),
            houses: 1,
        })
    );
    assert_eq!(snapshot(&ledger), before);
}

#[test]
fn transit_fare_doubles_per_extra_railroad() {
    let mut ledger = ledger();
    let expected = [25, 50, 100, 200];
    for (code, fare) in ["RL1", "RL2", "RL3", "RL4"].iter().zip(expected) {
        ledger.buy("ann", code).expect("buy");
        let receipt = ledger.transit_fare("ben", "RL1").expect("fare");
        assert!(
            matches!(receipt, Receipt::Fare { amount, .. } if amount == fare),
            "{receipt:?}"
        );
    }
    assert_eq!(
        ledger
            .registry()
            .color_count(ledger.catalog(), "railroad", "ann"),
        Ok(4)
    );
}

#[test]
fn transit_fare_blocks_on_insufficient_cash() {
    let mut ledger = ledger();
    buy_all(&mut ledger, "ann", &["RL1", "RL2"]);
    ledger.remove_cash("ben", 1960).expect("remove");

    assert_eq!(
        ledger.transit_fare("ben", "RL2"),
        Err(LedgerError::InsufficientFunds {
            player: "ben".to_string(),
            shortfall: 10,
        })
    );
    assert_eq!(cash(&ledger, "ben"), 40);
}

#[test]
fn utility_bill_multiplier_depends_on_monopoly() {
    let mut ledger = ledger();
    ledger.buy("ann", "U1").expect("buy");
    let bill = ledger.utility_bill("ben", "U1", 7).expect("bill");
    assert!(matches!(bill, Receipt::Bill { amount: 28, .. }));

    ledger.buy("ann", "U2").expect("buy");
    let bill = ledger.utility_bill("ben", "U1", 7).expect("bill");
    assert!(matches!(bill, Receipt::Bill { amount: 70, .. }));
    assert_eq!(cash(&ledger, "ben"), 2000 - 28 - 70);

    assert_eq!(
        ledger.utility_bill("ben", "U1", -2),
        Err(LedgerError::InvalidAmount(-2))
    );
}

#[test]
fn oversized_utility_roll_is_rejected() {
    let mut ledger = ledger();
    ledger.buy("ann", "U1").expect("buy");
    let before = snapshot(&ledger);

    let roll = i64::MAX / 2;
    assert_eq!(
        ledger.utility_bill("ben", "U1", roll),
        Err(LedgerError::InvalidAmount(roll))
    );
    assert_eq!(snapshot(&ledger), before);
}

#[test]
fn bundle_sale_moves_ownership_and_monopolies() {
    let mut ledger = ledger();
    buy_all(&mut ledger, "ann", &["MA", "BA", "RL1"]);
    assert_eq!(ledger.registry().lookup("ann").expect("ann").monopolies, ["brown"]);

    let codes = vec!["ma".to_string(), "BA".to_string()];
    let receipt = ledger.sell_bundle("ann", "ben", 500, &codes).expect("sell");
    assert_eq!(
        receipt,
        Receipt::Sold {
            seller: "ann".to_string(),
            buyer: "ben".to_string(),
            codes: vec!["MA".to_string(), "BA".to_string()],
            price: 500,
        }
    );

    let ann = ledger.registry().lookup("ann").expect("ann");
    assert_eq!(ann.properties, ["RL1"]);
    assert!(ann.monopolies.is_empty());
    let ben = ledger.registry().lookup("ben").expect("ben");
    assert_eq!(ben.properties, ["MA", "BA"]);
    assert_eq!(ben.monopolies, ["brown"]);
    assert_eq!(ben.cash, 1500);
    assert_eq!(cash(&ledger, "ann"), 2000 - 320 + 500);
}

#[test]
fn bundle_sale_is_all_or_nothing() {
    let mut ledger = ledger();
    buy_all(&mut ledger, "ann", &["MA"]);
    ledger.buy("ben", "BA").expect("buy");
    let before = snapshot(&ledger);

    let codes = vec!["MA".to_string(), "BA".to_string()];
    assert_eq!(
        ledger.sell_bundle("ann", "ben", 10, &codes),
        Err(LedgerError::NotOwner {
            code: "BA".to_string(),
            player: "ann".to_string(),
        })
    );
    assert_eq!(
        ledger.sell_bundle("ann", "ben", 5000, &codes[..1]),
        Err(LedgerError::InsufficientFunds {
            player: "ben".to_string(),
            shortfall: 5000 - 1940,
        })
    );
    assert!(matches!(
        ledger.sell_bundle("ann", "ann", 0, &codes[..1]),
        Err(LedgerError::InvalidInput(_))
    ));
    assert_eq!(snapshot(&ledger), before);
}

#[test]
fn house_sale_refunds_half() {
    let mut ledger = ledger();
    buy_all(&mut ledger, "ann", &["PP", "BW"]);
    ledger.build_houses("PP", 3).expect("build");
    let before = cash(&ledger, "ann");

    let sold = ledger.sell_houses("PP", 2).expect("sell");
    assert!(matches!(sold, Receipt::HousesSold { count: 2, proceeds: 200, .. }));
    assert_eq!(cash(&ledger, "ann"), before + 200);
    assert_eq!(prop(&ledger, "PP").houses, 1);

    assert_eq!(
        ledger.sell_houses("PP", 2),
        Err(LedgerError::NotEnoughHouses {
            code: "PP".to_string(),
            current: 1,
        })
    );
    assert_eq!(prop(&ledger, "PP").houses, 1);
}

#[test]
fn go_and_cash_adjustments() {
    let mut ledger = ledger();
    ledger.go_credit("ann", GoCredit::Pass).expect("pass");
    ledger.go_credit("ben", GoCredit::Land).expect("land");
    assert_eq!(cash(&ledger, "ann"), 2200);
    assert_eq!(cash(&ledger, "ben"), 2400);

    ledger.add_cash("ann", 15).expect("add");
    ledger.remove_cash("ann", 2300).expect("remove");
    assert_eq!(cash(&ledger, "ann"), -85);

    assert_eq!(
        ledger.add_cash("ann", -1),
        Err(LedgerError::InvalidAmount(-1))
    );
    assert_eq!(
        ledger.remove_cash("ann", -1),
        Err(LedgerError::InvalidAmount(-1))
    );
}

#[test]
fn balance_overflow_leaves_accounts_untouched() {
    let mut ledger = ledger();
    let before = snapshot(&ledger);
    assert_eq!(
        ledger.add_cash("ann", i64::MAX),
        Err(LedgerError::InvalidAmount(i64::MAX))
    );
    assert_eq!(snapshot(&ledger), before);

    ledger.add_cash("ann", i64::MAX - 2000).expect("fill");
    assert_eq!(
        ledger.go_credit("ann", GoCredit::Pass),
        Err(LedgerError::InvalidAmount(200))
    );
    assert_eq!(
        ledger.pay("ben", 1, "ann"),
        Err(LedgerError::InvalidAmount(1))
    );
    assert_eq!(cash(&ledger, "ann"), i64::MAX);
    assert_eq!(cash(&ledger, "ben"), 2000);

    ledger.remove_cash("ben", i64::MAX).expect("drain");
    assert_eq!(
        ledger.remove_cash("ben", i64::MAX),
        Err(LedgerError::InvalidAmount(i64::MAX))
    );
    assert_eq!(cash(&ledger, "ben"), 2000 - i64::MAX);
}

#[test]
fn paying_yourself_changes_nothing() {
    let mut ledger = ledger();
    ledger.pay("ann", 500, "ann").expect("self payment");
    assert_eq!(cash(&ledger, "ann"), 2000);
}

#[test]
fn peer_payment_requires_funds() {
    let mut ledger = ledger();
    let paid = ledger.pay("ann", 300, "BEN").expect("pay");
    assert_eq!(
        paid,
        Receipt::Paid {
            sender: "ann".to_string(),
            receiver: "ben".to_string(),
            amount: 300,
        }
    );
    assert_eq!(cash(&ledger, "ann"), 1700);
    assert_eq!(cash(&ledger, "ben"), 2300);

    assert_eq!(
        ledger.pay("ann", 1701, "ben"),
        Err(LedgerError::InsufficientFunds {
            player: "ann".to_string(),
            shortfall: 1,
        })
    );
    assert_eq!(
        ledger.pay("ann", -5, "ben"),
        Err(LedgerError::InvalidAmount(-5))
    );
}

#[test]
fn properties_resolve_live_state() {
    let mut ledger = ledger();
    buy_all(&mut ledger, "ann", &["MA", "BA"]);
    ledger.build_houses("BA", 2).expect("build");

    let held = ledger.properties_of("ann").expect("ann");
    let houses: Vec<_> = held.iter().map(|p| (p.code.as_str(), p.houses)).collect();
    assert_eq!(houses, [("MA", 0), ("BA", 2)]);
}
