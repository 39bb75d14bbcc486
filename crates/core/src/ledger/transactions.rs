#![allow(missing_docs)]

use tracing::info;

use super::Ledger;
use crate::error::{LedgerError, Result};

/// Which Go payout applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoCredit {
    Pass,
    Land,
}

/// Record of an applied transaction, for the shell to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Receipt {
    Bought {
        player: String,
        property: String,
        price: i64,
    },
    Sold {
        seller: String,
        buyer: String,
        codes: Vec<String>,
        price: i64,
    },
    Mortgaged {
        owner: String,
        property: String,
        amount: i64,
    },
    Unmortgaged {
        owner: String,
        property: String,
        amount: i64,
    },
    HousesBuilt {
        owner: String,
        property: String,
        count: u8,
        cost: i64,
    },
    HousesSold {
        owner: String,
        property: String,
        count: u8,
        proceeds: i64,
    },
    Rent {
        renter: String,
        owner: String,
        property: String,
        amount: i64,
    },
    Bill {
        payer: String,
        owner: String,
        property: String,
        amount: i64,
    },
    Fare {
        rider: String,
        owner: String,
        property: String,
        amount: i64,
    },
    Go {
        player: String,
        credit: GoCredit,
        amount: i64,
    },
    CashAdded {
        player: String,
        amount: i64,
    },
    CashRemoved {
        player: String,
        amount: i64,
    },
    Paid {
        sender: String,
        receiver: String,
        amount: i64,
    },
}

fn non_negative(amount: i64) -> Result<i64> {
    if amount < 0 {
        return Err(LedgerError::InvalidAmount(amount));
    }
    Ok(amount)
}

/// `base * factor`, rejecting overflow.
fn scaled(base: i64, factor: i64) -> Result<i64> {
    base.checked_mul(factor).ok_or(LedgerError::InvalidAmount(base))
}

/// House counts arrive as raw integers; anything outside `1..=u8::MAX` is invalid.
fn house_count(count: i64) -> Result<u8> {
    u8::try_from(count)
        .ok()
        .filter(|count| *count > 0)
        .ok_or(LedgerError::InvalidAmount(count))
}

impl Ledger {
    /// Buy an unowned property at its listed cost.
    pub fn buy(&mut self, buyer: &str, code: &str) -> Result<Receipt> {
        let buyer = self.registry.index_of(buyer)?;
        let index = self.catalog.index_of(code)?;
        let property = self.catalog.get(index);

        if let Some(owner) = &property.owner {
            return Err(LedgerError::AlreadyOwned {
                code: property.code.clone(),
                owner: owner.clone(),
            });
        }
        let price = property.cost;
        self.ensure_funds(buyer, price)?;

        self.registry.debit(buyer, price)?;
        self.assign_owner(index, buyer);
        self.refresh_monopolies();

        let player = self.registry.get(buyer).name.clone();
        let property = self.catalog.get(index);
        info!(player = %player, code = %property.code, price, "Property bought");
        Ok(Receipt::Bought {
            player,
            property: property.name.clone(),
            price,
        })
    }

    /// Transfer a bundle of the seller's properties to the buyer for a lump sum.
    pub fn sell_bundle(
        &mut self,
        seller: &str,
        buyer: &str,
        price: i64,
        codes: &[String],
    ) -> Result<Receipt> {
        let price = non_negative(price)?;
        let seller = self.registry.index_of(seller)?;
        let buyer = self.registry.index_of(buyer)?;
        if seller == buyer {
            return Err(LedgerError::InvalidInput(
                "seller and buyer must differ".to_string(),
            ));
        }

        let seller_name = self.registry.get(seller).name.clone();
        let mut indices = Vec::with_capacity(codes.len());
        for code in codes {
            let index = self.catalog.index_of(code)?;
            let property = self.catalog.get(index);
            if !property.is_owned_by(&seller_name) {
                return Err(LedgerError::NotOwner {
                    code: property.code.clone(),
                    player: seller_name,
                });
            }
            if !indices.contains(&index) {
                indices.push(index);
            }
        }
        self.ensure_funds(buyer, price)?;

        self.registry.transfer(buyer, seller, price)?;
        for &index in &indices {
            self.assign_owner(index, buyer);
        }
        self.refresh_monopolies();

        let codes: Vec<String> = indices
            .iter()
            .map(|&index| self.catalog.get(index).code.clone())
            .collect();
        let buyer_name = self.registry.get(buyer).name.clone();
        info!(seller = %seller_name, buyer = %buyer_name, ?codes, price, "Properties sold");
        Ok(Receipt::Sold {
            seller: seller_name,
            buyer: buyer_name,
            codes,
            price,
        })
    }

    /// Mortgage an unimproved property for half its cost.
    pub fn mortgage(&mut self, code: &str) -> Result<Receipt> {
        let index = self.catalog.index_of(code)?;
        let owner = self.owner_of(index)?;
        let property = self.catalog.get(index);

        if property.houses > 0 {
            return Err(LedgerError::HasHouses(property.code.clone()));
        }
        if property.mortgaged {
            return Err(LedgerError::AlreadyMortgaged(property.code.clone()));
        }
        let amount = property.mortgage_value();

        self.registry.credit(owner, amount)?;
        self.catalog.get_mut(index).mortgaged = true;
        self.refresh_monopolies();

        let owner = self.registry.get(owner).name.clone();
        let property = self.catalog.get(index);
        info!(player = %owner, code = %property.code, amount, "Property mortgaged");
        Ok(Receipt::Mortgaged {
            owner,
            property: property.name.clone(),
            amount,
        })
    }

    /// Lift a mortgage at the mortgage value plus the 10% fee.
    pub fn unmortgage(&mut self, code: &str) -> Result<Receipt> {
        let index = self.catalog.index_of(code)?;
        let owner = self.owner_of(index)?;
        let property = self.catalog.get(index);

        if !property.mortgaged {
            return Err(LedgerError::NotMortgaged(property.code.clone()));
        }
        let amount = property.unmortgage_cost();
        self.ensure_funds(owner, amount)?;

        self.registry.debit(owner, amount)?;
        self.catalog.get_mut(index).mortgaged = false;
        self.refresh_monopolies();

        let owner = self.registry.get(owner).name.clone();
        let property = self.catalog.get(index);
        info!(player = %owner, code = %property.code, amount, "Property unmortgaged");
        Ok(Receipt::Unmortgaged {
            owner,
            property: property.name.clone(),
            amount,
        })
    }

    /// Add `count` houses; requires an unmortgaged monopoly on the color.
    pub fn build_houses(&mut self, code: &str, count: i64) -> Result<Receipt> {
        let count = house_count(count)?;
        let index = self.catalog.index_of(code)?;
        let property = self.catalog.get(index);
        if !property.is_buildable() {
            return Err(LedgerError::NotBuildable(property.code.clone()));
        }
        let owner = self.owner_of(index)?;
        let owner_name = &self.registry.get(owner).name;

        let (owns, mortgaged) =
            self.registry
                .has_monopoly(&self.catalog, &property.color, owner_name)?;
        if !owns || mortgaged {
            return Err(LedgerError::NoMonopolyOrMortgaged {
                player: owner_name.clone(),
                color: property.color.clone(),
            });
        }

        let max = self.rules.max_houses;
        if u16::from(property.houses) + u16::from(count) > u16::from(max) {
            return Err(LedgerError::TooManyHouses {
                code: property.code.clone(),
                current: property.houses,
                max,
            });
        }
        let cost = scaled(property.house_cost, i64::from(count))?;
        self.ensure_funds(owner, cost)?;

        self.registry.debit(owner, cost)?;
        self.catalog.get_mut(index).houses += count;

        let owner = self.registry.get(owner).name.clone();
        let property = self.catalog.get(index);
        info!(player = %owner, code = %property.code, count, cost, houses = property.houses, "Houses built");
        Ok(Receipt::HousesBuilt {
            owner,
            property: property.name.clone(),
            count,
            cost,
        })
    }

    /// Sell `count` houses back at half their cost.
    pub fn sell_houses(&mut self, code: &str, count: i64) -> Result<Receipt> {
        let count = house_count(count)?;
        let index = self.catalog.index_of(code)?;
        let owner = self.owner_of(index)?;
        let property = self.catalog.get(index);

        if count > property.houses {
            return Err(LedgerError::NotEnoughHouses {
                code: property.code.clone(),
                current: property.houses,
            });
        }
        let proceeds = scaled(property.house_cost, i64::from(count))? / 2;

        self.registry.credit(owner, proceeds)?;
        self.catalog.get_mut(index).houses -= count;

        let owner = self.registry.get(owner).name.clone();
        let property = self.catalog.get(index);
        info!(player = %owner, code = %property.code, count, proceeds, houses = property.houses, "Houses sold");
        Ok(Receipt::HousesSold {
            owner,
            property: property.name.clone(),
            count,
            proceeds,
        })
    }

    /// Charge rent by house tier, doubling unimproved rent on an unmortgaged monopoly.
    pub fn rent(&mut self, renter: &str, code: &str) -> Result<Receipt> {
        let renter = self.registry.index_of(renter)?;
        let index = self.catalog.index_of(code)?;
        let (owner, _) = self.collectible(index)?;
        let property = self.catalog.get(index);

        let tier = |houses: u8| {
            property
                .rent_tier(houses)
                .ok_or_else(|| LedgerError::MissingRentTier {
                    code: property.code.clone(),
                    houses,
                })
        };
        let (owns, mortgaged) = self.registry.has_monopoly(
            &self.catalog,
            &property.color,
            &self.registry.get(owner).name,
        )?;
        let amount = if owns && !mortgaged && property.houses == 0 {
            scaled(tier(0)?, 2)?
        } else {
            tier(property.houses)?
        };
        self.ensure_funds(renter, amount)?;

        self.registry.transfer(renter, owner, amount)?;
        let (renter, owner, property) = self.parties(renter, owner, index);
        info!(renter = %renter, owner = %owner, property = %property, amount, "Rent paid");
        Ok(Receipt::Rent {
            renter,
            owner,
            property,
            amount,
        })
    }

    /// Charge a utility bill of the dice roll times the applicable multiplier.
    pub fn utility_bill(&mut self, payer: &str, code: &str, roll: i64) -> Result<Receipt> {
        let roll = non_negative(roll)?;
        let payer = self.registry.index_of(payer)?;
        let index = self.catalog.index_of(code)?;
        let (owner, owner_name) = self.collectible(index)?;
        let property = self.catalog.get(index);

        let (owns, _) = self
            .registry
            .has_monopoly(&self.catalog, &property.color, &owner_name)?;
        let multiplier = if owns {
            self.rules.utility_monopoly_multiplier
        } else {
            self.rules.utility_multiplier
        };
        let amount = scaled(roll, multiplier)?;
        self.ensure_funds(payer, amount)?;

        self.registry.transfer(payer, owner, amount)?;
        let (payer, owner, property) = self.parties(payer, owner, index);
        info!(payer = %payer, owner = %owner, property = %property, roll, amount, "Utility bill paid");
        Ok(Receipt::Bill {
            payer,
            owner,
            property,
            amount,
        })
    }

    /// Charge the railroad fare, doubling for each extra railroad the owner holds in the group.
    pub fn transit_fare(&mut self, rider: &str, code: &str) -> Result<Receipt> {
        let rider = self.registry.index_of(rider)?;
        let index = self.catalog.index_of(code)?;
        let (owner, owner_name) = self.collectible(index)?;
        let color = &self.catalog.get(index).color;

        let held = self.registry.color_count(&self.catalog, color, &owner_name)?;
        let doublings = u32::try_from(held.saturating_sub(1)).unwrap_or(u32::MAX);
        let amount = 2_i64
            .checked_pow(doublings)
            .and_then(|factor| factor.checked_mul(self.rules.transit_base_fare))
            .unwrap_or(i64::MAX);
        self.ensure_funds(rider, amount)?;

        self.registry.transfer(rider, owner, amount)?;
        let (rider, owner, property) = self.parties(rider, owner, index);
        info!(rider = %rider, owner = %owner, property = %property, held, amount, "Fare paid");
        Ok(Receipt::Fare {
            rider,
            owner,
            property,
            amount,
        })
    }

    /// Credit the pass-Go or land-on-Go amount.
    pub fn go_credit(&mut self, player: &str, credit: GoCredit) -> Result<Receipt> {
        let index = self.registry.index_of(player)?;
        let amount = match credit {
            GoCredit::Pass => self.rules.pass_go,
            GoCredit::Land => self.rules.land_go,
        };

        self.registry.credit(index, amount)?;
        let player = self.registry.get(index).name.clone();
        info!(player = %player, ?credit, amount, "Go credit");
        Ok(Receipt::Go {
            player,
            credit,
            amount,
        })
    }

    /// Bank deposit into a player's account.
    pub fn add_cash(&mut self, player: &str, amount: i64) -> Result<Receipt> {
        let amount = non_negative(amount)?;
        let index = self.registry.index_of(player)?;

        self.registry.credit(index, amount)?;
        let player = self.registry.get(index).name.clone();
        info!(player = %player, amount, "Cash added");
        Ok(Receipt::CashAdded {
            player,
            amount,
        })
    }

    /// Bank withdrawal. No funds check: this is the banker's correction tool.
    pub fn remove_cash(&mut self, player: &str, amount: i64) -> Result<Receipt> {
        let amount = non_negative(amount)?;
        let index = self.registry.index_of(player)?;

        self.registry.debit(index, amount)?;
        let player = self.registry.get(index).name.clone();
        info!(player = %player, amount, "Cash removed");
        Ok(Receipt::CashRemoved {
            player,
            amount,
        })
    }

    /// Direct payment between two players.
    pub fn pay(&mut self, sender: &str, amount: i64, receiver: &str) -> Result<Receipt> {
        let amount = non_negative(amount)?;
        let sender = self.registry.index_of(sender)?;
        let receiver = self.registry.index_of(receiver)?;
        self.ensure_funds(sender, amount)?;

        self.registry.transfer(sender, receiver, amount)?;
        let sender = self.registry.get(sender).name.clone();
        let receiver = self.registry.get(receiver).name.clone();
        info!(sender = %sender, receiver = %receiver, amount, "Payment");
        Ok(Receipt::Paid {
            sender,
            receiver,
            amount,
        })
    }

    /// Owner index and name of a property that can collect money right now.
    fn collectible(&self, index: usize) -> Result<(usize, String)> {
        let owner = self.owner_of(index)?;
        let property = self.catalog.get(index);
        if property.mortgaged {
            return Err(LedgerError::PropertyMortgaged(property.code.clone()));
        }
        Ok((owner, self.registry.get(owner).name.clone()))
    }

    /// Payer name, payee name and property name for a receipt.
    fn parties(&self, payer: usize, payee: usize, index: usize) -> (String, String, String) {
        (
            self.registry.get(payer).name.clone(),
            self.registry.get(payee).name.clone(),
            self.catalog.get(index).name.clone(),
        )
    }
}
