//! Text rendering for the shell.

use std::fmt::Write as _;

use monoledger_core::{
    command::CommandKind, error::Result, GoCredit, Ledger, PlayerView, Property, Receipt, Registry,
};

const COLUMN_WIDTH: usize = 15;

/// Dashed rule, then one row of names and one row of balances.
pub fn cash_summary(registry: &Registry) -> String {
    let mut names = String::new();
    let mut balances = String::new();
    for player in registry.iter() {
        let _ = write!(
            names,
            "{:<width$}",
            title_case(&player.name),
            width = COLUMN_WIDTH
        );
        let _ = write!(balances, "{:<width$}", player.cash, width = COLUMN_WIDTH);
    }
    format!(
        "{}\n{}\n{}\n",
        "-".repeat(registry.len() * COLUMN_WIDTH),
        names.trim_end(),
        balances.trim_end()
    )
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn property_details(property: &Property) -> String {
    let rent = property
        .rent
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "Name: {}\nColor: {}\nCode: {}\nCost: {}\nOwner: {}\nHouses: {}\nHouse Cost: {}\nRent: [{}]\nMortgaged: {}",
        property.name,
        property.color,
        property.code,
        property.cost,
        property.owner.as_deref().unwrap_or("-"),
        property.houses,
        property.house_cost,
        rent,
        property.mortgaged
    )
}

pub fn player_details(ledger: &Ledger, name: &str, view: PlayerView) -> Result<String> {
    let player = ledger.registry().lookup(name)?;
    let properties = ledger.properties_of(name)?;
    let property_lines = properties
        .iter()
        .map(|property| format!("{} {}", property.name, property.code));

    let text = match view {
        PlayerView::Cash => player.cash.to_string(),
        PlayerView::Properties => property_lines.collect::<Vec<_>>().join("\n"),
        PlayerView::Monopolies => player.monopolies.join("\n"),
        PlayerView::All => {
            let mut text = format!("Name: {}\nCash: {}\nProperties:", player.name, player.cash);
            for line in property_lines {
                let _ = write!(text, "\n\t{line}");
            }
            text.push_str("\nMonopolies:");
            for color in &player.monopolies {
                let _ = write!(text, "\n\t{color}");
            }
            text
        }
    };
    Ok(text)
}

/// Every command name with its argument usage.
pub fn help() -> String {
    CommandKind::table()
        .map(|(name, usage)| format!("{name:<8}{usage}").trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line confirmation of an applied transaction.
pub fn describe(receipt: Receipt) -> String {
    match receipt {
        Receipt::Bought {
            player,
            property,
            price,
        } => format!("{player} bought {property} for {price}"),
        Receipt::Sold {
            seller,
            buyer,
            codes,
            price,
        } => format!(
            "{seller} sold [{}] to {buyer} for {price}",
            codes.join(" ")
        ),
        Receipt::Mortgaged {
            owner,
            property,
            amount,
        } => format!("{owner} mortgaged {property} for {amount}"),
        Receipt::Unmortgaged {
            owner,
            property,
            amount,
        } => format!("{owner} unmortgaged {property} for {amount}"),
        Receipt::HousesBuilt {
            owner,
            property,
            count,
            cost,
        } => format!("{owner} bought {count} houses on {property} for {cost}"),
        Receipt::HousesSold {
            owner,
            property,
            count,
            proceeds,
        } => format!("{owner} sold {count} houses on {property} for {proceeds}"),
        Receipt::Rent {
            renter,
            owner,
            property,
            amount,
        } => format!("{renter} rented {owner}'s {property} for {amount}"),
        Receipt::Bill {
            payer,
            owner,
            property,
            amount,
        } => format!("{payer} was billed {amount} for {owner}'s {property}"),
        Receipt::Fare {
            rider,
            owner,
            property,
            amount,
        } => format!("{rider} rode {owner}'s {property} for {amount}"),
        Receipt::Go {
            player,
            credit: GoCredit::Pass,
            amount,
        } => format!("{player} received {amount} for passing Go"),
        Receipt::Go {
            player,
            credit: GoCredit::Land,
            amount,
        } => format!("{player} received {amount} for landing on Go"),
        Receipt::CashAdded { player, amount } => format!("Added {amount} to {player}'s account"),
        Receipt::CashRemoved { player, amount } => {
            format!("Removed {amount} from {player}'s account")
        }
        Receipt::Paid {
            sender,
            receiver,
            amount,
        } => format!("{sender} paid {receiver} {amount}"),
    }
}
