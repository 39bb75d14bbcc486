//! The session ledger: catalog, registry and rules behind one handle.
//!
//! All state changes go through the transaction methods on [`Ledger`].
//! Each one checks every precondition before touching balances or
//! ownership, so a rejected call leaves the ledger unchanged.

mod transactions;
#[cfg(test)]
mod tests;

pub use transactions::{GoCredit, Receipt};

use crate::{
    catalog::{Catalog, Property},
    config::Rules,
    error::{LedgerError, Result},
    monopoly,
    registry::Registry,
};

/// Owns all mutable game state for a session.
#[derive(Debug, Clone)]
pub struct Ledger {
    catalog: Catalog,
    registry: Registry,
    rules: Rules,
}

impl Ledger {
    /// Build a ledger and derive the initial monopoly sets.
    pub fn new(catalog: Catalog, registry: Registry, rules: Rules) -> Self {
        let mut ledger = Self {
            catalog,
            registry,
            rules,
        };
        ledger.refresh_monopolies();
        ledger
    }

    /// Read access to the property catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Read access to the player roster.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Economics in effect for this session.
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Live details of every property `player` owns, in acquisition order.
    pub fn properties_of(&self, player: &str) -> Result<Vec<&Property>> {
        let player = self.registry.lookup(player)?;
        Ok(player
            .properties
            .iter()
            .filter_map(|code| self.catalog.lookup(code).ok())
            .collect())
    }

    fn refresh_monopolies(&mut self) {
        monopoly::recompute(&self.catalog, &mut self.registry);
    }

    /// Registry index of the player owning the property at `property`.
    fn owner_of(&self, property: usize) -> Result<usize> {
        let property = self.catalog.get(property);
        match property.owner.as_deref() {
            Some(owner) => self.registry.index_of(owner),
            None => Err(LedgerError::Unowned {
                code: property.code.clone(),
            }),
        }
    }

    fn ensure_funds(&self, player: usize, amount: i64) -> Result<()> {
        let player = self.registry.get(player);
        if player.cash < amount {
            return Err(LedgerError::insufficient(&player.name, player.cash, amount));
        }
        Ok(())
    }

    /// Hand the property to `owner`, keeping both players' code lists in step.
    fn assign_owner(&mut self, property: usize, owner: usize) {
        let code = self.catalog.get(property).code.clone();
        if let Some(previous) = self.catalog.get(property).owner.clone() {
            if let Ok(previous) = self.registry.index_of(&previous) {
                self.registry
                    .get_mut(previous)
                    .properties
                    .retain(|held| held != &code);
            }
        }

        let name = self.registry.get(owner).name.clone();
        self.catalog.get_mut(property).owner = Some(name);
        self.registry.get_mut(owner).properties.push(code);
    }
}
