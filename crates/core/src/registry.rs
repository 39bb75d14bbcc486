//! Player roster and per-player holdings.

use crate::{
    catalog::Catalog,
    error::{LedgerError, Result},
};

/// A participant in the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Lowercase display name, unique within the registry.
    pub name: String,
    /// Current balance.
    pub cash: i64,
    /// Codes of owned properties in acquisition order.
    pub properties: Vec<String>,
    /// Colors this player fully owns. Rebuilt by [`crate::monopoly::recompute`].
    pub monopolies: Vec<String>,
}

impl Player {
    fn new(name: String, cash: i64) -> Self {
        Self {
            name,
            cash,
            properties: Vec::new(),
            monopolies: Vec::new(),
        }
    }

    /// Whether `color` is in this player's monopoly set.
    pub fn holds_monopoly(&self, color: &str) -> bool {
        self.monopolies.iter().any(|owned| owned == color)
    }
}

/// Canonical form used for player identity.
pub fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Fixed roster of players.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    players: Vec<Player>,
}

impl Registry {
    /// Register `names` with `starting_cash` each, rejecting blanks and duplicates.
    pub fn new<I, S>(names: I, starting_cash: i64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut players: Vec<Player> = Vec::new();
        for name in names {
            let name = fold_name(name.as_ref());
            if name.is_empty() {
                return Err(LedgerError::InvalidInput("player name is empty".to_string()));
            }
            if players.iter().any(|player| player.name == name) {
                return Err(LedgerError::DuplicatePlayer(name));
            }
            players.push(Player::new(name, starting_cash));
        }
        Ok(Self { players })
    }

    /// Number of registered players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether no players are registered.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Iterate players in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    /// Case-insensitive lookup by name.
    pub fn lookup(&self, name: &str) -> Result<&Player> {
        self.index_of(name).map(|index| &self.players[index])
    }

    pub(crate) fn index_of(&self, name: &str) -> Result<usize> {
        let folded = fold_name(name);
        self.players
            .iter()
            .position(|player| player.name == folded)
            .ok_or(LedgerError::UnknownPlayer(folded))
    }

    pub(crate) fn get(&self, index: usize) -> &Player {
        &self.players[index]
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> &mut Player {
        &mut self.players[index]
    }

    /// Add `amount` to a balance. Fails without changes on overflow.
    pub(crate) fn credit(&mut self, index: usize, amount: i64) -> Result<()> {
        let player = &mut self.players[index];
        player.cash = player
            .cash
            .checked_add(amount)
            .ok_or(LedgerError::InvalidAmount(amount))?;
        Ok(())
    }

    /// Subtract `amount` from a balance. Fails without changes on overflow.
    pub(crate) fn debit(&mut self, index: usize, amount: i64) -> Result<()> {
        let player = &mut self.players[index];
        player.cash = player
            .cash
            .checked_sub(amount)
            .ok_or(LedgerError::InvalidAmount(amount))?;
        Ok(())
    }

    /// Move `amount` from one player to another. Both balances change or neither does.
    pub(crate) fn transfer(&mut self, from: usize, to: usize, amount: i64) -> Result<()> {
        if from == to {
            return Ok(());
        }
        let overflow = LedgerError::InvalidAmount(amount);
        let debited = self.players[from]
            .cash
            .checked_sub(amount)
            .ok_or_else(|| overflow.clone())?;
        let credited = self.players[to].cash.checked_add(amount).ok_or(overflow)?;
        self.players[from].cash = debited;
        self.players[to].cash = credited;
        Ok(())
    }

    /// Number of properties of `color` held by `player`, resolved through the catalog.
    pub fn color_count(&self, catalog: &Catalog, color: &str, player: &str) -> Result<usize> {
        let player = self.lookup(player)?;
        Ok(player
            .properties
            .iter()
            .filter_map(|code| catalog.lookup(code).ok())
            .filter(|property| property.color == color)
            .count())
    }

    /// Returns `(owns, any_mortgaged)` for `player` and `color`.
    ///
    /// `any_mortgaged` is only reported for a held monopoly; otherwise both are false.
    pub fn has_monopoly(
        &self,
        catalog: &Catalog,
        color: &str,
        player: &str,
    ) -> Result<(bool, bool)> {
        let player = self.lookup(player)?;
        if !player.holds_monopoly(color) {
            return Ok((false, false));
        }
        let mortgaged = catalog
            .group_members(color)
            .any(|property| property.mortgaged);
        Ok((true, mortgaged))
    }
}
