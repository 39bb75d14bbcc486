#![allow(missing_docs)]

//! Error taxonomy for ledger operations.

use thiserror::Error;

/// Convenience alias for results produced by ledger operations.
pub type Result<T, E = LedgerError> = std::result::Result<T, E>;

/// Reasons a ledger operation can be rejected.
///
/// Every variant is recoverable: the operation that produced it left the
/// catalog and registry untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// No property carries the given code.
    #[error("could not find property code \"{0}\"")]
    UnknownProperty(String),
    /// No player is registered under the given name.
    #[error("no player \"{0}\" found")]
    UnknownPlayer(String),
    /// Two players were registered under the same folded name.
    #[error("player \"{0}\" already exists")]
    DuplicatePlayer(String),
    #[error("{code} already owned by {owner}")]
    AlreadyOwned { code: String, owner: String },
    #[error("{code} is not owned by anyone")]
    Unowned { code: String },
    #[error("{code} is not owned by {player}")]
    NotOwner { code: String, player: String },
    #[error("{player} does not have enough cash (need ${shortfall} more)")]
    InsufficientFunds { player: String, shortfall: i64 },
    #[error("{0} is already mortgaged")]
    AlreadyMortgaged(String),
    #[error("{0} is not mortgaged")]
    NotMortgaged(String),
    #[error("{0} is mortgaged and collects no rent")]
    PropertyMortgaged(String),
    #[error("cannot mortgage {0} while it has houses")]
    HasHouses(String),
    #[error("cannot build houses on {0}")]
    NotBuildable(String),
    #[error("{player} does not hold an unmortgaged {color} monopoly")]
    NoMonopolyOrMortgaged { player: String, color: String },
    #[error("too many houses: {code} has {current}, limit is {max}")]
    TooManyHouses { code: String, current: u8, max: u8 },
    #[error("{code} only has {current} houses")]
    NotEnoughHouses { code: String, current: u8 },
    /// The rent schedule has no entry for the current house count.
    #[error("{code} has no rent tier for {houses} houses")]
    MissingRentTier { code: String, houses: u8 },
    #[error("invalid amount {0}")]
    InvalidAmount(i64),
    /// Malformed or missing command token.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl LedgerError {
    pub(crate) fn insufficient(player: &str, cash: i64, needed: i64) -> Self {
        LedgerError::InsufficientFunds {
            player: player.to_string(),
            shortfall: needed.saturating_sub(cash),
        }
    }
}
