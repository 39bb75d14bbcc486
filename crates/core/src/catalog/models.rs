#![allow(missing_docs)]

use once_cell::sync::Lazy;
use regex::Regex;

/// Railroad (`RL..`) and utility (`U..`) codes never take houses.
static NON_BUILDABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(RL|U)").expect("invalid non-buildable code regex"));

/// A board property: static economics plus live ownership state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub color: String,
    pub code: String,
    pub cost: i64,
    pub house_cost: i64,
    /// Rent by house count; `rent[0]` is the unimproved rent.
    pub rent: Vec<i64>,
    pub owner: Option<String>,
    pub houses: u8,
    pub mortgaged: bool,
}

impl Property {
    pub fn new(
        name: String,
        color: String,
        code: String,
        cost: i64,
        rent: Vec<i64>,
        house_cost: i64,
    ) -> Self {
        Self {
            name,
            color,
            code,
            cost,
            house_cost,
            rent,
            owner: None,
            houses: 0,
            mortgaged: false,
        }
    }

    pub fn is_buildable(&self) -> bool {
        !NON_BUILDABLE_RE.is_match(&self.code)
    }

    pub fn is_owned_by(&self, player: &str) -> bool {
        self.owner.as_deref() == Some(player)
    }

    pub fn matches_code(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code.trim())
    }

    /// Cash paid out when the property is mortgaged.
    pub fn mortgage_value(&self) -> i64 {
        self.cost / 2
    }

    /// Cash needed to lift the mortgage: the mortgage value plus a 10% fee,
    /// each half truncated separately.
    pub fn unmortgage_cost(&self) -> i64 {
        self.cost / 2 + self.cost / 20
    }

    pub fn rent_tier(&self, houses: u8) -> Option<i64> {
        self.rent.get(usize::from(houses)).copied()
    }
}
