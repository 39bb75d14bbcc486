//! Command table and argument parsing for the interactive shell.
//!
//! A command is one name token followed by a fixed set of argument tokens
//! drawn from the same stream. Arguments may span lines.

use crate::{
    error::{LedgerError, Result},
    ledger::GoCredit,
};

/// Every command the shell understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Deposit cash from the bank.
    Add,
    /// Utility bill.
    Bill,
    /// Buy an unowned property.
    Buy,
    /// Pass Go.
    PassGo,
    /// Land on Go.
    LandGo,
    /// Build or sell houses.
    House,
    /// Mortgage a property.
    Mortgage,
    /// Lift a mortgage.
    Unmortgage,
    /// Player-to-player payment.
    Pay,
    /// Show player details.
    Player,
    /// Show property details.
    Property,
    /// Withdraw cash to the bank.
    Remove,
    /// Collect rent.
    Rent,
    /// Railroad fare.
    Ride,
    /// Roll two dice.
    Roll,
    /// Sell a bundle of properties.
    Sell,
    /// List all commands.
    Help,
}

/// Name, kind and argument usage for each command, in help order.
const COMMANDS: &[(&str, CommandKind, &str)] = &[
    ("add", CommandKind::Add, "<name> <amount>"),
    ("bill", CommandKind::Bill, "<payer> <utility code> <roll>"),
    ("buy", CommandKind::Buy, "<buyer> <property code>"),
    ("go", CommandKind::PassGo, "<player>"),
    ("lgo", CommandKind::LandGo, "<player>"),
    ("house", CommandKind::House, "<property code> <buy|sell> <house count>"),
    ("mort", CommandKind::Mortgage, "<property code>"),
    ("unmort", CommandKind::Unmortgage, "<property code>"),
    ("pay", CommandKind::Pay, "<sender> <amount> <receiver>"),
    ("plr", CommandKind::Player, "<player name> <all|cash|prop|monos>"),
    ("prop", CommandKind::Property, "<property code>"),
    ("rem", CommandKind::Remove, "<name> <amount>"),
    ("rent", CommandKind::Rent, "<renter> <property code>"),
    ("ride", CommandKind::Ride, "<rider> <railroad code>"),
    ("roll", CommandKind::Roll, ""),
    (
        "sell",
        CommandKind::Sell,
        "<property sell count> <seller> <buyer> <sell price> <property codes>",
    ),
    ("help", CommandKind::Help, ""),
];

impl CommandKind {
    /// Resolve a command token, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        COMMANDS
            .iter()
            .find(|(candidate, _, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, kind, _)| *kind)
    }

    /// Argument usage shown before reading arguments.
    pub fn usage(self) -> &'static str {
        COMMANDS
            .iter()
            .find(|(_, kind, _)| *kind == self)
            .map(|(_, _, usage)| *usage)
            .unwrap_or_default()
    }

    /// `(name, usage)` for every command.
    pub fn table() -> impl Iterator<Item = (&'static str, &'static str)> {
        COMMANDS.iter().map(|(name, _, usage)| (*name, *usage))
    }
}

/// Direction of a house transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HouseAction {
    /// Build houses.
    Buy,
    /// Sell houses back.
    Sell,
}

/// Section of player details to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerView {
    /// Name, cash, properties and monopolies.
    All,
    /// Cash only.
    Cash,
    /// Owned properties.
    Properties,
    /// Held monopolies.
    Monopolies,
}

/// A fully parsed command with its arguments.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddCash {
        player: String,
        amount: i64,
    },
    RemoveCash {
        player: String,
        amount: i64,
    },
    Bill {
        payer: String,
        code: String,
        roll: i64,
    },
    Buy {
        buyer: String,
        code: String,
    },
    Go {
        player: String,
        credit: GoCredit,
    },
    House {
        code: String,
        action: HouseAction,
        count: i64,
    },
    Mortgage {
        code: String,
    },
    Unmortgage {
        code: String,
    },
    Pay {
        sender: String,
        amount: i64,
        receiver: String,
    },
    ShowPlayer {
        player: String,
        view: PlayerView,
    },
    ShowProperty {
        code: String,
    },
    Rent {
        renter: String,
        code: String,
    },
    Ride {
        rider: String,
        code: String,
    },
    Roll,
    Sell {
        seller: String,
        buyer: String,
        price: i64,
        codes: Vec<String>,
    },
    Help,
}

impl Command {
    /// Read the arguments for `kind` from `tokens`.
    pub fn read<I>(kind: CommandKind, tokens: &mut I) -> Result<Self>
    where
        I: Iterator<Item = String>,
    {
        let mut args = Args { tokens };
        let command = match kind {
            CommandKind::Add => Command::AddCash {
                player: args.word("name")?,
                amount: args.integer("amount")?,
            },
            CommandKind::Remove => Command::RemoveCash {
                player: args.word("name")?,
                amount: args.integer("amount")?,
            },
            CommandKind::Bill => Command::Bill {
                payer: args.word("payer name")?,
                code: args.word("utility code")?,
                roll: args.integer("roll")?,
            },
            CommandKind::Buy => Command::Buy {
                buyer: args.word("buyer")?,
                code: args.word("property code")?,
            },
            CommandKind::PassGo => Command::Go {
                player: args.word("player")?,
                credit: GoCredit::Pass,
            },
            CommandKind::LandGo => Command::Go {
                player: args.word("player")?,
                credit: GoCredit::Land,
            },
            CommandKind::House => Command::House {
                code: args.word("code")?,
                action: args.house_action()?,
                count: args.integer("house amount")?,
            },
            CommandKind::Mortgage => Command::Mortgage {
                code: args.word("property code")?,
            },
            CommandKind::Unmortgage => Command::Unmortgage {
                code: args.word("property code")?,
            },
            CommandKind::Pay => Command::Pay {
                sender: args.word("sender name")?,
                amount: args.integer("amount")?,
                receiver: args.word("receiver name")?,
            },
            CommandKind::Player => Command::ShowPlayer {
                player: args.word("name")?,
                view: args.player_view()?,
            },
            CommandKind::Property => Command::ShowProperty {
                code: args.word("code")?,
            },
            CommandKind::Rent => Command::Rent {
                renter: args.word("renter")?,
                code: args.word("property code")?,
            },
            CommandKind::Ride => Command::Ride {
                rider: args.word("rider")?,
                code: args.word("railroad code")?,
            },
            CommandKind::Roll => Command::Roll,
            CommandKind::Sell => {
                let count = args.count("property count")?;
                let seller = args.word("seller name")?;
                let buyer = args.word("buyer name")?;
                let price = args.integer("sell price")?;
                let codes = (0..count)
                    .map(|_| args.word("property code"))
                    .collect::<Result<Vec<_>>>()?;
                Command::Sell {
                    seller,
                    buyer,
                    price,
                    codes,
                }
            }
            CommandKind::Help => Command::Help,
        };
        Ok(command)
    }
}

struct Args<'a, I> {
    tokens: &'a mut I,
}

impl<I> Args<'_, I>
where
    I: Iterator<Item = String>,
{
    fn word(&mut self, what: &str) -> Result<String> {
        self.tokens
            .next()
            .ok_or_else(|| LedgerError::InvalidInput(format!("missing {what}")))
    }

    fn integer(&mut self, what: &str) -> Result<i64> {
        let raw = self.word(what)?;
        raw.parse()
            .map_err(|_| LedgerError::InvalidInput(format!("invalid {what} \"{raw}\"")))
    }

    fn count(&mut self, what: &str) -> Result<usize> {
        let raw = self.word(what)?;
        raw.parse()
            .map_err(|_| LedgerError::InvalidInput(format!("invalid {what} \"{raw}\"")))
    }

    fn house_action(&mut self) -> Result<HouseAction> {
        let raw = self.word("action")?;
        match raw.to_lowercase().as_str() {
            "buy" => Ok(HouseAction::Buy),
            "sell" => Ok(HouseAction::Sell),
            _ => Err(LedgerError::InvalidInput(format!("invalid action \"{raw}\""))),
        }
    }

    fn player_view(&mut self) -> Result<PlayerView> {
        let raw = self.word("option")?;
        match raw.to_lowercase().as_str() {
            "all" => Ok(PlayerView::All),
            "cash" => Ok(PlayerView::Cash),
            "prop" => Ok(PlayerView::Properties),
            "monos" => Ok(PlayerView::Monopolies),
            _ => Err(LedgerError::InvalidInput(format!("invalid option \"{raw}\""))),
        }
    }
}
