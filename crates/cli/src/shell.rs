use std::io::{BufRead, Write};

use anyhow::{anyhow, Result};
use monoledger_core::{
    registry::fold_name, Command, CommandKind, HouseAction, Ledger, LedgerError, Registry,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::{display, input::TokenReader};

/// Prompt for a player count and that many distinct names.
pub fn prompt_players<R, W>(
    tokens: &mut TokenReader<R>,
    out: &mut W,
    starting_cash: i64,
) -> Result<Registry>
where
    R: BufRead,
    W: Write,
{
    let count = loop {
        write!(out, "Enter player count\n> ")?;
        out.flush()?;
        let token = tokens
            .next()
            .ok_or_else(|| anyhow!("input closed before player count"))?;
        match token.parse::<usize>() {
            Ok(count) if count > 0 => break count,
            _ => {
                writeln!(out, "Enter a valid player count")?;
                tokens.clear_pending();
            }
        }
    };

    let mut names: Vec<String> = Vec::new();
    while names.len() < count {
        write!(out, "Enter player #{} name:  ", names.len() + 1)?;
        out.flush()?;
        let name = tokens
            .next()
            .map(|raw| fold_name(&raw))
            .ok_or_else(|| anyhow!("input closed during player setup"))?;
        if names.contains(&name) {
            writeln!(out, "{}", LedgerError::DuplicatePlayer(name))?;
            continue;
        }
        names.push(name);
    }

    Ok(Registry::new(names, starting_cash)?)
}

/// Read-dispatch-redisplay loop over a ledger.
pub struct Shell<R, W> {
    ledger: Ledger,
    tokens: TokenReader<R>,
    out: W,
    rng: StdRng,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(ledger: Ledger, tokens: TokenReader<R>, out: W) -> Self {
        Self::with_rng(ledger, tokens, out, StdRng::from_entropy())
    }

    pub fn with_rng(ledger: Ledger, tokens: TokenReader<R>, out: W, rng: StdRng) -> Self {
        Self {
            ledger,
            tokens,
            out,
            rng,
        }
    }

    /// Run until the input is exhausted.
    pub fn run(&mut self) -> Result<()> {
        loop {
            write!(
                self.out,
                "{}\n\n> ",
                display::cash_summary(self.ledger.registry())
            )?;
            self.out.flush()?;

            let Some(token) = self.tokens.next() else {
                info!("Input closed, ending session");
                writeln!(self.out)?;
                return Ok(());
            };
            self.step(&token)?;
        }
    }

    pub fn into_parts(self) -> (Ledger, W) {
        (self.ledger, self.out)
    }

    fn step(&mut self, token: &str) -> Result<()> {
        let Some(kind) = CommandKind::from_name(token) else {
            debug!(token, "Unknown command");
            writeln!(self.out, "Enter valid command")?;
            self.tokens.clear_pending();
            return Ok(());
        };

        let usage = kind.usage();
        if !usage.is_empty() {
            write!(self.out, "{usage}\n> ")?;
            self.out.flush()?;
        }

        let outcome =
            Command::read(kind, &mut self.tokens).and_then(|command| self.execute(command));
        match outcome {
            Ok(text) => writeln!(self.out, "{text}")?,
            Err(err) => {
                warn!(command = ?kind, "Command rejected: {err}");
                writeln!(self.out, "{err}")?;
                self.tokens.clear_pending();
            }
        }
        Ok(())
    }

    fn execute(&mut self, command: Command) -> Result<String, LedgerError> {
        let ledger = &mut self.ledger;
        let receipt = match command {
            Command::Help => return Ok(display::help()),
            Command::Roll => return Ok(roll_dice(&mut self.rng)),
            Command::ShowProperty { code } => {
                return ledger.catalog().lookup(&code).map(display::property_details)
            }
            Command::ShowPlayer { player, view } => {
                return display::player_details(ledger, &player, view)
            }
            Command::AddCash { player, amount } => ledger.add_cash(&player, amount),
            Command::RemoveCash { player, amount } => ledger.remove_cash(&player, amount),
            Command::Bill { payer, code, roll } => ledger.utility_bill(&payer, &code, roll),
            Command::Buy { buyer, code } => ledger.buy(&buyer, &code),
            Command::Go { player, credit } => ledger.go_credit(&player, credit),
            Command::House {
                code,
                action: HouseAction::Buy,
                count,
            } => ledger.build_houses(&code, count),
            Command::House {
                code,
                action: HouseAction::Sell,
                count,
            } => ledger.sell_houses(&code, count),
            Command::Mortgage { code } => ledger.mortgage(&code),
            Command::Unmortgage { code } => ledger.unmortgage(&code),
            Command::Pay {
                sender,
                amount,
                receiver,
            } => ledger.pay(&sender, amount, &receiver),
            Command::Rent { renter, code } => ledger.rent(&renter, &code),
            Command::Ride { rider, code } => ledger.transit_fare(&rider, &code),
            Command::Sell {
                seller,
                buyer,
                price,
                codes,
            } => ledger.sell_bundle(&seller, &buyer, price, &codes),
        }?;
        Ok(display::describe(receipt))
    }
}

fn roll_dice(rng: &mut StdRng) -> String {
    let first: u8 = rng.gen_range(1..=6);
    let second: u8 = rng.gen_range(1..=6);
    debug!(first, second, "Dice rolled");
    format!("{first} {second} ({})", first + second)
}
