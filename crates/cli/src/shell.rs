//! The session manager: command loop plus one handler per command.

use std::io::{BufRead, Write};

use chrono::Utc;
use tracing::{debug, info};

use warehouse_core::{AggregateRoot, DomainError, Money, Quantity};
use warehouse_events::{Event, execute};
use warehouse_session::{AdjustBalance, RecordPurchase, RecordSale, Session, SessionCommand};

use crate::command::CommandName;
use crate::console::{Console, parse_amount, parse_index, parse_quantity};
use crate::error::ShellError;

const PRODUCT_PROMPT: &str = "Enter product name: ";
const PRICE_PROMPT: &str = "Enter price per unit: ";
const QUANTITY_PROMPT: &str = "Enter quantity: ";

/// Owns the session state and drives it from a console.
#[derive(Debug)]
pub struct Shell<R, W> {
    session: Session,
    console: Console<R, W>,
    running: bool,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(session: Session, input: R, output: W) -> Self {
        Self {
            session,
            console: Console::new(input, output),
            running: true,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn into_parts(self) -> (Session, W) {
        (self.session, self.console.into_output())
    }

    /// Run commands until `end` or until input is exhausted.
    ///
    /// Only terminal I/O failures are returned; every business or input error
    /// is reported on the console and the loop carries on.
    pub fn run(&mut self) -> Result<(), ShellError> {
        info!(session_id = %self.session.id(), "session started");

        while self.running {
            match self.step() {
                Ok(()) => {}
                Err(ShellError::EndOfInput) => {
                    info!("input closed");
                    self.running = false;
                }
                Err(err) => return Err(err),
            }
        }

        info!(
            session_id = %self.session.id(),
            operations = self.session.operations().len(),
            balance = %self.session.balance(),
            "session ended"
        );
        Ok(())
    }

    /// Show the command list, read one command and run it.
    pub fn step(&mut self) -> Result<(), ShellError> {
        self.console.say("")?;
        self.console.say(CommandName::banner())?;
        let input = self.console.ask("Enter command: ")?.to_lowercase();

        match input.parse::<CommandName>() {
            Ok(command) => self.dispatch(command),
            Err(err) => {
                debug!(%err, "unknown command");
                self.console.say("Invalid command!")
            }
        }
    }

    pub fn dispatch(&mut self, command: CommandName) -> Result<(), ShellError> {
        debug!(%command, "dispatching");
        let logged_before = self.session.operations().len();

        match command {
            CommandName::Balance => self.balance()?,
            CommandName::Sale => self.sale()?,
            CommandName::Purchase => self.purchase()?,
            CommandName::Account => self.account()?,
            CommandName::List => self.list()?,
            CommandName::Warehouse => self.warehouse()?,
            CommandName::Review => self.review()?,
            CommandName::End => self.end()?,
        }

        if command.is_recorded()
            && self.session.operations().len() > logged_before
            && let Some(record) = self.session.operations().records().last()
        {
            info!(
                %command,
                sequence = record.sequence,
                description = %record.description,
                "operation recorded"
            );
        }
        Ok(())
    }

    fn balance(&mut self) -> Result<(), ShellError> {
        let text = self.console.ask("Enter amount to add/subtract: ")?;
        let amount = match parse_amount(&text) {
            Ok(amount) => amount,
            Err(err) => {
                debug!(%err, "balance change rejected");
                return self.console.say("Invalid amount! Please enter a valid number.");
            }
        };

        let command = SessionCommand::AdjustBalance(AdjustBalance {
            amount,
            occurred_at: Utc::now(),
        });
        self.submit(&command, "Invalid amount! Please enter a valid number.")
    }

    fn sale(&mut self) -> Result<(), ShellError> {
        const INVALID: &str = "Invalid input!";

        let product = self.console.ask(PRODUCT_PROMPT)?;
        let Some((price, quantity)) = self.read_price_and_quantity(INVALID)? else {
            return Ok(());
        };

        let command = SessionCommand::RecordSale(RecordSale {
            product,
            price,
            quantity,
            occurred_at: Utc::now(),
        });
        self.submit(&command, INVALID)
    }

    fn purchase(&mut self) -> Result<(), ShellError> {
        const INVALID: &str = "Invalid input! Price and quantity must be numbers.";

        let product = self.console.ask(PRODUCT_PROMPT)?;
        let Some((price, quantity)) = self.read_price_and_quantity(INVALID)? else {
            return Ok(());
        };

        let command = SessionCommand::RecordPurchase(RecordPurchase {
            product,
            price,
            quantity,
            occurred_at: Utc::now(),
        });
        self.submit(&command, INVALID)
    }

    fn account(&mut self) -> Result<(), ShellError> {
        let balance = self.session.balance();
        self.console.say(format!("Current account balance: {balance}"))
    }

    fn list(&mut self) -> Result<(), ShellError> {
        let inventory = self.session.inventory();
        if inventory.is_empty() {
            return self.console.say("Warehouse is empty.");
        }

        let lines: Vec<String> = inventory
            .iter()
            .map(|(product, item)| stock_line(product, item.quantity, item.price))
            .collect();

        self.console.say("Warehouse Inventory:")?;
        for line in lines {
            self.console.say(line)?;
        }
        Ok(())
    }

    fn warehouse(&mut self) -> Result<(), ShellError> {
        let product = self.console.ask(PRODUCT_PROMPT)?;
        let line = match self.session.inventory().get(&product) {
            Some(item) => stock_line(&product, item.quantity, item.price),
            None => format!("{product} not found in warehouse."),
        };
        self.console.say(line)
    }

    fn review(&mut self) -> Result<(), ShellError> {
        let from = self.console.ask_raw("Enter start index: ")?;
        let to = self.console.ask_raw("Enter end index: ")?;

        let (start, end) = match (parse_index(&from), parse_index(&to)) {
            (Ok(start), Ok(end)) => (start, end),
            (Err(err), _) | (_, Err(err)) => {
                debug!(%err, "review rejected");
                return self.console.say("Invalid index. Please enter valid integers.");
            }
        };

        let lines: Vec<String> = match self.session.review(start, end) {
            Ok(records) => records.iter().map(|r| r.description.clone()).collect(),
            Err(err) => {
                debug!(%err, "review rejected");
                return self.console.say("Invalid index range.");
            }
        };

        for line in lines {
            self.console.say(line)?;
        }
        Ok(())
    }

    fn end(&mut self) -> Result<(), ShellError> {
        self.console.say("Exiting program...")?;
        self.running = false;
        Ok(())
    }

    /// Prompt for price then quantity, stopping at the first malformed value.
    ///
    /// `Ok(None)` means the input was rejected and `invalid` was printed.
    fn read_price_and_quantity(
        &mut self,
        invalid: &str,
    ) -> Result<Option<(Money, Quantity)>, ShellError> {
        let price = match parse_amount(&self.console.ask(PRICE_PROMPT)?) {
            Ok(price) => price,
            Err(err) => {
                debug!(%err, "price rejected");
                self.console.say(invalid)?;
                return Ok(None);
            }
        };

        let quantity = match parse_quantity(&self.console.ask(QUANTITY_PROMPT)?) {
            Ok(quantity) => quantity,
            Err(err) => {
                debug!(%err, "quantity rejected");
                self.console.say(invalid)?;
                return Ok(None);
            }
        };

        Ok(Some((price, quantity)))
    }

    /// Run a command against the session and report any rejection.
    fn submit(&mut self, command: &SessionCommand, invalid: &str) -> Result<(), ShellError> {
        match execute(&mut self.session, command) {
            Ok(events) => {
                for event in &events {
                    debug!(event_type = event.event_type(), "event accepted");
                }
                Ok(())
            }
            Err(err) => {
                debug!(%err, "command rejected");
                self.console.say(rejection_message(&err, invalid))
            }
        }
    }
}

fn stock_line(product: &str, quantity: Quantity, price: Money) -> String {
    format!("{product}: {quantity} units, Price: {price}")
}

fn rejection_message<'a>(err: &DomainError, invalid: &'a str) -> &'a str {
    match err {
        DomainError::InsufficientFunds { .. } => "Insufficient funds for this purchase.",
        DomainError::InsufficientStock { .. } => "Not enough stock for this sale.",
        DomainError::InvalidRange { .. } => "Invalid index range.",
        DomainError::Validation(_) => invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use warehouse_core::SessionId;

    fn shell(script: &str) -> Shell<Cursor<String>, Vec<u8>> {
        Shell::new(
            Session::new(SessionId::new()),
            Cursor::new(script.to_string()),
            Vec::new(),
        )
    }

    fn output(shell: Shell<Cursor<String>, Vec<u8>>) -> String {
        let (_, out) = shell.into_parts();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn dispatch_balance_prompts_and_records() {
        let mut sh = shell("100\n");
        sh.dispatch(CommandName::Balance).unwrap();

        assert_eq!(sh.session().balance(), Money::new(100.0));
        assert_eq!(output(sh), "Enter amount to add/subtract: ");
    }

    #[test]
    fn invalid_price_skips_quantity_prompt() {
        let mut sh = shell("widget\nabc\n");
        sh.dispatch(CommandName::Sale).unwrap();

        assert_eq!(
            output(sh),
            "Enter product name: Enter price per unit: Invalid input!\n"
        );
    }

    #[test]
    fn account_prints_balance() {
        let mut sh = shell("");
        sh.dispatch(CommandName::Account).unwrap();
        assert_eq!(output(sh), "Current account balance: 0.0\n");
    }

    #[test]
    fn end_stops_the_loop() {
        let mut sh = shell("");
        assert!(sh.is_running());
        sh.dispatch(CommandName::End).unwrap();
        assert!(!sh.is_running());
        assert_eq!(output(sh), "Exiting program...\n");
    }

    #[test]
    fn step_rejects_unknown_command() {
        let mut sh = shell("  REFUND \n");
        sh.step().unwrap();
        assert!(sh.is_running());
        assert!(output(sh).ends_with("Enter command: Invalid command!\n"));
    }

    #[test]
    fn step_normalises_case() {
        let mut sh = shell(" Account \n");
        sh.step().unwrap();
        assert!(output(sh).ends_with("Current account balance: 0.0\n"));
    }

    #[test]
    fn end_of_input_mid_command_propagates_from_step() {
        let mut sh = shell("sale\nwidget\n");
        assert!(matches!(sh.step(), Err(ShellError::EndOfInput)));
    }

    #[test]
    fn rejection_messages() {
        let invalid = "Invalid input!";
        assert_eq!(
            rejection_message(
                &DomainError::insufficient_funds(Money::new(1.0), Money::ZERO),
                invalid,
            ),
            "Insufficient funds for this purchase."
        );
        assert_eq!(
            rejection_message(&DomainError::insufficient_stock("x", 1, 0), invalid),
            "Not enough stock for this sale."
        );
        assert_eq!(rejection_message(&DomainError::validation("nan"), invalid), invalid);
    }
}
