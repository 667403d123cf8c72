//! Menu-driven console front end

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::account::{AccountId, AccountRegistry, Amount};
use crate::command::{execute, Command};
use crate::error::LedgerError;

/// Why a menu action stopped before producing a command
enum Abort {
    Eof,
    Invalid(&'static str),
    Rejected(LedgerError),
    Io(io::Error),
}

impl From<io::Error> for Abort {
    fn from(err: io::Error) -> Self {
        Abort::Io(err)
    }
}

impl From<LedgerError> for Abort {
    fn from(err: LedgerError) -> Self {
        Abort::Rejected(err)
    }
}

pub struct Shell<'a, R, W> {
    registry: &'a AccountRegistry,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(registry: &'a AccountRegistry, input: R, output: W) -> Self {
        Self {
            registry,
            input,
            output,
        }
    }

    /// Serve menu selections until the user exits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;

            let choice = match self.ask("Select an option: ") {
                Ok(choice) => choice,
                Err(Abort::Io(e)) => return Err(e),
                Err(_) => return Ok(()),
            };

            let command = match choice.as_str() {
                "0" => return Ok(()),
                "1" => self.read_create(),
                "2" => Ok(Command::ListAccounts),
                "3" => self.read_balance(),
                "4" => self.read_transfer(),
                "5" => self.read_deposit(),
                _ => {
                    writeln!(self.output, "No such option.")?;
                    continue;
                }
            };

            match command {
                Ok(command) => match execute(self.registry, command) {
                    Ok(outcome) => writeln!(self.output, "{}", outcome)?,
                    Err(e) => writeln!(self.output, "Error: {}", e)?,
                },
                Err(Abort::Rejected(e)) => writeln!(self.output, "Error: {}", e)?,
                Err(Abort::Invalid(message)) => writeln!(self.output, "Error: {}", message)?,
                Err(Abort::Eof) => return Ok(()),
                Err(Abort::Io(e)) => return Err(e),
            }
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "1. Create a new account")?;
        writeln!(self.output, "2. List all accounts")?;
        writeln!(self.output, "3. Show account balance")?;
        writeln!(self.output, "4. Transfer money between accounts")?;
        writeln!(self.output, "5. Deposit money")?;
        writeln!(self.output, "0. Exit")?;
        writeln!(self.output)
    }

    fn read_create(&mut self) -> Result<Command, Abort> {
        let pin = self.ask("Enter a PIN (4 digits): ")?;
        Ok(Command::CreateAccount { pin })
    }

    fn read_balance(&mut self) -> Result<Command, Abort> {
        let id = self.ask_id("Enter account number: ")?;
        Ok(Command::ShowBalance { id })
    }

    fn read_transfer(&mut self) -> Result<Command, Abort> {
        // Unknown accounts are reported before asking for the rest
        let from = self.ask_id("Enter the account number to transfer from: ")?;
        self.registry.find(from)?;

        let to = self.ask_id("Enter the account number to transfer to: ")?;
        self.registry.find(to)?;

        let amount = self.ask_amount("Enter the amount to transfer: ")?;
        let pin = self.ask("Enter PIN to confirm: ")?;

        Ok(Command::Transfer {
            from,
            to,
            amount,
            pin,
        })
    }

    fn read_deposit(&mut self) -> Result<Command, Abort> {
        let id = self.ask_id("Enter the account number to deposit into: ")?;
        self.registry.find(id)?;

        let amount = self.ask_amount("Enter the amount to deposit: ")?;
        Ok(Command::Deposit { id, amount })
    }

    fn ask(&mut self, prompt: &str) -> Result<String, Abort> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Abort::Eof);
        }
        Ok(line.trim().to_string())
    }

    fn ask_id(&mut self, prompt: &str) -> Result<AccountId, Abort> {
        self.ask(prompt)?
            .parse()
            .map_err(|_| Abort::Invalid("account number must be a whole number"))
    }

    fn ask_amount(&mut self, prompt: &str) -> Result<Amount, Abort> {
        const MALFORMED: &str = "amount must be a number with at most two decimal places";

        let value = Decimal::from_str(&self.ask(prompt)?).map_err(|_| Abort::Invalid(MALFORMED))?;
        if value.is_sign_negative() && !value.is_zero() {
            return Err(LedgerError::InvalidAmount.into());
        }
        Amount::from_decimal(value).map_err(|_| Abort::Invalid(MALFORMED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;

    fn run_script(registry: &AccountRegistry, script: &str) -> String {
        let mut output = Vec::new();
        Shell::new(registry, script.as_bytes(), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_create_and_list() {
        let registry = AccountRegistry::new();
        let output = run_script(&registry, "1\n1234\n2\n0\n");

        let id = registry.list()[0].id();
        assert!(output.contains(&format!("Account created. Account number: {}", id)));
        assert!(output.contains(&format!("  Account number: {}", id)));
    }

    #[test]
    fn test_full_session() {
        let config = LedgerConfig::default();
        let registry = AccountRegistry::with_seed(&config, 5).unwrap();
        let a = registry.create_account("1234").unwrap().id();
        let b = registry.create_account("5678").unwrap().id();

        let script = format!(
            "5\n{a}\n100\n4\n{a}\n{b}\n40\n1234\n4\n{a}\n{b}\n1000\n1234\n4\n{a}\n{b}\n10\n0000\n3\n{a}\n3\n{b}\n"
        );
        let output = run_script(&registry, &script);

        assert!(output.contains("Deposit completed."));
        assert!(output.contains("Transfer completed."));
        assert!(output.contains("Error: Insufficient funds"));
        assert!(output.contains("Error: PIN is incorrect"));
        assert!(output.contains(&format!("Balance of account {}: 60.00", a)));
        assert!(output.contains(&format!("Balance of account {}: 40.00", b)));
    }

    #[test]
    fn test_bad_input_keeps_running() {
        let registry = AccountRegistry::new();
        let output = run_script(&registry, "9\n3\nabc\n3\n42\n1\n12\n2\n");

        assert!(output.contains("No such option."));
        assert!(output.contains("Error: account number must be a whole number"));
        assert!(output.contains("Error: Account 42 not found"));
        assert!(output.contains("Error: PIN must be exactly 4 digits"));
        assert!(output.contains("(none)"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_transfer_stops_at_unknown_source() {
        let registry = AccountRegistry::new();
        // The second line would be the destination if the source existed
        let output = run_script(&registry, "4\n42\n2\n");

        assert!(output.contains("Error: Account 42 not found"));
        assert!(!output.contains("transfer to"));
        assert!(output.contains("Accounts:"));
    }

    #[test]
    fn test_bad_amount() {
        let registry = AccountRegistry::new();
        let id = registry.create_account("1234").unwrap().id();
        let output = run_script(&registry, &format!("5\n{id}\n-5\n5\n{id}\n0\n"));

        assert_eq!(output.matches("Error: Amount must be greater than zero").count(), 2);
        assert_eq!(registry.find(id).unwrap().balance(), Amount::ZERO);
    }

    #[test]
    fn test_malformed_amount() {
        let registry = AccountRegistry::new();
        let id = registry.create_account("1234").unwrap().id();
        let output = run_script(&registry, &format!("5\n{id}\nabc\n5\n{id}\n1.005\n"));

        assert_eq!(
            output
                .matches("Error: amount must be a number with at most two decimal places")
                .count(),
            2
        );
        assert!(!output.contains("greater than zero"));
        assert_eq!(registry.find(id).unwrap().balance(), Amount::ZERO);
    }
}
