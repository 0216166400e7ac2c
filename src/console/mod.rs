pub mod input;
pub mod render;

use std::io::{BufRead, Write};
use tracing::{info, warn};

use crate::bank::Bank;
use crate::errors::{LedgerError, Result};

use input::{
    parse_rule, parse_statement, parse_transaction, Command, RULE_FORMAT, STATEMENT_FORMAT,
    TRANSACTION_FORMAT,
};

/// operator command loop over any line reader and writer
///
/// Validation failures are reported on the output and the loop carries on at the menu.
/// Only I/O errors on either stream end the session early.
pub struct Console<R, W> {
    bank: Bank,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(bank: Bank, input: R, output: W) -> Self {
        Self { bank, input, output }
    }

    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// run until `Q` or end of input
    pub fn run(&mut self) -> Result<()> {
        let mut first = true;

        loop {
            self.write_menu(first)?;
            first = false;

            let Some(line) = self.read_line()? else {
                info!("input closed");
                break;
            };

            match Command::parse(&line) {
                Some(Command::InputTransaction) => self.input_transaction()?,
                Some(Command::DefineRule) => self.define_rule()?,
                Some(Command::PrintStatement) => self.print_statement()?,
                Some(Command::Quit) => break,
                None => {
                    warn!(input = %line.trim(), "unrecognised menu choice");
                    writeln!(self.output, "Invalid input. Please try again.")?;
                }
            }
        }

        writeln!(self.output, "Thank you for banking with {}.", self.bank.name())?;
        writeln!(self.output, "Have a nice day!")?;
        self.output.flush()?;
        info!("session ended");
        Ok(())
    }

    fn input_transaction(&mut self) -> Result<()> {
        let Some(line) = self.request(&format!(
            "Please enter transaction details in {TRANSACTION_FORMAT} format"
        ))?
        else {
            return Ok(());
        };

        let recorded = parse_transaction(&line).and_then(|req| {
            self.bank
                .record_transaction(&req.account, req.date, req.kind, req.amount)
                .map(|_| req.account)
        });

        match recorded {
            Ok(account_id) => {
                if let Some(account) = self.bank.account(&account_id) {
                    render::write_account(&mut self.output, account)?;
                }
                Ok(())
            }
            Err(err) => self.reject(err),
        }
    }

    fn define_rule(&mut self) -> Result<()> {
        let Some(line) = self.request(&format!(
            "Please enter interest rules details in {RULE_FORMAT} format"
        ))?
        else {
            return Ok(());
        };

        let defined = parse_rule(&line)
            .and_then(|req| self.bank.define_rule(req.date, &req.rule_id, req.rate));

        match defined {
            Ok(_) => {
                render::write_rules(&mut self.output, self.bank.schedule())?;
                Ok(())
            }
            Err(err) => self.reject(err),
        }
    }

    fn print_statement(&mut self) -> Result<()> {
        let Some(line) = self.request(&format!(
            "Please enter account and month to generate the statement {STATEMENT_FORMAT}"
        ))?
        else {
            return Ok(());
        };

        let statement =
            parse_statement(&line).and_then(|req| self.bank.statement(&req.account, req.period));

        match statement {
            Ok(statement) => {
                render::write_statement(&mut self.output, &statement)?;
                Ok(())
            }
            Err(err) => self.reject(err),
        }
    }

    /// show a sub-prompt and read its answer; `None` on a blank line or end of input
    fn request(&mut self, instructions: &str) -> Result<Option<String>> {
        writeln!(self.output, "{instructions}")?;
        writeln!(self.output, "(or enter blank to go back to main menu)")?;
        write!(self.output, "> ")?;
        self.output.flush()?;

        Ok(self.read_line()?.filter(|line| !line.trim().is_empty()))
    }

    fn reject(&mut self, err: LedgerError) -> Result<()> {
        if !err.is_recoverable() {
            return Err(err);
        }
        warn!(error = %err, "command rejected");
        writeln!(self.output, "{}", render::error_message(&err))?;
        Ok(())
    }

    fn write_menu(&mut self, first: bool) -> Result<()> {
        if first {
            writeln!(
                self.output,
                "Welcome to {}! What would you like to do?",
                self.bank.name()
            )?;
        } else {
            writeln!(self.output)?;
            writeln!(self.output, "Is there anything else you'd like to do?")?;
        }
        writeln!(self.output, "[T] Input transactions")?;
        writeln!(self.output, "[I] Define interest rules")?;
        writeln!(self.output, "[P] Print statement")?;
        writeln!(self.output, "[Q] Quit")?;
        write!(self.output, "> ")?;
        self.output.flush()?;
        Ok(())
    }

    /// next input line; bytes that are not UTF-8 are replaced rather than failing the session
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}
