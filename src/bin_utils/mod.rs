//! Bootstraps [`crate::processor`] for the binary: CSV script in, ranked CSV summary out.

use std::io::{Read, Write};

use crate::processor::{
    CommandProcessor, ProcessError, in_memory_processor::InMemoryCommandProcessor,
};
use anyhow::Result;
use csv_parser::CsvOperationParser;
use csv_printer::{AccountSummary, print_accounts};
use thiserror::Error;
pub mod csv_parser;
pub mod csv_printer;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Malformed row: {0}")]
    ParseErr(#[from] csv::Error),
    #[error(transparent)]
    ProcessErr(#[from] ProcessError),
}

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    /// Number of accounts to print, all of them when `None`.
    pub top: Option<usize>,
    pub error_printer: Box<dyn FnMut(u64, ScriptError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input);

        let mut processor = InMemoryCommandProcessor::default();

        for (line, row) in parser {
            let result = row.map_err(ScriptError::from).and_then(|op| {
                processor
                    .process_command(op.kind, &op.account, op.target.as_deref(), op.amount)
                    .map_err(ScriptError::from)
            });
            if let Err(err) = result {
                (self.error_printer)(line, err);
            }
        }

        let top = self.top.unwrap_or(processor.bank.len());
        print_accounts(
            self.output,
            processor
                .bank
                .get_top_accounts_by_transactions(top)
                .into_iter()
                .map(|acc| AccountSummary {
                    account: processor
                        .label_of(acc.id())
                        .map_or_else(|| acc.id().to_string(), ToOwned::to_owned),
                    balance: acc.balance(),
                    transactions: acc.transactions().len(),
                }),
        )
    }
}
