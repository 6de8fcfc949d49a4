use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    bank::BankError,
    command::{CommandError, CommandKind},
};

pub mod in_memory_processor;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProcessError {
    #[error(transparent)]
    CommandErr(#[from] CommandError),
    #[error(transparent)]
    BankErr(#[from] BankError),
}

/// Applies one raw operation, where accounts are referred to by label.
pub trait CommandProcessor {
    fn process_command(
        &mut self,
        kind: CommandKind,
        account: &str,
        target: Option<&str>,
        amount: Option<Decimal>,
    ) -> Result<(), ProcessError>;
}
