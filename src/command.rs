use std::collections::hash_map::Entry;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::account::AccountId;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Open,
    Deposit,
    Withdraw,
    Transfer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankCommand {
    Open,
    Deposit {
        account: AccountId,
        amount: Decimal,
    },
    Withdraw {
        account: AccountId,
        amount: Decimal,
    },
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Amount is required for {kind:?}")]
    AmountRequired { kind: CommandKind },
    #[error("Amount must be positive for {kind:?}, got {amount}")]
    InvalidAmount { kind: CommandKind, amount: Decimal },
    #[error("Target account is required for {kind:?}")]
    TargetRequired { kind: CommandKind },
    #[error("Account `{label}` was never opened")]
    UnknownAccount { label: String },
    #[error("Account `{label}` is already open")]
    DuplicateAccount { label: String },
    #[error("{kind:?} takes neither a target nor an amount")]
    UnexpectedColumns { kind: CommandKind },
}

impl BankCommand {
    /// Builds a command for the account behind `entry`.
    ///
    /// `open` needs a vacant label and no other columns, everything else an
    /// occupied one. `target` is the already resolved counterpart of a transfer.
    pub fn parse_command(
        entry: &Entry<'_, String, AccountId>,
        kind: CommandKind,
        target: Option<AccountId>,
        amount: Option<Decimal>,
    ) -> Result<Self, CommandError> {
        match kind {
            CommandKind::Open if target.is_some() || amount.is_some() => {
                Err(CommandError::UnexpectedColumns { kind })
            }
            CommandKind::Open => match entry {
                Entry::Vacant(_) => Ok(Self::Open),
                Entry::Occupied(entry) => Err(CommandError::DuplicateAccount {
                    label: entry.key().clone(),
                }),
            },
            CommandKind::Deposit => Ok(Self::Deposit {
                account: Self::bound_account(entry)?,
                amount: Self::parse_amount(kind, amount)?,
            }),
            CommandKind::Withdraw => Ok(Self::Withdraw {
                account: Self::bound_account(entry)?,
                amount: Self::parse_amount(kind, amount)?,
            }),
            CommandKind::Transfer => {
                let from = Self::bound_account(entry)?;
                let amount = Self::parse_amount(kind, amount)?;
                let to = target.ok_or(CommandError::TargetRequired { kind })?;
                Ok(Self::Transfer { from, to, amount })
            }
        }
    }

    fn bound_account(entry: &Entry<'_, String, AccountId>) -> Result<AccountId, CommandError> {
        match entry {
            Entry::Occupied(entry) => Ok(*entry.get()),
            Entry::Vacant(entry) => Err(CommandError::UnknownAccount {
                label: entry.key().clone(),
            }),
        }
    }

    fn parse_amount(kind: CommandKind, amount: Option<Decimal>) -> Result<Decimal, CommandError> {
        let amount = amount.ok_or(CommandError::AmountRequired { kind })?;
        if amount > Decimal::ZERO {
            Ok(amount)
        } else {
            Err(CommandError::InvalidAmount { kind, amount })
        }
    }
}
