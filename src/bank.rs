use std::{cmp::Reverse, collections::BTreeMap};

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::{
    account::{Account, AccountError, AccountId},
    command::BankCommand,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BankError {
    #[error("Account {0} is not registered with this bank")]
    AccountNotFound(AccountId),
    #[error("Balance of account {0} would leave the representable range")]
    BalanceOverflow(AccountId),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
}

/// Registry of the accounts this bank opened, iterated in ascending id order.
#[derive(Debug, Default)]
pub struct Bank {
    accounts: BTreeMap<AccountId, Account>,
}

impl Bank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_account(&mut self) -> &mut Account {
        let account = Account::new();
        let id = account.id();
        debug!(account = id, "account opened");
        self.accounts.entry(id).or_insert(account)
    }

    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    pub fn account_mut(&mut self, id: AccountId) -> Option<&mut Account> {
        self.accounts.get_mut(&id)
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Up to `n` accounts with the longest transaction history first.
    /// Equal counts keep ascending id order.
    pub fn get_top_accounts_by_transactions(&self, n: usize) -> Vec<&Account> {
        let mut ranked: Vec<&Account> = self.accounts.values().collect();
        ranked.sort_by_key(|acc| Reverse(acc.transactions().len()));
        ranked.truncate(n);
        ranked
    }

    pub fn deposit(&mut self, id: AccountId, amount: Decimal) -> Result<(), BankError> {
        let account = self.get_mut(id)?;
        ensure_in_range(account, amount)?;
        account.deposit(amount);
        Ok(())
    }

    pub fn withdraw(&mut self, id: AccountId, amount: Decimal) -> Result<(), BankError> {
        let account = self.get_mut(id)?;
        ensure_in_range(account, -amount)?;
        Ok(account.withdraw(amount)?)
    }

    /// Both accounts are resolved before either one is touched.
    pub fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<(), BankError> {
        if from == to {
            let account = self.get_mut(from)?;
            ensure_in_range(account, -amount)?;
            return Ok(account.transfer_to_self(amount)?);
        }
        let (source, target) = self.pair_mut(from, to)?;
        ensure_in_range(source, -amount)?;
        ensure_in_range(target, amount)?;
        Ok(source.transfer(amount, target)?)
    }

    /// Applies `command`, returning the id of the account it was issued for.
    pub fn execute(&mut self, command: BankCommand) -> Result<AccountId, BankError> {
        match command {
            BankCommand::Open => Ok(self.create_account().id()),
            BankCommand::Deposit { account, amount } => {
                self.deposit(account, amount)?;
                Ok(account)
            }
            BankCommand::Withdraw { account, amount } => {
                self.withdraw(account, amount)?;
                Ok(account)
            }
            BankCommand::Transfer { from, to, amount } => {
                self.transfer(from, to, amount)?;
                Ok(from)
            }
        }
    }

    fn get_mut(&mut self, id: AccountId) -> Result<&mut Account, BankError> {
        self.accounts
            .get_mut(&id)
            .ok_or(BankError::AccountNotFound(id))
    }

    fn pair_mut(
        &mut self,
        from: AccountId,
        to: AccountId,
    ) -> Result<(&mut Account, &mut Account), BankError> {
        let (low, high) = if from < to { (from, to) } else { (to, from) };
        let mut range = self.accounts.range_mut(low..=high);
        let first = match range.next() {
            Some((id, acc)) if *id == low => acc,
            _ => return Err(BankError::AccountNotFound(low)),
        };
        let last = match range.next_back() {
            Some((id, acc)) if *id == high => acc,
            _ => return Err(BankError::AccountNotFound(high)),
        };
        Ok(if from < to { (first, last) } else { (last, first) })
    }
}

/// Rejects a balance change that `Decimal` cannot represent, before anything is recorded.
fn ensure_in_range(account: &Account, change: Decimal) -> Result<(), BankError> {
    account
        .balance()
        .checked_add(change)
        .map(|_| ())
        .ok_or(BankError::BalanceOverflow(account.id()))
}
