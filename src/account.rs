use rust_decimal::Decimal;
use thiserror::Error;
use tracing::trace;

use crate::{
    sequence::IdSequence,
    transaction::{Transaction, TransactionKind},
};

pub type AccountId = u64;

static ACCOUNT_IDS: IdSequence = IdSequence::new();

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
}

/// Balance plus the append-only history that produced it.
#[derive(Debug)]
pub struct Account {
    id: AccountId,
    balance: Decimal,
    transactions: Vec<Transaction>,
}

impl Default for Account {
    fn default() -> Self {
        Self::new()
    }
}

impl Account {
    /// Opens an empty account with the next process-wide identifier.
    pub fn new() -> Self {
        Self {
            id: ACCOUNT_IDS.next_id(),
            balance: Decimal::ZERO,
            transactions: Vec::new(),
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Transactions in the order they were applied.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Amounts are taken as given, including zero and negative ones.
    pub fn deposit(&mut self, amount: Decimal) {
        self.balance += amount;
        self.record(TransactionKind::Deposit, amount);
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountError> {
        self.ensure_funds(amount)?;
        self.balance -= amount;
        self.record(TransactionKind::Withdraw, amount);
        Ok(())
    }

    /// Moves `amount` to `target` as a withdraw here followed by a deposit there.
    /// Nothing changes on either side when funds are short.
    pub fn transfer(&mut self, amount: Decimal, target: &mut Account) -> Result<(), AccountError> {
        self.ensure_funds(amount)?;
        self.withdraw(amount)?;
        target.deposit(amount);
        trace!(from = self.id, to = target.id, %amount, "transfer");
        Ok(())
    }

    /// Transfer where source and target are the same account: balance is
    /// unchanged but both legs are recorded.
    pub(crate) fn transfer_to_self(&mut self, amount: Decimal) -> Result<(), AccountError> {
        self.ensure_funds(amount)?;
        self.withdraw(amount)?;
        self.deposit(amount);
        trace!(account = self.id, %amount, "self transfer");
        Ok(())
    }

    fn ensure_funds(&self, amount: Decimal) -> Result<(), AccountError> {
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        Ok(())
    }

    fn record(&mut self, kind: TransactionKind, amount: Decimal) {
        let tx = Transaction::new(kind, amount);
        trace!(account = self.id, tx = tx.id(), ?kind, %amount, balance = %self.balance, "recorded");
        self.transactions.push(tx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replayed_balance(acc: &Account) -> Decimal {
        acc.transactions().iter().map(Transaction::signed_amount).sum()
    }

    fn kinds(acc: &Account) -> Vec<TransactionKind> {
        acc.transactions().iter().map(Transaction::kind).collect()
    }

    #[test]
    fn new_account_is_empty() {
        let acc = Account::new();
        assert_eq!(acc.balance(), Decimal::ZERO);
        assert!(acc.transactions().is_empty());
    }

    #[test]
    fn ids_strictly_increase() {
        let a = Account::new();
        let b = Account::default();
        assert!(b.id() > a.id());
    }

    #[test]
    fn deposit() {
        let mut acc = Account::new();
        acc.deposit(Decimal::from(100));
        assert_eq!(acc.balance(), Decimal::from(100));
        assert_eq!(acc.transactions().len(), 1);
        assert_eq!(acc.transactions()[0].amount(), Decimal::from(100));
        assert_eq!(acc.transactions()[0].kind(), TransactionKind::Deposit);
    }

    #[test]
    fn deposit_accepts_non_positive_amounts() {
        let mut acc = Account::new();
        acc.deposit(Decimal::ZERO);
        acc.deposit(Decimal::from(-5));
        assert_eq!(acc.balance(), Decimal::from(-5));
        assert_eq!(acc.transactions().len(), 2);
        assert_eq!(acc.balance(), replayed_balance(&acc));
    }

    #[test]
    fn withdraw() {
        let mut acc = Account::new();
        acc.deposit(Decimal::from(200));
        acc.withdraw(Decimal::from(50)).unwrap();
        assert_eq!(acc.balance(), Decimal::from(150));
        assert_eq!(acc.transactions().len(), 2);
        assert_eq!(acc.transactions()[1].amount(), Decimal::from(50));
        assert_eq!(acc.transactions()[1].kind(), TransactionKind::Withdraw);
    }

    #[test]
    fn withdraw_exact_balance() {
        let mut acc = Account::new();
        acc.deposit(Decimal::from(50));
        acc.withdraw(Decimal::from(50)).unwrap();
        assert_eq!(acc.balance(), Decimal::ZERO);
    }

    #[test]
    fn withdraw_insufficient_funds() {
        let mut acc = Account::new();
        acc.deposit(Decimal::from(10));
        let err = acc.withdraw(Decimal::from(100)).unwrap_err();
        assert_eq!(
            err,
            AccountError::InsufficientFunds {
                requested: Decimal::from(100),
                available: Decimal::from(10),
            }
        );
        assert_eq!(err.to_string(), "Insufficient funds: requested 100, available 10");
        assert_eq!(acc.balance(), Decimal::from(10));
        assert_eq!(acc.transactions().len(), 1);
    }

    #[test]
    fn transfer() {
        let mut source = Account::new();
        let mut target = Account::new();
        source.deposit(Decimal::from(200));
        source.transfer(Decimal::from(50), &mut target).unwrap();
        assert_eq!(source.balance(), Decimal::from(150));
        assert_eq!(target.balance(), Decimal::from(50));
        assert_eq!(kinds(&source), [TransactionKind::Deposit, TransactionKind::Withdraw]);
        assert_eq!(kinds(&target), [TransactionKind::Deposit]);
        assert_eq!(target.transactions()[0].amount(), Decimal::from(50));
    }

    #[test]
    fn transfer_insufficient_funds() {
        let mut source = Account::new();
        let mut target = Account::new();
        target.deposit(Decimal::from(5));
        let err = source.transfer(Decimal::from(100), &mut target).unwrap_err();
        assert!(matches!(err, AccountError::InsufficientFunds { .. }));
        assert_eq!(source.balance(), Decimal::ZERO);
        assert!(source.transactions().is_empty());
        assert_eq!(target.balance(), Decimal::from(5));
        assert_eq!(target.transactions().len(), 1);
    }

    #[test]
    fn transfer_to_self_records_both_legs() {
        let mut acc = Account::new();
        acc.deposit(Decimal::from(30));
        acc.transfer_to_self(Decimal::from(20)).unwrap();
        assert_eq!(acc.balance(), Decimal::from(30));
        assert_eq!(
            kinds(&acc),
            [TransactionKind::Deposit, TransactionKind::Withdraw, TransactionKind::Deposit]
        );
        assert!(acc.transfer_to_self(Decimal::from(31)).is_err());
        assert_eq!(acc.transactions().len(), 3);
    }

    #[test]
    fn transaction_ids_follow_log_order() {
        let mut acc = Account::new();
        acc.deposit(Decimal::from(3));
        acc.withdraw(Decimal::from(1)).unwrap();
        acc.deposit(Decimal::from(4));
        let ids: Vec<_> = acc.transactions().iter().map(Transaction::id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn balance_matches_history() {
        let mut a = Account::new();
        let mut b = Account::new();
        a.deposit(Decimal::new(10050, 2));
        a.withdraw(Decimal::new(2025, 2)).unwrap();
        a.transfer(Decimal::from(30), &mut b).unwrap();
        assert!(b.withdraw(Decimal::from(31)).is_err());
        b.withdraw(Decimal::new(1, 1)).unwrap();
        b.transfer(Decimal::from(10), &mut a).unwrap();
        assert!(a.transfer(Decimal::from(1000), &mut b).is_err());
        a.deposit(Decimal::from(7));

        assert_eq!(a.balance(), Decimal::new(6725, 2));
        assert_eq!(b.balance(), Decimal::new(199, 1));
        assert_eq!(a.balance(), replayed_balance(&a));
        assert_eq!(b.balance(), replayed_balance(&b));
    }
}
