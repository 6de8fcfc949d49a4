use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::sequence::IdSequence;

pub type TransactionId = u64;

static TRANSACTION_IDS: IdSequence = IdSequence::new();

/// Transfers have no kind of their own: the source records a `Withdraw`
/// and the target a `Deposit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Withdraw,
}

/// Immutable record of one balance change.
#[derive(Debug, Clone)]
pub struct Transaction {
    id: TransactionId,
    kind: TransactionKind,
    amount: Decimal,
    timestamp: DateTime<Utc>,
}

impl Transaction {
    pub(crate) fn new(kind: TransactionKind, amount: Decimal) -> Self {
        Self {
            id: TRANSACTION_IDS.next_id(),
            kind,
            amount,
            timestamp: Utc::now(),
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Contribution of this transaction to the owning account's balance.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Deposit => self.amount,
            TransactionKind::Withdraw => -self.amount,
        }
    }
}
