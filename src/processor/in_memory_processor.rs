use std::collections::{HashMap, hash_map::Entry};

use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    account::AccountId,
    bank::Bank,
    command::{BankCommand, CommandError, CommandKind},
};

use super::{CommandProcessor, ProcessError};

#[derive(Debug, Default)]
pub struct InMemoryCommandProcessor {
    labels: HashMap<String, AccountId>,
    labels_by_id: HashMap<AccountId, String>,
    pub bank: Bank,
}

impl InMemoryCommandProcessor {
    pub fn label_of(&self, id: AccountId) -> Option<&str> {
        self.labels_by_id.get(&id).map(String::as_str)
    }

    fn resolve(&self, label: &str) -> Result<AccountId, CommandError> {
        self.labels
            .get(label)
            .copied()
            .ok_or_else(|| CommandError::UnknownAccount {
                label: label.to_string(),
            })
    }
}

impl CommandProcessor for InMemoryCommandProcessor {
    fn process_command(
        &mut self,
        kind: CommandKind,
        account: &str,
        target: Option<&str>,
        amount: Option<Decimal>,
    ) -> Result<(), ProcessError> {
        let target = target.map(|label| self.resolve(label)).transpose()?;
        let entry = self.labels.entry(account.to_string());
        let cmd = BankCommand::parse_command(&entry, kind, target, amount)?;
        match self.bank.execute(cmd) {
            Ok(id) => {
                // bind only once the account really exists
                if let Entry::Vacant(entry) = entry {
                    self.labels_by_id.insert(id, entry.key().clone());
                    entry.insert(id);
                }
                Ok(())
            }
            Err(err) => {
                debug!(account, ?kind, %err, "operation rejected");
                Err(err.into())
            }
        }
    }
}
