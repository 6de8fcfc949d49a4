/// Immutable ledger records appended by accounts.
pub mod transaction;

/// Balance and transaction history of a single account, plus the
/// deposit / withdraw / transfer operations that change them.
pub mod account;

/// Registry that opens accounts and ranks them by activity.
pub mod bank;

/// Validated bank commands built from raw operation rows.
pub mod command;

/// Command processor interface, plus "in memory" implementation that
/// resolves account labels and drives a [`bank::Bank`].
pub mod processor;

/// CSV script replay used by the binary and by the integration test.
pub mod bin_utils;

mod sequence;
