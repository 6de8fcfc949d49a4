use std::io::Write;

use anyhow::Context;
use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AccountSummary {
    pub account: String,
    pub balance: Decimal,
    pub transactions: usize,
}

/// Writes one `account,balance,transactions` row per summary, in the given order.
pub fn print_accounts<W>(
    output: &mut W,
    summaries: impl Iterator<Item = AccountSummary>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for summary in summaries {
        writer
            .serialize(&summary)
            .with_context(|| format!("Failed to write summary of account `{}`", summary.account))?;
    }
    writer
        .flush()
        .context("Failed to flush account summaries")
}
