use std::fs::File;

use anyhow::{Context, Result};
use pocket_bank::{
    bank::BankError,
    bin_utils::{ScriptError, Service},
    processor::ProcessError,
};

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let filename = args
        .next()
        .context("Expected a script file name as the first argument")?;
    let top = args
        .next()
        .map(|n| n.parse::<usize>())
        .transpose()
        .context("Expected the number of accounts to print as the second argument")?;
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        top,
        error_printer: Box::new(|line, err| {
            match err {
                ScriptError::ParseErr(_)
                | ScriptError::ProcessErr(
                    ProcessError::CommandErr(_)
                    | ProcessError::BankErr(BankError::BalanceOverflow(_)),
                ) => {
                    eprintln!("Error at line {line}: {err}")
                }
                ScriptError::ProcessErr(ProcessError::BankErr(_)) => {
                    // rejected operations are not technical errors, so we don't print them
                }
            }
        }),
    };
    service.run()
}
