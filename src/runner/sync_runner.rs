use std::error::Error;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::{
    csv_utils::{read_csv, write_csv},
    TransferEngine, TransferRequest,
};

/// Replays the transfers in the given input file and writes final balances to
/// the provided writer. Rejected rows are skipped and counted.
///
/// # Arguments
/// * `engine` - Engine over the seeded ledger
/// * `input_path` - Path to the input CSV file containing transfers (`from,to,amount`)
/// * `writer` - Where to write the account balances (e.g. stdout)
///
/// # Errors
/// Returns an error if:
/// * The input file cannot be read
/// * The CSV is malformed
/// * Writing to the output fails
pub fn run<P, W>(
    engine: &TransferEngine,
    input_path: P,
    writer: W,
) -> Result<(), Box<dyn Error>>
where
    P: AsRef<Path>,
    W: Write,
{
    let mut replayed = 0usize;
    let mut rejected = 0usize;
    let transfers_iter = read_csv::<TransferRequest, _>(input_path)?;
    for transfer in transfers_iter {
        // CSV parsing errors are critical - propagate them
        let transfer = transfer?;
        replayed += 1;
        if let Err(err) = engine.execute_transfer(&transfer) {
            debug!(
                from = %transfer.from,
                to = %transfer.to,
                code = err.code(),
                "skipping rejected transfer"
            );
            rejected += 1;
        }
    }
    info!(replayed, rejected, "replay finished");

    // Snapshot is ordered by account name
    write_csv(writer, engine.get_all_accounts().into_values())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::load_accounts;
    use crate::stores::LedgerStore;
    use std::sync::Arc;

    fn seeded_engine() -> TransferEngine {
        let accounts = load_accounts("data/example_balances.csv").unwrap();
        TransferEngine::new(Arc::new(LedgerStore::new(accounts)))
    }

    #[test]
    fn test_example_transfers() -> Result<(), Box<dyn Error>> {
        let mut output = Vec::new();
        run(&seeded_engine(), "data/example_transfers.csv", &mut output)?;

        let expected = "name,balance
Anna,12.5
Jane,137.5
Mark,0
";
        assert_eq!(String::from_utf8(output)?, expected);
        Ok(())
    }

    #[test]
    fn test_missing_input_file() {
        let mut output = Vec::new();
        assert!(run(&seeded_engine(), "data/missing.csv", &mut output).is_err());
        assert!(output.is_empty());
    }
}
