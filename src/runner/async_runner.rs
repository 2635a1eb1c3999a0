use std::error::Error;
use std::io::Write;
use std::path::Path;

use crate::{csv_utils::write_csv, TransferEngine, TransferRequest};

use csv_async::{AsyncReaderBuilder, Error as CsvError, Trim};
use tokio::fs::File;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tracing::{debug, info};

const BUFFER_SIZE: usize = 1024;

type Result<T, E = Box<dyn Error + Send + Sync>> = std::result::Result<T, E>;

/// Replays transfers async from the given input file and writes final balances
/// to the provided writer.
/// Spawns two tasks:
/// * CSV reader - streams transfers from the input file, deserializes them and
///   sends them to the processor via channel.
/// * Processor - receives transfers from the channel and executes them until
///   the channel is closed.
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
pub async fn run<P, W>(engine: TransferEngine, input_path: P, writer: W) -> Result<()>
where
    P: AsRef<Path>,
    W: Write,
{
    // Create channel for passing transfers from reader to processor
    let (tx, rx) = mpsc::channel(BUFFER_SIZE);
    let input_path = input_path.as_ref().to_owned();

    let reader_handle = tokio::spawn(read_transfers(input_path, tx));
    let processor_handle = tokio::spawn(process_transfers(engine, rx));

    // Wait for reader to finish and propagate any errors
    reader_handle.await??;

    let (engine, replayed, rejected) = processor_handle.await?;
    info!(replayed, rejected, "replay finished");

    // Snapshot is ordered by account name
    write_csv(writer, engine.get_all_accounts().into_values())?;
    Ok(())
}

/// Reads and deserializes transfers from a CSV file.
/// Returns them through the provided channel.
async fn read_transfers(
    input_path: impl AsRef<Path> + Send,
    tx: mpsc::Sender<TransferRequest>,
) -> Result<(), CsvError> {
    let file = File::open(input_path).await?;
    let mut csv_reader = AsyncReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .create_deserializer(file);

    let mut records = csv_reader.deserialize::<TransferRequest>();
    while let Some(result) = records.next().await {
        match result {
            Ok(transfer) => {
                if tx.send(transfer).await.is_err() {
                    // Receiver dropped, exit gracefully
                    break;
                }
            }
            // CSV parsing errors are critical - propagate them
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Executes transfers received through the channel.
/// Once the reader closes the channel, returns the engine together with the
/// number of transfers seen and how many of them were rejected.
async fn process_transfers(
    engine: TransferEngine,
    mut rx: mpsc::Receiver<TransferRequest>,
) -> (TransferEngine, usize, usize) {
    let mut replayed = 0;
    let mut rejected = 0;
    while let Some(transfer) = rx.recv().await {
        replayed += 1;
        // A rejected row leaves the ledger unchanged and replay carries on
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
    (engine, replayed, rejected)
}
