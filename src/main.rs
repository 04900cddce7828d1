use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use leadcomm::application::processor::ShipmentProcessor;
use leadcomm::application::report::CommissionSummary;
use leadcomm::domain::commission::{CommissionStatus, compute_commission, parse_date};
use leadcomm::domain::contact::Contact;
use leadcomm::domain::ports::{
    CommissionStore, CommissionStoreBox, ContactDirectoryBox, LeadStoreBox,
};
use leadcomm::domain::record::CommissionRecord;
use leadcomm::infrastructure::in_memory::{
    InMemoryCommissionStore, InMemoryLeadStore, StaticContactDirectory,
};
use leadcomm::interfaces::csv::reader::CsvReader;
use leadcomm::interfaces::csv::writer::CsvWriter;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the commission for one lead and month
    Compute {
        /// Date the lead became a customer (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        affiliation: NaiveDate,
        /// Date whose month is being paid (defaults to today)
        #[arg(long, value_parser = parse_date)]
        reference: Option<NaiveDate>,
        /// Shipments attributed to the lead in that month
        #[arg(long, allow_hyphen_values = true)]
        shipments: i64,
    },
    /// Import leads, process a shipments file and print the commission records
    Process {
        /// Leads CSV (name,email,affiliationDate)
        #[arg(long)]
        leads: Option<PathBuf>,
        /// Shipments CSV (Cliente,Envios)
        #[arg(long)]
        shipments: PathBuf,
        /// Date whose month is being paid (defaults to today)
        #[arg(long, value_parser = parse_date)]
        reference: Option<NaiveDate>,
        /// CRM contacts CSV (name,contact_id)
        #[arg(long)]
        contacts: Option<PathBuf>,
    },
    /// Summarise commission records by status
    Report {
        /// Records CSV written by `process`; reads the store when omitted
        records: Option<PathBuf>,
        /// Only count records with this status
        #[arg(long)]
        status: Option<CommissionStatus>,
    },
    /// Attach CRM contact ids to leads that have none
    Sync {
        #[arg(long)]
        leads: Option<PathBuf>,
        #[arg(long)]
        contacts: PathBuf,
    },
    /// Find leads by name or email
    Search {
        #[arg(long)]
        leads: Option<PathBuf>,
        query: String,
    },
    /// Print lead and commission totals
    Stats {
        #[arg(long)]
        leads: Option<PathBuf>,
        #[arg(long)]
        records: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(verbose >= 2)
        .with_line_number(verbose >= 2)
        .init();

    debug!("leadcomm started with verbosity level: {}", verbose);
}

#[cfg(feature = "storage-rocksdb")]
fn open_stores(db_path: Option<PathBuf>) -> Result<(LeadStoreBox, CommissionStoreBox)> {
    use leadcomm::infrastructure::rocksdb::RocksDBStore;

    if let Some(db_path) = db_path {
        let store = RocksDBStore::open(db_path).into_diagnostic()?;
        return Ok((Box::new(store.clone()), Box::new(store)));
    }
    Ok((
        Box::new(InMemoryLeadStore::new()),
        Box::new(InMemoryCommissionStore::new()),
    ))
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_stores(db_path: Option<PathBuf>) -> Result<(LeadStoreBox, CommissionStoreBox)> {
    if db_path.is_some() {
        warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
        );
    }
    Ok((
        Box::new(InMemoryLeadStore::new()),
        Box::new(InMemoryCommissionStore::new()),
    ))
}

fn open_csv(path: &Path) -> Result<CsvReader<File>> {
    let file = File::open(path).into_diagnostic()?;
    Ok(CsvReader::new(file))
}

fn load_directory(path: &Path) -> Result<ContactDirectoryBox> {
    let mut contacts: Vec<Contact> = Vec::new();
    for contact in open_csv(path)?.contacts() {
        match contact {
            Ok(contact) => contacts.push(contact),
            Err(e) => warn!("Error reading contact: {}", e),
        }
    }
    Ok(Box::new(StaticContactDirectory::from_contacts(contacts)))
}

async fn import_leads(processor: &ShipmentProcessor, leads: Option<&Path>) -> Result<()> {
    if let Some(path) = leads {
        processor
            .import_leads(open_csv(path)?.leads())
            .await
            .into_diagnostic()?;
    }
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = io::stdout();
    let mut writer = CsvWriter::new(stdout.lock());

    match cli.command {
        Command::Compute {
            affiliation,
            reference,
            shipments,
        } => {
            let reference = reference.unwrap_or_else(today);
            let result = compute_commission(affiliation, reference, shipments).into_diagnostic()?;
            writer.write_row(&result).into_diagnostic()?;
            writer.flush().into_diagnostic()?;
        }
        Command::Process {
            leads,
            shipments,
            reference,
            contacts,
        } => {
            let (lead_store, commission_store) = open_stores(cli.db_path)?;
            let directory = contacts.as_deref().map(load_directory).transpose()?;
            let processor = ShipmentProcessor::new(lead_store, commission_store, directory);

            import_leads(&processor, leads.as_deref()).await?;
            let reference = reference.unwrap_or_else(today);
            let outcome = processor
                .process_rows(open_csv(&shipments)?.shipments(), reference)
                .await
                .into_diagnostic()?;
            writer.write_all(&outcome.records).into_diagnostic()?;
        }
        Command::Report { records, status } => {
            let records: Vec<CommissionRecord> = match records {
                Some(path) => {
                    let mut records = Vec::new();
                    for record in open_csv(&path)?.commissions() {
                        match record {
                            Ok(record) => records.push(record),
                            Err(e) => warn!("Error reading commission record: {}", e),
                        }
                    }
                    records
                }
                None => {
                    let (lead_store, commission_store) = open_stores(cli.db_path)?;
                    ShipmentProcessor::new(lead_store, commission_store, None)
                        .into_records()
                        .await
                        .into_diagnostic()?
                }
            };
            let summary = CommissionSummary::from_records(&records, status);
            writer.write_row(&summary).into_diagnostic()?;
            writer.flush().into_diagnostic()?;
        }
        Command::Sync { leads, contacts } => {
            let (lead_store, commission_store) = open_stores(cli.db_path)?;
            let processor = ShipmentProcessor::new(lead_store, commission_store, None);
            import_leads(&processor, leads.as_deref()).await?;

            let processor = processor.with_directory(load_directory(&contacts)?);
            let outcome = processor.sync_contacts().await.into_diagnostic()?;
            writer.write_row(&outcome).into_diagnostic()?;
            writer.flush().into_diagnostic()?;
        }
        Command::Search { leads, query } => {
            let (lead_store, commission_store) = open_stores(cli.db_path)?;
            let processor = ShipmentProcessor::new(lead_store, commission_store, None);
            import_leads(&processor, leads.as_deref()).await?;

            let found = processor.search_leads(&query).await.into_diagnostic()?;
            writer.write_all(&found).into_diagnostic()?;
        }
        Command::Stats { leads, records } => {
            let (lead_store, mut commission_store) = open_stores(cli.db_path)?;
            if let Some(path) = records {
                let store = InMemoryCommissionStore::new();
                for record in open_csv(&path)?.commissions() {
                    match record {
                        Ok(record) => store.append(record).await.into_diagnostic()?,
                        Err(e) => warn!("Error reading commission record: {}", e),
                    }
                }
                commission_store = Box::new(store);
            }
            let processor = ShipmentProcessor::new(lead_store, commission_store, None);
            import_leads(&processor, leads.as_deref()).await?;

            let stats = processor.stats().await.into_diagnostic()?;
            writer.write_row(&stats).into_diagnostic()?;
            writer.flush().into_diagnostic()?;
        }
    }

    Ok(())
}
