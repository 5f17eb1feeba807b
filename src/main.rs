mod form;
mod format;
mod friend;
mod insights;
mod ledger;
mod mock;
mod receive;
mod transaction;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use error_iter::ErrorIter as _;
use rand::Rng;
use rust_decimal::Decimal;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::prelude::*;

use crate::{
    form::{FormError, SendForm, SplitForm},
    format::{fiat_to_sats, format_sats, format_usd, shorten_address},
    insights::{spending_by_category, Period, Summary},
    ledger::Ledger,
    receive::ReceiveRequest,
    transaction::{NewTransaction, Transaction},
};

/// Mock Bitcoin micro-wallet.
///
/// Every run starts from the example wallet unless `--empty` is given.
/// Nothing is persisted between runs.
#[derive(Debug, Parser)]
#[clap(version)]
struct Args {
    /// Start from an empty wallet instead of the example data.
    #[clap(long)]
    empty: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a transactions CSV and print the history.
    History {
        /// CSV with the header `type,amount,counterparty,note,category`.
        #[clap(value_parser)]
        input: Option<PathBuf>,
    },

    /// Send sats to an address.
    Send {
        #[clap(long, value_parser)]
        to: String,

        #[clap(long, value_parser)]
        amount: String,

        #[clap(long, value_parser)]
        note: Option<String>,
    },

    /// Show a fresh receive address, optionally recording a payment to it.
    Receive {
        #[clap(long, value_parser)]
        amount: Option<u64>,

        /// Amount in USD, converted at the mocked rate.
        #[clap(long, value_parser, conflicts_with = "amount")]
        usd: Option<Decimal>,

        #[clap(long = "from", value_parser)]
        sender: Option<String>,

        /// Also print the QR image as a data URL.
        #[clap(long)]
        qr: bool,
    },

    /// Split a bill equally with friends.
    Split {
        #[clap(long, value_parser)]
        bill: String,

        /// Friend ID, may be repeated.
        #[clap(long = "friend", value_parser)]
        friends: Vec<String>,
    },

    /// Summarize spending over a period.
    Insights {
        #[clap(value_parser)]
        input: Option<PathBuf>,

        #[clap(long, value_parser, default_value = "weekly")]
        period: Period,
    },
}

#[derive(Debug, Error)]
enum Error {
    #[error("Unable to open {0:?}")]
    Open(PathBuf, #[source] io::Error),

    #[error("Unable to read transactions from {0:?}")]
    Input(PathBuf, #[source] csv::Error),

    #[error("CSV error")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("Not a payable USD amount: {0}")]
    InvalidUsd(Decimal),

    #[error("A sender was given without an amount to receive")]
    MissingReceiveAmount,

    #[error("Unknown friend: {0}")]
    UnknownFriend(String),

    #[error("I/O error")]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    // Uses the `RUST_LOG` environment var for configuration. E.g. `RUST_LOG=debug cargo run`
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            for source in err.sources().skip(1) {
                eprintln!("  Caused by: {source}");
            }

            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    // One clock reading for the seed and the insights period.
    let now = Utc::now();
    let mut ledger = Ledger::default();
    if !args.empty {
        ledger.initialize_at(now);
    }
    let mut stdout = io::stdout().lock();

    match args.command {
        Command::History { input } => {
            if let Some(path) = input {
                replay_file(&mut ledger, path)?;
            }
            write_history(ledger.transactions(), &mut stdout)?;
        }
        Command::Send { to, amount, note } => {
            send_payment(&mut ledger, to, &amount, note, &mut stdout)?;
        }
        Command::Receive {
            amount,
            usd,
            sender,
            qr,
        } => {
            let payment = Payment {
                amount,
                usd,
                sender,
            };
            receive_payment(&mut ledger, &mut rand::thread_rng(), payment, qr, &mut stdout)?;
        }
        Command::Split { bill, friends } => {
            split_bill(&ledger, &bill, &friends, &mut stdout)?;
        }
        Command::Insights { input, period } => {
            if let Some(path) = input {
                replay_file(&mut ledger, path)?;
            }
            write_insights(ledger.transactions(), period.since(now), &mut stdout)?;
        }
    }

    info!(
        "Balance: {} sats ({})",
        format_sats(ledger.balance()),
        format_usd(ledger.balance())
    );

    Ok(())
}

/// Validates the send form, records the send and prints the history.
/// Nothing is recorded when validation fails.
fn send_payment<W: Write>(
    ledger: &mut Ledger,
    to: String,
    amount: &str,
    note: Option<String>,
    writer: W,
) -> Result<(), Error> {
    let mut form = SendForm::default();
    form.address = to;
    form.note = note.unwrap_or_default();
    form.set_amount(amount);

    let tx = form.validate()?;
    let sent = tx.amount;
    ledger.record_transaction(tx);

    info!(
        "{} sats sent successfully to {}.",
        format_sats(sent),
        shorten_address(&form.address, 6)
    );
    write_history(ledger.transactions(), writer)
}

/// An incoming payment given on the command line.
#[derive(Debug, Default)]
struct Payment {
    amount: Option<u64>,
    usd: Option<Decimal>,
    sender: Option<String>,
}

/// Prints a fresh receive address, then records the payment if one was given.
fn receive_payment<R: Rng + ?Sized, W: Write>(
    ledger: &mut Ledger,
    rng: &mut R,
    payment: Payment,
    qr: bool,
    mut writer: W,
) -> Result<(), Error> {
    let amount = match payment.usd {
        Some(usd) => Some(usd_to_sats(usd)?),
        None => payment.amount,
    };
    if amount.is_none() && payment.sender.is_some() {
        return Err(Error::MissingReceiveAmount);
    }

    let request = ReceiveRequest::new(rng);
    writeln!(writer, "{}", request.address)?;
    if qr {
        writeln!(writer, "{}", request.qr)?;
    }

    if let Some(amount) = amount {
        let mut tx = NewTransaction::receive(amount);
        if let Some(sender) = payment.sender {
            tx = tx.with_counterparty(sender);
        }
        ledger.record_transaction(tx);
        info!("Received {} sats.", format_sats(amount));
    }

    Ok(())
}

/// Prints one `friend,address,amount` row per friend sharing the bill.
fn split_bill<W: Write>(
    ledger: &Ledger,
    bill: &str,
    friends: &[String],
    writer: W,
) -> Result<(), Error> {
    let mut form = SplitForm::default();
    form.set_bill(bill);
    for id in friends {
        let friend = ledger
            .friend(id)
            .ok_or_else(|| Error::UnknownFriend(id.clone()))?;
        form.toggle(friend);
    }

    let requests = form.payment_requests()?;
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["friend", "address", "amount"])?;
    for request in &requests {
        let amount = request.amount.to_string();
        wtr.write_record([
            request.friend.name.as_str(),
            request.friend.address.as_str(),
            amount.as_str(),
        ])?;
    }
    wtr.flush()?;

    let names: Vec<_> = requests.iter().map(|r| r.friend.name.as_str()).collect();
    info!("Payment links generated for {}.", names.join(", "));

    Ok(())
}

fn usd_to_sats(usd: Decimal) -> Result<u64, Error> {
    fiat_to_sats(usd)
        .and_then(|sats| u64::try_from(sats).ok())
        .ok_or(Error::InvalidUsd(usd))
}

fn replay_file(ledger: &mut Ledger, path: PathBuf) -> Result<(), Error> {
    debug!("Replaying transactions from {path:?}");

    let file = match std::fs::File::open(&path) {
        Ok(file) => file,
        Err(err) => return Err(Error::Open(path, err)),
    };
    let count = replay(ledger, file).map_err(|err| Error::Input(path, err))?;
    debug!("Replayed {count} transactions");

    Ok(())
}

/// Records every transaction in the CSV, in file order.
fn replay<R: io::Read>(ledger: &mut Ledger, reader: R) -> Result<usize, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut count = 0;
    for transaction in rdr.deserialize::<NewTransaction>() {
        ledger.record_transaction(transaction?);
        count += 1;
    }

    Ok(count)
}

const HISTORY_HEADER: [&str; 7] = [
    "id",
    "type",
    "amount",
    "timestamp",
    "counterparty",
    "note",
    "category",
];

fn write_history<W: Write>(transactions: &[Transaction], writer: W) -> Result<(), Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    // Serializing the first record writes the header, so only an empty history needs it here.
    if transactions.is_empty() {
        wtr.write_record(HISTORY_HEADER)?;
    }
    for tx in transactions {
        wtr.serialize(tx)?;
    }
    wtr.flush()?;

    Ok(())
}

/// Writes the period summary followed by spending per category.
fn write_insights<W: Write>(
    transactions: &[Transaction],
    since: DateTime<Utc>,
    writer: W,
) -> Result<(), Error> {
    let summary = Summary::from_transactions(transactions, since);

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(["item", "amount", "percent"])?;
    for (name, amount) in [
        ("incoming", summary.incoming.to_string()),
        ("outgoing", summary.outgoing.to_string()),
        ("net_flow", summary.net_flow.to_string()),
    ] {
        wtr.write_record([name, amount.as_str(), ""])?;
    }
    for spend in spending_by_category(transactions, since) {
        wtr.serialize(spend)?;
    }
    wtr.flush()?;

    Ok(())
}
