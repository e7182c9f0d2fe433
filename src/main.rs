// src/main.rs
//! Demo driver for the DID ledger codec.
//!
//! Runs the full codec pipeline against a file-backed in-memory ledger:
//! `create` builds a JSON document into fixed-width records and submits
//! them, `resolve` reconstructs and serializes a stored document, and
//! `inspect` summarizes ledger state. Network submission, proof
//! generation, and wallet plumbing are external collaborators and are not
//! part of this binary.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use did_ledger_codec::config::CodecConfig;
use did_ledger_codec::document::builder::DocumentBuilder;
use did_ledger_codec::document::reconstruct::DocumentReconstructor;
use did_ledger_codec::document::serialize::to_document;
use did_ledger_codec::ledger::client::{CreateDidCall, InMemoryLedger, LedgerClient};
use did_ledger_codec::ledger::snapshot::LedgerSnapshot;
use did_ledger_codec::models::document::DidDocument;
use did_ledger_codec::models::record::DidId;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "did-ledger-codec", about = "Fixed-width DID document codec demo")]
struct Cli {
    /// Path of the JSON-serialized ledger snapshot.
    #[arg(long, default_value = "ledger.json")]
    ledger: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a DID document file and write it to the ledger.
    Create {
        /// Path of the DID document JSON file.
        document: PathBuf,
    },
    /// Reconstruct and print the document stored under an identifier.
    Resolve {
        /// The DID, e.g. did:example:abc.
        did: String,
    },
    /// Summarize ledger state.
    Inspect,
}

fn load_snapshot(path: &Path) -> anyhow::Result<LedgerSnapshot> {
    if !path.exists() {
        return Ok(LedgerSnapshot::new());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading ledger snapshot {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("parsing ledger snapshot {}", path.display()))
}

fn save_snapshot(path: &Path, snapshot: &LedgerSnapshot) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, text).with_context(|| format!("writing ledger snapshot {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = CodecConfig::default();

    match cli.command {
        Command::Create { document } => {
            let text = fs::read_to_string(&document)
                .with_context(|| format!("reading document {}", document.display()))?;
            let parsed: DidDocument = serde_json::from_str(&text)
                .with_context(|| format!("parsing document {}", document.display()))?;

            let records = DocumentBuilder::new(config).build(&parsed)?;
            let mut ledger = InMemoryLedger::from_snapshot(load_snapshot(&cli.ledger)?);
            let tx = ledger.submit_transaction(CreateDidCall::from_records(&records))?;
            save_snapshot(&cli.ledger, ledger.query_state())?;

            println!("created {} in transaction {}", parsed.id, tx.0);
        }
        Command::Resolve { did } => {
            let snapshot = load_snapshot(&cli.ledger)?;
            let id = DidId::new(&did);
            let reconstructor = DocumentReconstructor::new(config);
            match reconstructor.reconstruct(&snapshot, &id) {
                Some(reconstructed) => {
                    let json_doc = to_document(&reconstructed)?;
                    println!("{}", serde_json::to_string_pretty(&json_doc)?);
                }
                None => bail!("DID not found: {}", did),
            }
        }
        Command::Inspect => {
            let snapshot = load_snapshot(&cli.ledger)?;
            println!("Total DIDs: {}", snapshot.did_count());
            for id in snapshot.dids() {
                println!("- {}", id);
            }
        }
    }

    Ok(())
}
