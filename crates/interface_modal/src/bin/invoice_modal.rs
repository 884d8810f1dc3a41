//! Invoice Detail Modal - Console Binary
//!
//! Opens the modal on an invoice read from a JSON file and drives it from
//! stdin, printing the rendered view after every command.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin invoice-modal -- invoice.json
//!
//! MODAL_DATE_FORMAT="%d %b %Y" MODAL_LOG_LEVEL=debug cargo run --bin invoice-modal -- invoice.json
//! ```
//!
//! # Environment Variables
//!
//! * `MODAL_DATE_FORMAT` - strftime pattern for displayed dates (default: %m/%d/%Y)
//! * `MODAL_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_invoice::{CloseHandler, InMemoryInvoiceStore, Invoice};
use interface_modal::command::HELP;
use interface_modal::{
    parse_command, Command, InvoiceDetailModal, ModalCollaborators, ModalConfig, ModalEvent,
};

/// Records that the modal asked to be closed
#[derive(Default)]
struct ConsoleCloser {
    closed: AtomicBool,
}

impl CloseHandler for ConsoleCloser {
    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = load_config();
    init_tracing(&config.log_level);

    let path: PathBuf = match std::env::args_os().nth(1) {
        Some(path) => path.into(),
        None => bail!("usage: invoice-modal <invoice.json>"),
    };
    let invoice = read_invoice(&path)?;
    let invoice_id = invoice.invoice_id.clone();

    tracing::info!(invoice_id = %invoice_id, path = %path.display(), "Opening invoice");

    let store = Arc::new(InMemoryInvoiceStore::with_invoices([invoice.clone()]));
    let closer = Arc::new(ConsoleCloser::default());
    let collaborators = ModalCollaborators::new(store.clone(), closer.clone())
        .with_updater(store.clone());

    let mut modal = InvoiceDetailModal::new(config, collaborators);
    modal.set_invoice(Some(invoice));
    modal.set_open(true);

    print_view(&modal);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let event = match parse_command(&line) {
            Ok(Command::Event(event)) => event,
            Ok(Command::Show) => {
                print_view(&modal);
                continue;
            }
            Ok(Command::Help) => {
                println!("{HELP}");
                continue;
            }
            Ok(Command::Quit) => break,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        let saving = event == ModalEvent::Save;
        if let Err(err) = modal.handle(event).await {
            eprintln!("error: {err}");
        }

        if closer.closed.load(Ordering::SeqCst) {
            modal.set_open(false);
            break;
        }

        // A save that left edit mode went through; show the stored copy
        if saving && modal.editor().is_some_and(|editor| !editor.is_editing()) {
            modal.set_invoice(store.get(&invoice_id).await);
        }

        print_view(&modal);
    }

    tracing::info!(invoice_id = %invoice_id, "Modal closed");
    Ok(())
}

/// Loads `MODAL_*` configuration, falling back to defaults
fn load_config() -> ModalConfig {
    ModalConfig::from_env().unwrap_or_else(|err| {
        eprintln!("ignoring invalid configuration: {err}");
        ModalConfig::default()
    })
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn read_invoice(path: &Path) -> anyhow::Result<Invoice> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not an invoice", path.display()))
}

fn print_view(modal: &InvoiceDetailModal) {
    if let Some(view) = modal.render() {
        println!("{view}\n");
    }
}
