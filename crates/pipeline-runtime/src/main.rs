//! Demo entry point.
//!
//! Seeds an in-memory customer directory, wires the broker, drives a batch
//! of sample messages end-to-end, and drains a monitor subscription the way
//! a live dashboard would.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use mp_03_customer_enricher::InMemoryCustomerDirectory;
use pipeline_runtime::broker::{InboxKind, PipelineBroker};
use pipeline_runtime::producer::ingest;
use shared_envelope::CustomerRecord;

/// Demo customers standing in for the external customer datastore.
fn seeded_directory() -> InMemoryCustomerDirectory {
    let mut directory = InMemoryCustomerDirectory::new();
    directory.insert(
        "john.doe@example.com",
        CustomerRecord {
            customer_id: 1001,
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            company_name: Some("Acme Corp".to_string()),
            country: Some("US".to_string()),
            phone: Some("555-123-4567".to_string()),
            account_status: "active".to_string(),
            total_purchases: 15_420.50,
            last_purchase_date: Some("2026-07-12".to_string()),
        },
    );
    directory.insert(
        "jane.smith@example.com",
        CustomerRecord {
            customer_id: 1002,
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
            company_name: Some("Globex".to_string()),
            country: Some("CA".to_string()),
            phone: None,
            account_status: "active".to_string(),
            total_purchases: 820.00,
            last_purchase_date: Some("2026-05-30".to_string()),
        },
    );
    directory
}

const SAMPLE_MESSAGES: &[&str] = &[
    "Hello, my name is John Doe, email john.doe@example.com. I was overcharged \
     on my last invoice and would like a refund as soon as possible.",
    "I am Jane Smith (jane.smith@example.com). The app crashes with an error \
     every time I open it, please help troubleshooting this issue.",
    "Cannot log in to my account, the password reset link never arrives. \
     Reach me at sam@newcustomer.example.",
    "CONGRATULATIONS WINNER!!! Claim your free money lottery prize now at \
     http://prize.example/claim",
    "Just wanted to say the weather is lovely today, nothing else to report.",
];

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting message pipeline demo");

    let broker = PipelineBroker::new(Arc::new(seeded_directory()));

    // A dashboard viewer attached before any traffic flows.
    let mut viewer = broker.monitor().subscribe();

    for content in SAMPLE_MESSAGES {
        match ingest(content) {
            Ok(output) => {
                let delivered = broker.dispatch(output).await;
                info!(inbox = delivered.as_str(), "Message delivered");
            }
            Err(rejection) => {
                info!(%rejection, "Message rejected at the ingestion boundary");
            }
        }
    }

    // Drain the monitor feed the way a dashboard's event stream would.
    println!("--- monitor feed ---");
    while let Ok(Some(record)) = viewer.try_recv() {
        println!(
            "{} {} stage={} errors={}",
            record.message_id,
            record.event_type,
            record.stage,
            record.envelope.errors.len()
        );
    }

    println!("--- inbox totals ---");
    for kind in [
        InboxKind::Finance,
        InboxKind::Support,
        InboxKind::Website,
        InboxKind::Review,
    ] {
        println!("{:8} {}", kind.as_str(), broker.inbox(kind).len());
    }

    // Show one fully-enriched envelope as the wire JSON consumers see.
    if let Some(envelope) = broker.inbox(InboxKind::Finance).recent(1).first() {
        println!("--- sample delivered envelope ---");
        println!("{}", serde_json::to_string_pretty(envelope)?);
    }

    Ok(())
}
