//! Reads a webhook body from stdin and checks it against `CONTIGUITY_SIGNATURE`.

use std::io::{self, Read};

use contiguity::webhook::{parse_payload, verify_signature};
use tracing_subscriber::EnvFilter;

const TOLERANCE_SECS: u64 = 300;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("contiguity=debug")),
        )
        .init();

    let secret = std::env::var("CONTIGUITY_WEBHOOK_SECRET").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "CONTIGUITY_WEBHOOK_SECRET environment variable is required",
        )
    })?;
    let signature = std::env::var("CONTIGUITY_SIGNATURE").ok();

    let mut body = Vec::new();
    io::stdin().read_to_end(&mut body)?;

    if !verify_signature(&body, signature.as_deref(), &secret, Some(TOLERANCE_SECS)) {
        eprintln!("signature rejected");
        std::process::exit(1);
    }

    let event = parse_payload(&body)?;
    println!(
        "event: {} ({}), timestamp: {}",
        event.id, event.event_type, event.timestamp
    );
    if event.event_type.is_incoming_message() {
        let (sender, recipient) = event.reply_addresses()?;
        println!("reply to {sender} from {recipient}");
    }

    Ok(())
}
