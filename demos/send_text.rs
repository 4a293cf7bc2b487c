use std::io;

use contiguity::{Contiguity, PhoneNumber, SendText};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("contiguity=debug")),
        )
        .init();

    let to = std::env::var("CONTIGUITY_TO").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "CONTIGUITY_TO environment variable is required",
        )
    })?;

    let client = Contiguity::from_env()?;
    let to = PhoneNumber::parse(None, to)?;
    let mut request = SendText::new(to.e164(), "Hello from contiguity-rs!");
    if let Ok(from) = std::env::var("CONTIGUITY_FROM") {
        request = request.from_number(from);
    }

    let response = client.text().send(request).await?;
    println!(
        "message_id: {}, request: {}, api_version: {}",
        response.message_id, response.metadata.id, response.metadata.api_version
    );

    Ok(())
}
