use std::io::{self, BufRead, Write};

use contiguity::{Contiguity, NewOtp, VerifyOtp};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let to = std::env::var("CONTIGUITY_TO").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "CONTIGUITY_TO environment variable is required",
        )
    })?;

    let client = Contiguity::from_env()?;
    let created = client.otp().send(NewOtp::new(to, "en", "Contiguity Demo")).await?;
    println!("otp_id: {}", created.otp_id);

    print!("code: ");
    io::stdout().flush()?;
    let mut code = String::new();
    io::stdin().lock().read_line(&mut code)?;

    let verified = client
        .otp()
        .verify(VerifyOtp::new(created.otp_id.clone(), code.trim()))
        .await?;
    println!("verified: {}", verified.verified);

    Ok(())
}
