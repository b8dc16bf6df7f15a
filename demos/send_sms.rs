use std::io;

use smsc::{Message, RawPhoneNumber, SendSms, SmscClientBuilder};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let phone_raw = std::env::var("SMSC_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSC_PHONE environment variable is required",
        )
    })?;
    let text = std::env::var("SMSC_MESSAGE")
        .unwrap_or_else(|_| "Hello from the smsc example.".to_owned());

    let client = SmscClientBuilder::from_env()?.build()?;
    let request = SendSms::to_one(RawPhoneNumber::new(phone_raw)?, Message::sms(text)?);

    let response = client.send(request).await?;
    println!(
        "id: {}, parts: {}, cost: {:?}, balance: {:?}",
        response.id, response.count, response.cost, response.balance
    );

    Ok(())
}
