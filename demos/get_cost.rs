use std::io;

use smsc::{GetCost, Message, RawPhoneNumber, SmscClientBuilder, Translit};
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
    let text = std::env::var("SMSC_MESSAGE").unwrap_or_else(|_| "Привет!".to_owned());

    let client = SmscClientBuilder::from_env()?.build()?;
    let plain = Message::sms(text)?;
    let latin = plain.clone().with_translit(Translit::Latin);
    let phone = RawPhoneNumber::new(phone_raw)?;

    for (label, message) in [("as is", plain), ("transliterated", latin)] {
        let response = client.get_cost(GetCost::to_one(phone.clone(), message)).await?;
        println!("{label}: {} part(s), cost {}", response.count, response.cost);
    }

    Ok(())
}
