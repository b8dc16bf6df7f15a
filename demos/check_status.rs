use std::io;

use smsc::{CheckStatus, MessageId, RawPhoneNumber, SmscClientBuilder};
use tracing_subscriber::EnvFilter;

fn required(key: &str) -> Result<String, io::Error> {
    std::env::var(key).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{key} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let phone = RawPhoneNumber::new(required("SMSC_PHONE")?)?;
    let id = required("SMSC_MESSAGE_ID")?.trim().parse::<u64>()?;

    let client = SmscClientBuilder::from_env()?.build()?;
    let reports = client
        .get_status(CheckStatus::one(phone, MessageId::new(id)))
        .await?;

    for report in reports {
        println!(
            "id: {}, status: {} ({:?}), final: {}, last change: {:?}",
            report.id,
            report.status.code.as_i32(),
            report.status.name,
            report.status.code.is_final(),
            report.last_date
        );
    }

    Ok(())
}
