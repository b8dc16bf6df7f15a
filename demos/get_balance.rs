use smsc::SmscClientBuilder;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = SmscClientBuilder::from_env()?.build()?;
    let response = client.get_balance().await?;
    println!(
        "balance: {} {}, credit: {:?}",
        response.balance,
        response.currency.as_deref().unwrap_or(""),
        response.credit
    );

    Ok(())
}
