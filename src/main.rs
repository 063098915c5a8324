use anyhow::Context;
use clap::Parser;
use order_receipt::utils::{logger, validation::Validate};
use order_receipt::{build_dispatcher, handle_payload, CliConfig, ReceiptConfig};
use std::io::Read;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting order-receipt CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = ReceiptConfig::load(cli.config.as_deref()).context("loading configuration")?;
    config.validate().context("validating configuration")?;

    // 讀取事件內容
    let raw = match &cli.event {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading event file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading event from stdin")?;
            buf
        }
    };
    let payload: serde_json::Value = serde_json::from_str(&raw).context("event is not JSON")?;

    let dispatcher = build_dispatcher(&config);
    let response = handle_payload(&dispatcher, payload).await;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
