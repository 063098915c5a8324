use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "order-receipt")]
#[command(about = "Replay an order-creation event and send its receipt email")]
pub struct CliConfig {
    /// 事件 JSON 檔案；省略時從 stdin 讀取
    #[arg(long)]
    pub event: Option<PathBuf>,

    /// TOML 設定檔，未指定時改看 RECEIPT_CONFIG
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
