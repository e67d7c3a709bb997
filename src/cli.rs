use clap::{Parser, Subcommand};

use crate::commands;

#[derive(Parser)]
#[command(name = "stockchart")]
#[command(about = "Mock stock price API and sector charts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the server
    Serve {
        /// Port to listen on (default: STOCKCHART_PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,

        /// Number of mock records to generate (default: STOCKCHART_DATA_SIZE or 2000)
        #[arg(short, long)]
        data_size: Option<usize>,
    },
    /// List sectors and their tickers from a running server
    Sectors {
        /// API base URL (default: STOCKCHART_BASE_URL or http://127.0.0.1:3000)
        #[arg(short, long)]
        base_url: Option<String>,
    },
    /// Load chart series for a sector and period from a running server
    Chart {
        /// API base URL (default: STOCKCHART_BASE_URL or http://127.0.0.1:3000)
        #[arg(short, long)]
        base_url: Option<String>,

        /// Sector label (default: first sector)
        #[arg(short, long)]
        sector: Option<String>,

        /// Period label: 1W, 1M, 3M, 6M, 1Y, 2Y, 5Y (default: 6M)
        #[arg(short, long)]
        period: Option<String>,
    },
}

pub async fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, data_size } => {
            commands::serve::run(port, data_size).await;
        }
        Commands::Sectors { base_url } => {
            commands::sectors::run(base_url).await;
        }
        Commands::Chart { base_url, sector, period } => {
            commands::chart::run(base_url, sector, period).await;
        }
    }
}
