use crate::models::SectorItem;
use crate::services::{StockApi, StockApiClient};
use crate::utils::get_base_url;

pub async fn run(base_url: Option<String>) {
    let base_url = base_url.unwrap_or_else(get_base_url);

    let client = match StockApiClient::new(&base_url) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    };

    match client.get_sectors().await {
        Ok(catalog) => {
            let sectors = SectorItem::group(&catalog);
            println!("📂 {} sectors:", sectors.len());
            for sector in sectors {
                println!("  {:<12} {}", sector.label, sector.tickers.join(", "));
            }
        }
        Err(e) => {
            eprintln!("❌ Failed to load sectors: {}", e);
            std::process::exit(1);
        }
    }
}
