use crate::server;
use crate::services::MockDataStore;
use crate::utils::{get_data_size, get_port};
use std::sync::Arc;

pub async fn run(port: Option<u16>, data_size: Option<usize>) {
    let port = port.unwrap_or_else(get_port);
    let data_size = data_size.unwrap_or_else(get_data_size);

    println!("🚀 Starting stockchart server on port {}", port);

    println!("📊 Generating {} mock records...", data_size);
    let data_store = MockDataStore::new(data_size);
    println!("✅ Mock data ready:");
    println!("   📈 Tickers: {}", data_store.list_sectors().len());
    println!("   📅 Records: {}", data_store.record_count());

    if let Err(e) = server::serve(Arc::new(data_store), port).await {
        eprintln!("❌ Server error: {}", e);
        std::process::exit(1);
    }
}
