use stockchart::{cli, utils};

#[tokio::main]
async fn main() {
    utils::init_tracing();
    cli::run().await;
}
