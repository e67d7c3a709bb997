pub mod data_store;
pub mod stock_api_client;
pub mod view_controller;

pub use data_store::{MockDataStore, SharedDataStore};
pub use stock_api_client::{StockApi, StockApiClient};
pub use view_controller::{ViewController, ViewState};
