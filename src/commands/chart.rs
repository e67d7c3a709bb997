use crate::models::ChartSeries;
use crate::services::{StockApiClient, ViewController};
use crate::utils::get_base_url;

pub async fn run(base_url: Option<String>, sector: Option<String>, period: Option<String>) {
    let base_url = base_url.unwrap_or_else(get_base_url);

    let client = match StockApiClient::new(&base_url) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    };

    let controller = ViewController::new(client);

    if let Err(e) = controller.init_sectors().await {
        eprintln!("❌ Failed to load sectors: {}", e);
        std::process::exit(1);
    }

    if let Some(label) = period {
        if let Err(e) = controller.change_period_by_label(&label).await {
            eprintln!("❌ Failed to change period: {}", e);
            std::process::exit(1);
        }
    }

    if let Some(label) = sector {
        if let Err(e) = controller.change_sector_by_label(&label).await {
            eprintln!("❌ Failed to change sector: {}", e);
            std::process::exit(1);
        }
    }

    let state = controller.snapshot().await;
    let sector_label = state.selected_sector.as_ref().map_or("-", |s| s.label.as_str());
    let period_label = state.selected_period.as_ref().map_or("-", |p| p.label.as_str());

    println!("📈 {} / {}", sector_label, period_label);
    println!("═══════════════════════════════════════════════════════════");
    for series in &state.series {
        print_series(series);
    }
}

fn print_series(series: &ChartSeries) {
    for dataset in &series.datasets {
        let points = dataset.data.len();
        let min = dataset.data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = dataset.data.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        println!("\n  {} ({}) - {} points", dataset.label, dataset.border_color, points);
        if points == 0 {
            continue;
        }
        println!("    range:  {:.2} - {:.2}", min, max);
        println!(
            "    latest: {} {:.2}",
            series.labels.first().map_or("", String::as_str),
            dataset.data[0]
        );
        println!(
            "    oldest: {} {:.2}",
            series.labels.last().map_or("", String::as_str),
            dataset.data[points - 1]
        );
    }
}
