#[cfg(all(feature = "gtk4-adapter", feature = "http-source"))]
fn main() {
    use chrono::{Duration, Utc};
    use gtk4 as gtk;
    use gtk4::prelude::*;

    use ohlcv_chart::ChartEngineConfig;
    use ohlcv_chart::core::SurfaceSize;
    use ohlcv_chart::data::{BarRequest, HttpBarSource, HttpSourceConfig};
    use ohlcv_chart::platform_gtk::GtkChartAdapter;

    let _ = ohlcv_chart::telemetry::init_default_tracing();

    let endpoint = std::env::var("OHLCV_ENDPOINT")
        .unwrap_or_else(|_| HttpSourceConfig::default().default_endpoint);
    let symbol = std::env::var("OHLCV_SYMBOL").unwrap_or_else(|_| "EURUSD".to_owned());

    let app = gtk::Application::builder()
        .application_id("rs.ohlcv_chart.demos.bar_viewer")
        .build();

    app.connect_activate(move |app| {
        let config = ChartEngineConfig::new(SurfaceSize::new(1280, 760));
        let adapter = match GtkChartAdapter::new(config) {
            Ok(v) => v,
            Err(err) => {
                eprintln!("failed to initialize chart: {err}");
                return;
            }
        };

        let source = match HttpBarSource::new(HttpSourceConfig {
            default_endpoint: endpoint.clone(),
            timeout: None,
        }) {
            Ok(v) => v,
            Err(err) => {
                eprintln!("failed to build http client: {err}");
                return;
            }
        };
        let end = Utc::now();
        let request = BarRequest::new("demo", symbol.clone(), "M1", end - Duration::days(3), end)
            .with_compact_encoding(true);
        if let Err(err) = adapter.load_in_background(source, request) {
            eprintln!("failed to start bar download: {err}");
        }

        let window = gtk::ApplicationWindow::builder()
            .application(app)
            .title(format!("ohlcv-chart | {symbol} M1"))
            .default_width(1280)
            .default_height(760)
            .build();
        window.set_child(Some(adapter.drawing_area()));
        window.present();
    });

    let _ = app.run();
}

#[cfg(not(all(feature = "gtk4-adapter", feature = "http-source")))]
fn main() {
    println!("run with: cargo run --features desktop,http-source --example gtk_bar_viewer");
}
