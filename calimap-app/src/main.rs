use anyhow::Context;
use calimap::{core::config::MapConfig, ui::widget::MapView, MapState};

/// Environment variable pointing at an optional JSON config file
const CONFIG_ENV: &str = "CALIMAP_CONFIG";

/// California pothole map viewer
fn main() -> anyhow::Result<()> {
    calimap::init_logging();

    let config = load_config()?;
    let state = MapState::new(config).context("invalid map configuration")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([980.0, 600.0])
            .with_title("California Potholes"),
        ..Default::default()
    };

    eframe::run_native(
        "calimap-app",
        options,
        Box::new(|_cc| Box::new(CaliMapApp::new(state))),
    )
    .map_err(|err| anyhow::anyhow!("viewer failed: {err}"))?;

    Ok(())
}

/// Config path from the first argument or `CALIMAP_CONFIG`, defaults otherwise
fn load_config() -> anyhow::Result<MapConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV).ok());

    match path {
        Some(path) => MapConfig::from_file(&path)
            .with_context(|| format!("failed to load config from {path}")),
        None => {
            log::info!("no config given, using the built-in California markers");
            Ok(MapConfig::default())
        }
    }
}

struct CaliMapApp {
    state: MapState,
    view: MapView,
}

impl CaliMapApp {
    fn new(state: MapState) -> Self {
        Self {
            state,
            view: MapView::new(),
        }
    }
}

impl eframe::App for CaliMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.view.show(ui, &mut self.state);
            });
    }
}
