use std::path::PathBuf;

use clap::Parser;
use eframe::egui;

use task_network::board::link_table::LinkTable;
use task_network::board::task_board::TaskBoard;
use task_network::gui::frontend::TaskNetworkApp;
use task_network::persistence::settings::AppSettings;

#[derive(Parser, Debug)]
#[command(name = "Task-Network", about = "Circular task network board")]
struct Cli {
    /// Start with no tasks or links
    #[arg(long)]
    empty: bool,
    /// Override the layout radius from settings
    #[arg(long)]
    radius: Option<f32>,
    /// Alternate settings file
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    let radius = cli.radius;
    let settings_path = cli.settings.unwrap_or_else(AppSettings::settings_path);
    let settings = AppSettings::load_from(&settings_path).unwrap_or_else(|e| {
        log::warn!("could not read {}: {}; using defaults", settings_path.display(), e);
        AppSettings::default()
    });
    let (board, links) = if settings.seed_sample_data && !cli.empty {
        (TaskBoard::with_sample_tasks(), LinkTable::with_sample_links())
    } else {
        (TaskBoard::new(), LinkTable::new())
    };
    log::info!("starting with {} task(s), {} link(s)", board.task_count(), links.len());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_size.0, settings.window_size.1])
            // Keep both side panels and the canvas usable
            .with_min_inner_size([700.0, 420.0])
            .with_resizable(true)
            .with_title("Task Network Hub"),
        ..Default::default()
    };
    eframe::run_native(
        "Task-Network",
        options,
        Box::new(move |_cc| {
            let app = TaskNetworkApp::new(board, links, settings, settings_path).with_radius_override(radius);
            Ok(Box::new(app) as Box<dyn eframe::App>)
        }),
    )
}
