mod app;
mod canvas;
mod ui;

// Re-export library modules so that `crate::state`, `crate::i18n`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use floorscale_gui_lib::i18n;
pub use floorscale_gui_lib::image_loader;
pub use floorscale_gui_lib::render;
pub use floorscale_gui_lib::session;
pub use floorscale_gui_lib::state;

use std::path::PathBuf;

use app::FloorScaleApp;
use floorscale_gui_lib::command;

/// Command line options
#[derive(Debug, Default)]
struct CliArgs {
    /// Floor plan to open on startup
    image: Option<PathBuf>,
    /// JSON command batch to run headlessly
    script: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "floorscale=info,floorscale_gui_lib=info".into()),
        )
        .init();

    let args = parse_args();

    if let Some(script) = args.script {
        std::process::exit(run_script(&script));
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("FloorScale")
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let initial_image = args.image;
    if let Err(e) = eframe::run_native(
        "floorscale",
        native_options,
        Box::new(move |cc| Ok(Box::new(FloorScaleApp::new(cc, initial_image)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = CliArgs::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--image" if i + 1 < args.len() => {
                parsed.image = Some(PathBuf::from(&args[i + 1]));
                i += 1;
            }
            "--script" if i + 1 < args.len() => {
                parsed.script = Some(PathBuf::from(&args[i + 1]));
                i += 1;
            }
            other => tracing::warn!("Ignoring unknown argument '{other}'"),
        }
        i += 1;
    }
    parsed
}

/// Run a command batch against a fresh session and print the responses.
/// Returns the process exit code.
fn run_script(path: &std::path::Path) -> i32 {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to read script {}: {e}", path.display());
            return 1;
        }
    };
    let settings = state::AppSettings::load();
    i18n::set_lang(settings.language);
    let mut session = session::ToolSession::with_settings(&settings);
    match command::execute_json_batch(&mut session, &json) {
        Ok(responses) => match serde_json::to_string_pretty(&responses) {
            Ok(out) => {
                println!("{out}");
                if responses.iter().all(|r| r.success) {
                    0
                } else {
                    2
                }
            }
            Err(e) => {
                tracing::error!("Failed to serialize responses: {e}");
                1
            }
        },
        Err(e) => {
            tracing::error!("{e}");
            1
        }
    }
}
