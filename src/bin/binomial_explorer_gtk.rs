use std::fs;

use binomial_explorer::api::ExplorerConfig;
use binomial_explorer::platform_gtk::run_desktop_app;

fn main() -> gtk4::glib::ExitCode {
    let _ = binomial_explorer::telemetry::init_default_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => match fs::read_to_string(&path)
            .map_err(|err| format!("failed to read `{path}`: {err}"))
            .and_then(|raw| ExplorerConfig::from_json_str(&raw).map_err(|err| err.to_string()))
        {
            Ok(config) => config,
            Err(err) => {
                eprintln!("error: {err}");
                return gtk4::glib::ExitCode::FAILURE;
            }
        },
        None => ExplorerConfig::default(),
    };

    run_desktop_app(config)
}
