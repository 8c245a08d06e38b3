use std::fs;
use std::path::{Path, PathBuf};

use binomial_explorer::api::{ExplorerConfig, ExplorerSession, FORMULA_LINES, PAGE_TITLE};
use binomial_explorer::interaction::InputEvent;

#[cfg(feature = "cairo-backend")]
use binomial_explorer::render::CairoRenderer;
#[cfg(not(feature = "cairo-backend"))]
use binomial_explorer::render::{NullRenderer, Renderer};

const USAGE: &str = "usage: export_figure [--n <trials>] [--p <probability>] [--y <cursor>] [--config <path>] [--output <path>] [--png <path>]";

#[derive(Debug, Default)]
struct CliArgs {
    trials: Option<u64>,
    probability: Option<f64>,
    cursor: Option<f64>,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    png: Option<PathBuf>,
}

fn main() {
    let _ = binomial_explorer::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            ExplorerConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => ExplorerConfig::default(),
    };

    let mut session = ExplorerSession::new(build_renderer(&config)?, config)
        .map_err(|err| err.to_string())?;

    if let Some(trials) = args.trials {
        session
            .handle(InputEvent::SetTrials(trials))
            .map_err(|err| err.to_string())?;
    }
    if let Some(probability) = args.probability {
        session
            .handle(InputEvent::SetProbability(probability))
            .map_err(|err| err.to_string())?;
    }
    if let Some(cursor) = args.cursor {
        session
            .handle(InputEvent::SetCursor(cursor))
            .map_err(|err| err.to_string())?;
    }

    let output = session.output();
    let payload = output
        .to_json_contract_v1_pretty()
        .map_err(|err| err.to_string())?;

    match &args.output {
        Some(path) => {
            fs::write(path, payload)
                .map_err(|err| format!("failed to write `{}`: {err}", path.display()))?;
            println!("{PAGE_TITLE}");
            for line in FORMULA_LINES {
                println!("{line}");
            }
            for line in output.summary.lines() {
                println!("{line}");
            }
        }
        None => println!("{payload}"),
    }

    if let Some(path) = &args.png {
        write_png(&session, path)?;
    }
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn build_renderer(config: &ExplorerConfig) -> Result<CairoRenderer, String> {
    let viewport = config.viewport();
    CairoRenderer::new(viewport.width as i32, viewport.height as i32).map_err(|err| err.to_string())
}

#[cfg(not(feature = "cairo-backend"))]
fn build_renderer(_config: &ExplorerConfig) -> Result<NullRenderer, String> {
    Ok(NullRenderer::default())
}

#[cfg(feature = "cairo-backend")]
fn write_png(session: &ExplorerSession<CairoRenderer>, path: &Path) -> Result<(), String> {
    session
        .renderer()
        .write_png(path)
        .map_err(|err| err.to_string())
}

#[cfg(not(feature = "cairo-backend"))]
fn write_png<R: Renderer>(_session: &ExplorerSession<R>, _path: &Path) -> Result<(), String> {
    Err("png export requires the `cairo-backend` feature".to_owned())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut parsed = CliArgs::default();

    while let Some(flag) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {name}"))
        };
        match flag.as_str() {
            "--n" => {
                let raw = value("--n")?;
                parsed.trials = Some(
                    raw.parse()
                        .map_err(|err| format!("invalid --n `{raw}`: {err}"))?,
                );
            }
            "--p" => {
                let raw = value("--p")?;
                parsed.probability = Some(
                    raw.parse()
                        .map_err(|err| format!("invalid --p `{raw}`: {err}"))?,
                );
            }
            "--y" => {
                let raw = value("--y")?;
                parsed.cursor = Some(
                    raw.parse()
                        .map_err(|err| format!("invalid --y `{raw}`: {err}"))?,
                );
            }
            "--config" => parsed.config = Some(PathBuf::from(value("--config")?)),
            "--output" => parsed.output = Some(PathBuf::from(value("--output")?)),
            "--png" => parsed.png = Some(PathBuf::from(value("--png")?)),
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`\n{USAGE}")),
        }
    }

    Ok(parsed)
}
