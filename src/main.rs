//! hudkit - screen-space HUD overlay engine
//!
//! Headless driver: builds a demo HUD, draws it against a recording host and
//! optionally logs every frame as newline-delimited JSON.

mod config;
mod headless;

use anyhow::Result;
use config::HudConfig;
use headless::HeadlessConfig;
use std::{env, path::PathBuf};
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting hudkit v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    let mut hud = match cli.config.as_deref() {
        Some(path) => HudConfig::load_from_path(path),
        None => HudConfig::load(),
    };

    if let Some(frames) = cli.frames {
        hud.frames = frames;
    }
    if let Some(path) = cli.frame_log {
        hud.frame_log = Some(path);
    }
    if cli.test_pattern {
        hud.show_test_pattern = true;
    }

    if let Some(path) = cli.write_config {
        hud.save_to_path(&path)?;
        info!("Wrote effective config to {}", path.display());
        return Ok(());
    }

    let summary = headless::run(HeadlessConfig { hud })?;
    println!(
        "drew {} frames: {} boxes, {} texts",
        summary.frames, summary.boxes, summary.texts
    );
    Ok(())
}

struct CliOptions {
    config: Option<PathBuf>,
    frames: Option<u64>,
    frame_log: Option<PathBuf>,
    test_pattern: bool,
    write_config: Option<PathBuf>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions {
            config: None,
            frames: None,
            frame_log: None,
            test_pattern: false,
            write_config: None,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    if let Some(path) = args.next() {
                        opts.config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--config requires a file path");
                    }
                }
                "--frames" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.frames = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--frames must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--frames requires an integer");
                    }
                }
                "--frame-log" => {
                    if let Some(path) = args.next() {
                        opts.frame_log = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--frame-log requires a file path");
                    }
                }
                "--test-pattern" => opts.test_pattern = true,
                "--write-config" => {
                    if let Some(path) = args.next() {
                        opts.write_config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--write-config requires a file path");
                    }
                }
                other => {
                    tracing::warn!(arg = other, "Ignoring unknown argument");
                }
            }
        }

        opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliOptions {
        CliOptions::parse(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn parses_all_flags() {
        let opts = parse(&[
            "--config",
            "hud.toml",
            "--frames",
            "12",
            "--frame-log",
            "out/frames.jsonl",
            "--test-pattern",
        ]);
        assert_eq!(opts.config, Some(PathBuf::from("hud.toml")));
        assert_eq!(opts.frames, Some(12));
        assert_eq!(opts.frame_log, Some(PathBuf::from("out/frames.jsonl")));
        assert!(opts.test_pattern);
    }

    #[test]
    fn bad_values_are_ignored() {
        let opts = parse(&["--frames", "many", "--bogus", "--config"]);
        assert_eq!(opts.frames, None);
        assert_eq!(opts.config, None);
        assert!(!opts.test_pattern);
    }
}
