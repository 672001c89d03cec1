//! qrforge entrypoint: opens the window, or runs a generation headless

use anyhow::Context;
use clap::{Parser, Subcommand};
use qrforge::output::{Rendered, render_batch_report, render_generation};
use qrforge::{
    BatchRunner, GenerationRequest, HistoryRecorder, QrImageBuilder, QrforgeConfig, RgbColor,
    logging,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "qrforge", version, about = "Desktop QR code generator")]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to qrforge.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Print results as formatted JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one QR image and record it in the history log
    Generate {
        /// Text or link to encode
        #[arg(short, long)]
        text: String,

        /// Output image path (.png is appended when missing)
        #[arg(short, long)]
        output: PathBuf,

        /// Module color (CSS syntax, e.g. "navy" or "#1e90ff")
        #[arg(long, value_name = "COLOR")]
        fill: Option<RgbColor>,

        /// Background color (CSS syntax)
        #[arg(long, value_name = "COLOR")]
        background: Option<RgbColor>,

        /// Logo pasted over the center of the code
        #[arg(long, value_name = "PATH")]
        logo: Option<PathBuf>,
    },

    /// Generate one QR image per row of a CSV file, named after the first field
    Batch {
        /// CSV file whose first column holds the payloads
        #[arg(short, long)]
        input: PathBuf,

        /// Directory the images are written to
        #[arg(short = 'd', long)]
        out_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = QrforgeConfig::load(cli.config.as_deref()).context("loading configuration")?;
    logging::init(&config.logging).context("initialising logging")?;

    match cli.command {
        None => open_window(&config),
        Some(Command::Generate {
            text,
            output,
            fill,
            background,
            logo,
        }) => {
            let mut request = GenerationRequest::new(text, with_image_extension(output))
                .with_colors(
                    fill.unwrap_or(config.qr.default_fill),
                    background.unwrap_or(config.qr.default_background),
                );
            request.logo = logo;

            let outcome = QrImageBuilder::new(&config.qr).build(&request)?;
            HistoryRecorder::new(config.history.file.clone())
                .record(&request.payload, &request.destination)?;

            emit(&render_generation(&request, &outcome), cli.json)
        }
        Some(Command::Batch { input, out_dir }) => {
            let builder = QrImageBuilder::new(&config.qr);
            let runner = BatchRunner::new(
                &builder,
                config.qr.default_fill,
                config.qr.default_background,
            );
            let report = runner.run(&input, &out_dir)?;
            emit(&render_batch_report(&report), cli.json)
        }
    }
}

#[cfg(feature = "gui")]
fn open_window(config: &QrforgeConfig) -> anyhow::Result<()> {
    Ok(qrforge::app::window::run(config)?)
}

#[cfg(not(feature = "gui"))]
fn open_window(_config: &QrforgeConfig) -> anyhow::Result<()> {
    anyhow::bail!("qrforge was built without the `gui` feature; use the generate or batch commands")
}

fn with_image_extension(output: PathBuf) -> PathBuf {
    let name = output
        .file_name()
        .map(|name| qrforge::normalize_file_name(&name.to_string_lossy()))
        .unwrap_or_else(|| qrforge::request::DEFAULT_FILE_NAME.to_string());
    output.with_file_name(name)
}

fn emit(rendered: &Rendered, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&rendered.json)?);
    } else {
        for line in &rendered.human {
            println!("{line}");
        }
    }
    Ok(())
}
