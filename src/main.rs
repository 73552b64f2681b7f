use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

mod controller;
mod domain;
mod inputter;
mod logging;
mod model;
mod store;
mod table;
mod ui;

use controller::Controller;
use domain::{SVConfig, SVError};
use model::{Model, Status};
use store::SampleStore;
use ui::{Styles, TableUI};

/// A tui based secrets dashboard.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Event poll timeout in milliseconds
    #[arg(long, default_value_t = 100)]
    poll_ms: u64,

    /// Disable colors
    #[arg(long)]
    no_color: bool,
}

impl From<Args> for SVConfig {
    fn from(args: Args) -> Self {
        SVConfig {
            event_poll_time: args.poll_ms,
            log_file: args.log_file,
            log_level: args.log_level,
            no_color: args.no_color,
        }
    }
}

fn main() -> ExitCode {
    let cfg = SVConfig::from(Args::parse());
    let result = run(&cfg);
    ratatui::restore();
    match result {
        Err(e) => {
            error!("Exiting with error: {e:?}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn run(cfg: &SVConfig) -> Result<(), SVError> {
    logging::init(cfg)?;
    info!("Starting sv!");

    let mut terminal = ratatui::try_init().map_err(SVError::TerminalInitFailed)?;
    let size = terminal.size()?;

    let mut model = Model::init(Box::new(SampleStore), size.height as usize);
    let styles = if cfg.no_color {
        Styles::monochrome()
    } else {
        Styles::default()
    };
    let ui = TableUI::new(styles);
    let controller = Controller::new(cfg);

    while model.status != Status::QUITTING {
        // Render the current view
        terminal.draw(|f| ui.draw(&model, f))?;

        // Handle events and map to a Message
        let message = controller.handle_event(&model)?;
        model.update(message);
    }

    info!("Quitting sv");
    Ok(())
}
