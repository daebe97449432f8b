//! Command dispatch: bridges CLI args -> adapter requests -> output formatting.

pub mod catalog;
pub mod config_cmd;
pub mod invoke;
pub mod serve;
pub mod status;

use std::sync::Arc;

use clap::ValueEnum;

use routersim_config::Config;
use routersim_mcp::RouterService;

use crate::cli::{ColorMode, Command, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

/// Everything a router-bound handler needs: the service plus resolved
/// presentation settings.
pub struct Session {
    pub service: RouterService,
    pub format: OutputFormat,
    pub color: bool,
    pub quiet: bool,
}

impl Session {
    /// Build the engine from `cfg` and resolve output settings, with CLI
    /// flags taking precedence over `[defaults]`.
    pub fn open(cfg: &Config, global: &GlobalOpts) -> Result<Self, CliError> {
        let engine = routersim_config::build_engine(cfg)?;
        Ok(Self {
            service: RouterService::new(Arc::new(engine)),
            format: resolve_format(cfg, global)?,
            color: output::should_color(resolve_color(cfg, global)?),
            quiet: global.quiet,
        })
    }

    pub fn print(&self, rendered: &str) {
        output::print_output(rendered, self.quiet);
    }
}

pub fn resolve_format(cfg: &Config, global: &GlobalOpts) -> Result<OutputFormat, CliError> {
    match global.output {
        Some(format) => Ok(format),
        None => OutputFormat::from_str(&cfg.defaults.output, true).map_err(|reason| {
            CliError::Validation {
                field: "defaults.output".into(),
                reason,
            }
        }),
    }
}

fn resolve_color(cfg: &Config, global: &GlobalOpts) -> Result<ColorMode, CliError> {
    match global.color {
        Some(mode) => Ok(mode),
        None => ColorMode::from_str(&cfg.defaults.color, true).map_err(|reason| {
            CliError::Validation {
                field: "defaults.color".into(),
                reason,
            }
        }),
    }
}

/// Dispatch a router-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, session: &Session, cfg: &Config) -> Result<(), CliError> {
    match cmd {
        Command::Serve(args) => serve::handle(args, session, cfg).await,
        Command::Tools => catalog::tools(session),
        Command::Resources => catalog::resources(session),
        Command::Prompts => catalog::prompts(session),
        Command::Call(args) => invoke::call(args, session),
        Command::Read(args) => invoke::read(&args, session),
        Command::Prompt(args) => invoke::prompt(args, session),
        Command::Status => status::handle(session),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
