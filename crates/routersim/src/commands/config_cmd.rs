//! Config subcommand handlers.

use std::path::{Path, PathBuf};

use routersim_config::{self as config, Config, ConfigError};
use routersim_core::view::MASKED_SECRET;

use super::resolve_format;
use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// The file `--config` names, or the platform default.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(config::config_path)
}

/// Load the layered config (file + environment) for `global`.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let cfg = match global.config {
        Some(ref path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };
    Ok(cfg)
}

/// Copy of `cfg` safe to print.
fn redacted(cfg: &Config) -> Config {
    let mut shown = cfg.clone();
    if shown.router.password.is_some() {
        shown.router.password = Some(MASKED_SECRET.into());
    }
    shown
}

fn write_config(cfg: &Config, path: &Path, explicit: bool) -> Result<(), CliError> {
    if explicit {
        config::save_config_to(cfg, path)?;
    } else {
        config::save_config(cfg)?;
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = load(global)?;
            let format = resolve_format(&cfg, global)?;
            let shown = redacted(&cfg);
            let text = toml::to_string_pretty(&shown).map_err(ConfigError::from)?;
            let out = output::render_single(format, &shown, |_| text.clone(), |_| text.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config_file(global).display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = config_file(global);
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }
            write_config(&Config::default(), &path, global.config.is_some())?;
            tracing::info!(path = %path.display(), "wrote default config");
            output::print_output(
                &format!("Wrote default configuration to {}", path.display()),
                global.quiet,
            );
            Ok(())
        }
    }
}
