//! Clap derive structures for the `routersim` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use routersim_config::Transport;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// routersim -- a simulated home WiFi router you can drive from scripts
#[derive(Debug, Parser)]
#[command(
    name = "routersim",
    version,
    about = "Simulated WiFi router exposed as tools, resources and prompts",
    long_about = "Runs an in-memory WiFi router and exposes it to automation clients.\n\n\
        `serve` speaks JSON-RPC over stdio or HTTP; the other commands run a\n\
        single request against a freshly configured router and exit.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file to load instead of the platform default
    #[arg(long, env = "ROUTERSIM_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Seed the simulation RNG for reproducible scans and speed tests
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Output format (defaults to `defaults.output` from the config file)
    #[arg(long, short = 'o', env = "ROUTERSIM_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the router over JSON-RPC (stdio) or HTTP until stopped
    Serve(ServeArgs),

    /// List the available tools
    Tools,

    /// Invoke one tool and print its result
    #[command(alias = "c")]
    Call(CallArgs),

    /// List the readable resources
    Resources,

    /// Read one resource by URI (router://devices) or bare name
    #[command(alias = "r")]
    Read(ReadArgs),

    /// List the available prompts
    Prompts,

    /// Render one prompt against the current router state
    Prompt(PromptArgs),

    /// Show router status
    #[command(alias = "st")]
    Status,

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Serve ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Transport to listen on (defaults to `server.transport`)
    #[arg(long, short = 't')]
    pub transport: Option<TransportArg>,

    /// Address to bind for HTTP (defaults to `server.host`)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind for HTTP (defaults to `server.port`)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransportArg {
    /// Newline-delimited JSON-RPC on stdin/stdout
    Stdio,
    /// HTTP routes plus JSON-RPC at POST /mcp
    Http,
}

impl From<TransportArg> for Transport {
    fn from(arg: TransportArg) -> Self {
        match arg {
            TransportArg::Stdio => Self::Stdio,
            TransportArg::Http => Self::Http,
        }
    }
}

// ── One-shot requests ───────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CallArgs {
    /// Tool name (see `routersim tools`)
    pub tool: String,

    /// Tool arguments as a JSON object
    #[arg(long, short = 'a', value_name = "JSON")]
    pub args: Option<String>,
}

#[derive(Debug, Args)]
pub struct ReadArgs {
    /// Resource URI, e.g. router://logs
    pub uri: String,
}

#[derive(Debug, Args)]
pub struct PromptArgs {
    /// Prompt name (see `routersim prompts`)
    pub name: String,

    /// Prompt argument, repeatable
    #[arg(long = "arg", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub args: Vec<(String, String)>,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

// ── Config ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (file + environment), passwords masked
    Show,

    /// Print the config file path
    Path,

    /// Write a config file populated with the factory defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn key_value_splits_on_first_equals() {
        assert_eq!(
            parse_key_value("issue_type=slow_speed").unwrap(),
            ("issue_type".to_string(), "slow_speed".to_string())
        );
        assert_eq!(
            parse_key_value("note=a=b").unwrap(),
            ("note".to_string(), "a=b".to_string())
        );
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn prompt_args_repeat() {
        let cli = Cli::try_parse_from([
            "routersim",
            "prompt",
            "troubleshoot_connection",
            "--arg",
            "issue_type=intermittent",
        ])
        .unwrap();
        match cli.command {
            Command::Prompt(args) => {
                assert_eq!(args.name, "troubleshoot_connection");
                assert_eq!(args.args.len(), 1);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["routersim", "status", "--seed", "7", "-o", "json"]).unwrap();
        assert_eq!(cli.global.seed, Some(7));
        assert_eq!(cli.global.output, Some(OutputFormat::Json));
    }
}
