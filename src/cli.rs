//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use dotlink::config::{executable_search_start, find_source_root, Config};
use dotlink::defaults::default_target_root;
use dotlink::output::OutputConfig;

use crate::commands;

/// dotlink - Overlay module directories onto your home directory with symlinks
#[derive(Parser, Debug)]
#[command(name = "dotlink")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute (defaults to `install`)
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    global: GlobalArgs,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Modules directory (default: the nearest parent of the executable
    /// containing bundles.json)
    #[arg(long, global = true, value_name = "DIR", env = "DOTLINK_BASE")]
    pub base: Option<PathBuf>,

    /// Directory to install links into (default: home directory)
    #[arg(long, global = true, value_name = "DIR", env = "TARGET")]
    pub target: Option<PathBuf>,

    /// Only print actions, do not execute them
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Be verbose
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: String,

    /// Hostname used to pick `<module>_<hostname>` variants
    #[arg(long, global = true, value_name = "NAME", env = "DOTLINK_HOSTNAME")]
    pub hostname: Option<String>,
}

impl GlobalArgs {
    /// Resolve the source and target roots into a [`Config`].
    pub fn config(&self) -> Result<Config> {
        let source_root = match &self.base {
            Some(base) => base.clone(),
            None => {
                let exe = std::env::current_exe().context("Failed to locate executable")?;
                let start = executable_search_start(&exe)?;
                find_source_root(&start)
                    .map_err(|_| dotlink::suggestions::source_root_not_found(&start))?
            }
        };
        let target_root = self.target.clone().unwrap_or_else(default_target_root);

        let mut config = Config::new(source_root, target_root)?.with_dry_run(self.dry_run);
        if let Some(hostname) = &self.hostname {
            config = config.with_hostname(hostname.clone());
        }
        log::debug!("using {:?}", config);
        Ok(config)
    }

    /// Output styling for this invocation.
    pub fn output(&self) -> OutputConfig {
        OutputConfig::from_env_and_flag(&self.color)
    }

    /// Log level requested on the command line, if any.
    fn log_filter(&self) -> Result<Option<LevelFilter>> {
        match &self.log_level {
            Some(level) => level
                .parse()
                .map(Some)
                .with_context(|| format!("Invalid log level '{}'", level)),
            None if self.verbose => Ok(Some(LevelFilter::Debug)),
            None => Ok(None),
        }
    }

    /// Set up `env_logger` from `--log-level`, `--verbose` or `RUST_LOG`.
    fn init_logging(&self) -> Result<()> {
        let mut builder = env_logger::Builder::new();
        match self.log_filter()? {
            Some(level) => {
                builder.filter_level(level);
            }
            None => {
                builder.filter_level(LevelFilter::Warn);
                builder.parse_default_env();
            }
        }
        builder.format_timestamp(None).format_target(false);
        // A logger may already be installed when running inside tests.
        let _ = builder.try_init();
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Install modules
    Install(commands::install::InstallArgs),

    /// Uninstall modules
    Remove(commands::remove::RemoveArgs),

    /// Display the status of all modules
    Status(commands::status::StatusArgs),

    /// Import existing files and directories into a given module
    Import(commands::import::ImportArgs),

    /// Manage bundles
    Bundle(commands::bundle::BundleArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        self.global.init_logging()?;

        match self.command {
            None => commands::install::execute(Default::default(), &self.global),
            Some(Commands::Install(args)) => commands::install::execute(args, &self.global),
            Some(Commands::Remove(args)) => commands::remove::execute(args, &self.global),
            Some(Commands::Status(args)) => commands::status::execute(args, &self.global),
            Some(Commands::Import(args)) => commands::import::execute(args, &self.global),
            Some(Commands::Bundle(args)) => commands::bundle::execute(args, &self.global),
            Some(Commands::Completions(args)) => commands::completions::execute(args),
        }
    }
}
