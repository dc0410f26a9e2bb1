use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;

use termset_core::fragments::NoExtensionCatalog;
use termset_core::fixtures::Scenarios;
use termset_core::generators::Generator;
use termset_core::paths::Paths;

#[derive(Debug, Clone, Parser)]
#[command(about = "Resolves a layered terminal settings tree to its effective profile list.")]
struct Args {
    /// Override the settings file path instead of using the platform default.
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Override the defaults file path instead of using the platform default.
    #[arg(long)]
    defaults: Option<PathBuf>,
    /// Override the per-user fragment root instead of using the platform default.
    #[arg(long)]
    user_fragment_root: Option<PathBuf>,
    /// Override the machine-wide fragment root instead of using the platform default.
    #[arg(long)]
    machine_fragment_root: Option<PathBuf>,
    /// Print the resolved profiles and global settings as JSON instead of a summary.
    #[arg(long)]
    print_config: bool,
    /// Print the full resolved [`termset_core::resolve::LoadedSettings`] (profiles,
    /// globals, and warnings) as JSON instead of a summary.
    #[arg(long)]
    json: bool,
    /// Print accumulated non-fatal warnings to stderr.
    #[arg(long)]
    print_warnings: bool,
    /// Resolve and validate without writing anything back to disk.
    #[arg(long)]
    dry_run: bool,
    /// Run one or more scenario fixture files instead of resolving the platform's settings.
    #[arg(long)]
    fixtures: Vec<PathBuf>
}

#[derive(Debug, Error)]
enum CliError {
    #[error("could not resolve platform paths: {0}")]
    Paths(#[from] termset_core::paths::PathsError),
    #[error("could not read fixture file {path:?}: {source}")]
    CantReadFixture { path: PathBuf, source: std::io::Error },
    #[error("could not parse fixture file {path:?}: {source}")]
    CantParseFixture { path: PathBuf, source: serde_json::Error },
    #[error("could not serialize resolved settings: {0}")]
    Serialize(#[from] serde_json::Error)
}

fn main() -> Result<ExitCode, CliError> {
    let args = Args::parse();

    if !args.fixtures.is_empty() {
        for path in &args.fixtures {
            let text = std::fs::read_to_string(path).map_err(|source| CliError::CantReadFixture { path: path.clone(), source })?;
            let scenarios: Scenarios =
                serde_json::from_str(&text).map_err(|source| CliError::CantParseFixture { path: path.clone(), source })?;
            scenarios.run();
        }
        println!("All fixtures passed!");
        return Ok(ExitCode::SUCCESS);
    }

    let mut paths = Paths::discover()?;
    if let Some(settings) = args.settings {
        paths.settings_file = settings;
    }
    if let Some(defaults) = args.defaults {
        paths.defaults_file = defaults;
    }
    if let Some(user_fragment_root) = args.user_fragment_root {
        paths.user_fragments_root = user_fragment_root;
    }
    if let Some(machine_fragment_root) = args.machine_fragment_root {
        paths.machine_fragments_root = machine_fragment_root;
    }

    let generators = [Generator::PowershellCore, Generator::WslDistro, Generator::AzureCloudShell];
    let loaded = match termset_core::resolve::load_all_with_options(&paths, &generators, &NoExtensionCatalog, !args.dry_run) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("fatal: {e}");
            return Ok(ExitCode::from(2));
        }
    };

    if args.print_warnings {
        for warning in &loaded.warnings {
            eprintln!("warning: {warning:?}");
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&loaded)?);
    } else if args.print_config {
        let active: Vec<_> = loaded.active_profiles().collect();
        println!("{}", serde_json::to_string_pretty(&active)?);
    } else {
        for profile in loaded.active_profiles() {
            println!("{} ({})", profile.name, profile.guid);
        }
    }

    Ok(ExitCode::from(if loaded.warnings.is_empty() { 0 } else { 1 }))
}
