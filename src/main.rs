use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use fr4metool::ToolError;
use fr4metool::build::{build, clean, list};
use fr4metool::catalog::resolve;
use fr4metool::files::relative_path;
use fr4metool::preprocess::PreprocessMode;
use fr4metool::settings::load_settings;

#[derive(Parser)]
#[command(name = "fr4metool")]
#[command(
	author,
	version,
	about = "Build tool that concatenates and preprocesses fr4mebuild.json modules"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	/// Enable debug logging
	#[arg(short, long, global = true)]
	verbose: bool,

	#[command(subcommand)]
	command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
	/// Build the modules of the current directory
	Build {
		/// Do not preprocess the files
		#[arg(long, conflicts_with_all = ["whole_module", "per_file"])]
		no_preprocess: bool,

		/// Preprocess each module's concatenated sources in one pass
		#[arg(long, conflicts_with = "per_file")]
		whole_module: bool,

		/// Preprocess each file on its own before concatenation (default)
		#[arg(long)]
		per_file: bool,

		/// Extension of the built files (default: js)
		#[arg(long, value_name = "EXT")]
		ext: Option<String>,
	},

	/// List the buildable modules of the current directory
	List {
		/// Also list the modules with no 'builddir' or 'files' properties
		#[arg(long)]
		all: bool,
	},

	/// Delete the build directories of the modules of the current directory
	Clean,
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	match run(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_logging(verbose: bool) {
	let filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.without_time()
		.init();
}

fn run(cli: Cli) -> Result<ExitCode> {
	let Some(command) = cli.command else {
		// arg_required_else_help prints usage before we get here
		return Ok(ExitCode::SUCCESS);
	};

	let cwd = current_dir()?;

	match command {
		Commands::Build {
			no_preprocess,
			whole_module,
			per_file,
			ext,
		} => {
			let flag_mode = if no_preprocess {
				Some(PreprocessMode::Off)
			} else if whole_module {
				Some(PreprocessMode::WholeModule)
			} else if per_file {
				Some(PreprocessMode::PerFile)
			} else {
				None
			};
			handle_build(&cwd, flag_mode, ext)
		}
		Commands::List { all } => handle_list(&cwd, all),
		Commands::Clean => handle_clean(&cwd),
	}
}

fn current_dir() -> Result<PathBuf> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	cwd.canonicalize()
		.with_context(|| format!("Failed to resolve {}", cwd.display()))
}

fn report_failure(summary: &str, err: ToolError) -> ExitCode {
	eprintln!("{summary}");
	eprintln!("Error info: {:?}", anyhow::Error::from(err));
	ExitCode::FAILURE
}

fn handle_build(
	cwd: &Path,
	flag_mode: Option<PreprocessMode>,
	ext: Option<String>,
) -> Result<ExitCode> {
	let start = Instant::now();

	let settings = match load_settings(cwd) {
		Ok(settings) => settings,
		Err(e) => return Ok(report_failure("Build error !", e)),
	};
	let mut options = settings.build_options();
	if let Some(mode) = flag_mode {
		options.mode = mode;
	}
	if let Some(ext) = ext {
		options.extension = ext.trim_start_matches('.').to_string();
	}

	println!("Listing modules...");
	let catalog = match resolve(cwd) {
		Ok(catalog) => catalog,
		Err(e) => return Ok(report_failure("Build error !", e)),
	};

	println!("Building modules...");
	match build(&catalog, &options) {
		Ok(report) => {
			for artifact in &report.artifacts {
				println!("  {}", relative_display(cwd, artifact));
			}
			println!("Done in {} sec", start.elapsed().as_secs_f64());
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => Ok(report_failure("Build error !", e)),
	}
}

fn handle_list(cwd: &Path, all: bool) -> Result<ExitCode> {
	let catalog = match resolve(cwd) {
		Ok(catalog) => catalog,
		Err(e) => return Ok(report_failure("An error occurred while listing modules", e)),
	};

	for module in list(&catalog, all) {
		println!("{} : {}", module.name, relative_display(cwd, &module.path));
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_clean(cwd: &Path) -> Result<ExitCode> {
	let outcome = resolve(cwd).and_then(|catalog| clean(&catalog));

	match outcome {
		Ok(report) => {
			for dir in &report.skipped {
				println!(
					"Warning: Cannot delete a directory where a \"fr4mebuild.json\" file is present"
				);
				println!(" -> {}", dir.display());
			}
			for dir in &report.removed {
				println!("Removed {}", relative_display(cwd, dir));
			}
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => Ok(report_failure(
			"An error occurred while cleaning modules builds",
			e,
		)),
	}
}

/// `path` relative to `base`, `.` for `base` itself.
fn relative_display(base: &Path, path: &Path) -> String {
	let relative = relative_path(base, path);
	if relative.as_os_str().is_empty() {
		".".to_string()
	} else {
		relative.display().to_string()
	}
}
