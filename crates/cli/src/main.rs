use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use console::{style, Term};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use rig_core::{ProjectBuilder, SolutionLoader, Workspace};

mod flags;
mod help;
mod opts;

use opts::Options;

// Helper to convert CoreError to anyhow::Error (works around mlua not being Send+Sync)
fn map_core_err<T, E: std::fmt::Display>(result: std::result::Result<T, E>) -> Result<T> {
    result.map_err(|e| anyhow::anyhow!("{}", e))
}

fn main() -> Result<()> {
    let term = Term::stderr();
    let args: Vec<String> = env::args().skip(1).collect();

    let specs = Options::descriptors();
    let mut options = Options::default();
    let outcome = flags::parse(&specs, &args, &mut options);

    for line in &outcome.errors {
        term.write_line(&format!("{} {}", style("error:").red().bold(), line))?;
    }
    if !outcome.success {
        process::exit(1);
    }

    if options.help {
        print!("{}", help::render(&specs, "rig"));
        return Ok(());
    }

    if options.version {
        println!("rig {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Extras that look like flags are user errors; the rest pass through
    let mut unknown = false;
    for extra in &outcome.extras {
        if extra.starts_with('-') {
            term.write_line(&format!(
                "{} Unknown option: {}",
                style("error:").red().bold(),
                extra
            ))?;
            unknown = true;
        }
    }
    if unknown {
        process::exit(1);
    }

    let filter = if options.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .init();

    for extra in &outcome.extras {
        debug!("Ignoring extra argument: {}", extra);
    }

    run(&term, &options)
}

fn run(term: &Term, options: &Options) -> Result<()> {
    let start = if options.root.is_empty() {
        env::current_dir()?
    } else {
        PathBuf::from(&options.root)
    };

    let workspace = map_core_err(Workspace::discover(&start, options.config))?;
    term.write_line(&format!(
        "{} Building {} ({})",
        style("::").cyan().bold(),
        workspace.root().display(),
        workspace.target()
    ))?;

    let solution = map_core_err(SolutionLoader::load(&workspace))?;

    if !map_core_err(solution.pre_build())? {
        term.write_line(&format!(
            "{} Pre-build hook reported failure",
            style("error:").red().bold()
        ))?;
        process::exit(1);
    }

    let projects = solution.projects();
    let mut builder = ProjectBuilder::new();
    for project in &projects {
        match builder.build(&workspace, project) {
            Ok(artifact) => {
                term.write_line(&format!(
                    "{} Built '{}' -> {}",
                    style("::").cyan().bold(),
                    project.name(),
                    artifact.display()
                ))?;
            }
            Err(e) => {
                term.write_line(&format!("{} {}", style("error:").red().bold(), e))?;
                process::exit(1);
            }
        }
    }

    term.write_line(&format!(
        "{} Build complete ({} project(s))",
        style("::").cyan().bold(),
        projects.len()
    ))?;
    Ok(())
}
