use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod build;
mod bundler;
mod changelog;
mod config;
mod conventional;
mod domain;
mod error;
mod git;
mod release;
mod resolver;
mod ui;
mod version_tool;
mod workspace;

use bundler::ProcessBundler;
use git::Git2History;
use release::{ReleaseCoordinator, ReleaseOptions};
use resolver::Params;
use version_tool::StandardVersionTool;

#[derive(Parser)]
#[command(
    name = "mono-publish",
    about = "Build and release independently versioned packages in a monorepo"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile the selected packages into UMD and ES bundles
    Build {
        #[arg(short, long, help = "Include the root package")]
        main: bool,

        #[arg(
            short,
            long,
            num_args = 0..=1,
            help = "Select sub-packages: bare flag for all, or a comma-separated name list"
        )]
        package: Option<Option<String>>,
    },
    /// Bump versions, regenerate changelogs, and push tags
    Release {
        #[arg(short, long, help = "Include the root package")]
        main: bool,

        #[arg(
            short,
            long,
            num_args = 0..=1,
            help = "Select sub-packages: bare flag for all, or a comma-separated name list"
        )]
        package: Option<Option<String>>,

        #[arg(long, help = "Make a prerelease with the given identifier")]
        prerelease: Option<String>,

        #[arg(long, help = "First release: tag without bumping")]
        first_release: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let root = PathBuf::from(".");

    match args.command {
        Command::Build { main, package } => {
            let params = Params { main, package };
            let workload = resolver::resolve(&root, &params, &config)?;
            let bundler = ProcessBundler::new(&config.bundler_command);
            build::build_workload(&bundler, &workload)?;
        }
        Command::Release {
            main,
            package,
            prerelease,
            first_release,
        } => {
            let params = Params { main, package };
            let workload = resolver::resolve(&root, &params, &config)?;
            let version_tool = StandardVersionTool::new(&config.version_command);
            let history = Git2History::discover()?;
            let coordinator = ReleaseCoordinator::new(&version_tool, &history, &config);
            coordinator.release_all(
                &workload,
                &ReleaseOptions {
                    prerelease,
                    first_release,
                },
            )?;
        }
    }

    Ok(())
}
