use std::io;

use clap::{crate_authors, crate_description, crate_version, CommandFactory, Parser};
use clap_complete::generate;
use eyre::Result;
use tracing::{info, trace};

use harvest_common::{init_logging, ConfigFile, Storage};
use harvestctl::{
    fetch_dataset, init_config, list_datasets, list_formats, run_datasets, summarize_dataset,
    DatasetsConfig, ListSubCommand, Opts, Pipeline, SubCommand, CONFIG,
};

/// Binary name, using a different binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

fn main() -> Result<()> {
    let opts = Opts::parse();

    // Initialise logging.
    //
    init_logging(NAME, opts.tree, opts.log_dir.clone())?;

    // Banner
    //
    if !opts.quiet {
        banner()?;
    }

    let code = handle_subcmd(&opts)?;
    trace!("exit code {}", code);

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

/// Load `datasets.hcl`, from `-c` or the default location.
///
fn load_config(opts: &Opts) -> Result<DatasetsConfig> {
    let cfg = ConfigFile::<DatasetsConfig>::load(opts.config.as_deref(), CONFIG)?;
    info!("Using {}", cfg.path().display());
    Ok(cfg.into_inner())
}

pub fn handle_subcmd(opts: &Opts) -> Result<i32> {
    let storage = Storage::new(&opts.datadir);

    match &opts.subcmd {
        // Handle `run [name...]`
        //
        SubCommand::Run(ropts) => {
            trace!("run");

            let cfg = load_config(opts)?;
            let pipeline = Pipeline::http(storage);
            run_datasets(&pipeline, &cfg, ropts)
        }

        // Handle `fetch name`
        //
        SubCommand::Fetch(nopts) => {
            trace!("fetch");

            let cfg = load_config(opts)?;
            let pipeline = Pipeline::http(storage);
            fetch_dataset(&pipeline, &cfg, &nopts.name)
        }

        // Handle `summarize name`
        //
        SubCommand::Summarize(nopts) => {
            trace!("summarize");

            let cfg = load_config(opts)?;
            let pipeline = Pipeline::http(storage);
            summarize_dataset(&pipeline, &cfg, &nopts.name)
        }

        // Standalone completion generation
        //
        // NOTE: you can generate UNIX shells completion on Windows and vice-versa.  Not worth
        //       trying to limit depending on the OS.
        //
        SubCommand::Completion(copts) => {
            let generator = copts.shell;
            generate(generator, &mut Opts::command(), NAME, &mut io::stdout());
            Ok(0)
        }

        // Install the default configuration
        //
        SubCommand::Init => {
            let fname = init_config()?;
            eprintln!("Configuration installed in {}", fname.display());
            Ok(0)
        }

        // Standalone `list` command
        //
        SubCommand::List(lopts) => {
            let str = match lopts.cmd {
                ListSubCommand::Datasets => {
                    info!("Listing all datasets:");

                    let cfg = load_config(opts)?;
                    list_datasets(&cfg, &storage)?
                }
                ListSubCommand::Formats => {
                    info!("Listing all formats:");

                    list_formats()?
                }
            };
            println!("{}", str);
            Ok(0)
        }

        // Standalone `version` command
        //
        SubCommand::Version => {
            eprintln!("Modules: ");
            eprintln!("\t{}", version());
            eprintln!("\t{}", harvest_common::version());
            eprintln!("\t{}", harvest_sources::version());
            eprintln!("\t{}", harvest_formats::version());
            Ok(0)
        }
    }
}

/// Return our version number
///
#[inline]
pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}

/// Display banner
///
fn banner() -> Result<()> {
    Ok(eprintln!(
        r##"
{}/{} by {}
{}
"##,
        NAME,
        VERSION,
        AUTHORS,
        crate_description!()
    ))
}
