use std::ffi::OsString;

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use tracing::{debug, info};

use ccache::args::{split_argv, ArgvParts, InvocationMode};
use ccache::compiler::{find_compiler, guess_compiler_on_disk, CompilerFamily, ExecutableSearch};
use ccache::config::Config;
use ccache::exec::{exit_code, CompilerCommand, ExecError};
use ccache::logging::init_tracing;
use ccache::{base_name, is_full_path, CCACHE_NAME};

/// Options understood when the wrapper is called without a compiler.
#[derive(Debug, Parser)]
#[command(
    name = "ccache",
    version,
    about = "Compiler front end",
    after_help = "Usage as a wrapper: ccache [key=value ...] <compiler> [compiler options]"
)]
struct Cli {
    /// Print the effective configuration
    #[arg(short = 'p', long)]
    show_config: bool,

    /// Resolve COMPILER like a wrapped invocation and print its path and family
    #[arg(long, value_name = "COMPILER")]
    which: Option<String>,
}

fn main() {
    let argv: Vec<OsString> = std::env::args_os().collect();
    match run(argv) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("ccache: error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(raw_argv: Vec<OsString>) -> Result<i32> {
    // Decisions are made on a lossy view. Compiler arguments are forwarded
    // from `raw_argv`, so only the tokens the wrapper interprets itself
    // (settings and the compiler name) need to be valid UTF-8.
    let argv: Vec<String> = raw_argv
        .iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    let parts = split_argv(&argv);
    let compiler_start = argv.len() - parts.compiler_and_args.len();
    let settings_start = compiler_start - parts.config_settings.len();
    if let Some(setting) = raw_argv[settings_start..compiler_start]
        .iter()
        .find(|arg| arg.to_str().is_none())
    {
        bail!("setting {:?} is not valid UTF-8", setting);
    }

    let config = load_config(&parts)?;
    init_tracing(&config.log_file);
    debug!(?argv, mode = ?parts.invocation, "starting");

    let wants_own_options = parts.invocation == InvocationMode::Wrapped
        && parts
            .compiler_and_args
            .first()
            .map_or(true, |arg| arg.starts_with('-'));
    if wants_own_options {
        return run_own_options(&raw_argv[compiler_start..], &config);
    }

    let Some(invoked) = raw_argv.get(compiler_start) else {
        return Err(ExecError::EmptyInvocation.into());
    };
    let invoked = invoked
        .to_str()
        .with_context(|| format!("compiler name {:?} is not valid UTF-8", invoked))?;
    let requested = config
        .compiler_override()
        .unwrap_or_else(|| base_name(invoked))
        .to_string();

    let search = executable_search(&config, &argv, parts.invocation);
    let program = find_compiler(
        parts.compiler_and_args,
        config.compiler_override(),
        parts.invocation,
        |name| search.find(name),
    )?
    .into_iter()
    .next()
    .unwrap_or_default();

    let args = raw_argv[compiler_start + 1..].to_vec();
    let command = CompilerCommand::resolved(&requested, program, args)?;
    let family = compiler_family(&config, command.program());
    info!(compiler = %command.program(), %family, "running compiler");

    let status = command.run()?;
    Ok(exit_code(status))
}

/// File, then environment, then `key=value` settings from the command line.
fn load_config(parts: &ArgvParts) -> Result<Config> {
    let mut config = Config::load().context("failed to load configuration")?;
    config
        .apply_process_env()
        .context("invalid configuration in environment")?;
    for setting in &parts.config_settings {
        config
            .apply_setting(setting)
            .with_context(|| format!("invalid setting '{}'", setting))?;
    }
    Ok(config)
}

fn executable_search(config: &Config, argv: &[String], mode: InvocationMode) -> ExecutableSearch {
    let search_path: Option<OsString> = (!config.path.is_empty()).then(|| config.path.clone().into());
    let search = ExecutableSearch::new(search_path);
    match (mode, argv.first()) {
        (InvocationMode::Masquerading, Some(invoked)) if is_full_path(invoked) => {
            search.excluding(invoked)
        }
        _ => search,
    }
}

fn compiler_family(config: &Config, program: &str) -> CompilerFamily {
    config
        .compiler_type
        .family()
        .unwrap_or_else(|| guess_compiler_on_disk(program))
}

fn run_own_options(args: &[OsString], config: &Config) -> Result<i32> {
    let cli = Cli::parse_from(std::iter::once(OsString::from(CCACHE_NAME)).chain(args.iter().cloned()));

    if cli.show_config {
        let rendered = toml::to_string(config).context("failed to render configuration")?;
        print!("{}", rendered);
        return Ok(0);
    }

    if let Some(compiler) = cli.which {
        let search = executable_search(config, &[], InvocationMode::Wrapped);
        let invocation = find_compiler(
            vec![compiler],
            config.compiler_override(),
            InvocationMode::Wrapped,
            |name| search.find(name),
        )?;
        let program = &invocation[0];
        println!("{}\t{}", program, compiler_family(config, program));
        return Ok(0);
    }

    Cli::command()
        .print_help()
        .context("failed to print usage")?;
    Ok(1)
}
