mod cli;

use tonarchiv::{
    config,
    pipeline::{self, Pipeline, RunOptions},
    tagging::LoftyTagWriter,
};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tonarchiv_av::FlacTranscoder;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "tonarchiv=debug,tonarchiv_parser=debug,tonarchiv_av=debug".to_string()
        } else {
            "tonarchiv=info,tonarchiv_parser=info,tonarchiv_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            workers,
            dry_run,
            skip_existing,
            no_timestamp,
        } => {
            let overrides = ConvertOverrides {
                workers,
                dry_run,
                skip_existing,
                no_timestamp,
            };
            convert(&input, &output, cli.config.as_deref(), overrides)
        }
        Commands::Inspect { input, json } => {
            inspect(&input, cli.config.as_deref(), json)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::CheckTools => {
            check_tools(cli.config.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Version => {
            println!("tonarchiv {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Command line flags that override the config file.
struct ConvertOverrides {
    workers: Option<usize>,
    dry_run: bool,
    skip_existing: bool,
    no_timestamp: bool,
}

fn convert(
    input: &Path,
    output: &Path,
    config_path: Option<&Path>,
    overrides: ConvertOverrides,
) -> Result<ExitCode> {
    let mut config = config::load_config_or_default(config_path)?;

    if let Some(workers) = overrides.workers {
        config.conversion.workers = workers;
    }
    config.conversion.dry_run |= overrides.dry_run;
    config.conversion.skip_existing |= overrides.skip_existing;
    if overrides.no_timestamp {
        config.conversion.timestamped_output = false;
    }

    // Dry runs never start ffmpeg, so it need not be installed.
    let ffmpeg = if config.conversion.dry_run {
        config
            .tools
            .ffmpeg_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(tonarchiv_av::FFMPEG))
    } else {
        tonarchiv_av::get_tool_path(tonarchiv_av::FFMPEG, config.tools.ffmpeg_path.as_deref())?
    };
    let transcoder =
        FlacTranscoder::new(ffmpeg).with_compression_level(config.conversion.compression_level)?;

    let pipeline = Pipeline::new(
        tonarchiv_parser::Parser::new(config.layout.parser_config()),
        transcoder,
        LoftyTagWriter::new(),
        RunOptions::from_config(&config),
    );

    let report = pipeline.run(input, output)?;

    for line in report.summary_lines() {
        println!("{}", line);
    }
    tracing::info!(
        found = report.found,
        converted = report.converted,
        skipped = report.skipped,
        failed = report.failed(),
        "Run finished"
    );

    Ok(ExitCode::from(report.exit_code()))
}

fn inspect(input: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let parser = tonarchiv_parser::Parser::new(config.layout.parser_config());

    let entries = pipeline::inspect(&parser, input)?;

    if json {
        let json_str = serde_json::to_string_pretty(&entries)?;
        println!("{}", json_str);
    } else {
        for entry in &entries {
            println!("{}", entry.describe());
        }
        let failed = entries.iter().filter(|e| e.error.is_some()).count();
        println!("\n{} files, {} not recognized", entries.len(), failed);
    }

    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    println!("Checking external tools...\n");

    let tools = tonarchiv_av::check_tools(config.tools.ffmpeg_path.as_deref());
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);
        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }
        if let Some(ref path) = tool.path {
            print!(" at {}", path.display());
        }
        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install ffmpeg to convert files.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    println!("  Workers: {}", config.conversion.workers);
    println!("  Compression level: {}", config.conversion.compression_level);
    println!(
        "  Markers: box {:?}, single {:?}",
        config.layout.box_marker, config.layout.single_marker
    );
    println!(
        "  Cover embedding: {} ({} candidates)",
        config.cover.enabled,
        config.cover.candidates.len()
    );

    Ok(())
}
