use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use skyreport::api::AppState;
use skyreport::tools::tool_definitions;
use skyreport::{LocationWeatherResolver, SkyReportConfig, logging, web};

const EXIT_WORDS: [&str; 3] = ["exit", "quit", "bye"];

#[derive(Parser, Debug)]
#[command(name = "skyreport")]
#[command(version, about = "Current weather for any place name, as a CLI, HTTP API or agent tool")]
struct Args {
    #[command(subcommand)]
    cmd: Command,

    /// Config file (default: <config dir>/skyreport/config.toml)
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current weather for a place
    Weather {
        /// Place name, e.g. "Paris, France"
        location: String,
    },
    /// Ask for places interactively until exit/quit/bye
    Chat,
    /// Print the tool definitions as JSON
    Tools,
    /// Run the HTTP API
    Serve {
        /// Listen port (overrides config)
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode> {
    let args = Args::parse();
    let mut config = SkyReportConfig::load_from_path(args.config.clone())?;
    logging::init(&config.logging, args.verbose)?;

    match args.cmd {
        Command::Tools => {
            let json = serde_json::to_string_pretty(&tool_definitions())
                .context("Failed to serialise tool definitions")?;
            println!("{json}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Weather { location } => {
            let resolver = LocationWeatherResolver::from_config(&config)?;
            match resolver.resolve(&location).await {
                Ok(report) => {
                    println!("{report}");
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    tracing::debug!("Resolution failed: {}", e);
                    eprintln!("❌ {}", e.user_message());
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Chat => {
            let resolver = LocationWeatherResolver::from_config(&config)?;
            chat(&resolver).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            let resolver = LocationWeatherResolver::from_config(&config)?;
            web::run(AppState::new(resolver), &config.server).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Prompt, resolve, print, repeat. Errors are shown and the loop continues.
async fn chat(resolver: &LocationWeatherResolver) -> Result<()> {
    println!("🌤  Type a place name, or 'exit' to leave.\n");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("📍 Place: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        if EXIT_WORDS.contains(&input.to_lowercase().as_str()) {
            break;
        }
        if input.is_empty() {
            println!("⚠️  Please enter a place name.\n");
            continue;
        }

        match resolver.resolve(input).await {
            Ok(report) => println!("\n{report}\n"),
            Err(e) => println!("\n❌ {}\n", e.user_message()),
        }
    }

    println!("\n👋 Goodbye!");
    Ok(())
}
