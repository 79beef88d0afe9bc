use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use pcapkit::api::routes;
use pcapkit::filter::{builder, endpoints};
use pcapkit::models::config::AppConfig;
use pcapkit::models::filter::{FilterGoal, Purpose};
use pcapkit::utils::logging;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Capture/display filter builder for packet-capture tooling")]
struct Args {
    /// Log level (trace, debug, info, warn, error, off)
    #[clap(long, default_value = "info", global = true)]
    log_level: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the REST API server
    Serve {
        /// Port for the REST API server
        #[clap(short, long, default_value = "3000")]
        port: u16,

        /// CSV endpoint list excluded by default
        #[clap(long)]
        endpoints: Option<PathBuf>,
    },

    /// Print the filter for the endpoints in one or more CSV files
    Construct {
        /// Comma-separated CSV paths (protocol,address,port per line)
        #[clap(value_delimiter = ',', required = true)]
        csv: Vec<PathBuf>,

        /// Construct filter to exclude packets from capture
        #[clap(short, long)]
        exclude: bool,

        /// Construct capture filter for tcpdump, tshark, or wireshark
        #[clap(short, long)]
        capture: bool,

        /// Construct display filter for tshark or wireshark
        #[clap(short, long)]
        display: bool,
    },
}

#[actix_web::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger with specified level
    logging::init_logger(logging::get_log_level(&args.log_level));

    match args.command {
        Command::Serve { port, endpoints } => serve(port, endpoints).await,
        Command::Construct {
            csv,
            exclude,
            capture,
            display,
        } => construct(&csv, exclude, capture, display),
    }
}

async fn serve(port: u16, endpoints_path: Option<PathBuf>) -> Result<()> {
    info!("Starting pcapkit v{}", env!("CARGO_PKG_VERSION"));

    let default_endpoints = match endpoints_path {
        Some(path) => endpoints::load_endpoints(&path)
            .with_context(|| format!("failed to load endpoint list {}", path.display()))?,
        None => Vec::new(),
    };

    let config = AppConfig {
        port,
        default_endpoints,
    };

    if !config.default_endpoints.is_empty() {
        for purpose in [Purpose::Capture, Purpose::Display] {
            info!(
                "Default {} filter: {}",
                purpose,
                builder::build_for_endpoints(&config.default_endpoints, purpose, FilterGoal::Exclude)
            );
        }
    }

    let app_state = web::Data::new(config.clone());

    info!("Starting pcapkit API server on port {}", config.port);

    // Start the HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(routes::configure)
    })
    .bind(format!("127.0.0.1:{}", config.port))?
    .run()
    .await?;

    Ok(())
}

fn construct(csv: &[PathBuf], exclude: bool, capture: bool, display: bool) -> Result<()> {
    let endpoints = endpoints::load_endpoint_lists(csv).context("failed to load endpoint lists")?;

    let goal = if exclude {
        FilterGoal::Exclude
    } else {
        FilterGoal::Include
    };

    // Neither or both flags: print both dialects
    let purposes: &[Purpose] = match (capture, display) {
        (true, false) => &[Purpose::Capture],
        (false, true) => &[Purpose::Display],
        _ => &[Purpose::Capture, Purpose::Display],
    };

    for purpose in purposes {
        println!("{}", builder::build_for_endpoints(&endpoints, *purpose, goal));
    }

    Ok(())
}
