pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "bigbike",
    about = "BigBike showroom CLI",
    long_about = "Browse the bike catalog, compare specs, query the assistant, and inspect runtime configuration from the terminal.",
    after_help = "Examples:\n  bigbike catalog --brand Kawasaki --sort price_asc\n  bigbike compare yamaha-r1 kawasaki-h2\n  bigbike chat \"fastest bikes\"\n  bigbike doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List catalog bikes with optional search, brand filter, and sort")]
    Catalog {
        #[arg(long, help = "Free-text search over names and brands")]
        q: Option<String>,
        #[arg(long, help = "Restrict to one brand")]
        brand: Option<String>,
        #[arg(long, help = "Sort key: name|name_desc|power|displacement|price_asc|price_desc")]
        sort: Option<String>,
    },
    #[command(about = "Show the full spec sheet for one bike")]
    Show {
        #[arg(help = "Bike slug, e.g. yamaha-r1")]
        slug: String,
    },
    #[command(about = "Compare two bikes field by field")]
    Compare {
        #[arg(help = "Left bike slug")]
        left: String,
        #[arg(help = "Right bike slug")]
        right: String,
    },
    #[command(about = "Ask the showroom assistant a question")]
    Chat {
        #[arg(help = "Question text")]
        message: String,
    },
    #[command(about = "Resolve the nearest dealership branch to coordinates")]
    Nearest {
        #[arg(long, help = "Latitude in decimal degrees")]
        latitude: Option<f64>,
        #[arg(long, help = "Longitude in decimal degrees")]
        longitude: Option<f64>,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution"
    )]
    Config,
    #[command(about = "Validate config, storage readiness, and catalog integrity")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Catalog { q, brand, sort } => {
            commands::catalog::run(q.as_deref(), brand.as_deref(), sort.as_deref())
        }
        Command::Show { slug } => commands::show::run(&slug),
        Command::Compare { left, right } => commands::compare::run(&left, &right),
        Command::Chat { message } => commands::chat::run(&message),
        Command::Nearest { latitude, longitude } => commands::nearest::run(latitude, longitude),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
