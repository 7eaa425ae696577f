mod commands;
mod logging;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use jcal_core::Language;

#[derive(Parser)]
#[command(name = "jcal")]
#[command(about = "Print a twelve-month wall calendar from an iCalendar feed")]
#[command(version)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the calendar PDF
    Generate {
        /// iCalendar feed URL (http, https or webcal)
        #[arg(short, long)]
        url: Option<String>,

        /// Year of the first month
        #[arg(short, long)]
        year: Option<i32>,

        /// First month of the window (1-12)
        #[arg(short, long)]
        month: Option<u32>,

        /// Page header, "{jahre}" becomes the covered years
        #[arg(long)]
        header: Option<String>,

        /// Month and weekday names (de, en)
        #[arg(short, long)]
        language: Option<Language>,

        /// Where to write the PDF
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open the document when done
        #[arg(long)]
        open: bool,

        /// Don't remember these values for the next run
        #[arg(long)]
        no_save: bool,
    },
    /// Check that a feed is reachable and looks like iCalendar
    Check {
        /// Feed URL (defaults to the saved one)
        #[arg(short, long)]
        url: Option<String>,
    },
    /// Show the profile location and saved values
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Generate {
            url,
            year,
            month,
            header,
            language,
            output,
            open,
            no_save,
        } => {
            let args = commands::generate::GenerateArgs {
                url,
                year,
                month,
                header,
                language,
                output,
                open,
                save: !no_save,
            };
            commands::generate::run(args).await
        }
        Commands::Check { url } => commands::check::run(url).await,
        Commands::Config => commands::config::run(),
    }
}
