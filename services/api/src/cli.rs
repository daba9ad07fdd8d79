use crate::quote::{run_quote, run_rates, QuoteArgs, RatesArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hotel_booking::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Hotel Booking",
    about = "Serve the hotel booking API or price stays from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Price a stay against the rate table without booking it
    Quote(QuoteArgs),
    /// Print the room rate table
    Rates(RatesArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Quote(args) => run_quote(args),
        Command::Rates(args) => run_rates(args),
    }
}
