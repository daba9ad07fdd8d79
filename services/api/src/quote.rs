use crate::infra::load_rate_table;
use chrono::NaiveDate;
use clap::Args;
use hotel_booking::booking::{PriceQuote, PricingEngine, StayRequest, DEFAULT_MAX_NIGHTS};
use hotel_booking::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Check-in date (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) check_in: NaiveDate,
    /// Check-out date (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) check_out: NaiveDate,
    /// Room type key, e.g. deluxe, suite, executive
    #[arg(long)]
    pub(crate) room_type: String,
    /// Number of guests
    #[arg(long, default_value_t = 1)]
    pub(crate) guests: i64,
    /// Optional CSV rate table (room_type,nightly_rate) instead of the built-in rates
    #[arg(long)]
    pub(crate) rates: Option<PathBuf>,
    /// Longest stay to accept
    #[arg(long, default_value_t = DEFAULT_MAX_NIGHTS)]
    pub(crate) max_nights: u32,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RatesArgs {
    /// Optional CSV rate table (room_type,nightly_rate) instead of the built-in rates
    #[arg(long)]
    pub(crate) rates: Option<PathBuf>,
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let engine = PricingEngine::with_max_nights(
        load_rate_table(args.rates.as_deref())?,
        args.max_nights,
    );
    let quote = engine.quote(&cli_request(&args))?;
    println!("{}", render_quote(&args, &quote));
    Ok(())
}

pub(crate) fn run_rates(args: RatesArgs) -> Result<(), AppError> {
    let rates = load_rate_table(args.rates.as_deref())?;
    println!("Room rates (per night)");
    for entry in rates.entries() {
        println!(
            "- {:<12} {:>10}",
            entry.room_type.as_str(),
            entry.nightly_rate.to_string()
        );
    }
    Ok(())
}

/// The CLI has no guest details, so placeholders satisfy the contact rules.
fn cli_request(args: &QuoteArgs) -> StayRequest {
    StayRequest {
        hotel_id: Some(1),
        check_in: Some(args.check_in.format("%Y-%m-%d").to_string()),
        check_out: Some(args.check_out.format("%Y-%m-%d").to_string()),
        guests: Some(args.guests),
        room_type: Some(args.room_type.clone()),
        name: Some("cli".to_string()),
        email: Some("cli@localhost".to_string()),
        phone: Some("n/a".to_string()),
        ..StayRequest::default()
    }
}

fn render_quote(args: &QuoteArgs, quote: &PriceQuote) -> String {
    format!(
        "{} -> {} | {} | {} night(s) x {} = {}",
        args.check_in,
        args.check_out,
        args.room_type,
        quote.nights,
        quote.nightly_rate,
        quote.total_amount
    )
}
