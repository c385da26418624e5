//! IV surface CLI
//!
//! Wraps the extraction pipeline for a chain snapshot saved as JSON by
//! an external fetcher: `{"spot": 450.0, "rows": [...]}` with rows in
//! the provider's chain-row shape. Prints the per-quote IV table and
//! either a grid summary or the full grid as JSON for a 3D renderer.

use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use iv_surface::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "iv-surface", about = "Implied volatility surface from an option chain snapshot")]
struct Args {
    /// Chain snapshot JSON file
    #[arg(long)]
    chain: PathBuf,

    /// Continuously compounded risk-free rate
    #[arg(long, default_value_t = 0.01)]
    risk_free_rate: f64,

    /// Continuous dividend yield
    #[arg(long, default_value_t = 0.001)]
    dividend_yield: f64,

    /// Minimum time-to-expiry kept, in years
    #[arg(long, default_value_t = 0.07)]
    min_time_to_expiry: f64,

    /// Strike window lower bound, as a percentage of spot
    #[arg(long, default_value_t = 70.0)]
    min_strike_pct: f64,

    /// Strike window upper bound, as a percentage of spot
    #[arg(long, default_value_t = 130.0)]
    max_strike_pct: f64,

    /// Grid nodes per axis
    #[arg(long, default_value_t = 30)]
    resolution: usize,

    /// Use forward log-moneyness ln(K/F) instead of strike on the y axis
    #[arg(long)]
    moneyness: bool,

    /// Emit the full grid as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn main() -> SurfaceResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let text = std::fs::read_to_string(&args.chain)?;
    let snapshot: ChainSnapshot = serde_json::from_str(&text)?;

    let market = MarketParams::new(snapshot.spot, args.risk_free_rate, args.dividend_yield)?;
    let filter = QuoteFilter::strike_window(
        market.spot,
        args.min_strike_pct,
        args.max_strike_pct,
        args.min_time_to_expiry,
    );
    let today = Utc::now().date_naive();

    let points = extract_iv_points(
        &snapshot.rows,
        &market,
        &filter,
        OptionType::Call,
        &SolverParams::default(),
        today,
    );

    if !args.json {
        println!("Solved {} of {} quotes\n", points.len(), snapshot.rows.len());
        println!("{:<24} {:>10} {:>8} {:>8}", "contract", "strike", "T", "IV%");
        for p in &points {
            println!(
                "{:<24} {:>10.2} {:>8.4} {:>8.2}",
                p.id,
                p.strike,
                p.time_to_expiry,
                p.implied_vol * 100.0
            );
        }
    }

    let axis = if args.moneyness {
        StrikeAxis::LogMoneyness
    } else {
        StrikeAxis::Strike
    };
    let scatter = surface_points(&points, &market, axis, VolUnits::Percent);
    let grid = build_surface(&scatter, args.resolution, axis, VolUnits::Percent)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&grid)?);
    } else {
        let (nx, ny) = grid.dim();
        println!("\nSurface grid: {nx} x {ny}");
        println!(
            "  expiry axis: {:.4} .. {:.4} years",
            grid.x_axis[0],
            grid.x_axis[nx - 1]
        );
        let y_label = match axis {
            StrikeAxis::Strike => "strike",
            StrikeAxis::LogMoneyness => "log-moneyness",
        };
        println!(
            "  {} axis: {:.4} .. {:.4}",
            y_label,
            grid.y_axis[0],
            grid.y_axis[ny - 1]
        );
        println!(
            "  vol range: {:.2}% .. {:.2}%",
            grid.min_vol(),
            grid.max_vol()
        );
    }

    Ok(())
}
