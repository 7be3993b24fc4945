mod cli;

use std::str::FromStr;

use anyhow::{anyhow, Result};
use clap::Parser;
use colored::Colorize;
use tracing::info;

use cli::{Cli, Commands};
use cryptotax::importers;
use cryptotax::reports;
use cryptotax::tax::{self, CostBasisMethod, Jurisdiction};
use cryptotax::utils::format_currency;

fn main() -> Result<()> {
    // Initialize logging; stderr keeps --json stdout machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Calculate {
            file,
            country,
            method,
            disposals,
        } => handle_calculate(&file, &country, &method, cli.json, disposals),
        Commands::Countries => handle_countries(cli.json),
        Commands::Sample { output } => handle_sample(output.as_deref()),
    }
}

/// Handle the calculate command: import, compute, adjust, render
fn handle_calculate(
    file_path: &str,
    country: &str,
    method: &str,
    json: bool,
    show_disposals: bool,
) -> Result<()> {
    let jurisdiction = Jurisdiction::from_str(country)
        .map_err(|_| anyhow!("Unknown country code: {}. Supported: IN, US, UK", country))?;
    let method = CostBasisMethod::from_str(method).map_err(|_| {
        anyhow!(
            "Unknown cost-basis method: {}. Supported: FIFO, LIFO, HIFO",
            method
        )
    })?;

    info!("Calculating {} tax with {} matching", jurisdiction, method);

    let transactions = importers::import_file(file_path)?;

    let mut report = tax::compute(&transactions, jurisdiction, method);
    tax::real_earnings::apply(&mut report, jurisdiction);

    if json {
        println!("{}", reports::render_json(&report)?);
        return Ok(());
    }

    println!(
        "\n{} Processed {} transactions ({}, {} matching)\n",
        "✓".green().bold(),
        transactions.len(),
        jurisdiction,
        method
    );

    println!("{}", reports::render_summary(&report, jurisdiction));
    println!("\n{}\n", reports::render_ratios(&report));

    if show_disposals {
        if let Some(table) = reports::render_disposals(&report) {
            println!("{}\n", table);
        } else {
            println!("No disposals in this batch.\n");
        }
    }

    if let Some(warning) = reports::render_uncovered_warning(&report) {
        println!("{}\n", warning);
    }
    if let Some(note) = reports::render_real_earnings_note(&report) {
        println!("{}\n", note);
    }

    Ok(())
}

/// Handle the countries command: list jurisdictions and their rules
fn handle_countries(json: bool) -> Result<()> {
    use tabled::{settings::Style, Table, Tabled};

    #[derive(Tabled, serde::Serialize)]
    struct CountryRow {
        #[tabled(rename = "Code")]
        code: &'static str,
        #[tabled(rename = "Country")]
        country: &'static str,
        #[tabled(rename = "Short-term")]
        short_term: String,
        #[tabled(rename = "Long-term")]
        long_term: String,
        #[tabled(rename = "Allowance")]
        allowance: String,
        #[tabled(rename = "Inflation")]
        inflation: String,
    }

    let pct = |rate: rust_decimal::Decimal| {
        format!("{}%", (rate * rust_decimal::Decimal::ONE_HUNDRED).normalize())
    };

    let rows: Vec<CountryRow> = Jurisdiction::ALL
        .iter()
        .map(|jurisdiction| {
            let rules = jurisdiction.rules();
            CountryRow {
                code: jurisdiction.code(),
                country: rules.name,
                short_term: pct(rules.short_term_rate),
                long_term: pct(rules.long_term_rate),
                allowance: format_currency(rules.allowance),
                inflation: pct(rules.inflation_rate),
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{}", table);
    }

    Ok(())
}

/// Handle the sample command: emit the canonical example CSV
fn handle_sample(output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, importers::SAMPLE_CSV)?;
            println!("{} Sample written to {}", "✓".green().bold(), path);
        }
        None => print!("{}", importers::SAMPLE_CSV),
    }
    Ok(())
}
