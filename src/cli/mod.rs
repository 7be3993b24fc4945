use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cryptotax")]
#[command(
    version,
    about = "Cryptocurrency capital gains and tax calculator"
)]
#[command(
    long_about = "Compute realized capital gains, tax owed, and inflation-adjusted real earnings from a CSV of crypto trades, with configurable lot matching (FIFO, LIFO, HIFO) and per-country tax rules."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate gains, tax, and real earnings from a transaction CSV
    Calculate {
        /// Path to the transaction CSV file
        file: String,

        /// Country whose tax rules apply: IN, US, or UK
        #[arg(short, long)]
        country: String,

        /// Cost-basis method: FIFO (oldest first), LIFO (newest first),
        /// or HIFO (highest cost first)
        #[arg(short, long, default_value = "FIFO")]
        method: String,

        /// Show the per-lot disposal detail table
        #[arg(long)]
        disposals: bool,
    },

    /// List supported countries and their tax rules
    Countries,

    /// Print a sample CSV in the expected upload format
    Sample {
        /// Write the sample to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}
