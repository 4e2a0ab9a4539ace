use std::io::{self, BufRead};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tagseek_cli::audit_ids;
use tagseek_core::{murmur3_32, BucketRange, ExperimentConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the bucket and membership of each id (reads stdin when no ids are given)
    Bucket {
        /// Experiment seed prefixed to every id
        #[arg(long)]
        seed: Option<String>,

        /// Bucket ranges, e.g. --range 10-20 --range 60-100
        #[arg(long = "range")]
        ranges: Vec<BucketRange>,

        /// Emit JSON instead of plain lines
        #[arg(long)]
        json: bool,

        ids: Vec<String>,
    },
    /// Print the raw MurmurHash3 x86_32 of a string
    Hash {
        text: String,

        #[arg(long, default_value_t = 0)]
        seed: u32,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Bucket {
            seed,
            ranges,
            json,
            ids,
        } => {
            let defaults = ExperimentConfig::default();
            let experiment = ExperimentConfig::new(
                seed.unwrap_or(defaults.seed),
                if ranges.is_empty() { defaults.ranges } else { ranges },
            )?;

            let ids = if ids.is_empty() {
                io::stdin().lock().lines().collect::<io::Result<Vec<_>>>()?
            } else {
                ids
            };

            let rows = audit_ids(&experiment, ids);
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in rows {
                    let verdict = if row.in_experiment { "IN" } else { "out" };
                    println!("{}\t{:>4}\t{}", row.id, row.bucket, verdict);
                }
            }
        }
        Command::Hash { text, seed } => {
            let hash = murmur3_32(text.as_bytes(), seed);
            println!("{} (0x{:08x})", hash, hash);
        }
    }

    Ok(())
}
