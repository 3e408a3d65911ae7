use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use saboteur_core::report::DEFAULT_GROUP_NAMING;
use saboteurs::commands::{design_command, diagnose_command, generate_command, table_command};
use tracing_subscriber::EnvFilter;

/// Combinatorial group testing for finding bad elements ("saboteurs").
///
/// This CLI is a thin wrapper around `saboteur-core` (exposed in code as `saboteur_core`).
/// All substantive logic lives in the library so it can be tested thoroughly
/// and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "saboteurs",
    version,
    about = "Design and decode combinatorial group tests",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` wins when set.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate every combination of a design spec's positions.
    Generate {
        /// Design spec file (YAML, or JSON with a `.json` extension).
        #[arg(long)]
        spec: String,

        /// Write the generated groups to this CSV file.
        #[arg(long)]
        out: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Select a minimal batch of groups able to reveal up to N saboteurs.
    ///
    /// Candidates come either from a design spec (every combination of its
    /// positions) or from an existing groups CSV.
    Design {
        /// Design spec file to generate candidate groups from.
        #[arg(long, conflicts_with = "groups", required_unless_present = "groups")]
        spec: Option<String>,

        /// Groups CSV holding the candidate groups.
        #[arg(long)]
        groups: Option<String>,

        /// Number of saboteurs the batch must be able to reveal.
        #[arg(long, short = 'k')]
        max_saboteurs: Option<usize>,

        /// Directory for the selected groups (CSV, table and design.json).
        #[arg(long)]
        out_dir: Option<String>,

        /// Word used for the group column and report file names.
        #[arg(long, default_value = DEFAULT_GROUP_NAMING)]
        group_naming: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Identify saboteurs from a sheet of group outcomes.
    Diagnose {
        /// CSV with a `result` column; anything other than `success` is a failure.
        #[arg(long)]
        results: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the element by group membership table of a groups CSV.
    Table {
        /// Groups CSV to render.
        #[arg(long)]
        groups: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // Logs go to stderr so JSON output on stdout stays parseable.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Generate { spec, out, json } => generate_command(&spec, out.as_deref(), json)?,
        Command::Design { spec, groups, max_saboteurs, out_dir, group_naming, json } => {
            design_command(
                spec.as_deref(),
                groups.as_deref(),
                max_saboteurs,
                out_dir.as_deref(),
                &group_naming,
                json,
            )?
        }
        Command::Diagnose { results, json } => diagnose_command(&results, json)?,
        Command::Table { groups, json } => table_command(&groups, json)?,
    }

    Ok(())
}
