use clap::{Parser, Subcommand};

/// Command-line interface definition for rutilization
#[derive(Parser)]
#[command(
    name = "rutilization",
    version = env!("CARGO_PKG_VERSION"),
    about = "Turn workforce activity exports into a weekly resource-utilization star schema",
    long_about = None
)]
pub struct Cli {
    /// Override the SQLite store path
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Use this configuration file instead of the default one
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configuration file and the store schema
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Build the aggregated weekly table from the raw export files
    Transform {
        #[arg(long, value_name = "DIR", help = "Directory holding the period export files")]
        input: Option<String>,

        #[arg(long, value_name = "FILE", help = "Where to write the aggregated CSV")]
        output: Option<String>,

        #[arg(long, value_name = "YYYY", help = "Keep only rows dated in this year")]
        year: Option<i32>,
    },

    /// Load the aggregated table into the star schema
    Load {
        #[arg(long, value_name = "FILE", help = "Aggregated CSV to load")]
        file: Option<String>,

        #[arg(long, help = "Clear existing star-schema rows before loading")]
        replace: bool,
    },

    /// Transform, then load
    Run {
        #[arg(long, value_name = "DIR")]
        input: Option<String>,

        #[arg(long, value_name = "FILE")]
        output: Option<String>,

        #[arg(long, value_name = "YYYY")]
        year: Option<i32>,

        #[arg(long)]
        replace: bool,
    },

    /// Manage the store (info, integrity checks, vacuum)
    Db {
        #[arg(long = "check", help = "Check store integrity and foreign keys")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the store using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show store information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
