use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dumpfixture::DumpOptions;

/// dumpfixture - build a fixture object graph and capture a minidump of it
#[derive(Debug, Parser)]
#[command(name = "dumpfixture", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the fixture graph and write a snapshot of this process.
    Capture {
        /// Dump file to write. Defaults to `<exe dir>/<exe name>.dmp`.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Snapshot options, `|`-separated flag names or hex (e.g. "WITH_FULL_MEMORY | WITH_THREAD_INFO").
        #[arg(long, default_value = "WITH_FULL_MEMORY")]
        options: DumpOptions,
    },

    /// List every live instance of the fixture graph without capturing.
    Census,
}
