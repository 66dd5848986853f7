use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tapedeck")]
#[command(version)]
#[command(about = "Browse, upload and transcribe audio recordings", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Recordings server base URL (overrides settings and TAPEDECK_SERVER_URL)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive console (default)
    Browse,

    /// List one page of recordings
    List {
        /// Page to show (stops early when there is no next page)
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Department filter (repeatable)
        #[arg(long = "department")]
        departments: Vec<String>,

        /// Language filter (repeatable)
        #[arg(long = "language")]
        languages: Vec<String>,

        /// Filename search text
        #[arg(long)]
        filename: Option<String>,
    },

    /// Upload an audio file
    Upload {
        file: PathBuf,

        /// Ask the server to create a transcript
        #[arg(long)]
        transcript: bool,

        /// Department for the recording (defaults to the first configured one)
        #[arg(long)]
        department: Option<String>,

        /// Spoken language code (repeatable)
        #[arg(long = "language")]
        languages: Vec<String>,
    },

    /// Show a recording's transcript and stream URL
    Show {
        id: String,

        /// Open the stream in the system player
        #[arg(long)]
        play: bool,

        /// Copy the transcript to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Delete a recording
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate patterns from a recording's transcript
    Patterns {
        id: String,

        /// Pattern to generate (repeatable)
        #[arg(long = "pattern", required = true)]
        patterns: Vec<String>,

        /// Copy the results to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Save a recording's audio to disk
    Download {
        id: String,

        /// Destination file (default: recording-<id>.audio in the downloads folder)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Configure settings
    Config {
        /// Set the recordings server URL
        #[arg(long)]
        server_url: Option<String>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
