use clap::{Parser, Subcommand};

pub mod commands;

pub use commands::{
    handle_add, handle_delete, handle_demo, handle_list, handle_notes, handle_open, handle_show,
};

#[derive(Parser, Debug)]
#[command(name = "rivedi")]
#[command(about = "Review recorded meetings: video, notes and transcript", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override the meetings server base URL
    #[arg(long, global = true)]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// List recorded meetings
    List,
    /// Show one meeting: video, notes and transcript
    Show {
        /// Meeting id
        id: i64,
        /// Copy the transcript text to the clipboard
        #[arg(short, long)]
        copy: bool,
    },
    /// Add a meeting and generate its transcript
    Add {
        /// Meeting title
        #[arg(long)]
        title: String,
        /// Video URL (YouTube link or direct file)
        #[arg(long)]
        url: String,
        /// Initial notes
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Delete a meeting
    Delete {
        /// Meeting id
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show or change a meeting's notes
    Notes {
        /// Meeting id
        id: i64,
        /// Replace the notes with this text
        #[arg(long)]
        set: Option<String>,
        /// Edit the notes in your editor
        #[arg(long, conflicts_with = "set")]
        edit: bool,
    },
    /// Export the HTML preview and open it in a browser
    Open {
        /// Meeting id
        id: i64,
    },
    /// Run the local demo server
    Demo {
        /// Port to listen on (default from config)
        #[arg(long)]
        port: Option<u16>,
        /// Start with an empty store instead of the sample meetings
        #[arg(long)]
        no_seed: bool,
    },
    /// Print version information
    Version,
}
