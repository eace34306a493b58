//! CLI argument parsing for the presentation companion

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pc")]
#[command(author, version, about = "Presentation companion: collect slide prompts for your AI tutor", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory with config.json and prompts.json (overrides config)
    #[arg(short, long, global = true)]
    pub site: Option<PathBuf>,

    /// Directory for session state (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format for commands that print structured data
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record who you are before using the companion
    Intake {
        /// Your name (optional)
        #[arg(short, long)]
        name: Option<String>,

        /// Your role or profession
        #[arg(short, long, required = true)]
        profession: String,

        /// What you are curious about
        #[arg(short = 'q', long, required = true)]
        curiosity: String,
    },

    /// Show the current slide and its prompts
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Jump to a slide
    Goto {
        /// Slide number
        #[arg(required = true)]
        slide: u32,
    },

    /// Go to the next slide
    Next,

    /// Go to the previous slide
    Prev,

    /// Copy a prompt and add it to your collection
    Collect {
        /// Prompt label, or its marker number on the slide (`0` or `*` for the master prompt)
        #[arg(required = true)]
        prompt: String,

        /// Slide the prompt belongs to (default: current slide)
        #[arg(long)]
        slide: Option<u32>,
    },

    /// Write or clear your note for a slide
    Note {
        /// Note text
        #[arg(required_unless_present = "clear")]
        text: Option<String>,

        /// Clear the note
        #[arg(long, conflicts_with = "text")]
        clear: bool,

        /// Slide the note belongs to (default: current slide)
        #[arg(long)]
        slide: Option<u32>,
    },

    /// List collected prompts
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the slide menu
    Nav,

    /// Export collected prompts and notes as Markdown
    Export {
        /// Directory to write the export to (overrides config)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Print the document instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// End the session: forget collected prompts, notes and position
    Reset,
}
