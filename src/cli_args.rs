use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::models::Language;

#[derive(Parser, Debug)]
#[command(name = "snap-to-solve")]
#[command(about = "Turn a photo of a coding problem into Python and Java solutions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read the problem statement out of an image
    Extract {
        /// JPEG, PNG, GIF or BMP image, at most 10 MiB
        image: PathBuf,

        /// Declared content type (defaults to the file extension)
        #[arg(long, value_name = "TYPE")]
        mime: Option<String>,
    },

    /// Generate Python and Java solutions for a problem
    Solve {
        /// Image containing the problem statement
        #[arg(required_unless_present = "text", conflicts_with = "text")]
        image: Option<PathBuf>,

        /// Problem statement typed directly
        #[arg(long, value_name = "PROBLEM")]
        text: Option<String>,

        /// Declared content type of the image
        #[arg(long, value_name = "TYPE")]
        mime: Option<String>,
    },

    /// Record or inspect feedback about generated solutions
    Feedback {
        #[command(subcommand)]
        action: FeedbackAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum FeedbackAction {
    /// Save a feedback entry
    Submit {
        #[arg(long, value_name = "TYPE")]
        issue: String,

        #[arg(long)]
        language: Language,

        #[arg(long, value_name = "TEXT")]
        problem: String,

        #[arg(long, value_name = "TEXT")]
        code: String,

        #[arg(long, value_name = "TEXT")]
        description: String,
    },

    /// Print saved feedback entries
    List,

    /// Delete all saved feedback
    Clear,
}
