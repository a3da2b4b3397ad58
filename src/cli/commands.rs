//! CLI command definitions

use crate::application::dashboard::{CALENDAR_DAYS, MAX_CALENDAR_DAYS};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "serene")]
#[command(about = "Mood journal with sentiment tagging", long_about = None)]
#[command(version)]
pub struct Cli {
    /// User to act as
    #[arg(short, long, global = true, env = "SERENE_USER")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new journal
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Length of the free trial for new users, in days
        #[arg(long, default_value_t = 30)]
        trial_days: i64,
    },

    /// Register a new user
    Register {
        username: String,

        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long, default_value = "")]
        name: String,
    },

    /// Show the sentiment of some text without saving it (reads stdin if no text)
    Analyze { text: Vec<String> },

    /// Write a new entry (reads stdin if no text)
    Add {
        /// Happy, Neutral, Sad, Angry or Tired
        #[arg(short, long)]
        mood: String,

        /// Store this label instead of classifying the text
        #[arg(short, long)]
        sentiment: Option<String>,

        text: Vec<String>,
    },

    /// Replace an entry's text; its sentiment is recomputed
    Edit {
        id: u64,

        #[arg(short, long)]
        mood: Option<String>,

        text: Vec<String>,
    },

    /// Show one entry
    Show { id: u64 },

    /// Delete an entry
    Delete { id: u64 },

    /// List entries, newest first
    List {
        /// Only this day (today, yesterday, a weekday or DD-MM-YYYY)
        #[arg(long, conflicts_with_all = ["from", "to"])]
        date: Option<String>,

        /// Start date (DD-MM-YYYY)
        #[arg(long)]
        from: Option<String>,

        /// End date (DD-MM-YYYY)
        #[arg(long)]
        to: Option<String>,

        /// Maximum number of entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Entries per day over a recent window
    Calendar {
        #[arg(
            long,
            default_value_t = CALENDAR_DAYS,
            value_parser = clap::value_parser!(i64).range(1..=MAX_CALENDAR_DAYS)
        )]
        days: i64,
    },

    /// Recent entries, mood and sentiment totals, trial status
    Dashboard,

    /// Start a subscription
    Subscribe {
        /// monthly or annual
        #[arg(short, long, default_value = "monthly")]
        plan: String,
    },

    /// Cancel the active subscription
    Cancel,

    /// Subscription history with current status
    Subscriptions,

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Run the sentiment preview HTTP service
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },
}
