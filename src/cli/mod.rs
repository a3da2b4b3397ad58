//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands};
pub use output::{
    format_activities, format_calendar, format_dashboard, format_entry, format_entry_list,
    format_subscriptions,
};
