use chrono::Utc;
use clap::Parser;
use serene::application::{
    init::init, ConfigService, DashboardService, JournalService, RegisterService,
    SubscriptionService,
};
use serene::cli::{
    format_activities, format_calendar, format_dashboard, format_entry, format_entry_list,
    format_subscriptions, Cli, Commands,
};
use serene::domain::{parse_date, DayReference, Lexicon, Mood, Plan, SentimentLabel};
use serene::error::{Result, SereneError};
use serene::infrastructure::{logging, FileSystemRepository, JournalRepository};
use std::io::Read;
use std::str::FromStr;

fn main() {
    let cli = Cli::parse();

    let default_level = match cli.command {
        Commands::Serve { .. } => "info",
        _ => "warn",
    };
    logging::init(default_level);

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// Positional words joined by spaces, or all of stdin when there are none
fn text_or_stdin(words: Vec<String>) -> Result<String> {
    if !words.is_empty() {
        return Ok(words.join(" "));
    }
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

fn require_user(user: Option<String>) -> Result<String> {
    user.ok_or_else(|| {
        SereneError::Validation(
            "No user selected. Pass --user <name> or set SERENE_USER".to_string(),
        )
    })
}

fn run(cli: Cli) -> Result<()> {
    let now = Utc::now();

    match cli.command {
        Commands::Init { path, trial_days } => {
            init(&path, trial_days)?;
            println!("Initialized serene journal at {}", path.display());
            println!("Trial length: {} days", trial_days);
            Ok(())
        }
        Commands::Register {
            username,
            email,
            name,
        } => {
            let repo = FileSystemRepository::discover()?;
            let user = RegisterService::new(repo).register(&username, &email, &name, now)?;
            println!("Registered {}", user.username);
            println!("Trial ends {}", user.trial_end_date.format("%d-%m-%Y"));
            Ok(())
        }
        Commands::Analyze { text } => {
            let text = text_or_stdin(text)?;
            // Outside a journal the built-in lexicon applies
            let lexicon = match FileSystemRepository::discover() {
                Ok(repo) => repo.load_config()?.lexicon()?,
                Err(SereneError::NotSereneDirectory(_)) => Lexicon::builtin().clone(),
                Err(e) => return Err(e),
            };
            println!("{}", lexicon.classify(&text));
            Ok(())
        }
        Commands::Add {
            mood,
            sentiment,
            text,
        } => {
            let username = require_user(cli.user)?;
            let mood = Mood::from_str(&mood)?;
            let sentiment = sentiment
                .as_deref()
                .map(SentimentLabel::from_str)
                .transpose()?;
            let text = text_or_stdin(text)?;

            let service = JournalService::new(FileSystemRepository::discover()?)?;
            let entry = service.create(&username, mood, &text, sentiment, now)?;
            println!("Saved entry {} ({})", entry.id, entry.sentiment);
            println!();
            print!("{}", format_activities(entry.mood, entry.mood.activities()));
            Ok(())
        }
        Commands::Edit { id, mood, text } => {
            let username = require_user(cli.user)?;
            let mood = mood.as_deref().map(Mood::from_str).transpose()?;
            let text = text_or_stdin(text)?;

            let service = JournalService::new(FileSystemRepository::discover()?)?;
            let entry = service.edit(&username, id, mood, &text)?;
            println!("Updated entry {} ({})", entry.id, entry.sentiment);
            Ok(())
        }
        Commands::Show { id } => {
            let username = require_user(cli.user)?;
            let service = JournalService::new(FileSystemRepository::discover()?)?;
            print!("{}", format_entry(&service.get(&username, id)?));
            Ok(())
        }
        Commands::Delete { id } => {
            let username = require_user(cli.user)?;
            let service = JournalService::new(FileSystemRepository::discover()?)?;
            service.delete(&username, id)?;
            println!("Deleted entry {}", id);
            Ok(())
        }
        Commands::List {
            date,
            from,
            to,
            limit,
        } => {
            let username = require_user(cli.user)?;
            let service = JournalService::new(FileSystemRepository::discover()?)?;

            let entries = match date {
                Some(day) => {
                    let day = DayReference::parse(&day)?.resolve(now.date_naive());
                    let mut entries = service.entries_on(&username, day)?;
                    if let Some(n) = limit {
                        entries.truncate(n);
                    }
                    entries
                }
                None => {
                    let from = from.as_deref().map(parse_date).transpose()?;
                    let to = to.as_deref().map(parse_date).transpose()?;
                    service.list(&username, from, to, limit)?
                }
            };
            println!("{}", format_entry_list(&entries).trim_end());
            Ok(())
        }
        Commands::Calendar { days } => {
            let username = require_user(cli.user)?;
            let service = DashboardService::new(FileSystemRepository::discover()?);
            let calendar = service.calendar(&username, days, now)?;
            println!("{}", format_calendar(&calendar).trim_end());
            Ok(())
        }
        Commands::Dashboard => {
            let username = require_user(cli.user)?;
            let service = DashboardService::new(FileSystemRepository::discover()?);
            println!("{}", format_dashboard(&service.summary(&username, now)?).trim_end());
            Ok(())
        }
        Commands::Subscribe { plan } => {
            let username = require_user(cli.user)?;
            let plan = Plan::from_str(&plan)?;
            let service = SubscriptionService::new(FileSystemRepository::discover()?);
            let subscription = service.subscribe(&username, plan, now)?;
            println!(
                "Subscribed to the {} plan until {}",
                subscription.plan,
                subscription.current_period_end.format("%d-%m-%Y")
            );
            Ok(())
        }
        Commands::Cancel => {
            let username = require_user(cli.user)?;
            let service = SubscriptionService::new(FileSystemRepository::discover()?);
            service.cancel(&username, now)?;
            println!("Subscription canceled");
            Ok(())
        }
        Commands::Subscriptions => {
            let username = require_user(cli.user)?;
            let service = SubscriptionService::new(FileSystemRepository::discover()?);
            println!("{}", format_subscriptions(&service.history(&username)?, now).trim_end());
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let service = ConfigService::new(FileSystemRepository::discover()?);

            if list {
                let config = service.list()?;
                println!("trial_days = {}", config.trial_days);
                println!("server.host = {}", config.server.host);
                println!("server.port = {}", config.server.port);
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: serene config [--list | <key> [<value>]]");
                println!("Valid keys: trial_days, server.host, server.port, created");
                Ok(())
            }
        }
        Commands::Serve { host, port } => {
            let repo = FileSystemRepository::discover()?;
            let mut config = repo.load_config()?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let lexicon = config.lexicon()?;
            let addr = config.server_addr();

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime
                .block_on(serene::server::run(&addr, lexicon))
                .map_err(|e| SereneError::Server(format!("{:#}", e)))
        }
    }
}
