use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::{Decision, Evaluator};
use feed_model::{load_config, load_entries, Config, Entry};
use feed_source::{json_lines_source, should_run, CancelToken, CollectingSink, FeedSession, StopReason};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// feed-filter - Rule-based feed entry filtering
#[derive(Parser)]
#[command(name = "feed-filter")]
#[command(about = "Keep or discard feed entries according to a rule set", long_about = None)]
struct Cli {
    /// Path to the rule set (JSON)
    #[arg(short, long, default_value = "rules.json")]
    config: PathBuf,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run pagination cycles over a feed and print what survives
    Filter {
        /// JSON-lines feed file
        #[arg(long)]
        feed: PathBuf,

        /// Feed context, checked against the rule set's runOn map
        #[arg(long)]
        context: Option<String>,

        /// Entries delivered per "load more"
        #[arg(long, default_value = "10")]
        batch_size: usize,

        /// Number of pagination cycles to run
        #[arg(long, default_value = "1")]
        cycles: usize,

        /// Also list removed entries
        #[arg(long)]
        show_removed: bool,

        /// Print kept entries as JSON lines instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show how every entry of a feed is judged
    Explain {
        /// JSON-lines feed file
        #[arg(long)]
        feed: PathBuf,
    },

    /// Validate the rule set and print it in normalized form
    CheckConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Arc::new(
        load_config(&cli.config)
            .with_context(|| format!("Failed to load rule set '{}'", cli.config.display()))?,
    );
    info!(path = %cli.config.display(), "Rule set loaded");

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Filter {
            feed,
            context,
            batch_size,
            cycles,
            show_removed,
            json,
        } => handle_filter(config, &feed, context.as_deref(), batch_size, cycles, show_removed, json)?,
        Commands::Explain { feed } => handle_explain(config, &feed)?,
        Commands::CheckConfig => handle_check_config(&config),
    }

    Ok(())
}

/// Handle the 'filter' command
fn handle_filter(
    config: Arc<Config>,
    feed: &Path,
    context: Option<&str>,
    batch_size: usize,
    cycles: usize,
    show_removed: bool,
    json: bool,
) -> Result<()> {
    if let Some(context) = context {
        if !should_run(&config, context) {
            println!("{} Rule set does not run on '{}'", "•".yellow(), context);
            return Ok(());
        }
    }

    let mut source = json_lines_source(feed, batch_size)?;
    let mut session = FeedSession::from_config(config);
    let mut sink = CollectingSink::new();
    let cancel = CancelToken::new();

    let mut reports = Vec::new();
    for _ in 0..cycles.max(1) {
        let report = session.run_cycle(&mut source, &mut sink, &cancel)?;
        let stop = report.stop;
        reports.push(report);
        if stop != StopReason::TargetReached {
            break;
        }
    }

    if json {
        for entry in &sink.kept {
            let line = serde_json::to_string(entry).context("Failed to serialize entry")?;
            println!("{line}");
        }
        return Ok(());
    }

    println!("{}", "Kept entries:".bold().blue());
    for entry in &sink.kept {
        println!("  {} {}", "✓".green(), describe_entry(entry));
    }

    if show_removed {
        println!("{}", "Removed entries:".bold().blue());
        for entry in &sink.removed {
            println!("  {} {}", "✗".red(), describe_entry(entry));
        }
    }

    println!("{}", "Cycles:".bold().blue());
    for (idx, report) in reports.iter().enumerate() {
        println!(
            "  {}. {} loads, {} kept, {} removed ({})",
            (idx + 1).to_string().green(),
            report.loads,
            report.kept,
            report.removed,
            report.stop
        );
    }

    Ok(())
}

/// Handle the 'explain' command
fn handle_explain(config: Arc<Config>, feed: &Path) -> Result<()> {
    let entries = load_entries(feed)
        .with_context(|| format!("Failed to load feed '{}'", feed.display()))?;
    let evaluator = Evaluator::new(config);

    for entry in &entries {
        let decision = evaluator.decide(entry);
        let verdict = if decision.remove {
            "REMOVE".red().bold()
        } else {
            "KEEP".green().bold()
        };
        println!("{} {}", verdict, describe_entry(entry));
        println!("   {}", describe_decision(&decision));
    }

    Ok(())
}

/// Handle the 'check-config' command
fn handle_check_config(config: &Config) {
    println!("{}", "Rule set is valid".bold().green());

    let enabled: Vec<String> = config.remove.enabled().map(|name| name.to_string()).collect();
    println!("{}Independent conditions: {}", "• ".cyan(), list_or_none(&enabled));

    if !config.remove.contains_strings.is_empty() {
        println!("{}Term groups:", "• ".cyan());
        for group in &config.remove.contains_strings {
            println!("    - {}", group.terms().join(" AND "));
        }
    }

    let groups: Vec<String> = config
        .options
        .linked_conditions
        .groups()
        .iter()
        .map(|group| {
            let names: Vec<String> = group.iter().map(|name| name.to_string()).collect();
            format!("[{}]", names.join(", "))
        })
        .collect();
    println!("{}Linked groups: {}", "• ".cyan(), list_or_none(&groups));

    println!("{}Case sensitive: {}", "• ".cyan(), config.options.case_sensitive);
    println!("{}Reverse conditions: {}", "• ".cyan(), config.options.reverse_conditions);
    println!("{}Target load count: {}", "• ".cyan(), config.options.target_load_count);

    let contexts: Vec<String> = config
        .run_on
        .iter()
        .map(|(context, enabled)| format!("{context}={enabled}"))
        .collect();
    println!("{}Run on: {}", "• ".cyan(), list_or_none(&contexts));
}

/// One-line summary of an entry
fn describe_entry(entry: &Entry) -> String {
    let mut flags = Vec::new();
    if entry.has_comments {
        flags.push("comments");
    }
    if entry.has_likes {
        flags.push("likes");
    }
    if entry.has_image {
        flags.push("image");
    }
    if entry.has_video {
        flags.push("video");
    }
    if entry.is_text_only {
        flags.push("text-only");
    }

    let text: String = entry.text.chars().take(60).collect();
    let ellipsis = if entry.text.chars().count() > 60 { "…" } else { "" };
    let id = if entry.id.is_empty() { "-" } else { entry.id.as_str() };

    format!("[{}] {}{} ({})", id, text, ellipsis, flags.join(", "))
}

fn describe_decision(decision: &Decision) -> String {
    let checks: Vec<String> = decision
        .checks
        .iter()
        .map(|check| format!("{}={}", check.name, check.effective))
        .collect();
    format!(
        "reversed={} linked={} groups={:?} checks: {}",
        decision.reversed,
        decision.linked.as_str(),
        decision.group_results,
        list_or_none(&checks)
    )
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}
