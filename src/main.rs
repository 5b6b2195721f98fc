//! maintlog - Maintenance report history
//!
//! Main entry point for the maintlog CLI.

use clap::{Parser, Subcommand};
use maintlog::app::App;
use maintlog::config::MaintlogConfig;
use maintlog::history::{DeleteOutcome, DeleteReason};
use maintlog::render::{print_report_detailed, print_report_summary, print_validation_highlight};
use maintlog::report::{Priority, ReportDraft, ReportId, ReportStatus};
use maintlog::{style, MaintlogError};
use std::path::PathBuf;
use std::process;
use workorders::{WorkOrderPriority, WorkOrderStatus};

/// maintlog - Maintenance report history with local persistence
#[derive(Parser, Debug)]
#[command(name = "maintlog")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: ~/.config/maintlog/config.yaml)
    #[arg(short, long, env = "MAINTLOG_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize maintlog configuration
    Init,

    /// Add a maintenance report
    Add {
        /// Report title
        title: String,

        /// Longer description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Priority (low, medium, high, urgent)
        #[arg(short, long, default_value = "medium")]
        priority: String,

        /// Equipment the report is about
        #[arg(short, long, default_value = "")]
        equipment: String,

        /// Technician who did the work
        #[arg(short, long, default_value = "")]
        technician: String,

        /// Initial status (pending, complete)
        #[arg(short, long)]
        status: Option<String>,
    },

    /// List reports, most recently modified first
    List {
        /// Only show reports matching this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show detailed information about a report
    Show {
        /// Report ID (e.g., rep-1718461800000)
        id: String,
    },

    /// Search reports by title, description, equipment, technician or status
    Search {
        /// Search query
        query: String,
    },

    /// Change a report's status
    Status {
        /// Report ID
        id: String,

        /// New status (pending, complete)
        status: String,
    },

    /// Delete a report
    Delete {
        /// Report ID
        id: String,

        /// Why the report is deleted (mistake, duplicate, irrelevant, other)
        #[arg(short, long)]
        reason: Option<String>,

        /// Explanation, required with --reason other
        #[arg(short, long)]
        other: Option<String>,
    },

    /// Pull the work-order board into the history
    Sync,

    /// Manage work orders on the board
    #[command(subcommand)]
    WorkOrder(WorkOrderCommands),

    /// List deleted report IDs
    Tombstones {
        /// Forget all deleted IDs
        #[arg(long)]
        clear: bool,
    },

    /// Remove all reports and deleted IDs
    Clear {
        /// Skip the confirmation message
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum WorkOrderCommands {
    /// Create a work order
    Add {
        /// Work order title
        title: String,

        /// Equipment the work order is for
        #[arg(short, long, default_value = "")]
        equipment: String,

        /// Board section (default from config)
        #[arg(short = 'S', long)]
        section: Option<String>,

        /// Priority (low, medium, high, emergency)
        #[arg(short, long, default_value = "medium")]
        priority: String,
    },

    /// Change a work order's status (New, "In Progress", Done)
    Status {
        /// Work order ID (e.g., WO-0001)
        id: String,

        /// New status
        status: String,
    },

    /// List work orders on the board
    List,
}

fn main() {
    // Initialize logging
    if let Err(e) = maintlog::logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        match &e {
            MaintlogError::Validation(v) => print_validation_highlight(v),
            _ => eprintln!("{} {}", style::error("Error:"), e),
        }
        if e.is_storage() {
            eprintln!(
                "       {}",
                style::dim("Check storage.directory and storage.quota_bytes in the config file")
            );
        }
        process::exit(1);
    }
}

fn run(cli: Cli) -> maintlog::Result<()> {
    match cli.command {
        // Init creates the config, so it runs before anything is loaded
        Commands::Init => handle_init_command(&cli.config),
        command => {
            let config = match &cli.config {
                Some(path) => MaintlogConfig::load(path)?,
                None => MaintlogConfig::load_default_or_new()?,
            };
            let mut app = App::open(config)?;
            handle_command(&mut app, command)
        }
    }
}

fn handle_command(app: &mut App, command: Commands) -> maintlog::Result<()> {
    match command {
        Commands::Init => unreachable!("init runs before the app is opened"),

        Commands::Add {
            title,
            description,
            priority,
            equipment,
            technician,
            status,
        } => {
            let mut draft = ReportDraft::new(title)
                .description(description)
                .priority(Priority::parse(&priority)?)
                .equipment(equipment)
                .technician(technician);
            if let Some(status) = status {
                draft = draft.status(ReportStatus::parse(&status)?);
            }

            let id = app.add_report(draft);
            println!("{}", style::report_id(id.as_str()));
        }

        Commands::List { search } => {
            let reports = match search {
                Some(term) => app.search(&term),
                None => app.store().reports(),
            };

            if reports.is_empty() {
                println!("{}", style::dim("No reports found"));
            }
            for report in reports {
                print_report_summary(report);
            }
        }

        Commands::Show { id } => {
            let id = ReportId::new(id);
            let report = app
                .store()
                .get(&id)
                .ok_or_else(|| MaintlogError::ReportNotFound(id.to_string()))?;
            print_report_detailed(report);
        }

        Commands::Search { query } => {
            let reports = app.search(&query);
            println!(
                "{} matching '{}'",
                style::count_normal(reports.len()),
                query.trim()
            );
            for report in reports {
                print_report_summary(report);
            }
        }

        Commands::Status { id, status } => {
            let status = ReportStatus::parse(&status)?;
            let id = ReportId::new(id);
            app.set_status(&id, status)?;
            println!("{} {} is now {}", style::success("✓"), style::report_id(id.as_str()), style::status_style(status));
        }

        Commands::Delete { id, reason, other } => {
            let reason = DeleteReason::from_selection(reason.as_deref(), other.as_deref())?;
            let id = ReportId::new(id);

            match app.delete_report(&id, &reason)? {
                DeleteOutcome::Removed => {
                    println!("{} Deleted {} ({})", style::success("✓"), style::report_id(id.as_str()), reason)
                }
                DeleteOutcome::Deferred { section } => println!(
                    "{} Deleted work order {} from section {}",
                    style::success("✓"),
                    style::report_id(id.as_str()),
                    section
                ),
            }
        }

        Commands::Sync => {
            let stats = app.sync_work_orders()?;
            println!(
                "{} Synced {} work orders from {}",
                style::success("✓"),
                style::count_normal(stats.inserted),
                style::path(&app.board_path().display().to_string())
            );
            if stats.skipped_deleted > 0 {
                println!("  {} skipped (deleted)", stats.skipped_deleted);
            }
            if stats.skipped_duplicate > 0 {
                println!("  {} skipped (duplicate id)", stats.skipped_duplicate);
            }
        }

        Commands::WorkOrder(cmd) => handle_work_order_command(app, cmd)?,

        Commands::Tombstones { clear } => {
            if clear {
                let count = app.store().deleted_count();
                app.store_mut().clear_tombstones();
                println!("{} Forgot {} deleted reports", style::success("✓"), count);
            } else {
                let store = app.store();
                println!("{} deleted reports", style::count_normal(store.deleted_count()));
                for id in store.tombstones() {
                    println!("  {}", style::report_id(id.as_str()));
                }
            }
        }

        Commands::Clear { yes } => {
            if !yes {
                println!("This removes every report and every deleted ID.");
                println!("Run again with --yes to confirm.");
                return Ok(());
            }
            if !app.store_mut().clear_all() {
                return Err(MaintlogError::Storage(
                    "History cleared in memory but not in storage".to_string(),
                ));
            }
        }
    }

    Ok(())
}

fn handle_work_order_command(app: &mut App, cmd: WorkOrderCommands) -> maintlog::Result<()> {
    match cmd {
        WorkOrderCommands::Add {
            title,
            equipment,
            section,
            priority,
        } => {
            let priority = WorkOrderPriority::parse(&priority)?;
            let id = app.add_work_order(section.as_deref(), &title, &equipment, priority)?;
            println!("{}", style::report_id(&id));
        }

        WorkOrderCommands::Status { id, status } => {
            let status = WorkOrderStatus::parse(&status)?;
            app.set_work_order_status(&id, status)?;
            println!("{} {} is now {}", style::success("✓"), style::report_id(&id), status);
        }

        WorkOrderCommands::List => {
            let board = workorders::WorkOrderBoard::load_or_default(app.board_path())?;
            if board.is_empty() {
                println!("{}", style::dim("No work orders"));
            }
            for section in board.sections() {
                println!("{}", style::header(section));
                for entry in board.iter().filter(|e| e.section == section) {
                    let wo = entry.work_order;
                    println!(
                        "  {}: {} [{}] [{}]",
                        style::report_id(&wo.id),
                        wo.title,
                        wo.status,
                        wo.priority
                    );
                }
            }
        }
    }

    Ok(())
}

fn handle_init_command(config_path: &Option<String>) -> maintlog::Result<()> {
    let config_file = if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        MaintlogConfig::default_path()
    };

    // Check if already initialized
    if config_file.exists() {
        println!("Configuration already exists at {}", config_file.display());
        return Ok(());
    }

    // Create parent directory if needed
    if let Some(parent) = config_file.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            MaintlogError::Config(format!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let config = MaintlogConfig::new();
    config.save(&config_file)?;

    println!("{} Created configuration at {}", style::success("✓"), config_file.display());
    println!();
    println!("Reports are stored in {}", config.storage.directory.display());
    println!("Work orders are read from {}", config.work_orders.board_path.display());
    println!();
    println!("Next steps:");
    println!("  maintlog add \"Monthly inspection\" --equipment \"Filling Line 3\"");
    println!("  maintlog list");

    Ok(())
}
