mod init;
pub use init::cmd_init;

use std::path::Path;

use tracing::{info, warn};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::data_dir;
use crate::io::kv::FileKvStore;
use crate::model::goals;
use crate::model::store::TaskStore;
use crate::refine::{RefineClient, RefineError, Refined, refine_all_local};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let dir = data_dir::resolve(cli.data_dir.as_deref())?;

    match cli.command {
        Commands::Init(args) => cmd_init(&dir, args),

        // Read commands
        Commands::List(args) => cmd_list(&dir, args, json),
        Commands::Show(args) => cmd_show(&dir, args, json),
        Commands::Stats => cmd_stats(&dir, json),

        // Write commands
        Commands::Add(args) => cmd_add(&dir, args, json),
        Commands::Refine(args) => cmd_refine(&dir, args, json),
        Commands::Undo => cmd_undo(&dir),
        Commands::Priority(args) => cmd_priority(&dir, args),
        Commands::Done(args) => cmd_done(&dir, args),
        Commands::Delete(args) => cmd_delete(&dir, args),
        Commands::Archive(args) => cmd_archive(&dir, args, json),

        // Journal-ish extras
        Commands::Goal(args) => cmd_goal(&dir, args, json),
        Commands::Feedback(args) => cmd_feedback(&dir, args),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn file_kv(dir: &Path) -> FileKvStore {
    FileKvStore::new(dir.to_path_buf())
}

fn open_store(dir: &Path) -> TaskStore {
    TaskStore::load(Box::new(file_kv(dir)))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Read command handlers
// ---------------------------------------------------------------------------

fn cmd_list(dir: &Path, args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(dir);

    if json {
        return print_json(&ListJson {
            tasks: store.active(),
            archive: args.archive.then(|| store.archive()),
        });
    }

    if !goals::goal_recorded_today(&file_kv(dir)) {
        eprintln!("(no goal recorded today; try `bb2 goal \"...\"`)");
    }

    if store.active().is_empty() {
        println!("No tasks yet");
    } else {
        for task in store.active() {
            println!("{}", format_task_line(task));
        }
    }

    if args.archive && !store.archive().is_empty() {
        println!();
        println!("-- Archive --");
        for task in store.archive() {
            println!("{}", format_archive_line(task));
        }
    }
    Ok(())
}

fn cmd_show(dir: &Path, args: ShowArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(dir);
    let (task, archived) = store
        .active()
        .iter()
        .find(|t| t.id == args.id)
        .map(|t| (t, false))
        .or_else(|| {
            store
                .archive()
                .iter()
                .find(|t| t.id == args.id)
                .map(|t| (t, true))
        })
        .ok_or_else(|| format!("task not found: {}", args.id))?;

    if json {
        return print_json(task);
    }
    for line in format_task_detail(task, archived) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_stats(dir: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(dir);
    let stats = StatsJson {
        active: store.active().len(),
        archived: store.archive().len(),
        unprioritized: store
            .active()
            .iter()
            .filter(|t| t.priority.is_none())
            .count(),
        by_priority: priority_breakdown(store.active()),
    };

    if json {
        return print_json(&stats);
    }
    println!("active: {}", stats.active);
    for (p, count) in &stats.by_priority {
        println!("  P{}: {}", p, count);
    }
    if stats.unprioritized > 0 {
        println!("  unprioritized: {}", stats.unprioritized);
    }
    println!("archived: {}", stats.archived);
    Ok(())
}

// ---------------------------------------------------------------------------
// Write command handlers
// ---------------------------------------------------------------------------

fn cmd_add(dir: &Path, args: AddArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(dir);
    match store.add(&args.text) {
        Some(id) => {
            if json {
                return print_json(&AddJson {
                    id,
                    text: args.text.trim(),
                });
            }
            println!("added {}. {}", id, args.text.trim());
        }
        None => println!("nothing to add (empty text)"),
    }
    Ok(())
}

fn cmd_refine(
    dir: &Path,
    args: RefineArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(dir);
    if store.active().is_empty() {
        println!("no tasks to refine");
        return Ok(());
    }

    let texts: Vec<String> = store.active().iter().map(|t| t.text.clone()).collect();
    let refined = if args.local {
        info!("refining with local rules (--local)");
        refine_all_local(&texts)
    } else {
        refine_with_service(dir, &texts)?
    };

    if !json {
        for (r, input) in refined.iter().zip(&texts) {
            println!("[{:>3}] {}", format!("P{}", r.priority), r.text);
            println!("      was: {} (from \"{}\")", r.original, input);
        }
    }

    store.apply_refinements(&refined);
    if json {
        return print_json(&ListJson {
            tasks: store.active(),
            archive: None,
        });
    }
    Ok(())
}

/// Refine through the API when a key is configured, falling back to the
/// local rules when it is not or when the service call fails.
fn refine_with_service(
    dir: &Path,
    texts: &[String],
) -> Result<Vec<Refined>, Box<dyn std::error::Error>> {
    let config = config_io::read_config(dir)?;
    match RefineClient::from_env(&config.api) {
        Ok(client) => match client.refine_tasks(texts) {
            Ok(refined) => Ok(refined),
            Err(e) => {
                warn!(error = %e, "refinement service failed; using local rules");
                eprintln!("refinement failed ({}); using local rules", e);
                Ok(refine_all_local(texts))
            }
        },
        Err(RefineError::MissingApiKey) => {
            info!("no API key configured; using local rules");
            Ok(refine_all_local(texts))
        }
        Err(e) => Err(e.into()),
    }
}

fn cmd_undo(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(dir);
    let count = store.active().len();
    store.undo_all();
    println!("restored {} task(s) to their original text", count);
    Ok(())
}

fn cmd_priority(dir: &Path, args: PriorityArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(dir);
    store.set_priority(args.id, args.priority)?;
    println!("set {}. to P{}", args.id, args.priority);
    Ok(())
}

fn cmd_done(dir: &Path, args: DoneArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(dir);
    if store.complete(args.id) {
        println!("completed {}.", args.id);
    } else {
        println!("no active task {}", args.id);
    }
    Ok(())
}

fn cmd_delete(dir: &Path, args: DeleteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(dir);
    let mut deleted = 0;
    for id in &args.ids {
        if store.delete(*id) {
            deleted += 1;
        } else {
            println!("no active task {}", id);
        }
    }
    println!("deleted {} task(s)", deleted);
    Ok(())
}

fn cmd_archive(
    dir: &Path,
    args: ArchiveArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(dir);

    if args.clear {
        store.clear_archive();
        println!("archive cleared");
        return Ok(());
    }

    if !args.ids.is_empty() {
        let moved = store.archive_checked(&args.ids);
        println!("archived {} task(s)", moved);
        return Ok(());
    }

    if json {
        return print_json(&ListJson {
            tasks: store.archive(),
            archive: None,
        });
    }
    if store.archive().is_empty() {
        println!("archive is empty");
    } else {
        for task in store.archive() {
            println!("{}", format_archive_line(task));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Journal-ish extras
// ---------------------------------------------------------------------------

fn cmd_goal(dir: &Path, args: GoalCmd, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let kv = file_kv(dir);
    match args.text {
        Some(text) => {
            if goals::record_goal(&kv, &text) {
                println!("goal recorded");
            } else {
                println!("nothing to record (empty text)");
            }
        }
        None => {
            let log = goals::goals(&kv);
            if json {
                return print_json(&GoalsJson {
                    recorded_today: goals::goal_recorded_today(&kv),
                    goals: &log,
                });
            }
            if log.is_empty() {
                println!("no goals recorded");
            } else {
                for entry in &log {
                    println!("{}", format_goal_line(entry));
                }
            }
        }
    }
    Ok(())
}

fn cmd_feedback(dir: &Path, args: FeedbackCmd) -> Result<(), Box<dyn std::error::Error>> {
    let kv = file_kv(dir);
    match args.text {
        Some(text) => {
            goals::save_feedback(&kv, &text);
            println!("feedback saved");
        }
        None => match goals::feedback(&kv) {
            Some(note) if !note.is_empty() => println!("{}", note),
            _ => println!("no feedback saved yet"),
        },
    }
    Ok(())
}
