use anyhow::Result;
use eisen::cli::{self, Command};
use eisen::config::Config;
use eisen::context::StandardContext;
use eisen::import::import_markdown_file;
use eisen::logging::init_logging;
use eisen::model::display::tasks_in_quadrant;
use eisen::model::{Quadrant, Task, TaskDisplay, export_markdown};
use eisen::storage::LocalStorage;
use std::env;
use strum::IntoEnumIterator;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let invocation = cli::parse_args(&args)?;

    let ctx = StandardContext::new(invocation.root);

    if invocation.command == Command::Help {
        let config_path = Config::get_path_string(&ctx).ok();
        cli::print_help("eisen", config_path.as_deref());
        return Ok(());
    }

    let config = Config::load_or_default(&ctx)?;
    if let Err(e) = init_logging(&ctx, config.log_level_filter()) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    match invocation.command {
        Command::Import {
            file,
            dialect,
            dry_run,
        } => {
            let dialect = dialect.unwrap_or(config.default_dialect);
            if dry_run {
                let tasks = import_markdown_file(&file, dialect, &config)?;
                print_grouped(&tasks, None, true);
                println!("{} task(s) parsed, nothing saved.", tasks.len());
            } else {
                let count = LocalStorage::import_markdown(&ctx, &file, dialect, &config)?;
                println!("Imported {} task(s) from {}", count, file.display());
            }
        }
        Command::List { quadrant, all } => {
            let tasks = LocalStorage::load(&ctx)?;
            let show_done = all || !config.hide_completed;
            print_grouped(&tasks, quadrant, show_done);
        }
        Command::Export => {
            let tasks = LocalStorage::load(&ctx)?;
            print!("{}", export_markdown(&tasks));
        }
        Command::Help => {}
    }
    Ok(())
}

fn print_grouped(tasks: &[Task], only: Option<Quadrant>, show_done: bool) {
    for quadrant in Quadrant::iter().filter(|q| only.is_none_or(|o| o == *q)) {
        let selected: Vec<&Task> = tasks_in_quadrant(tasks, quadrant)
            .into_iter()
            .filter(|t| show_done || !t.completed)
            .collect();
        if selected.is_empty() {
            continue;
        }
        println!("{} {}", quadrant.status_glyph(), quadrant);
        for task in selected {
            println!(
                "    {} {}  [{}]",
                task.checkbox_symbol(),
                task.title,
                task.format_levels()
            );
            if !task.tags.is_empty() {
                println!("        #{}", task.tags.join(" #"));
            }
        }
    }
}
