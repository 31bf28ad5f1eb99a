//! CLI entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `lazyboard_core` linkage.
//! - Offer inspection, task entry and import/export over the configured data
//!   directory.
//!
//! # Invariants
//! - Running without a subcommand behaves like `ping`.
//! - Commands that touch boards go through `BoardService`, so every change is
//!   saved the same way the UI saves it.

use clap::{Parser, Subcommand};
use lazyboard_core::db::open_db;
use lazyboard_core::{
    init_logging_from_config, BoardCommand, BoardId, BoardService, ConfigError, CoreConfig,
    ListId, SaveStatus, SqliteSnapshotRepository, TaskDraft, TaskLabel,
};
use log::warn;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

type CliResult = Result<(), Box<dyn Error>>;
type Service<'conn> = BoardService<SqliteSnapshotRepository<'conn>>;

const FALLBACK_DATA_DIR: &str = ".lazyboard";

#[derive(Parser)]
#[command(name = "lazyboard", version, about = "Local task board utilities")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print core ping and version
    Ping,
    /// Same output as `ping`
    Version,
    /// List boards with list and task counts
    Boards,
    /// Show one board, filtered and sorted like the board view
    Show {
        board_id: String,
        /// Case-insensitive filter over title, description and label
        query: Option<String>,
    },
    /// Create a board with the default lists
    NewBoard {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Append a task to a list
    AddTask {
        board_id: String,
        list_id: String,
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// none|urgent|review|feature
        #[arg(long, value_parser = parse_label, default_value = "none")]
        label: TaskLabel,
        /// Due date as YYYY-MM-DD
        #[arg(long, value_name = "DATE", default_value = "")]
        due: String,
        /// Checklist item (repeatable)
        #[arg(long = "item", value_name = "TEXT")]
        items: Vec<String>,
    },
    /// Write the export file into DIR
    Export {
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },
    /// Replace every board with the contents of FILE
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn parse_label(value: &str) -> Result<TaskLabel, String> {
    TaskLabel::parse(value).ok_or_else(|| format!("unknown label `{value}`"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command.unwrap_or(Commands::Ping)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> CliResult {
    match command {
        Commands::Ping | Commands::Version => {
            println!("lazyboard_core ping={}", lazyboard_core::ping());
            println!("lazyboard_core version={}", lazyboard_core::core_version());
            Ok(())
        }
        command => {
            let config = resolve_config()?;
            with_service(&config, |service| dispatch(service, command))
        }
    }
}

fn resolve_config() -> Result<CoreConfig, Box<dyn Error>> {
    match CoreConfig::from_env() {
        Ok(config) => Ok(config),
        Err(ConfigError::MissingDataDir) => {
            let dir = std::env::current_dir()?.join(FALLBACK_DATA_DIR);
            Ok(CoreConfig::new(dir)?)
        }
        Err(err) => Err(err.into()),
    }
}

fn with_service(
    config: &CoreConfig,
    body: impl FnOnce(&mut Service<'_>) -> CliResult,
) -> CliResult {
    std::fs::create_dir_all(config.data_dir())?;
    if let Err(err) = init_logging_from_config(config) {
        eprintln!("warning: logging disabled: {err}");
    }

    let conn = open_db(config.db_path())?;
    let repo = SqliteSnapshotRepository::try_new(&conn)?;
    let mut service = BoardService::open(repo);
    body(&mut service)
}

fn dispatch(service: &mut Service<'_>, command: Commands) -> CliResult {
    match command {
        Commands::Ping | Commands::Version => Ok(()),
        Commands::Boards => {
            for board in service.boards().boards() {
                println!(
                    "{}\t{}\tlists={} tasks={}",
                    board.id,
                    board.name,
                    board.lists.len(),
                    board.task_count()
                );
            }
            Ok(())
        }
        Commands::Show { board_id, query } => show(service, &board_id, query.as_deref()),
        Commands::NewBoard { name } => {
            let before = service.boards().len();
            let boards = service.execute(BoardCommand::CreateBoard {
                name: name.join(" "),
            });
            match boards.boards().get(before) {
                Some(board) => println!("{}", board.id),
                None => return Err("board name must not be blank".into()),
            }
            warn_on_failed_save(service);
            Ok(())
        }
        Commands::AddTask {
            board_id,
            list_id,
            title,
            description,
            label,
            due,
            items,
        } => {
            let board_id = BoardId::from(board_id);
            let list_id = ListId::from(list_id);
            let draft = TaskDraft {
                title,
                description,
                label,
                due_date: due,
                checklist_text: items.join("\n"),
            };
            let before = service
                .boards()
                .find_list(&board_id, &list_id)
                .ok_or_else(|| format!("list not found: {board_id}/{list_id}"))?
                .tasks
                .len();
            let boards = service.execute(BoardCommand::AddTask {
                board_id: board_id.clone(),
                list_id: list_id.clone(),
                fields: draft.into_fields(),
            });
            let added = boards
                .find_list(&board_id, &list_id)
                .and_then(|list| list.tasks.get(before));
            match added {
                Some(task) => println!("{}", task.id),
                None => return Err("task title must not be blank".into()),
            }
            warn_on_failed_save(service);
            Ok(())
        }
        Commands::Export { dir } => {
            let path = service.export_to_dir(&dir)?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::Import { file } => {
            let count = service.import_from_path(&file)?.len();
            println!("imported boards={count}");
            warn_on_failed_save(service);
            Ok(())
        }
    }
}

fn show(service: &Service<'_>, board_id: &str, query: Option<&str>) -> CliResult {
    let projections = service
        .project_board(&BoardId::from(board_id), query.unwrap_or(""))
        .ok_or_else(|| format!("board not found: {board_id}"))?;
    for projection in projections {
        println!("## {} ({})", projection.list.title, projection.list.id);
        for task in projection.tasks {
            let (done, total) = task.checklist_progress();
            let due = task
                .due_date
                .map(|date| date.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "- [{}] {} due={} checklist={}/{}",
                task.label.as_str(),
                task.title,
                due,
                done,
                total
            );
        }
    }
    Ok(())
}

fn warn_on_failed_save(service: &Service<'_>) {
    if service.save_status() == SaveStatus::Failed {
        warn!("event=cli_save module=cli status=error");
        eprintln!("warning: changes were not saved");
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::{CommandFactory, Parser};
    use lazyboard_core::TaskLabel;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["lazyboard"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn show_query_is_optional() {
        let cli = Cli::try_parse_from(["lazyboard", "show", "board-1"]).unwrap();
        match cli.command {
            Some(Commands::Show { board_id, query }) => {
                assert_eq!(board_id, "board-1");
                assert_eq!(query, None);
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn add_task_parses_label_case_insensitively_and_repeated_items() {
        let cli = Cli::try_parse_from([
            "lazyboard", "add-task", "board-1", "list-2", "Ship", "--label", "Urgent", "--item",
            "build", "--item", "tag",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::AddTask {
                label, items, due, ..
            }) => {
                assert_eq!(label, TaskLabel::Urgent);
                assert_eq!(items, ["build", "tag"]);
                assert_eq!(due, "");
            }
            _ => panic!("expected add-task"),
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert!(Cli::try_parse_from([
            "lazyboard", "add-task", "board-1", "list-2", "Ship", "--label", "later",
        ])
        .is_err());
    }

    #[test]
    fn new_board_requires_a_name() {
        assert!(Cli::try_parse_from(["lazyboard", "new-board"]).is_err());
    }
}
