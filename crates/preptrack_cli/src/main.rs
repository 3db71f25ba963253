//! Terminal front-end for the tracker.
//!
//! # Responsibility
//! - Map one command line onto one tracker store operation.
//! - Render the resulting snapshot as plain text.
//!
//! # Invariants
//! - Every invocation is a full open → mutate → save cycle.
//! - Topic removal needs an explicit `--yes`; without it only the prompt
//!   is printed.
//! - Usage and storage errors exit non-zero.

use clap::{Parser, Subcommand};
use log::{info, warn};
use preptrack_core::db::open_db;
use preptrack_core::{
    init_logging, topic_collection_id, DropEvent, DropLocation, LinkKind, MatchField,
    PersistenceGateway, ProfileField, SqliteKvStore, TrackerConfig, TrackerStore,
};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "preptrack",
    about = "Interview prep progress tracker",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Print the profile, sections and the selected section's topics.
    Show {
        /// Section to select before rendering.
        section: Option<String>,
    },
    /// Append a new empty section.
    AddSection { title: String },
    /// Append a topic to a section.
    AddTopic { section: String, title: String },
    /// Append a subtopic to a topic.
    AddSubtopic {
        section: String,
        topic: String,
        title: String,
    },
    /// Advance a topic along todo → done → revise.
    Toggle { section: String, topic: String },
    /// Advance a subtopic along todo → done → revise.
    ToggleSub {
        section: String,
        topic: String,
        subtopic: String,
    },
    /// Replace a topic's notes.
    Notes {
        section: String,
        topic: String,
        text: String,
    },
    /// Replace a subtopic's notes.
    SubNotes {
        section: String,
        topic: String,
        subtopic: String,
        text: String,
    },
    /// Rename a topic.
    Rename {
        section: String,
        topic: String,
        title: String,
    },
    /// Remove a topic. Only prints the prompt unless `--yes` is given.
    Remove {
        section: String,
        topic: String,
        /// Confirm the removal.
        #[arg(long)]
        yes: bool,
    },
    /// Move a topic within its section.
    Move {
        section: String,
        from_index: usize,
        to_index: usize,
    },
    /// Search topic and subtopic titles and notes.
    Search { query: String },
    /// Set `name`, `picture`, `github`, `linkedin`, `leetcode` or `gfg`.
    Profile { field: String, value: String },
    /// Print the core version.
    Version,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Show { .. } => "show",
            Self::AddSection { .. } => "add-section",
            Self::AddTopic { .. } => "add-topic",
            Self::AddSubtopic { .. } => "add-subtopic",
            Self::Toggle { .. } => "toggle",
            Self::ToggleSub { .. } => "toggle-sub",
            Self::Notes { .. } => "notes",
            Self::SubNotes { .. } => "sub-notes",
            Self::Rename { .. } => "rename",
            Self::Remove { .. } => "remove",
            Self::Move { .. } => "move",
            Self::Search { .. } => "search",
            Self::Profile { .. } => "profile",
            Self::Version => "version",
        }
    }
}

type Store<'conn> = TrackerStore<SqliteKvStore<'conn>>;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.command == Command::Version {
        println!("preptrack {}", preptrack_core::core_version());
        return ExitCode::SUCCESS;
    }

    let config = TrackerConfig::from_env();
    if let Some(log_dir) = config.log_dir.as_deref() {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let name = cli.command.name();
    match run(&config, cli.command) {
        Ok(output) => {
            info!("event=cli_command module=cli status=ok command={name}");
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            warn!("event=cli_command module=cli status=error command={name}");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &TrackerConfig, command: Command) -> Result<String, String> {
    let conn = open_db(&config.db_path).map_err(|err| {
        format!(
            "cannot open tracker database `{}`: {err}",
            config.db_path.display()
        )
    })?;
    let kv = SqliteKvStore::try_new(&conn).map_err(|err| err.to_string())?;
    let mut store = TrackerStore::open(PersistenceGateway::new(kv));
    execute(&mut store, command)
}

fn execute(store: &mut Store<'_>, command: Command) -> Result<String, String> {
    let changed = match command {
        Command::Show { section } => {
            if let Some(section_id) = section {
                store.select_section(&section_id);
            }
            return Ok(render(store));
        }
        Command::AddSection { title } => match store.add_section(&title) {
            Some(section_id) => {
                return Ok(format!("added section {section_id}\n\n{}", render(store)));
            }
            None => false,
        },
        Command::AddTopic {
            section: section_id,
            title,
        } => {
            store.select_section(&section_id);
            store.add_topic(&section_id, &title)
        }
        Command::AddSubtopic {
            section: section_id,
            topic: topic_id,
            title,
        } => {
            store.select_section(&section_id);
            store.add_subtopic(&section_id, &topic_id, &title)
        }
        Command::Toggle {
            section: section_id,
            topic: topic_id,
        } => {
            store.select_section(&section_id);
            store.toggle_topic_status(&section_id, &topic_id)
        }
        Command::ToggleSub {
            section: section_id,
            topic: topic_id,
            subtopic: subtopic_id,
        } => {
            store.select_section(&section_id);
            store.toggle_subtopic_status(&section_id, &topic_id, &subtopic_id)
        }
        Command::Notes {
            section: section_id,
            topic: topic_id,
            text,
        } => {
            store.select_section(&section_id);
            store.update_topic_notes(&section_id, &topic_id, &text)
        }
        Command::SubNotes {
            section: section_id,
            topic: topic_id,
            subtopic: subtopic_id,
            text,
        } => {
            store.select_section(&section_id);
            store.update_subtopic_notes(&section_id, &topic_id, &subtopic_id, &text)
        }
        Command::Rename {
            section: section_id,
            topic: topic_id,
            title,
        } => {
            store.select_section(&section_id);
            store.rename_topic(&section_id, &topic_id, &title)
        }
        Command::Remove {
            section: section_id,
            topic: topic_id,
            yes: confirmed,
        } => {
            let Some(request) = store.request_remove_topic(&section_id, &topic_id) else {
                return Err(format!("no topic `{topic_id}` in section `{section_id}`"));
            };
            if !confirmed {
                return Ok(format!(
                    "Remove topic \"{}\"? Re-run with --yes to confirm.",
                    request.topic_title()
                ));
            }
            store.select_section(&section_id);
            store.confirm_remove_topic(request)
        }
        Command::Move {
            section: section_id,
            from_index: from,
            to_index: to,
        } => {
            store.select_section(&section_id);
            let collection_id = topic_collection_id(&section_id);
            let outcome = store.move_topic(&DropEvent {
                source: DropLocation {
                    collection_id: collection_id.clone(),
                    index: from,
                },
                destination: Some(DropLocation {
                    collection_id,
                    index: to,
                }),
            });
            if !outcome.is_applied() {
                return Err(format!("move rejected: {}", outcome.code()));
            }
            true
        }
        Command::Search { query } => return Ok(render_search(store, &query)),
        Command::Profile { field: key, value } => {
            let before = store.profile().clone();
            if let Some(field) = ProfileField::parse(&key) {
                store.update_profile_field(field, &value);
            } else if let Some(kind) = LinkKind::parse(&key) {
                store.update_profile_link(kind, &value);
            } else {
                return Err(format!("unknown profile field `{key}`"));
            }
            &before != store.profile()
        }
        Command::Version => return Ok(preptrack_core::core_version().to_string()),
    };

    let status = if changed { "saved" } else { "no change" };
    Ok(format!("{status}\n\n{}", render(store)))
}

fn render(store: &Store<'_>) -> String {
    let mut out = String::new();
    let profile = store.profile();
    out.push_str(&format!(
        "{}  overall {}%\n",
        profile.name,
        store.overall_progress()
    ));
    for (label, value) in [
        ("github", &profile.links.github),
        ("linkedin", &profile.links.linkedin),
        ("leetcode", &profile.links.leetcode),
        ("gfg", &profile.links.gfg),
    ] {
        if !value.is_empty() {
            out.push_str(&format!("  {label}: {value}\n"));
        }
    }

    out.push_str("\nsections:\n");
    let selected = store.selected_section_id();
    for summary in store.section_summaries() {
        let marker = if Some(summary.id.as_str()) == selected { '*' } else { ' ' };
        out.push_str(&format!(
            "{marker} {} [{}] {} topics, {}%\n",
            summary.title, summary.id, summary.topic_count, summary.progress
        ));
    }

    if let Some(section) = store.selected_section() {
        out.push_str(&format!("\n{}:\n", section.title));
        if section.topics.is_empty() {
            out.push_str("  (no topics yet)\n");
        }
        for (index, topic) in section.topics.iter().enumerate() {
            out.push_str(&format!(
                "  {index}. {} {} [{}]\n",
                topic.status.glyph(),
                topic.title,
                topic.id
            ));
            if !topic.notes.is_empty() {
                out.push_str(&format!("       notes: {}\n", topic.notes));
            }
            for sub in &topic.subtopics {
                out.push_str(&format!(
                    "       {} {} [{}]\n",
                    sub.status.glyph(),
                    sub.title,
                    sub.id
                ));
            }
        }
    }
    out.trim_end().to_string()
}

fn render_search(store: &Store<'_>, query: &str) -> String {
    let hits = store.search(query);
    if hits.is_empty() {
        return "no matches".to_string();
    }
    hits.iter()
        .map(|hit| {
            let field = match hit.field {
                MatchField::Title => "title",
                MatchField::Notes => "notes",
            };
            let path = match &hit.subtopic_id {
                Some(subtopic_id) => format!("{}/{}/{subtopic_id}", hit.section_id, hit.topic_id),
                None => format!("{}/{}", hit.section_id, hit.topic_id),
            };
            format!("{path}  {}  ({field})", hit.title)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
