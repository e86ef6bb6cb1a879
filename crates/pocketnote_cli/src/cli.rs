//! Argument parsing and one-shot commands.

use crate::shell;
use anyhow::Context;
use log::info;
use pocketnote_core::db::open_db;
use pocketnote_core::{
    init_logging, CollectionStore, CoreConfig, GroupId, KeyValueStore, Note, NoteEngine,
    SqliteKeyValueStore,
};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(version, about = "Organize short notes into named groups")]
pub struct Cli {
    /// SQLite file holding the notes [env: POCKETNOTE_DB_PATH]
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Storage key for the collection [env: POCKETNOTE_STORAGE_KEY]
    #[arg(long, global = true)]
    key: Option<String>,

    /// Absolute directory for rolling log files [env: POCKETNOTE_LOG_DIR]
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error [env: POCKETNOTE_LOG_LEVEL]
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Default, clap::Subcommand)]
enum Command {
    /// List groups in creation order
    Groups,
    /// Create a group
    CreateGroup { name: String },
    /// Add a note to a group
    AddNote {
        /// Target group id
        #[arg(long)]
        group: String,
        text: String,
    },
    /// Show the notes of a group
    Notes {
        #[arg(long)]
        group: Option<String>,
    },
    /// Interactive session (default)
    #[default]
    Shell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let config = self.resolve_config(CoreConfig::from_env());
        if let Some(log_dir) = config.log_dir.as_ref() {
            init_logging(&config.log_level, log_dir).context("failed to start logging")?;
        }

        let conn = open_db(&config.db_path)
            .with_context(|| format!("failed to open {}", config.db_path.display()))?;
        let store = SqliteKeyValueStore::try_new(&conn)?;
        let mut engine = NoteEngine::open(CollectionStore::with_key(store, config.storage_key))
            .context("failed to load notes")?;
        info!(
            "event=cli_start module=cli status=ok core_version={}",
            pocketnote_core::core_version()
        );

        let stdout = io::stdout();
        let mut out = stdout.lock();
        match self.command.unwrap_or_default() {
            Command::Groups => write_groups(&engine, &mut out)?,
            Command::CreateGroup { name } => {
                let group = engine.create_group(name)?;
                writeln!(out, "{}\t{}", group.id, group.name)?;
            }
            Command::AddNote { group, text } => {
                engine.select_group(GroupId::new(group));
                let note = engine.add_note(text)?;
                write_note(&note, &mut out)?;
            }
            Command::Notes { group: Some(group) } => {
                for note in engine.get_notes(Some(&GroupId::new(group))) {
                    write_note(note, &mut out)?;
                }
            }
            Command::Notes { group: None } => {
                writeln!(out, "no group given; pass --group <id>")?;
            }
            Command::Shell => {
                let stdin = io::stdin();
                shell::run(&mut engine, stdin.lock(), &mut out)?;
            }
        }
        Ok(())
    }

    fn resolve_config(&self, mut config: CoreConfig) -> CoreConfig {
        if let Some(db) = self.db.clone() {
            config.db_path = db;
        }
        if let Some(key) = self.key.clone() {
            config.storage_key = key;
        }
        if let Some(log_dir) = self.log_dir.clone() {
            config.log_dir = Some(log_dir);
        }
        if let Some(log_level) = self.log_level.clone() {
            config.log_level = log_level;
        }
        config
    }
}

pub(crate) fn write_groups<S: KeyValueStore>(
    engine: &NoteEngine<S>,
    out: &mut impl Write,
) -> io::Result<()> {
    let summaries = engine.group_summaries();
    if summaries.is_empty() {
        return writeln!(out, "no groups yet");
    }
    for (position, summary) in summaries.iter().enumerate() {
        let marker = if engine.active_group() == Some(&summary.id) {
            '*'
        } else {
            ' '
        };
        writeln!(
            out,
            "{marker}#{} {}\t{} ({} notes)",
            position + 1,
            summary.id,
            summary.name,
            summary.note_count
        )?;
    }
    Ok(())
}

pub(crate) fn write_note(note: &Note, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "[{}] {}", note.created_at, note.text)
}
