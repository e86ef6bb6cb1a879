//! Interactive session.
//!
//! The active-group selection only lives in memory, so this is the front end
//! where select-then-add flows behave as a user expects.

use crate::cli::{write_groups, write_note};
use log::warn;
use pocketnote_core::{EngineError, GroupId, KeyValueStore, NoteEngine};
use std::io::{self, BufRead, Write};

const HELP: &str = "\
commands:
  groups            list groups (* marks the active one)
  group <name>      create a group
  select <id|#n>    make a group active by id or list position
  note <text>       add a note to the active group
  notes             show notes of the active group
  help              show this text
  quit              leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShellCommand {
    Empty,
    Groups,
    CreateGroup(String),
    Select(GroupRef),
    AddNote(String),
    Notes,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum GroupRef {
    Id(String),
    /// One-based position in the group listing.
    Position(usize),
}

pub(crate) fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb {
        "" => Ok(ShellCommand::Empty),
        "groups" => Ok(ShellCommand::Groups),
        "notes" => Ok(ShellCommand::Notes),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        // Blank arguments go through so the engine reports the validation error.
        "group" => Ok(ShellCommand::CreateGroup(rest.to_string())),
        "note" => Ok(ShellCommand::AddNote(rest.to_string())),
        "select" => parse_group_ref(rest).map(ShellCommand::Select),
        other => Err(format!("unknown command `{other}`; type `help`")),
    }
}

fn parse_group_ref(value: &str) -> Result<GroupRef, String> {
    if value.is_empty() {
        return Err("select needs a group id or #position".to_string());
    }
    match value.strip_prefix('#') {
        Some(position) => position
            .parse::<usize>()
            .ok()
            .filter(|position| *position > 0)
            .map(GroupRef::Position)
            .ok_or_else(|| format!("invalid group position `{value}`")),
        None => Ok(GroupRef::Id(value.to_string())),
    }
}

/// Reads commands from `input` until `quit` or end of input.
pub(crate) fn run<S: KeyValueStore>(
    engine: &mut NoteEngine<S>,
    input: impl BufRead,
    out: &mut impl Write,
) -> io::Result<()> {
    writeln!(out, "pocketnote {}; type `help`", pocketnote_core::core_version())?;
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        match parse_line(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => execute(engine, command, out)?,
            Err(message) => writeln!(out, "{message}")?,
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    writeln!(out)?;

    if !engine.is_synced() {
        if let Err(err) = engine.flush() {
            warn!("event=shell_exit module=cli status=error error_code=unsynced");
            writeln!(out, "warning: last changes were not saved: {err}")?;
        }
    }
    Ok(())
}

fn execute<S: KeyValueStore>(
    engine: &mut NoteEngine<S>,
    command: ShellCommand,
    out: &mut impl Write,
) -> io::Result<()> {
    match command {
        ShellCommand::Empty | ShellCommand::Quit => Ok(()),
        ShellCommand::Help => writeln!(out, "{HELP}"),
        ShellCommand::Groups => write_groups(engine, out),
        ShellCommand::CreateGroup(name) => match engine.create_group(name) {
            Ok(group) => writeln!(out, "created {}\t{}", group.id, group.name),
            Err(err) => write_engine_error(&err, out),
        },
        ShellCommand::Select(group_ref) => {
            let group_id = match group_ref {
                GroupRef::Id(id) => GroupId::new(id),
                GroupRef::Position(position) => match engine.groups().get(position - 1) {
                    Some(group) => group.id.clone(),
                    None => return writeln!(out, "no group at #{position}"),
                },
            };
            let label = engine
                .group(&group_id)
                .map(|group| group.name.clone())
                .unwrap_or_else(|| "unknown group".to_string());
            engine.select_group(group_id);
            writeln!(out, "active: {label}")
        }
        ShellCommand::AddNote(text) => match engine.add_note(text) {
            Ok(note) => write_note(&note, out),
            Err(err) => write_engine_error(&err, out),
        },
        ShellCommand::Notes => {
            if engine.active_group().is_none() {
                return writeln!(out, "no active group; use `select`");
            }
            for note in engine.active_notes() {
                write_note(note, out)?;
            }
            Ok(())
        }
    }
}

fn write_engine_error(err: &EngineError, out: &mut impl Write) -> io::Result<()> {
    match err {
        EngineError::Persistence { .. } => writeln!(out, "saved in this session only: {err}"),
        _ => writeln!(out, "error: {err}"),
    }
}
