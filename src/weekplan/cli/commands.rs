//! # CLI Layer
//!
//! One possible client of the planner library. This is the only code that
//! parses arguments, prints to the terminal, sets up logging or picks an exit
//! code.
//!
//! ## Structure
//!
//! - `run()`: parses arguments, starts logging, builds the context, dispatches
//! - `handle_*()`: per-command handlers that call `PlannerApi` and print
//!
//! Notes are addressed on the command line as `<section> <position>` and
//! resolved to note ids here, against the selected week.

use super::render::{print_messages, render_week, render_week_list};
use super::setup::{Cli, Commands, NoteCommands, SectionCommands, WeekCommands};
use clap::Parser;
use std::path::PathBuf;
use weekplan::api::{CmdResult, PlannerApi};
use weekplan::config::PlannerConfig;
use weekplan::error::{Rejection, Result};
use weekplan::init::{data_dir, initialize, HOME_ENV};
use weekplan::logging::{init_logging, resolve_level, LOG_ENV};
use weekplan::store::fs::FileStore;

struct AppContext {
    api: PlannerApi<FileStore>,
    config: PlannerConfig,
    data_dir: PathBuf,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let env_level = std::env::var(LOG_ENV).ok();
    init_logging(resolve_level(cli.verbose, env_level.as_deref())?)?;

    let mut ctx = init_context()?;

    // The requested week plays the role of the route: open it first.
    if let Some(week) = &cli.week {
        let result = ctx.api.select_week(week)?;
        if !result.is_applied() {
            print_messages(&result.messages);
            return Ok(());
        }
    }

    match cli.command {
        None | Some(Commands::Show) => handle_show(&ctx),
        Some(Commands::Week(cmd)) => match cmd {
            WeekCommands::List => handle_week_list(&ctx),
            WeekCommands::Add { name } => {
                let result = ctx.api.add_week(&name.join(" "))?;
                finish(&mut ctx, result)
            }
            WeekCommands::Delete { id } => {
                let result = ctx.api.delete_week(&id)?;
                finish(&mut ctx, result)
            }
            WeekCommands::Rename { id, new_name } => {
                let result = ctx.api.rename_week(&id, &new_name)?;
                finish(&mut ctx, result)
            }
            WeekCommands::Move { from, to } => {
                let result = ctx.api.reorder_weeks(from, to)?;
                print_messages(&result.messages);
                handle_week_list(&ctx)
            }
            WeekCommands::Select { id } => {
                let result = ctx.api.select_week(&id)?;
                print_messages(&result.messages);
                handle_show(&ctx)
            }
        },
        Some(Commands::Section(cmd)) => {
            let result = match cmd {
                SectionCommands::Add { name } => ctx.api.add_section(&name.join(" "))?,
                SectionCommands::Delete { id } => ctx.api.delete_section(&id)?,
                SectionCommands::Rename { id, new_name } => {
                    ctx.api.rename_section(&id, &new_name)?
                }
                SectionCommands::Move { from, to } => ctx.api.reorder_sections(from, to)?,
                SectionCommands::Toggle { id } => ctx.api.toggle_minimized(&id)?,
            };
            finish(&mut ctx, result)
        }
        Some(Commands::Note(cmd)) => {
            let result = handle_note(&mut ctx, cmd)?;
            finish(&mut ctx, result)
        }
        Some(Commands::Doctor) => {
            let result = ctx.api.doctor()?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Config) => handle_config(&ctx),
    }
}

fn init_context() -> Result<AppContext> {
    let home = std::env::var(HOME_ENV).ok();
    let dir = data_dir(home.as_deref())?;
    let ctx = initialize(&dir)?;

    Ok(AppContext {
        api: ctx.api,
        config: ctx.config,
        data_dir: ctx.data_dir,
    })
}

fn handle_note(ctx: &mut AppContext, cmd: NoteCommands) -> Result<CmdResult> {
    match cmd {
        NoteCommands::Add { section, content } => ctx.api.add_note(&section, &content.join(" ")),
        NoteCommands::Delete { section, position } => {
            match resolve_note(&ctx.api, &section, position) {
                Ok(note_id) => ctx.api.delete_note(&section, &note_id),
                Err(rejection) => Ok(CmdResult::rejected(rejection)),
            }
        }
        NoteCommands::Edit {
            section,
            position,
            content,
        } => match resolve_note(&ctx.api, &section, position) {
            Ok(note_id) => ctx.api.edit_note_content(&note_id, &content.join(" ")),
            Err(rejection) => Ok(CmdResult::rejected(rejection)),
        },
        NoteCommands::Done { section, position } => {
            match resolve_note(&ctx.api, &section, position) {
                Ok(note_id) => ctx.api.toggle_complete(&note_id),
                Err(rejection) => Ok(CmdResult::rejected(rejection)),
            }
        }
        NoteCommands::Move {
            section,
            position,
            to_section,
            to_position,
        } => ctx
            .api
            .move_note(&section, position, &to_section, to_position),
    }
}

/// Finds the id of the note at `position` in `section_id` of the selected week.
fn resolve_note(
    api: &PlannerApi<FileStore>,
    section_id: &str,
    position: usize,
) -> std::result::Result<String, Rejection> {
    let section_id = section_id.trim();
    let sections = api.active_sections().ok_or(Rejection::NoActiveWeek)?;
    let section = sections
        .section(section_id)
        .ok_or_else(|| Rejection::NotFound(section_id.to_string()))?;
    section
        .notes
        .get(position)
        .map(|note| note.id.clone())
        .ok_or(Rejection::OutOfRange {
            index: position + 1,
            len: section.notes.len(),
        })
}

/// Prints the command's messages and, when something changed, follows the
/// navigation request and shows the selected week.
fn finish(ctx: &mut AppContext, result: CmdResult) -> Result<()> {
    print_messages(&result.messages);
    if !result.is_applied() {
        return Ok(());
    }
    if let Some(week) = &result.navigate_to {
        if ctx.api.selected_week() != Some(week.as_str()) {
            ctx.api.select_week(week)?;
        }
    }
    println!();
    handle_show(ctx)
}

fn handle_show(ctx: &AppContext) -> Result<()> {
    match (ctx.api.selected_week(), ctx.api.active_sections()) {
        (Some(week), Some(sections)) => {
            print!("{}", render_week(week, sections, ctx.api.minimized()));
        }
        _ => println!("No week selected. Add one with `weekplan week add <name>`."),
    }
    Ok(())
}

fn handle_week_list(ctx: &AppContext) -> Result<()> {
    print!(
        "{}",
        render_week_list(&ctx.api.week_note_counts(), ctx.api.selected_week())
    );
    Ok(())
}

fn handle_config(ctx: &AppContext) -> Result<()> {
    println!("data-dir = {}", ctx.data_dir.display());
    println!(
        "default-sections = {}",
        ctx.config.default_sections.join(", ")
    );
    println!("default-weeks = {}", ctx.config.default_weeks.join(", "));
    Ok(())
}
