//! # Rendering
//!
//! Turns planner state into terminal text. Layout (numbering, widths,
//! truncation) is computed here with Unicode-aware widths; color is applied
//! last and only when the terminal wants it, so tests can compare plain text.

use colored::Colorize;
use std::collections::BTreeSet;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use weekplan::api::{CmdMessage, MessageLevel};
use weekplan::model::SectionStore;

pub const LINE_WIDTH: usize = 100;
const NOTE_INDENT: &str = "      ";
const DONE_MARKER: &str = "[x]";
const OPEN_MARKER: &str = "[ ]";
const SELECTED_MARKER: &str = "▸";

fn should_color() -> bool {
    colored::control::SHOULD_COLORIZE.should_colorize()
}

/// Renders `(week id, note count)` rows, marking the selected week.
pub fn render_week_list(weeks: &[(&str, usize)], selected: Option<&str>) -> String {
    render_week_list_internal(weeks, selected, should_color())
}

fn render_week_list_internal(
    weeks: &[(&str, usize)],
    selected: Option<&str>,
    color: bool,
) -> String {
    if weeks.is_empty() {
        return "No weeks yet. Add one with `weekplan week add <name>`.\n".to_string();
    }

    let width = number_width(weeks.len());
    let mut out = String::new();
    for (i, &(id, note_count)) in weeks.iter().enumerate() {
        let is_selected = selected == Some(id);
        let marker = if is_selected { SELECTED_MARKER } else { " " };
        let index = format!("{:>width$}.", i + 1, width = width);
        let notes = format!("{} notes", note_count);
        let name = if color && is_selected {
            id.bold().to_string()
        } else {
            id.to_string()
        };
        let notes = if color {
            notes.dimmed().to_string()
        } else {
            notes
        };
        out.push_str(&format!("{} {} {}  {}\n", marker, index, name, notes));
    }
    out
}

pub fn render_week(
    week_id: &str,
    sections: &SectionStore,
    minimized: &BTreeSet<String>,
) -> String {
    render_week_internal(week_id, sections, minimized, should_color())
}

fn render_week_internal(
    week_id: &str,
    sections: &SectionStore,
    minimized: &BTreeSet<String>,
    color: bool,
) -> String {
    let mut out = String::new();
    let title = if color {
        week_id.bold().underline().to_string()
    } else {
        week_id.to_string()
    };
    out.push_str(&format!("{}\n", title));

    if sections.is_empty() {
        out.push_str("  No sections. Add one with `weekplan section add <name>`.\n");
        return out;
    }

    for (i, section) in sections.sections().iter().enumerate() {
        let done = section.notes.iter().filter(|n| n.completed).count();
        let counts = format!("({}/{})", done, section.notes.len());
        let header = format!("{}. {}", i + 1, section.name);
        let header = if color {
            format!("{} {}", header.cyan().bold(), counts.dimmed())
        } else {
            format!("{} {}", header, counts)
        };
        out.push('\n');
        out.push_str(&format!("  {}\n", header));

        if minimized.contains(&section.id) {
            let hidden = "(minimized)";
            let hidden = if color {
                hidden.dimmed().to_string()
            } else {
                hidden.to_string()
            };
            out.push_str(&format!("{}{}\n", NOTE_INDENT, hidden));
            continue;
        }

        let width = number_width(section.notes.len());
        for (j, note) in section.notes.iter().enumerate() {
            let marker = if note.completed { DONE_MARKER } else { OPEN_MARKER };
            let prefix = format!("{:>width$}. {} ", j + 1, marker, width = width);
            let available = LINE_WIDTH.saturating_sub(NOTE_INDENT.width() + prefix.width());
            let content = truncate_to_width(&single_line(&note.content), available);
            let content = if color && note.completed {
                content.dimmed().strikethrough().to_string()
            } else {
                content
            };
            out.push_str(&format!("{}{}{}\n", NOTE_INDENT, prefix, content));
        }
    }
    out
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    render_messages_internal(messages, should_color())
}

fn render_messages_internal(messages: &[CmdMessage], color: bool) -> String {
    let mut out = String::new();
    for message in messages {
        let line = if color {
            match message.level {
                MessageLevel::Info => message.content.dimmed().to_string(),
                MessageLevel::Success => message.content.green().to_string(),
                MessageLevel::Warning => message.content.yellow().to_string(),
                MessageLevel::Error => message.content.red().to_string(),
            }
        } else {
            message.content.clone()
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages));
}

fn number_width(count: usize) -> usize {
    count.max(1).to_string().len()
}

fn single_line(s: &str) -> String {
    s.chars().map(|c| if c == '\n' { ' ' } else { c }).collect()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use weekplan::model::{Note, SectionStore};

    fn sample_sections() -> SectionStore {
        let mut sections = SectionStore::seeded(&["Monday", "Tuesday"]);
        let _ = sections.add_note("Monday", Note::new("m1".into(), "Buy milk".into()));
        let _ = sections.add_note("Monday", Note::new("m2".into(), "Gym".into()));
        let _ = sections.toggle_note("m2");
        let _ = sections.add_note("Tuesday", Note::new("t1".into(), "Call mom".into()));
        sections
    }

    #[test]
    fn test_render_week_plain() {
        let output = render_week_internal("week1", &sample_sections(), &BTreeSet::new(), false);
        let expected = "week1\n\
                        \n  1. Monday (1/2)\n      1. [ ] Buy milk\n      2. [x] Gym\n\
                        \n  2. Tuesday (0/1)\n      1. [ ] Call mom\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_render_minimized_section_hides_notes() {
        let minimized: BTreeSet<String> = ["Monday".to_string()].into_iter().collect();
        let output = render_week_internal("week1", &sample_sections(), &minimized, false);
        assert!(output.contains("(minimized)"));
        assert!(!output.contains("Buy milk"));
        assert!(output.contains("Call mom"));
    }

    #[test]
    fn test_render_empty_week() {
        let output = render_week_internal("week1", &SectionStore::new(), &BTreeSet::new(), false);
        assert!(output.contains("No sections"));
    }

    #[test]
    fn test_render_week_list_marks_selection() {
        let weeks = [("week1", 3), ("week2", 0)];
        let output = render_week_list_internal(&weeks, Some("week2"), false);
        assert_eq!(output, "  1. week1  3 notes\n▸ 2. week2  0 notes\n");
    }

    #[test]
    fn test_render_with_color_includes_ansi() {
        colored::control::set_override(true);
        let output = render_week_internal("week1", &sample_sections(), &BTreeSet::new(), true);
        colored::control::unset_override();
        assert!(output.contains("\x1b["));
    }

    #[test]
    fn test_truncate_respects_wide_chars() {
        assert_eq!(truncate_to_width("short", 10), "short");
        let truncated = truncate_to_width("日本語のメモです", 7);
        assert!(truncated.ends_with('…'));
        assert!(truncated.width() <= 7);
    }

    #[test]
    fn test_render_messages_plain() {
        let messages = vec![
            CmdMessage::success("Week added: week4"),
            CmdMessage::warning("\"week2\" already exists"),
        ];
        assert_eq!(
            render_messages_internal(&messages, false),
            "Week added: week4\n\"week2\" already exists\n"
        );
    }
}
