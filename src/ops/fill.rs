//! Chord filling for sheets where only the first verse or chorus carries
//! chords.
//!
//! The first annotated section of each type supplies a template: one chord
//! line per lyric line, in order. Later sections of that type with no chord
//! lines at all get the template interleaved above their lyrics. Sections that
//! already have at least one chord line, and sections of other types, are
//! copied unchanged.

use std::collections::HashMap;

use crate::model::{ClassifyConfig, Line, SectionType};
use crate::parse::sheet_parser::{classify_line, header_type};
use crate::parse::sheet_serializer::render_chord_line;
use crate::util::unicode::normalize_text;

/// Captured chord lines per section type
pub type Templates = HashMap<SectionType, Vec<String>>;

/// A source line next to its classification
type Row<'a> = (&'a str, Line);

/// Fill chord lines into unannotated verses and choruses
pub fn fill_missing_chords(raw: &str) -> String {
    fill_missing_chords_with(raw, &ClassifyConfig::default())
}

pub fn fill_missing_chords_with(raw: &str, config: &ClassifyConfig) -> String {
    let text = normalize_text(raw);
    let rows: Vec<Row> = text
        .split('\n')
        .map(|line| (line, classify_line(line, config)))
        .collect();

    let templates = capture_templates(rows.iter().map(|(_, line)| line));

    let mut out: Vec<&str> = Vec::with_capacity(rows.len());
    for section in rows.chunk_by(|_, (_, next)| !matches!(next, Line::Header { .. })) {
        fill_section(section, &templates, &mut out);
    }
    out.join("\n")
}

/// Collect the first annotated template of each fillable section type.
///
/// A chord line counts once it is directly followed by a lyric line; a blank
/// line in between discards it, and of two stacked chord lines the lower one
/// is kept.
pub fn capture_templates<'a>(lines: impl IntoIterator<Item = &'a Line>) -> Templates {
    let mut templates = Templates::new();
    let mut capturing: Option<(SectionType, Vec<String>)> = None;
    let mut pending: Option<String> = None;

    for line in lines {
        match line {
            Line::Header { content } => {
                flush(&mut capturing, &mut templates);
                pending = None;
                let kind = header_type(content);
                if kind.takes_template() && !templates.contains_key(&kind) {
                    capturing = Some((kind, Vec::new()));
                }
            }
            _ if capturing.is_none() => {}
            Line::Chords { tokens } => {
                pending = Some(render_chord_line(tokens).trim_end().to_string());
            }
            Line::Empty => pending = None,
            Line::Text { .. } => {
                if let (Some(chords), Some((_, captured))) = (pending.take(), capturing.as_mut()) {
                    captured.push(chords);
                }
            }
        }
    }
    flush(&mut capturing, &mut templates);

    templates
}

fn flush(capturing: &mut Option<(SectionType, Vec<String>)>, templates: &mut Templates) {
    // A section without chords does not claim its type
    if let Some((kind, captured)) = capturing.take()
        && !captured.is_empty()
    {
        log::debug!("captured {kind} template with {} chord lines", captured.len());
        templates.entry(kind).or_insert(captured);
    }
}

/// Copy one section to `out`, interleaving template chords when it has none
fn fill_section<'a>(section: &'a [Row<'a>], templates: &'a Templates, out: &mut Vec<&'a str>) {
    let template = match section.first() {
        Some((_, Line::Header { content })) => templates.get(&header_type(content)),
        _ => None,
    };
    let has_chords = section.iter().any(|(_, line)| line.is_chords());

    let Some(template) = template.filter(|_| !has_chords) else {
        out.extend(section.iter().map(|(raw, _)| *raw));
        return;
    };

    log::trace!("filling section {:?}", section[0].0.trim());
    let mut chords = template.iter();
    for (raw, line) in section {
        if matches!(line, Line::Text { .. })
            && let Some(chord_line) = chords.next()
        {
            out.push(chord_line);
        }
        out.push(*raw);
    }
}
