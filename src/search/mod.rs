use crate::models::Note;

/// Notes whose title or content contains `term`, ignoring case.
///
/// An empty term matches everything. The term is used as typed (no trim).
pub(crate) fn filter_notes(notes: &[Note], term: &str) -> Vec<Note> {
    if term.is_empty() {
        return notes.to_vec();
    }

    let needle = term.to_lowercase();
    notes
        .iter()
        .filter(|n| {
            n.title.to_lowercase().contains(&needle) || n.content.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// "3 notes", "1 note", with the active search appended.
pub(crate) fn summarize_count(count: usize, term: &str) -> String {
    let noun = if count == 1 { "note" } else { "notes" };
    if term.is_empty() {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun} matching \"{term}\"")
    }
}
