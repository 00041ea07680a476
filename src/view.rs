//! Plain-text rendering of the memo pad.

use std::fmt::Write;

use crate::app::AppState;
use crate::modules::memos::types::Memo;

pub fn render(state: &AppState) -> String {
    let mut out = String::new();

    out.push_str("Memo Pad\n\n");

    out.push_str("== Write memo ==\n");
    let _ = writeln!(out, "content:  {}", state.form.content);
    let _ = writeln!(out, "password: {}", mask(&state.form.password));
    out.push('\n');

    out.push_str("== Categories ==\n");
    out.push_str(&render_categories(state));

    if let Some(category) = &state.selected_category {
        let _ = writeln!(out, "\n== {category} memos ==");
        if state.category_memos.is_empty() {
            out.push_str("No memos in this category.\n");
        }
        render_memos(&mut out, &state.category_memos);
    }

    out.push_str("\n== All memos ==\n");
    if state.memos.is_empty() {
        out.push_str("No memos.\n");
    }
    render_memos(&mut out, &state.memos);

    if let Some(modal) = &state.delete_modal {
        let _ = writeln!(out, "\n-- Delete memo {} --", modal.memo_id);
        let _ = writeln!(out, "password: {}", mask(&modal.password));
    }

    if let Some(modal) = &state.edit_modal {
        let _ = writeln!(out, "\n-- Edit memo {} --", modal.memo_id);
        let _ = writeln!(out, "content:  {}", modal.content);
        let _ = writeln!(out, "password: {}", mask(&modal.password));
    }

    out
}

pub fn render_categories(state: &AppState) -> String {
    if state.categories.is_empty() {
        return "No categories.\n".to_string();
    }

    let mut out = String::new();
    for (name, tags) in &state.categories {
        let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
        let _ = writeln!(out, "{name}: {}", tags.join(", "));
    }
    out
}

pub fn render_memo_list(memos: &[Memo]) -> String {
    let mut out = String::new();
    if memos.is_empty() {
        out.push_str("No memos.\n");
    }
    render_memos(&mut out, memos);
    out
}

fn render_memos(out: &mut String, memos: &[Memo]) {
    for memo in memos {
        let _ = writeln!(out, "[{}] {}", memo.id, memo.content);
    }
}

fn mask(password: &str) -> String {
    "*".repeat(password.chars().count())
}
