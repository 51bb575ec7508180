use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    if render_toast_bar(model, frame, area) {
        return;
    }

    let doc = &model.document;
    let filename = model
        .file_path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "untitled".to_string());
    let modified = if doc.is_dirty() { " [modified]" } else { "" };
    let language = doc.language().unwrap_or("plain");
    let quit_hint = if model.quit_confirmed {
        "  unsaved changes, Ctrl+Q again to quit"
    } else {
        ""
    };

    let status = format!(
        " {}{}  Ln {}, Col {}  {}  {}%{}",
        filename,
        modified,
        doc.cursor_line() + 1,
        doc.cursor_column() + 1,
        language,
        doc.viewport().scroll_percent(),
        quit_hint,
    );

    let style = if doc.is_dirty() {
        model.theme.status_dirty
    } else {
        model.theme.status
    };
    frame.render_widget(Paragraph::new(status).style(style), area);
}

/// Draw the active toast over the status bar. Returns whether one was shown.
fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) -> bool {
    let Some((message, level)) = model.active_toast() else {
        return false;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!(" {prefix} {message}")).style(style);
    frame.render_widget(toast, area);
    true
}
