use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::helpers::spinner;
use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_OK};
use crate::app::{App, FormField, FormMode, NoticeKind};

const LOGO: [&str; 2] = ["M I N E W A T C H", "mine safety console"];

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub fn render_login_screen(frame: &mut Frame, app: &App) {
    let form = &app.login;
    let fields = form.fields();
    let height = 8 + fields.len() as u16 * 2;
    let area = centered(frame.area(), 56, height);

    let title = match form.mode {
        FormMode::SignIn => " Sign in ",
        FormMode::Register => " Register ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Line::styled(title, Style::default().fg(COLOR_HEADER)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::styled(
            LOGO[0],
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        ),
        Line::styled(LOGO[1], Style::default().fg(COLOR_DIM)),
        Line::raw(""),
    ];

    for field in fields {
        let focused = *field == form.focused();
        let value = match field {
            FormField::Password => "•".repeat(form.password.chars().count()),
            other => form.value(*other).to_string(),
        };
        let label_style = if focused {
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_DIM)
        };
        let cursor = if focused && !form.submitting { "▏" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{:>10}: ", field.label()), label_style),
            Span::raw(value),
            Span::styled(cursor, Style::default().fg(COLOR_ACCENT)),
        ]));
        lines.push(Line::raw(""));
    }

    let status = if form.submitting {
        Line::styled(
            format!("{} Signing in...", spinner(app.tick_count)),
            Style::default().fg(COLOR_DIM),
        )
    } else if let Some(error) = &form.error {
        Line::styled(error.clone(), Style::default().fg(COLOR_ERROR))
    } else if let Some(notice) = &app.notice {
        let color = match notice.kind {
            NoticeKind::Info => COLOR_OK,
            NoticeKind::Error => COLOR_ERROR,
        };
        Line::styled(notice.text.clone(), Style::default().fg(color))
    } else {
        Line::raw("")
    };
    lines.push(status);

    let hint = match form.mode {
        FormMode::SignIn => "[Tab] Register  [Enter] Next / Sign in  [Esc] Quit",
        FormMode::Register => "[Tab] Sign in  [Enter] Next / Register  [Esc] Quit",
    };

    let [body, footer] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), body);
    frame.render_widget(
        Paragraph::new(Line::styled(hint, Style::default().fg(COLOR_DIM))).alignment(Alignment::Center),
        footer,
    );
}
