//! UI rendering for the TUI.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::core::models::{ParkingSpot, SpotStatus, now_ms};
use crate::core::timer::format_remaining;

use super::app::{FormField, ReserveForm, TuiApp, ViewMode};

const CARD_WIDTH: u16 = 22;
const CARD_HEIGHT: u16 = 7;

/// Main render function - dispatches to view-specific renderers.
pub fn render(frame: &mut Frame, app: &mut TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer/help
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    match app.view {
        ViewMode::Grid => render_grid(frame, app, chunks[1]),
        ViewMode::Table => render_table(frame, app, chunks[1]),
    }

    render_footer(frame, app, chunks[2]);

    if let Some(form) = app.form.clone() {
        let area = frame.area();
        render_form(frame, &form, area);
    }
}

fn render_header(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let mode = if app.demo { " [DEMO]" } else { "" };
    let user = match &app.user_name {
        Some(name) => format!("  {}", name),
        None => "  not logged in".to_string(),
    };

    let free = app.spots.iter().filter(|spot| spot.is_free()).count();
    let title = format!(
        "PARKCTL{}  {}/{} free{}",
        mode,
        free,
        app.spots.len(),
        user
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(block, area);
}

fn status_style(status: SpotStatus) -> (Span<'static>, Color) {
    match status {
        SpotStatus::Free => (Span::styled("✓", Style::default().fg(Color::Green)), Color::Green),
        SpotStatus::Reserved => (
            Span::styled("•", Style::default().fg(Color::Yellow)),
            Color::Yellow,
        ),
        SpotStatus::Occupied => (Span::styled("✗", Style::default().fg(Color::Red)), Color::Red),
    }
}

fn render_grid(frame: &mut Frame, app: &mut TuiApp, area: Rect) {
    let columns = ((area.width / CARD_WIDTH).max(1) as usize).min(6);
    // Keep navigation in step with the layout.
    app.grid_columns = columns;

    if app.spots.is_empty() {
        let block = Block::default()
            .title("Parking Spots")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let text = Paragraph::new("  No spots yet (waiting for first snapshot)")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(text, area);
        return;
    }

    let now = now_ms();
    let rows = app.spots.chunks(columns).count();

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); rows])
        .split(area);

    for (row_index, row_spots) in app.spots.chunks(columns).enumerate() {
        if row_index >= row_areas.len() {
            break;
        }

        let card_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(CARD_WIDTH); row_spots.len()])
            .split(row_areas[row_index]);

        for (col_index, spot) in row_spots.iter().enumerate() {
            let index = row_index * columns + col_index;
            render_card(frame, spot, card_areas[col_index], index == app.selected, now);
        }
    }
}

fn render_card(frame: &mut Frame, spot: &ParkingSpot, area: Rect, selected: bool, now: i64) {
    let (icon, color) = status_style(spot.status);

    let border_style = if selected {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    };

    let title = if selected {
        format!("> Spot {}", spot.number)
    } else {
        format!("Spot {}", spot.number)
    };

    let mut lines = vec![Line::from(vec![
        icon,
        Span::raw(" "),
        Span::styled(
            spot.status.as_str().to_uppercase(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])];

    if let Some(by) = &spot.reserved_by {
        lines.push(Line::from(Span::raw(by.clone())));
    }

    if let Some(remaining) = format_remaining(spot.remaining_ms(now).and(spot.reserved_until), now)
    {
        lines.push(Line::from(Span::styled(
            remaining,
            Style::default().fg(Color::Yellow),
        )));
    }

    if spot.is_free() {
        lines.push(Line::from(Span::styled(
            "Enter to reserve",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_table(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let block = Block::default()
        .title("Parking Spots")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.spots.is_empty() {
        let text = Paragraph::new("  No spots yet")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(text, area);
        return;
    }

    let now = now_ms();

    let header = ListItem::new(Line::from(Span::styled(
        format!(
            "   {:<6} {:<10} {:<16} {}",
            "#", "Status", "Reserved By", "Remaining"
        ),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));

    let items: Vec<ListItem> = std::iter::once(header)
        .chain(app.spots.iter().enumerate().map(|(i, spot)| {
            let is_selected = i == app.selected;
            let style = if is_selected {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let (icon, _) = status_style(spot.status);
            let remaining =
                format_remaining(spot.remaining_ms(now).and(spot.reserved_until), now)
                    .unwrap_or_else(|| "-".to_string());

            let line = Line::from(vec![
                Span::raw(if is_selected { "> " } else { "  " }),
                icon,
                Span::raw(format!(
                    " {:<6} {:<10} {:<16} {}",
                    spot.number,
                    spot.status.as_str(),
                    spot.reserved_by.as_deref().unwrap_or("-"),
                    remaining
                )),
            ]);

            ListItem::new(line).style(style)
        }))
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

fn render_form(frame: &mut Frame, form: &ReserveForm, area: Rect) {
    let popup = centered_rect(40, 9, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(format!("Reserve Spot #{}", form.spot_number))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    let field_style = |field: FormField| {
        if form.focus == field {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    };

    let name_display = if form.name.is_empty() {
        Span::styled("Guest", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(form.name.clone())
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Name:    ", field_style(FormField::Name)),
            name_display,
            if form.focus == FormField::Name {
                Span::styled("_", Style::default().fg(Color::White))
            } else {
                Span::raw("")
            },
        ]),
        Line::from(vec![
            Span::styled("  Minutes: ", field_style(FormField::Minutes)),
            Span::raw(form.minutes.clone()),
            if form.focus == FormField::Minutes {
                Span::styled("_", Style::default().fg(Color::White))
            } else {
                Span::raw("")
            },
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  [Tab] Field  [Enter] Reserve  [Esc] Cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn render_footer(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let help_text = match app.view {
        ViewMode::Grid => {
            "[↑↓←→] Navigate  [Enter] Reserve  [o] Occupy  [f] Free  [t] Table  [r] Refresh  [q] Quit"
        }
        ViewMode::Table => {
            "[↑↓] Navigate  [Enter] Reserve  [o] Occupy  [f] Free  [g] Grid  [r] Refresh  [q] Quit"
        }
    };

    let mut spans = vec![Span::raw(format!("  {}", help_text))];

    if let Some(error) = &app.error {
        spans.push(Span::styled(
            format!("  {}", error),
            Style::default().fg(Color::Red),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
