use crate::app::App;
use lootflip_core::{Phase, Side, SlotKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Alignment, Color, Line, Style, Stylize};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub fn draw(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(9),
            Constraint::Length(5),
            Constraint::Min(6),
        ])
        .split(frame.area());

    draw_header(frame, root[0], app);
    draw_table(frame, root[1], app);
    draw_message(frame, root[2], app);
    draw_events(frame, root[3], app);

    if app.run.state.phase == Phase::GameOver && app.reveal.is_none() {
        draw_game_over_popup(frame, app);
    }
    if app.show_help {
        draw_help_popup(frame, app);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.run.state;
    let hud = format!(
        "Lives {}  Turns {}/{}  Streak {}  Banked {}  Trophy {}",
        state.lives,
        state.turns_left,
        state.max_turns,
        state.streak,
        state.total_score,
        app.run.trophy_tier().label()
    );
    let powerups = format!(
        "Shield {}  Scrambler {}/{}  Jammer {}  |  Seed {}",
        if state.has_shield { "yes" } else { "no" },
        state.scrambler_charges,
        app.run.config.scrambler_cap,
        state.jammer_turns,
        app.seed
    );
    let lines = vec![
        Line::from(hud.bold()),
        Line::from(powerups),
        Line::from(format!("Status: {}", app.status_line)),
    ];
    let block = Block::default().borders(Borders::ALL).title("Lootflip");
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }).block(block), area);
}

fn draw_table(frame: &mut Frame, area: Rect, app: &App) {
    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(35),
            Constraint::Percentage(30),
        ])
        .split(area);

    draw_card(frame, row[0], app, Side::Left);
    draw_card(frame, row[1], app, Side::Right);
    draw_collection(frame, row[2], app);
}

fn draw_card(frame: &mut Frame, area: Rect, app: &App, side: Side) {
    let label = match side {
        Side::Left => "Left (h/←)",
        Side::Right => "Right (l/→)",
    };
    let revealed = app.reveal.is_some() || app.run.state.phase == Phase::GameOver;
    let chosen = app.reveal.map(|reveal| reveal.chosen) == Some(side);

    let (face, style) = if revealed {
        match app.run.state.slot(side) {
            SlotKind::Hazard => ("  BOOM  ", Style::default().fg(Color::Red)),
            SlotKind::Treasure => ("TREASURE", Style::default().fg(Color::Green)),
        }
    } else {
        ("   ??   ", Style::default().fg(Color::DarkGray))
    };

    let mut block = Block::default().borders(Borders::ALL).title(label);
    if chosen {
        block = block.border_style(Style::default().fg(Color::Yellow));
    }
    let lines = vec![
        Line::from(""),
        Line::from(face.bold()).style(style),
        Line::from(""),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        area,
    );
}

fn draw_collection(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.run.state;
    let slots: String = (1..=app.run.config.number_values)
        .map(|value| {
            if state.uniques.contains(&value) {
                format!("[{value}]")
            } else {
                "[ ]".to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    let pot = lootflip_core::bank_points(&app.run.config.bank_table, state.unique_count());
    let lines = vec![
        Line::from(slots),
        Line::from(format!("Pot: {pot} (b to bank)")),
    ];
    let block = Block::default().borders(Borders::ALL).title("Collection");
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

fn draw_message(frame: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::from(app.message_title.clone().bold()),
        Line::from(app.message_body.clone()),
    ];
    let block = Block::default().borders(Borders::ALL).title("Message");
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }).block(block), area);
}

fn draw_events(frame: &mut Frame, area: Rect, app: &App) {
    let capacity = area.height.saturating_sub(2) as usize;
    let start = app.event_log.len().saturating_sub(capacity);
    let lines: Vec<Line<'_>> = app
        .event_log
        .iter()
        .skip(start)
        .map(|line| Line::from(line.clone()))
        .collect();
    let block = Block::default().borders(Borders::ALL).title("Events");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_game_over_popup(frame: &mut Frame, app: &App) {
    let Some((reason, total_score)) = app.game_over() else {
        return;
    };
    let area = centered_rect(50, 40, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(format!("Reason: {reason:?}")),
        Line::from(format!("Final score: {total_score}")),
        Line::from(format!("Trophy: {}", app.run.trophy_tier().label())),
        Line::from(""),
        Line::from("r restart | q quit"),
    ];
    let block = Block::default()
        .title("Game Over")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn draw_help_popup(frame: &mut Frame, _app: &App) {
    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from("h/← flip left | l/→ flip right"),
        Line::from("b bank the current run"),
        Line::from("r restart | ? help | q quit"),
        Line::from(""),
        Line::from("One of the two cards may hide a hazard."),
        Line::from("Duplicates bust the run; bank before that happens."),
    ];
    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
