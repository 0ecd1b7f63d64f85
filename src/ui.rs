use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    board::{visible_window, RowKind},
    game::{Game, Phase, MIN_HEIGHT, MIN_WIDTH},
    record::RecordStore,
};

const HORIZONTAL_MARGIN: u16 = 2;
const BOARD_PADDING: u16 = 8;
const OVERLAY_WIDTH: u16 = 50;

impl<S: RecordStore, R: Rng> Widget for &Game<S, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.surface_ok() || area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            Paragraph::new(format!(
                "Terminal too small ({}x{} needed)",
                MIN_WIDTH, MIN_HEIGHT
            ))
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(1)
            .constraints([
                Constraint::Length(1), // timer + best time
                Constraint::Min(5),    // board
                Constraint::Length(3), // guess input
                Constraint::Length(1), // key help
            ])
            .split(area);

        render_header(self, chunks[0], buf);
        render_board(self, chunks[1], buf);
        render_input(self, chunks[2], buf);

        Paragraph::new("(enter) guess  (backspace) edit  (esc) quit")
            .style(
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            )
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        match self.phase() {
            Phase::Idle => render_start_overlay(self, area, buf),
            Phase::Ended => render_end_overlay(self, area, buf),
            Phase::Playing => {}
        }

        render_celebration(self, area, buf);
    }
}

fn render_header<S: RecordStore, R: Rng>(game: &Game<S, R>, area: Rect, buf: &mut Buffer) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let timer_style = if game.is_low_time() {
        bold.fg(Color::Red).add_modifier(Modifier::SLOW_BLINK)
    } else {
        bold
    };

    Paragraph::new(Span::styled(game.timer_label(), timer_style)).render(halves[0], buf);
    Paragraph::new(Span::styled(
        game.best_time_label(),
        Style::default().fg(Color::Cyan),
    ))
    .alignment(Alignment::Right)
    .render(halves[1], buf);
}

fn render_board<S: RecordStore, R: Rng>(game: &Game<S, R>, area: Rect, buf: &mut Buffer) {
    let rows = game.rows();
    let widest = rows.iter().map(|r| r.text.width()).max().unwrap_or(0) as u16;
    let width = (widest + BOARD_PADDING).clamp(20, area.width);
    let board_area = Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Word Chain")
        .title_alignment(Alignment::Center);
    let inner = block.inner(board_area);
    block.render(board_area, buf);

    let lines: Vec<Line> = visible_window(&rows, inner.height as usize)
        .into_iter()
        .map(|row| {
            let style = match row.kind {
                RowKind::Anchor => Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                RowKind::Solved => Style::default().fg(Color::Green),
                RowKind::Target => Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                RowKind::Masked => Style::default().add_modifier(Modifier::DIM),
            };
            Line::from(Span::styled(row.text.clone(), style))
        })
        .collect();

    // keep the rows vertically centred in the board
    let used = lines.len() as u16;
    let text_area = Rect {
        y: inner.y + inner.height.saturating_sub(used) / 2,
        height: used.min(inner.height),
        ..inner
    };
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(text_area, buf);
}

fn render_input<S: RecordStore, R: Rng>(game: &Game<S, R>, area: Rect, buf: &mut Buffer) {
    let shaking = game.is_shaking();
    let (border_style, title) = if shaking {
        (Style::default().fg(Color::Red), "Guess ✗")
    } else {
        (Style::default(), "Guess")
    };

    let mut input_area = area;
    if shaking && input_area.width > 2 {
        input_area.x += 1;
        input_area.width -= 2;
    }

    let mut spans = vec![Span::styled(
        game.input().to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if game.phase() == Phase::Playing {
        spans.push(Span::styled("▏", Style::default().add_modifier(Modifier::DIM)));
    }

    Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        )
        .render(input_area, buf);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_overlay(lines: Vec<Line>, area: Rect, buf: &mut Buffer) {
    let rect = centered_rect(OVERLAY_WIDTH, lines.len() as u16 + 2, area);
    Clear.render(rect, buf);
    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(rect, buf);
}

fn render_start_overlay<S: RecordStore, R: Rng>(game: &Game<S, R>, area: Rect, buf: &mut Buffer) {
    let title = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("WORD CHAIN", title)),
        Line::from(""),
        Line::from("Guess every word linking the first and last."),
        Line::from(format!(
            "Wrong guesses reveal a letter and cost {}s.",
            game.config().penalty_secs
        )),
        Line::from(game.best_time_label()),
        Line::from(""),
        Line::from(Span::styled(
            "(enter) start  (esc) quit",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ];
    render_overlay(lines, area, buf);
}

fn render_end_overlay<S: RecordStore, R: Rng>(game: &Game<S, R>, area: Rect, buf: &mut Buffer) {
    let Some(screen) = game.end_screen() else {
        return;
    };
    let mut lines = vec![
        Line::from(Span::styled(
            screen.title.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(screen.message.clone()),
    ];
    if let Some(record) = game.record_message() {
        lines.push(Line::from(Span::styled(
            record.to_string(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(game.best_time_label()));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "(enter) play again  (esc) quit",
        Style::default().add_modifier(Modifier::ITALIC),
    )));
    render_overlay(lines, area, buf);
}

fn render_celebration<S: RecordStore, R: Rng>(game: &Game<S, R>, area: Rect, buf: &mut Buffer) {
    let celebration = game.celebration();
    if !celebration.is_active {
        return;
    }
    for particle in &celebration.particles {
        let (x, y) = (particle.x.round(), particle.y.round());
        if x < 0.0 || y < 0.0 || x >= area.width as f64 || y >= area.height as f64 {
            continue;
        }
        let (r, g, b) = particle.color;
        if let Some(cell) = buf.cell_mut((area.x + x as u16, area.y + y as u16)) {
            cell.set_char(particle.symbol).set_fg(Color::Rgb(r, g, b));
        }
    }
}
