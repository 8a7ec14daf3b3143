use crate::engine::world::{GameState, World};
use crate::map::{Position, tile::Cell};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, world: &World) {
    let size = f.size();
    f.render_widget(Clear, size);

    if size.width < 20 || size.height < 10 {
        let msg = Paragraph::new("Terminal too small, resize to play.")
            .block(Block::default().borders(Borders::ALL).title("Maze"))
            .wrap(Wrap { trim: true });
        f.render_widget(msg, size);
        return;
    }

    let log_h = (size.height / 4).clamp(5, 10);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(log_h)])
        .split(size);

    let top = vertical[0];
    let bottom = vertical[1];

    let sidebar_w = (top.width / 3).clamp(20, 40);

    if top.width < sidebar_w + 25 {
        let stacked = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(11)])
            .split(top);

        draw_map(f, stacked[0], world);
        draw_sidebar(f, stacked[1], world);
    } else {
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(sidebar_w)])
            .split(top);

        draw_map(f, horizontal[0], world);
        draw_sidebar(f, horizontal[1], world);
    }

    draw_logs(f, bottom, world);
}

fn cell_style(cell: Cell) -> Style {
    match cell {
        Cell::Blocked => Style::default().fg(Color::DarkGray),
        Cell::Open => Style::default().fg(Color::White),
        Cell::Entrance => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        Cell::Exit => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Cell::PlayerHere => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    }
}

/// One line per grid row, each cell shown as its code. The player is
/// highlighted in place, so a landmark under the player keeps its digit.
pub fn map_lines(world: &World) -> Vec<Line<'static>> {
    let grid = &world.grid;
    let mut lines = Vec::with_capacity(grid.size);

    for row in 0..grid.size {
        let mut spans = Vec::with_capacity(grid.size);
        for col in 0..grid.size {
            let pos = Position::new(row, col);
            let cell = grid.get(pos);
            let mut style = cell_style(cell);
            if pos == world.player && world.state != GameState::Disconnected {
                style = style.fg(Color::Black).bg(Color::Yellow);
            }
            spans.push(Span::styled(format!("{} ", cell.code()), style));
        }
        lines.push(Line::from(spans));
    }

    lines
}

fn draw_map(f: &mut Frame, area: Rect, world: &World) {
    f.render_widget(Clear, area);

    let title = format!("Maze {}x{}", world.grid.size, world.grid.size);
    let map = Paragraph::new(map_lines(world)).block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(map, area);
}

pub fn sidebar_lines(world: &World) -> Vec<Line<'static>> {
    let (status, status_style) = match world.state {
        GameState::Exploring => ("Exploring", Style::default().fg(Color::Yellow)),
        GameState::Arrived => ("Arrived!", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        GameState::Disconnected => ("No way through", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
    };

    vec![
        Line::from(Span::styled(status, status_style)),
        Line::from(""),
        Line::from(format!("Position: {}", world.player)),
        Line::from(format!("Entrance: {}", world.entrance)),
        Line::from(format!("Exit:     {}", world.exit)),
        Line::from(format!("Connected: {}", if world.connected { "yes" } else { "no" })),
        Line::from(format!("Moves: {}", world.moves)),
        Line::from(format!("Rejected: {}", world.rejected)),
        Line::from(format!("Seed: {}", world.seed)),
    ]
}

fn draw_sidebar(f: &mut Frame, area: Rect, world: &World) {
    f.render_widget(Clear, area);

    let lines = sidebar_lines(world);
    let sidebar = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .wrap(Wrap { trim: true });

    f.render_widget(sidebar, area);
}

fn draw_logs(f: &mut Frame, area: Rect, world: &World) {
    f.render_widget(Clear, area);

    // Newest lines at the bottom; only what fits.
    let visible = area.height.saturating_sub(2) as usize;
    let skip = world.logs.len().saturating_sub(visible);
    let lines: Vec<Line> = world.logs.iter().skip(skip).map(|msg| Line::from(msg.clone())).collect();

    let logs = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Log"))
        .wrap(Wrap { trim: true });

    f.render_widget(logs, area);
}
