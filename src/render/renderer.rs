use glam::Vec2;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game;
use crate::game::{ArenaConfig, EntityKind, GameState};
use crate::metrics::GameMetrics;

/// Draws the arena as a character grid, one cell per `square_size` of
/// world space. Consumes read-only snapshots; never touches game state.
pub struct Renderer {
    config: ArenaConfig,
    grid_width: usize,
    grid_height: usize,
}

impl Renderer {
    pub fn new(config: ArenaConfig) -> Self {
        let grid_width = (config.width / config.square_size) as usize;
        let grid_height = (config.height / config.square_size) as usize;
        Self {
            config,
            grid_width,
            grid_height,
        }
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(chunks[0], state, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if state.game_over {
            let game_over = self.render_game_over(game_area, state);
            frame.render_widget(game_over, game_area);
        } else {
            let grid = self.render_grid(game_area, state);
            frame.render_widget(grid, game_area);
        }

        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    /// Grid cell for a world position. World +y is up, terminal rows grow
    /// downward, so the y axis flips.
    fn cell_of(&self, pos: Vec2) -> Option<(usize, usize)> {
        let col = (pos.x / self.config.square_size).floor();
        let row_up = (pos.y / self.config.square_size).floor();
        if col < 0.0
            || row_up < 0.0
            || col >= self.grid_width as f32
            || row_up >= self.grid_height as f32
        {
            return None;
        }
        Some((col as usize, self.grid_height - 1 - row_up as usize))
    }

    /// World-space center of a grid cell
    fn cell_center(&self, col: usize, row: usize) -> Vec2 {
        let sq = self.config.square_size;
        Vec2::new(
            (col as f32 + 0.5) * sq,
            ((self.grid_height - 1 - row) as f32 + 0.5) * sq,
        )
    }

    fn render_grid(&self, _area: Rect, state: &GameState) -> Paragraph<'_> {
        // Start from walls and empty interior, then overlay the entities.
        let mut cells = vec![vec![EntityCell::Empty; self.grid_width]; self.grid_height];
        for (row, row_cells) in cells.iter_mut().enumerate() {
            for (col, cell) in row_cells.iter_mut().enumerate() {
                if !self.config.in_bounds(self.cell_center(col, row)) {
                    *cell = EntityCell::Wall;
                }
            }
        }

        for entity in state.render_entities() {
            if let Some((col, row)) = self.cell_of(entity.position) {
                cells[row][col] = EntityCell::Entity(entity.kind, entity.direction);
            }
        }

        let lines: Vec<Line> = cells
            .iter()
            .map(|row| Line::from(row.iter().map(EntityCell::span).collect::<Vec<_>>()))
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, _area: Rect, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.snake.len().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, _area: Rect, state: &GameState) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Your Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" to steer | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" faster | "),
            Span::styled("Ctrl", Style::default().fg(Color::Cyan)),
            Span::raw(" slow | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

#[derive(Debug, Clone, Copy)]
enum EntityCell {
    Empty,
    Wall,
    Entity(EntityKind, game::Direction),
}

impl EntityCell {
    fn span(&self) -> Span<'static> {
        match self {
            EntityCell::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
            EntityCell::Wall => Span::styled("▒▒", Style::default().fg(Color::Gray)),
            EntityCell::Entity(EntityKind::Head, dir) => {
                let glyph = match dir {
                    game::Direction::Up => "▲ ",
                    game::Direction::Down => "▼ ",
                    game::Direction::Left => "◄ ",
                    game::Direction::Right => "► ",
                };
                Span::styled(
                    glyph,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
            }
            EntityCell::Entity(EntityKind::Body, _) => {
                Span::styled("□ ", Style::default().fg(Color::Green))
            }
            EntityCell::Entity(EntityKind::FoodSmall, _) => Span::styled(
                "o ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            EntityCell::Entity(EntityKind::FoodBig, _) => Span::styled(
                "O ",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
        }
    }
}
