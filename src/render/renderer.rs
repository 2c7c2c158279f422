use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::device::{LedMatrix, MATRIX_SIZE};
use crate::game::Variant;
use crate::modes::runner::{Phase, RoundStatus};

/// Paints the emulated device: status line, the LED matrix, and controls
pub struct Renderer {
    variant: Variant,
}

impl Renderer {
    pub fn new(variant: Variant) -> Self {
        Self { variant }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        matrix: &LedMatrix,
        status: &RoundStatus,
        now_playing: Option<&str>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                     // Header
                Constraint::Length(MATRIX_SIZE as u16 + 2), // LED matrix
                Constraint::Min(0),                        // Speaker
                Constraint::Length(3),                     // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(status), chunks[0]);

        // Each LED is two cells wide plus a one cell gap, inside a border
        let matrix_width = (MATRIX_SIZE * 3 + 2) as u16;
        let matrix_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(matrix_width),
                Constraint::Min(0),
            ])
            .split(chunks[1])[1];
        frame.render_widget(self.render_matrix(matrix), matrix_area);

        frame.render_widget(self.render_speaker(now_playing), chunks[2]);
        frame.render_widget(self.render_controls(), chunks[3]);
    }

    fn render_matrix(&self, matrix: &LedMatrix) -> Paragraph<'_> {
        let lines: Vec<Line> = matrix
            .rows()
            .iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|&brightness| led_span(brightness))
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::White)),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, status: &RoundStatus) -> Paragraph<'_> {
        let variant = match self.variant {
            Variant::Anthem => "Anthem",
            Variant::Victory => "Victory",
        };
        let phase = match status.phase {
            Phase::Greeting => Span::styled("HELLO", Style::default().fg(Color::Cyan)),
            Phase::Playing => Span::styled("PLAYING", Style::default().fg(Color::Green)),
            Phase::Dying => Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Phase::Winning => Span::styled(
                "YOU WIN",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        };

        let text = vec![Line::from(vec![
            Span::styled("Round: ", Style::default().fg(Color::Yellow)),
            Span::styled(status.round.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                status.length.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Tick: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{} ms", status.tick_ms),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled(variant, Style::default().fg(Color::Gray)),
            Span::raw("  "),
            phase,
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_speaker(&self, now_playing: Option<&str>) -> Paragraph<'_> {
        let line = match now_playing {
            Some(sound) => Line::from(vec![
                Span::styled("♪ ", Style::default().fg(Color::Magenta)),
                Span::styled(sound.to_string(), Style::default().fg(Color::White)),
            ]),
            None => Line::from(Span::styled("silent", Style::default().fg(Color::DarkGray))),
        };

        Paragraph::new(vec![line]).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("A", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("←", Style::default().fg(Color::Cyan)),
            Span::raw(" turn left | "),
            Span::styled("B", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("→", Style::default().fg(Color::Cyan)),
            Span::raw(" turn right | "),
            Span::styled("L", Style::default().fg(Color::Green)),
            Span::raw(" / "),
            Span::styled("Space", Style::default().fg(Color::Green)),
            Span::raw(" touch logo | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

/// One LED, shaded red by brightness
fn led_span(brightness: u8) -> Span<'static> {
    if brightness == 0 {
        Span::styled("·· ", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled("██ ", Style::default().fg(led_color(brightness)))
    }
}

fn led_color(brightness: u8) -> Color {
    // Keep dim LEDs visible against a dark terminal
    let level = 60 + u16::from(brightness) * 195 / 255;
    Color::Rgb(level as u8, 0, 0)
}
