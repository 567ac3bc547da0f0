//! Falling confetti drawn over the board when a round is won.

use rand::Rng;
use ratatui::{buffer::Buffer, layout::Rect, style::Color, style::Style, widgets::Widget};
use std::time::{Duration, Instant};

const PIECES: usize = 100;
const LIFETIME: Duration = Duration::from_secs(5);
const GLYPHS: [&str; 3] = ["●", "•", "▪"];
const COLORS: [Color; 6] = [
    Color::Rgb(0x63, 0x66, 0xf1),
    Color::Rgb(0x8b, 0x5c, 0xf6),
    Color::Rgb(0xec, 0x48, 0x99),
    Color::Rgb(0x10, 0xb9, 0x81),
    Color::Rgb(0xf5, 0x9e, 0x0b),
    Color::Rgb(0xef, 0x44, 0x44),
];

#[derive(Debug, Clone)]
struct Piece {
    /// Horizontal offset as a fraction of the area width.
    column: f32,
    /// Seconds to fall the full height.
    fall_secs: f32,
    color: Color,
    glyph: &'static str,
}

/// A burst of confetti anchored at the instant it was thrown.
#[derive(Debug, Clone)]
pub struct Confetti {
    thrown_at: Instant,
    now: Instant,
    pieces: Vec<Piece>,
}

impl Confetti {
    /// Throws a new burst.
    pub fn burst(rng: &mut impl Rng, now: Instant) -> Self {
        let pieces = (0..PIECES)
            .map(|_| Piece {
                column: rng.gen_range(0.0..1.0),
                fall_secs: rng.gen_range(2.0..5.0),
                color: COLORS[rng.gen_range(0..COLORS.len())],
                glyph: GLYPHS[rng.gen_range(0..GLYPHS.len())],
            })
            .collect();
        Self {
            thrown_at: now,
            now,
            pieces,
        }
    }

    /// Advances the animation clock.
    pub fn update(&mut self, now: Instant) {
        self.now = now;
    }

    /// True once every piece has landed.
    pub fn is_finished(&self) -> bool {
        self.now.saturating_duration_since(self.thrown_at) >= LIFETIME
    }

    fn progress(&self, piece: &Piece) -> Option<f32> {
        let elapsed = self.now.saturating_duration_since(self.thrown_at).as_secs_f32();
        let progress = elapsed / piece.fall_secs;
        (progress < 1.0).then_some(progress)
    }
}

impl Widget for &Confetti {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        for piece in &self.pieces {
            let Some(progress) = self.progress(piece) else {
                continue;
            };
            let x = area.x + (piece.column * f32::from(area.width - 1)) as u16;
            let y = area.y + (progress * f32::from(area.height - 1)) as u16;
            buf.set_string(x, y, piece.glyph, Style::default().fg(piece.color));
        }
    }
}
