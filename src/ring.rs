use crate::config::Rgb;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::io;
use tui::backend::CrosstermBackend;
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders};
use tui::Terminal;

/// Ring is a fixed-length circle of colour cells. Changes are buffered until
/// `flush`, like a NeoPixel strip, so the game can repaint several cells and
/// show them all at once.
pub trait Ring {
    /// how many cells are in the ring; fixed for the life of the ring
    fn len(&self) -> usize;

    /// buffer a colour for cell `index`
    fn set_cell(&mut self, index: usize, color: Rgb);

    /// the colour currently buffered for cell `index`
    fn cell(&self, index: usize) -> Rgb;

    /// show the buffered colours
    fn flush(&mut self) -> Result<(), io::Error>;

    /// buffer the same colour for every cell
    fn fill(&mut self, color: Rgb) {
        for i in 0..self.len() {
            self.set_cell(i, color);
        }
    }
}

// where the ring sits on the canvas
const RING_RADIUS: f64 = 1.0;
const CELL_RADIUS: f64 = 0.2;
const CANVAS_BOUNDS: [f64; 2] = [-1.3, 1.3];
// how finely each cell is filled in with points
const CELL_GRAIN: usize = 12;

/// where cell `index` of `len` sits. indices go anticlockwise from the top,
/// so the cursor stepping down through them goes clockwise
fn cell_centre(index: usize, len: usize) -> (f64, f64) {
    let angle = FRAC_PI_2 + TAU * (index as f64 + 0.5) / len as f64;
    (RING_RADIUS * angle.cos(), RING_RADIUS * angle.sin())
}

/// points filling a disc around `centre`
fn cell_points(centre: (f64, f64)) -> Vec<(f64, f64)> {
    let step = 2.0 * CELL_RADIUS / CELL_GRAIN as f64;
    let mut points = Vec::new();
    for i in 0..=CELL_GRAIN {
        for j in 0..=CELL_GRAIN {
            let dx = -CELL_RADIUS + i as f64 * step;
            let dy = -CELL_RADIUS + j as f64 * step;
            if dx * dx + dy * dy <= CELL_RADIUS * CELL_RADIUS {
                points.push((centre.0 + dx, centre.1 + dy));
            }
        }
    }
    points
}

/// the palette is dimmed for LEDs; stretch it so it shows up in a terminal
fn terminal_color(c: Rgb) -> Color {
    let brightest = c.0.max(c.1).max(c.2) as u16;
    if brightest == 0 {
        return Color::Black;
    }
    let scale = |v: u8| (v as u16 * 255 / brightest) as u8;
    Color::Rgb(scale(c.0), scale(c.1), scale(c.2))
}

/// ring of lights drawn in a terminal, rendered using TUI and crossterm
pub struct TermRing {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    cells: Vec<Rgb>,
    shapes: Vec<Vec<(f64, f64)>>,
}

impl TermRing {
    pub fn new(len: usize) -> Result<TermRing, io::Error> {
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        Ok(TermRing {
            terminal,
            cells: vec![Rgb(0, 0, 0); len],
            shapes: (0..len).map(|i| cell_points(cell_centre(i, len))).collect(),
        })
    }
}

impl Ring for TermRing {
    fn len(&self) -> usize {
        self.cells.len()
    }

    fn set_cell(&mut self, index: usize, color: Rgb) {
        self.cells[index] = color;
    }

    fn cell(&self, index: usize) -> Rgb {
        self.cells[index]
    }

    fn flush(&mut self) -> Result<(), io::Error> {
        let cells = &self.cells;
        let shapes = &self.shapes;
        self.terminal.draw(|f| {
            let canvas = Canvas::default()
                .block(
                    Block::default()
                        .title("JUMBOINGA  [1/2/3/space] boing  [q] quit")
                        .borders(Borders::ALL)
                        .style(Style::default().bg(Color::Black)),
                )
                .x_bounds(CANVAS_BOUNDS)
                .y_bounds(CANVAS_BOUNDS)
                .marker(Marker::Block)
                .paint(|ctx| {
                    for (shape, c) in shapes.iter().zip(cells.iter()) {
                        ctx.draw(&Points {
                            coords: shape.as_slice(),
                            color: terminal_color(*c),
                        });
                    }
                });
            f.render_widget(canvas, f.size());
        })?;
        Ok(())
    }
}

/// useful for testing non-display routines; remembers what it was told
pub struct DummyRing {
    cells: Vec<Rgb>,
    shown: Vec<Rgb>,
    flushes: usize,
}

impl DummyRing {
    pub fn new(len: usize) -> Self {
        DummyRing {
            cells: vec![Rgb(0, 0, 0); len],
            shown: vec![Rgb(0, 0, 0); len],
            flushes: 0,
        }
    }

    /// what the ring looked like at the last flush
    pub fn shown(&self) -> &[Rgb] {
        &self.shown
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl Ring for DummyRing {
    fn len(&self) -> usize {
        self.cells.len()
    }

    fn set_cell(&mut self, index: usize, color: Rgb) {
        self.cells[index] = color;
    }

    fn cell(&self, index: usize) -> Rgb {
        self.cells[index]
    }

    fn flush(&mut self) -> Result<(), io::Error> {
        self.shown.copy_from_slice(&self.cells);
        self.flushes += 1;
        Ok(())
    }
}
