use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use rand::Rng;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use longcat::{FillStats, Grid, Motion, Outcome, Pos, Round, RoundResult, Session, Tile};

const CELL_W: usize = 2;
/// Columns reserved for status and round-over text, clipped to fit.
const TEXT_W: usize = 48;
const STATUS_ROWS: usize = 2;
const FOOTER_ROWS: usize = 2;
const HELP: &str = "arrows/hjkl to slide, q to quit";

#[derive(Clone, Copy, Debug, PartialEq)]
enum Glyph {
    Cat,
    Wall,
    Empty,
    FilledHorizontal,
    FilledVertical,
}

impl Glyph {
    fn text(self) -> &'static str {
        match self {
            Glyph::Cat => "🐱",
            Glyph::Wall => "██",
            Glyph::Empty => "  ",
            Glyph::FilledHorizontal => "━━",
            Glyph::FilledVertical => "┃",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

const BLANK: Cell = Cell {
    glyph: Glyph::Empty,
    color: Color::Reset,
};

/// Screen placement of one frame: status rows, then the grid, then footer.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Layout {
    text_x: u16,
    grid_x: u16,
    status_y: u16,
    grid_y: u16,
    footer_y: u16,
}

pub struct Renderer {
    width: usize,
    height: usize,
    last: Vec<Cell>,
    last_status: [String; STATUS_ROWS],
    needs_full: bool,
    layout: Option<Layout>,
}

impl Renderer {
    pub fn new(grid: &Grid) -> Self {
        Self {
            width: grid.cols(),
            height: grid.rows(),
            last: vec![BLANK; grid.cols() * grid.rows()],
            last_status: Default::default(),
            needs_full: true,
            layout: None,
        }
    }

    fn grid_w(&self) -> usize {
        self.width * CELL_W
    }

    /// Columns x rows a frame occupies.
    fn frame_size(&self) -> (usize, usize) {
        (
            self.grid_w().max(TEXT_W),
            STATUS_ROWS + self.height + FOOTER_ROWS,
        )
    }

    fn layout_for(&self, term_w: u16, term_h: u16) -> Option<Layout> {
        let (frame_w, frame_h) = self.frame_size();
        let spare_w = (term_w as usize).checked_sub(frame_w)?;
        let spare_h = (term_h as usize).checked_sub(frame_h)?;
        let text_x = spare_w / 2;
        let grid_x = text_x + (frame_w - self.grid_w()) / 2;
        let status_y = spare_h / 2;
        let grid_y = status_y + STATUS_ROWS;
        Some(Layout {
            text_x: text_x as u16,
            grid_x: grid_x as u16,
            status_y: status_y as u16,
            grid_y: grid_y as u16,
            footer_y: (grid_y + self.height) as u16,
        })
    }
}

pub fn render<R: Rng>(
    stdout: &mut Stdout,
    renderer: &mut Renderer,
    round: &Round,
    motion: Option<&Motion>,
    session: &Session<R>,
) -> io::Result<()> {
    let (term_w, term_h) = terminal::size()?;
    let Some(layout) = renderer.layout_for(term_w, term_h) else {
        let (frame_w, frame_h) = renderer.frame_size();
        stdout.queue(Clear(ClearType::All))?;
        stdout.queue(MoveTo(0, 0))?;
        stdout.queue(Print(format!(
            "Window is {term_w}x{term_h}; longcat needs {frame_w}x{frame_h}."
        )))?;
        stdout.flush()?;
        renderer.layout = None;
        return Ok(());
    };

    if renderer.layout != Some(layout) {
        renderer.layout = Some(layout);
        renderer.needs_full = true;
    }
    if renderer.needs_full {
        stdout.queue(Clear(ClearType::All))?;
        put_text(stdout, layout.text_x, layout.footer_y, HELP, Color::DarkGrey)?;
    }

    let status = status_lines(round, motion, session);
    for (row, line) in status.iter().enumerate() {
        if renderer.needs_full || *line != renderer.last_status[row] {
            put_text(stdout, layout.text_x, layout.status_y + row as u16, line, Color::White)?;
        }
    }
    renderer.last_status = status;

    let grid = round.current_grid();
    let token = round.current_position();
    for (idx, pos) in grid_cells(renderer.width, renderer.height).enumerate() {
        let cell = cell_for(grid, token, motion, pos);
        if renderer.needs_full || cell != renderer.last[idx] {
            renderer.last[idx] = cell;
            let x = layout.grid_x + (pos.col * CELL_W) as u16;
            let y = layout.grid_y + pos.row as u16;
            draw_cell(stdout, x, y, cell)?;
        }
    }
    renderer.needs_full = false;

    stdout.flush()
}

fn grid_cells(width: usize, height: usize) -> impl Iterator<Item = Pos> {
    (0..height).flat_map(move |row| (0..width).map(move |col| Pos::new(row, col)))
}

/// Longest prefix of `text` that fits in `width` terminal columns.
fn fit(text: &str, width: usize) -> &str {
    let mut used = 0;
    for (at, ch) in text.char_indices() {
        used += ch.width().unwrap_or(0);
        if used > width {
            return &text[..at];
        }
    }
    text
}

fn put_text(stdout: &mut Stdout, x: u16, y: u16, text: &str, color: Color) -> io::Result<()> {
    stdout.queue(MoveTo(x, y))?;
    stdout.queue(Clear(ClearType::UntilNewLine))?;
    stdout.queue(SetForegroundColor(color))?;
    stdout.queue(Print(fit(text, TEXT_W)))?;
    stdout.queue(ResetColor)?;
    Ok(())
}

fn draw_cell(stdout: &mut Stdout, x: u16, y: u16, cell: Cell) -> io::Result<()> {
    let text = cell.glyph.text();
    let pad = CELL_W.saturating_sub(text.width());
    stdout.queue(MoveTo(x, y))?;
    stdout.queue(SetForegroundColor(cell.color))?;
    stdout.queue(Print(format!("{text}{}", " ".repeat(pad))))?;
    stdout.queue(ResetColor)?;
    Ok(())
}

/// Fill shown on screen: cells the cat has not visually left yet don't count.
fn visible_stats(round: &Round, motion: Option<&Motion>) -> FillStats {
    let stats = round.compute_fill_stats();
    let pending = motion.map_or(0, Motion::pending);
    FillStats::new(stats.filled.saturating_sub(pending), stats.interior)
}

fn status_lines<R: Rng>(
    round: &Round,
    motion: Option<&Motion>,
    session: &Session<R>,
) -> [String; STATUS_ROWS] {
    let best = session
        .best()
        .map_or_else(|| "-".to_string(), |b| format!("{b:.1}%"));
    [
        format!(
            "Filled {:.1}%  Best {}",
            visible_stats(round, motion).percentage,
            best
        ),
        format!(
            "Round {}  Wins {}  Density {:.2}",
            session.round_number(),
            session.wins(),
            session.density()
        ),
    ]
}

fn cell_for(grid: &Grid, token: Pos, motion: Option<&Motion>, pos: Pos) -> Cell {
    let cat = motion.map_or(token, Motion::cell);
    if pos == cat {
        return Cell {
            glyph: Glyph::Cat,
            color: Color::White,
        };
    }
    if motion.is_some_and(|m| m.is_ahead(pos)) {
        return BLANK;
    }
    match grid.get(pos) {
        Some(Tile::Wall) => Cell {
            glyph: Glyph::Wall,
            color: Color::Blue,
        },
        Some(Tile::FilledHorizontal) => Cell {
            glyph: Glyph::FilledHorizontal,
            color: Color::Yellow,
        },
        Some(Tile::FilledVertical) => Cell {
            glyph: Glyph::FilledVertical,
            color: Color::Yellow,
        },
        Some(Tile::Empty) | None => BLANK,
    }
}

fn round_over_message(result: &RoundResult) -> (String, Color) {
    let (verdict, color) = match result.outcome {
        Outcome::Won => ("You win!", Color::Green),
        Outcome::Lost => ("You lose!", Color::Red),
    };
    let msg = format!(
        "{} Filled blocks: {} - {:.1}% complete.",
        verdict, result.stats.filled, result.stats.percentage
    );
    (msg, color)
}

pub fn render_round_over(
    stdout: &mut Stdout,
    renderer: &Renderer,
    result: &RoundResult,
) -> io::Result<()> {
    let (x, y) = match renderer.layout {
        Some(layout) => (layout.text_x, layout.footer_y),
        None => (0, 1),
    };
    let (msg, color) = round_over_message(result);
    put_text(stdout, x, y, &msg, color)?;
    put_text(stdout, x, y + 1, "Press r to restart or q to quit.", Color::White)?;
    stdout.flush()
}
