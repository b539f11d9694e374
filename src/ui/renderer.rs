/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// This eliminates flicker caused by full-screen redraws.
///
/// The screen is a single fixed composition:
///   HUD bar, category, gallows, masked word, letter board,
///   message bar, help bar.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::round::{LetterStatus, Round};
use crate::sim::session::Session;

// ── Palette ──

const GOLD: Color = Color::Rgb { r: 255, g: 214, b: 0 };
/// White at 30% opacity over the base background.
const FADED_WHITE: Color = Color::Rgb { r: 180, g: 119, b: 126 };
/// Half-strength green/red over the base background, for the letter board.
const HIT_GREEN: Color = Color::Rgb { r: 74, g: 158, b: 36 };
const MISS_RED: Color = Color::Rgb { r: 201, g: 31, b: 36 };
const HUD_BG: Color = Color::Rgb { r: 92, g: 34, b: 42 };

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Explicit background for all "empty" terminal cells.
    ///
    /// On VTE-based Linux terminals (GNOME Terminal, etc.), the inter-row gap
    /// pixels use the background color from the last Clear or the terminal's
    /// configured default. By using the SAME explicit RGB for both
    /// `Clear(ClearType::All)` and every cell's background, the gap color
    /// matches the cell color exactly, eliminating visible horizontal lines.
    const BASE_BG: Color = Color::Rgb { r: 148, g: 61, b: 71 };

    const BLANK: Cell = Cell {
        ch: ' ',
        fg: Color::White,
        bg: Cell::BASE_BG,
    };

    /// Sentinel cell used to invalidate the back buffer.
    /// Different from any real cell, so every position will be diff'd.
    const INVALID: Cell = Cell {
        ch: '?',
        fg: Color::Magenta,
        bg: Color::Magenta,
    };

    /// Normalize bg: Color::Reset → BASE_BG so that every cell gets an
    /// explicit background color (never terminal-default).
    #[inline]
    fn norm_bg(bg: Color) -> Color {
        match bg {
            Color::Reset => Self::BASE_BG,
            other => other,
        }
    }

    fn from_char(c: char, fg: Color, bg: Color) -> Self {
        Cell {
            ch: c,
            fg,
            bg: Self::norm_bg(bg),
        }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer {
            width: w,
            height: h,
            cells: vec![Cell::BLANK; w * h],
        }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y) with given colors. Each char occupies 1 column.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.set(cx, y, Cell::from_char(ch, fg, bg));
            cx += 1;
        }
    }
}

// ── Gallows art ──

/// The empty gallows, drawn in gold.
const GALLOWS_FRAME: [&str; 7] = [
    "  +---+",
    "  |   |",
    "      |",
    "      |",
    "      |",
    "      |",
    "=========",
];

/// Body parts in the order they appear, one per miss:
/// head, torso, arms, legs. Offsets are (col, row) into the frame.
const GALLOWS_PARTS: [(usize, usize, &str); 4] = [
    (2, 2, "O"),
    (2, 3, "|"),
    (1, 3, "/|\\"),
    (1, 4, "/ \\"),
];

// ── Vertical layout ──

const HUD_ROW: usize = 0;
const CATEGORY_ROW: usize = 2;
const ART_ROW: usize = 4;
const WORD_ROW: usize = 12;
const BOARD_ROW: usize = 15;
const MESSAGE_ROW: usize = 19;
const PROMPT_ROW: usize = 21;

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on first frame: back ≠ front for every cell.
        self.back.cells.fill(Cell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, session: &Session) -> io::Result<()> {
        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            // Force full repaint after resize.
            self.back.cells.fill(Cell::INVALID);
            queue!(
                self.writer,
                SetBackgroundColor(Cell::BASE_BG),
                Clear(ClearType::All)
            )?;
        }

        // Build front buffer
        self.front.clear();
        self.compose_game(session);

        // Diff and emit
        self.flush_diff()?;

        // Swap: current front becomes next back
        std::mem::swap(&mut self.front, &mut self.back);

        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        // Set explicit base colors at start of frame.
        // IMPORTANT: Do NOT use ResetColor here — it resets to the terminal's
        // native default, which may differ from BASE_BG and cause line artifacts.
        queue!(
            self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Cell::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                // Position cursor if needed
                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }

                // Set colors only if changed
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }

                queue!(self.writer, Print(cell.ch))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }

    // ── Compose: build front buffer content ──

    fn compose_game(&mut self, s: &Session) {
        let buf_w = self.front.width;

        // ── HUD row ──
        let hud = format!(" GALLOWS   Wins {}   Losses {} ", s.wins, s.losses);
        for x in 0..buf_w {
            self.front
                .set(x, HUD_ROW, Cell::from_char(' ', Color::White, HUD_BG));
        }
        self.front.put_str(0, HUD_ROW, &hud, Color::White, HUD_BG);

        // ── Category, centered ──
        let category = s.round.category();
        let cx = buf_w.saturating_sub(category.chars().count()) / 2;
        self.front
            .put_str(cx, CATEGORY_ROW, category, GOLD, Color::Reset);

        self.compose_gallows(&s.round);
        self.compose_word(&s.round);
        self.compose_letter_board(&s.round);

        // ── Message bar ──
        if !s.message.is_empty() && MESSAGE_ROW < self.front.height {
            let msg = format!(" ◈ {} ", s.message);
            for x in 0..buf_w {
                self.front
                    .set(x, MESSAGE_ROW, Cell::from_char(' ', Color::Black, GOLD));
            }
            self.front.put_str(0, MESSAGE_ROW, &msg, Color::Black, GOLD);
        }

        // ── Blinking new-word prompt once the round has ended ──
        if s.round.is_over() && (s.anim_tick / 8) % 2 == 0 {
            let prompt = "▸▸▸ F2 NEW WORD ◂◂◂";
            let px = buf_w.saturating_sub(prompt.chars().count()) / 2;
            self.front
                .put_str(px, PROMPT_ROW, prompt, GOLD, Color::Reset);
        }

        // ── Help bar ──
        let help_row = self.front.height.saturating_sub(1);
        if help_row > PROMPT_ROW {
            let help = " A-Z Guess   F2 New Word   Esc Quit";
            self.front
                .put_str(0, help_row, help, Color::DarkGrey, Color::Reset);
        }
    }

    /// Gold frame, then one white body part per miss.
    fn compose_gallows(&mut self, round: &Round) {
        let art_w = GALLOWS_FRAME.iter().map(|r| r.len()).max().unwrap_or(0);
        let x0 = self.front.width.saturating_sub(art_w) / 2;

        for (i, line) in GALLOWS_FRAME.iter().enumerate() {
            self.front.put_str(x0, ART_ROW + i, line, GOLD, Color::Reset);
        }
        for &(dx, dy, part) in GALLOWS_PARTS.iter().take(round.stage() as usize) {
            self.front
                .put_str(x0 + dx, ART_ROW + dy, part, Color::White, Color::Reset);
        }
    }

    /// Masked word, one centered row per display line (at most two).
    fn compose_word(&mut self, round: &Round) {
        for (i, row) in round.mask().rows().iter().enumerate() {
            let x = self.front.width.saturating_sub(row.chars().count()) / 2;
            self.front
                .put_str(x, WORD_ROW + i, row, Color::White, Color::Reset);
        }
    }

    /// A–M and N–Z in two rows, colored by guess status.
    /// Untried letters fade out once the round has ended.
    fn compose_letter_board(&mut self, round: &Round) {
        let over = round.is_over();
        for (row_idx, range) in [('A'..='M'), ('N'..='Z')].into_iter().enumerate() {
            let letters: Vec<char> = range.collect();
            let width = letters.len() * 2 - 1;
            let x0 = self.front.width.saturating_sub(width) / 2;
            let y = BOARD_ROW + row_idx * 2;

            for (i, letter) in letters.iter().enumerate() {
                let (fg, bg) = match round.letter_status(*letter) {
                    LetterStatus::Hit => (Color::White, HIT_GREEN),
                    LetterStatus::Miss => (Color::White, MISS_RED),
                    LetterStatus::Untried if over => (FADED_WHITE, Color::Reset),
                    LetterStatus::Untried => (Color::White, Color::Reset),
                };
                self.front.set(x0 + i * 2, y, Cell::from_char(*letter, fg, bg));
            }
        }
    }
}
