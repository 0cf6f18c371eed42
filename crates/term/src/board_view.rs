//! BoardView: maps a `core::Session` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It also owns the projection between terminal cells
//! and play-area coordinates, so mouse clicks land on exactly the pattern drawn
//! under the pointer.

use crate::core::{Pattern, PatternId, Session};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PlayArea, Point, Rect, SessionState, Size, SPREAD_FACTOR};

/// Columns reserved to the right of the board for the status panel.
pub const PANEL_WIDTH: u16 = 24;

const BOARD_BG: Rgb = Rgb::new(24, 24, 32);

const PALETTE: [Rgb; 10] = [
    Rgb::new(220, 80, 80),
    Rgb::new(80, 180, 220),
    Rgb::new(240, 200, 70),
    Rgb::new(110, 210, 120),
    Rgb::new(190, 120, 220),
    Rgb::new(255, 150, 40),
    Rgb::new(90, 110, 230),
    Rgb::new(230, 120, 170),
    Rgb::new(150, 150, 150),
    Rgb::new(60, 200, 170),
];

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Region of the play area that can hold patterns, including the scatter margin
pub fn world_bounds(area: PlayArea) -> Rect {
    let reach = area.token_size().width * (2.0 * SPREAD_FACTOR + 1.0);
    Rect::centered(
        area.center(),
        Size::new(area.width.max(reach), area.height.max(reach)),
    )
}

/// Linear mapping between play-area units and terminal cells.
///
/// Terminal glyphs are about twice as tall as wide, so one unit spans twice as many
/// columns as rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    world: Rect,
    origin_col: i32,
    origin_row: i32,
    cols: i32,
    rows: i32,
    cols_per_unit: f64,
    rows_per_unit: f64,
}

impl Projection {
    /// Fit `area` into the viewport, leaving room for a border and the side panel.
    pub fn fit(area: PlayArea, viewport: Viewport) -> Self {
        let world = world_bounds(area);
        let world_w = world.right - world.left;
        let world_h = world.bottom - world.top;

        let avail_cols = viewport.width.saturating_sub(PANEL_WIDTH + 2) as f64;
        let avail_rows = viewport.height.saturating_sub(2) as f64;

        let cols_per_unit = (avail_cols / world_w).min(2.0 * avail_rows / world_h);
        let rows_per_unit = cols_per_unit / 2.0;

        Self {
            world,
            origin_col: 1,
            origin_row: 1,
            cols: (world_w * cols_per_unit).floor() as i32,
            rows: (world_h * rows_per_unit).floor() as i32,
            cols_per_unit,
            rows_per_unit,
        }
    }

    /// Board size in cells, excluding the border
    pub fn board_cells(&self) -> (i32, i32) {
        (self.cols, self.rows)
    }

    fn col_of(&self, x: f64) -> f64 {
        self.origin_col as f64 + (x - self.world.left) * self.cols_per_unit
    }

    fn row_of(&self, y: f64) -> f64 {
        self.origin_row as f64 + (y - self.world.top) * self.rows_per_unit
    }

    /// Cells whose centres fall inside `rect`, as inclusive `(c0, r0, c1, r1)`
    pub fn rect_cells(&self, rect: Rect) -> (i32, i32, i32, i32) {
        let c0 = (self.col_of(rect.left) - 0.5).ceil() as i32;
        let c1 = (self.col_of(rect.right) - 0.5).floor() as i32;
        let r0 = (self.row_of(rect.top) - 0.5).ceil() as i32;
        let r1 = (self.row_of(rect.bottom) - 0.5).floor() as i32;
        (c0, r0, c1, r1)
    }

    /// Play-area point at the centre of a terminal cell, if the cell is on the board
    pub fn to_point(&self, column: u16, row: u16) -> Option<Point> {
        let c = column as i32 - self.origin_col;
        let r = row as i32 - self.origin_row;
        if c < 0 || r < 0 || c >= self.cols || r >= self.rows {
            return None;
        }
        Some(Point::new(
            self.world.left + (c as f64 + 0.5) / self.cols_per_unit,
            self.world.top + (r as f64 + 0.5) / self.rows_per_unit,
        ))
    }
}

/// Glyph shown on patterns of `type_id`
pub fn type_glyph(type_id: u32) -> char {
    char::from(b'A' + (type_id % 26) as u8)
}

fn type_color(type_id: u32) -> Rgb {
    PALETTE[type_id as usize % PALETTE.len()]
}

/// A lightweight terminal renderer for a session.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoardView;

impl BoardView {
    pub fn projection(&self, session: &Session, viewport: Viewport) -> Projection {
        Projection::fit(session.area(), viewport)
    }

    pub fn render(&self, session: &Session, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(session, viewport, &mut fb);
        fb
    }

    /// Render the session into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, session: &Session, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.reset(viewport.width, viewport.height);

        let proj = self.projection(session, viewport);
        let (cols, rows) = proj.board_cells();
        let frame = CellStyle::new(Rgb::new(160, 160, 170), Rgb::new(0, 0, 0));

        fb.fill_rect(1, 1, cols, rows, ' ', CellStyle::new(BOARD_BG, BOARD_BG));
        fb.draw_box(0, 0, cols + 1, rows + 1, frame);

        let hinted = |id: PatternId| session.hint().is_some_and(|h| h.contains(&id));

        for layer in session.deck().layers() {
            for &id in layer {
                let pattern = &session.patterns()[id.index()];
                if pattern.cleared {
                    continue;
                }
                let covered = session.is_covered(id);
                self.draw_pattern(fb, &proj, pattern, covered, hinted(id));
            }
        }

        self.draw_side_panel(fb, session, cols + 3);

        match session.state() {
            SessionState::Won => self.draw_banner(fb, cols, rows, " ALL CLEAR! "),
            SessionState::Lost => self.draw_banner(fb, cols, rows, " GAME OVER "),
            _ => {}
        }
    }

    fn draw_pattern(
        &self,
        fb: &mut FrameBuffer,
        proj: &Projection,
        pattern: &Pattern,
        covered: bool,
        hinted: bool,
    ) {
        let (c0, r0, c1, r1) = proj.rect_cells(pattern.rect());
        if c1 < c0 || r1 < r0 {
            return;
        }

        let mut color = type_color(pattern.type_id);
        if covered {
            color = color.darker();
        }
        let fill = CellStyle::new(Rgb::new(10, 10, 10), color);
        let mut edge = CellStyle::new(Rgb::new(20, 20, 20), color);
        if hinted {
            edge = CellStyle::new(Rgb::new(255, 255, 255), color).bold();
        }

        fb.fill_rect(c0, r0, c1, r1, ' ', fill);
        fb.draw_box(c0, r0, c1, r1, edge);
        fb.put_char(
            (c0 + c1) / 2,
            (r0 + r1) / 2,
            type_glyph(pattern.type_id),
            fill.bold(),
        );
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, session: &Session, x: i32) {
        let label = CellStyle::default().bold();
        let value = CellStyle::default();
        let dim = CellStyle::new(Rgb::new(110, 110, 120), Rgb::new(0, 0, 0));

        let remaining = session.remaining_time().as_secs();
        let (hints_used, hints) = session.hint_uses();
        let (undos_used, undos) = session.undo_uses();
        let left = session.deck().remaining();

        let mut y = 1;
        let mut line = |fb: &mut FrameBuffer, name: &str, text: String| {
            fb.put_str(x, y, name, label);
            fb.put_str(x + 7, y, &text, value);
            y += 1;
        };
        line(fb, "SCORE", session.score().to_string());
        line(fb, "TIME", format!("{:02}:{:02}", remaining / 60, remaining % 60));
        line(fb, "LEFT", left.to_string());
        line(fb, "HINT", format!("{}/{}", hints - hints_used, hints));
        line(fb, "UNDO", format!("{}/{}", undos - undos_used, undos));

        let mut y = 7;
        fb.put_str(x, y, "STORE", label);
        y += 1;
        for slot in 0..session.storage_limit() {
            let cx = x + (slot as i32 % 8) * 2;
            let cy = y + slot as i32 / 8;
            match session.storage().get(slot) {
                Some(stored) => {
                    let color = type_color(stored.type_id);
                    let style = CellStyle::new(Rgb::new(10, 10, 10), color).bold();
                    fb.put_char(cx, cy, type_glyph(stored.type_id), style);
                }
                None => fb.put_char(cx, cy, '·', dim),
            }
        }

        let y = y + 3;
        for (i, help) in ["click  pick", "h      hint", "u      undo", "r      restart", "q      quit"]
            .iter()
            .enumerate()
        {
            fb.put_str(x, y + i as i32, help, dim);
        }
    }

    fn draw_banner(&self, fb: &mut FrameBuffer, cols: i32, rows: i32, text: &str) {
        let width = text.chars().count() as i32;
        let x = 1 + (cols - width).max(0) / 2;
        let y = 1 + rows / 2;
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, y, text, style);
    }
}
