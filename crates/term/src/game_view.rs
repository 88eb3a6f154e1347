//! GameView: draws a `SessionSnapshot` plus front-end state into a framebuffer.
//!
//! Pure (no I/O), so layout can be unit-tested.

use crate::core::{SessionSnapshot, Variant};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{Pos, TileKind};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const CURSOR_BG: Rgb = Rgb::new(90, 90, 120);
const SELECTED_BG: Rgb = Rgb::new(170, 140, 40);
const CLEARED_BG: Rgb = Rgb::new(110, 40, 40);

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

/// Front-end state drawn on top of the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayView<'a> {
    pub cursor: Pos,
    pub selected: Option<Pos>,
    /// Cells removed by the most recent cascade iteration
    pub cleared: &'a [Pos],
    pub seconds_left: u32,
    pub paused: bool,
    pub variant: Variant,
}

impl Default for PlayView<'_> {
    fn default() -> Self {
        Self {
            cursor: Pos::new(0, 0),
            selected: None,
            cleared: &[],
            seconds_left: 0,
            paused: false,
            variant: Variant::Classic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

pub struct GameView {
    /// Terminal columns per board cell
    cell_w: u16,
    /// Terminal rows per board cell
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 3x1 keeps tiles roughly square and leaves room for a gap.
        Self {
            cell_w: 3,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Board-local placement computed once per frame
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Top-left terminal position of a board cell, if it fits the viewport
    pub fn cell_origin(&self, snap: &SessionSnapshot, viewport: Viewport, pos: Pos) -> Option<(u16, u16)> {
        if pos.row >= snap.rows || pos.col >= snap.cols {
            return None;
        }
        let frame = self.frame(snap, viewport);
        let x = frame.x + 1 + u16::try_from(pos.col).ok()? * self.cell_w;
        let y = frame.y + 1 + u16::try_from(pos.row).ok()? * self.cell_h;
        (x < viewport.width && y < viewport.height).then_some((x, y))
    }

    /// Render into a reused framebuffer (no allocation once sized)
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        play: &PlayView<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let frame = self.frame(snap, viewport);
        let border = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            frame.w.saturating_sub(2),
            frame.h.saturating_sub(2),
            ' ',
            Style::new(BOARD_BG, BOARD_BG),
        );
        draw_border(fb, frame, border);

        for row in 0..snap.rows {
            for col in 0..snap.cols {
                let pos = Pos::new(row, col);
                let bg = if play.selected == Some(pos) {
                    SELECTED_BG
                } else if play.cursor == pos {
                    CURSOR_BG
                } else if play.cleared.contains(&pos) {
                    CLEARED_BG
                } else {
                    BOARD_BG
                };
                let glyph = match snap.cell(row, col).flatten() {
                    Some(kind) => {
                        let (ch, fg) = tile_glyph(kind);
                        let style = Style::new(fg, bg);
                        Glyph::new(ch, if kind.is_special() { style.bold() } else { style })
                    }
                    None => Glyph::new('·', Style::new(Rgb::new(90, 90, 100), bg).dim()),
                };
                self.draw_cell(fb, frame, pos, glyph);
            }
        }

        self.draw_side_panel(fb, snap, play, viewport, frame);

        if play.paused {
            draw_overlay_text(fb, frame, "PAUSED");
        } else if play.seconds_left == 0 {
            draw_overlay_text(fb, frame, "TIME UP");
        }
    }

    /// Convenience helper that allocates a new framebuffer
    pub fn render(&self, snap: &SessionSnapshot, play: &PlayView<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, play, viewport, &mut fb);
        fb
    }

    fn frame(&self, snap: &SessionSnapshot, viewport: Viewport) -> Frame {
        let cols = u16::try_from(snap.cols).unwrap_or(u16::MAX);
        let rows = u16::try_from(snap.rows).unwrap_or(u16::MAX);
        let w = cols.saturating_mul(self.cell_w).saturating_add(2);
        let h = rows.saturating_mul(self.cell_h).saturating_add(2);
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame { x, y, w, h }
    }

    fn draw_cell(&self, fb: &mut FrameBuffer, frame: Frame, pos: Pos, glyph: Glyph) {
        let (Ok(col), Ok(row)) = (u16::try_from(pos.col), u16::try_from(pos.row)) else {
            return;
        };
        let px = frame.x + 1 + col * self.cell_w;
        let py = frame.y + 1 + row * self.cell_h;
        let pad = Style::new(glyph.style.bg, glyph.style.bg);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', pad);
        fb.set(px + self.cell_w / 2, py + self.cell_h / 2, glyph);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        play: &PlayView<'_>,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = Style::default().bold();
        let value = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = frame.y;
        let mut field = |fb: &mut FrameBuffer, name: &str, n: u32| {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), n, value);
            y = y.saturating_add(3);
        };
        field(fb, "SCORE", snap.score);
        field(fb, "COINS", snap.currency);
        field(fb, "MOVES", snap.moves);
        field(fb, "COMBO", snap.combo);

        fb.put_str(panel_x, y, "TIME", label);
        let mins = play.seconds_left / 60;
        let secs = play.seconds_left % 60;
        let x = fb.put_u32(panel_x, y + 1, mins, value);
        fb.put_char(x, y + 1, ':', value);
        let x = x.saturating_add(1);
        if secs < 10 {
            fb.put_char(x, y + 1, '0', value);
            fb.put_u32(x + 1, y + 1, secs, value);
        } else {
            fb.put_u32(x, y + 1, secs, value);
        }
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "MODE", label);
        fb.put_str(panel_x, y + 1, play.variant.as_str(), value);
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: Style) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }
    fb.put_char(x, y, '╭', style);
    fb.put_char(x + w - 1, y, '╮', style);
    fb.put_char(x, y + h - 1, '╰', style);
    fb.put_char(x + w - 1, y + h - 1, '╯', style);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, frame: Frame, text: &str) {
    let text_w = u16::try_from(text.chars().count()).unwrap_or(frame.w);
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    let y = frame.y.saturating_add(frame.h / 2);
    let style = Style::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
    fb.put_str(x, y, text, style);
}

/// Character and color for each tile kind
pub fn tile_glyph(kind: TileKind) -> (char, Rgb) {
    match kind {
        TileKind::Burger => ('●', Rgb::new(220, 150, 60)),
        TileKind::Brownie => ('■', Rgb::new(150, 90, 50)),
        TileKind::Chicken => ('▲', Rgb::new(240, 210, 110)),
        TileKind::Roll => ('◆', Rgb::new(120, 200, 120)),
        TileKind::Fries => ('♣', Rgb::new(250, 230, 60)),
        TileKind::Sauce => ('♥', Rgb::new(220, 60, 60)),
        TileKind::Cola => ('◎', Rgb::new(90, 160, 250)),
        TileKind::Shake => ('★', Rgb::new(240, 130, 220)),
    }
}
