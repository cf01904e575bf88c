/// Mapping between world coordinates and terminal cells.
///
/// The world has its origin in the bottom-left corner with y growing upward.
/// The terminal has row 0 at the top; that row is reserved for the HUD, so the
/// playfield covers rows `1..rows`.

use crate::config::GameConfig;

/// Rows above the playfield.
pub const HUD_ROWS: u16 = 1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Viewport { cols: cols.max(1), rows: rows.max(HUD_ROWS + 1) }
    }

    fn field_rows(&self) -> u16 {
        self.rows - HUD_ROWS
    }

    /// Cell containing a world point, or `None` when the point is outside the
    /// world rectangle.
    pub fn to_cell(&self, x: f64, y: f64, config: &GameConfig) -> Option<(u16, u16)> {
        if !(0.0..config.width).contains(&x) || !(0.0..config.height).contains(&y) {
            return None;
        }
        let col = (x / config.width * self.cols as f64) as u16;
        let from_bottom = (y / config.height * self.field_rows() as f64) as u16;
        let row = HUD_ROWS + self.field_rows() - 1 - from_bottom;
        Some((col.min(self.cols - 1), row))
    }

    /// World point at the centre of a cell.  Cells in the HUD map onto the
    /// top edge of the playfield.
    pub fn to_world(&self, col: u16, row: u16, config: &GameConfig) -> (f64, f64) {
        let col = col.min(self.cols - 1);
        let row = row.clamp(HUD_ROWS, self.rows - 1);
        let from_bottom = (HUD_ROWS + self.field_rows() - 1 - row) as f64;
        let x = (col as f64 + 0.5) / self.cols as f64 * config.width;
        let y = (from_bottom + 0.5) / self.field_rows() as f64 * config.height;
        (x, y)
    }
}
