//! [`ViewHost`] backed by terminal cells.

use super::constants::{PIXELS_PER_COLUMN, PIXELS_PER_ROW, TILE_SIZE};
use crate::model::{Rect, Size, ViewHandle};
use crate::viewport::{MeasureSpec, ViewHost};
use std::collections::HashMap;
use tracing::trace;

/// One materialized tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    /// Adapter position.
    pub index: usize,
    /// View-space pixel rectangle, once placed.
    pub rect: Option<Rect>,
    /// Highlight scale.
    pub scale: f32,
}

/// Host that keeps tile placements for the renderer.
///
/// Handles are recycled through a free list so a long scroll reuses the
/// same small set of views.
#[derive(Debug, Default)]
pub struct TerminalHost {
    next_handle: u64,
    pool: Vec<ViewHandle>,
    tiles: HashMap<ViewHandle, Tile>,
    dirty: bool,
}

impl TerminalHost {
    /// An empty host.
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            ..Self::default()
        }
    }

    /// Tile bound to `index`, if one is live.
    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.values().find(|tile| tile.index == index)
    }

    /// Number of live tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// True when no tile is live.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Return and clear the redraw flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl ViewHost for TerminalHost {
    fn obtain_view(&mut self, index: usize) -> ViewHandle {
        let view = self.pool.pop().unwrap_or_else(|| {
            let view = ViewHandle::new(self.next_handle);
            self.next_handle += 1;
            view
        });
        self.tiles.insert(
            view,
            Tile {
                index,
                rect: None,
                scale: 1.0,
            },
        );
        trace!(index, %view, "tile obtained");
        view
    }

    fn recycle_view(&mut self, view: ViewHandle) {
        if self.tiles.remove(&view).is_some() {
            self.pool.push(view);
            self.dirty = true;
        }
    }

    fn measure(&mut self, _view: ViewHandle, width: MeasureSpec, height: MeasureSpec) -> Size {
        let pick = |spec: MeasureSpec, natural: i32| match spec {
            MeasureSpec::Exactly(px) => px,
            MeasureSpec::Unspecified => natural,
        };
        Size::new(pick(width, TILE_SIZE.width), pick(height, TILE_SIZE.height))
    }

    fn place(&mut self, view: ViewHandle, rect: Rect) {
        if let Some(tile) = self.tiles.get_mut(&view) {
            tile.rect = Some(rect);
            self.dirty = true;
        }
    }

    fn set_scale(&mut self, view: ViewHandle, scale: f32) {
        if let Some(tile) = self.tiles.get_mut(&view) {
            tile.scale = scale;
            self.dirty = true;
        }
    }

    fn invalidate(&mut self) {
        self.dirty = true;
    }
}

/// Pixel size of a terminal area of `columns` x `rows` cells.
pub fn pixels_for_cells(columns: u16, rows: u16) -> Size {
    Size::new(
        i32::from(columns) * PIXELS_PER_COLUMN,
        i32::from(rows) * PIXELS_PER_ROW,
    )
}

/// Map a view-space pixel rectangle onto cells of `area`, clipped to it.
///
/// A highlight scale above 1.0 grows the rectangle around its center
/// before mapping. Returns `None` when nothing of the tile is visible.
pub fn to_cells(rect: Rect, scale: f32, area: ratatui::layout::Rect) -> Option<ratatui::layout::Rect> {
    let rect = scaled(rect, scale);
    let left = rect.left.div_euclid(PIXELS_PER_COLUMN);
    let top = rect.top.div_euclid(PIXELS_PER_ROW);
    let right = (rect.right + PIXELS_PER_COLUMN - 1).div_euclid(PIXELS_PER_COLUMN);
    let bottom = (rect.bottom + PIXELS_PER_ROW - 1).div_euclid(PIXELS_PER_ROW);

    let left = left.max(0);
    let top = top.max(0);
    let right = right.min(i32::from(area.width));
    let bottom = bottom.min(i32::from(area.height));
    if left >= right || top >= bottom {
        return None;
    }

    let cell = |value: i32| u16::try_from(value).unwrap_or(u16::MAX);
    Some(ratatui::layout::Rect::new(
        area.x.saturating_add(cell(left)),
        area.y.saturating_add(cell(top)),
        cell(right - left),
        cell(bottom - top),
    ))
}

fn scaled(rect: Rect, scale: f32) -> Rect {
    if scale.is_nan() || scale <= 1.0 {
        return rect;
    }
    let grow_x = ((rect.width() as f32 * (scale - 1.0)) / 2.0).round() as i32;
    let grow_y = ((rect.height() as f32 * (scale - 1.0)) / 2.0).round() as i32;
    Rect::new(
        rect.left - grow_x,
        rect.top - grow_y,
        rect.right + grow_x,
        rect.bottom + grow_y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> ratatui::layout::Rect {
        ratatui::layout::Rect::new(0, 1, 40, 10)
    }

    #[test]
    fn recycled_handles_are_reused() {
        let mut host = TerminalHost::new();
        let first = host.obtain_view(0);
        host.recycle_view(first);
        let second = host.obtain_view(5);
        assert_eq!(first, second);
        assert_eq!(host.tile(5).map(|tile| tile.index), Some(5));
        assert!(host.tile(0).is_none());
    }

    #[test]
    fn placement_marks_host_dirty() {
        let mut host = TerminalHost::new();
        let view = host.obtain_view(0);
        assert!(!host.take_dirty());
        host.place(view, Rect::new(0, 0, 200, 100));
        assert!(host.take_dirty());
        assert!(!host.take_dirty());
    }

    #[test]
    fn pixel_rect_maps_to_cells_inside_area() {
        let cells = to_cells(Rect::new(200, 100, 400, 200), 1.0, area()).unwrap();
        assert_eq!(cells, ratatui::layout::Rect::new(20, 5, 20, 4));
    }

    #[test]
    fn partially_visible_tile_is_clipped() {
        let cells = to_cells(Rect::new(-50, 0, 150, 100), 1.0, area()).unwrap();
        assert_eq!(cells.x, 0);
        assert_eq!(cells.width, 15);
        assert!(to_cells(Rect::new(-300, 0, -100, 100), 1.0, area()).is_none());
    }

    #[test]
    fn scale_grows_tile_around_center() {
        let plain = to_cells(Rect::new(100, 50, 300, 150), 1.0, area()).unwrap();
        let scaled = to_cells(Rect::new(100, 50, 300, 150), 1.1, area()).unwrap();
        assert!(scaled.width > plain.width);
        assert!(scaled.x < plain.x);
    }
}
