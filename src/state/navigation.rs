//! D-pad navigation: direction → movement mapping, spatial focus search and
//! the focus-out policy applied when a search finds nothing.

use super::selection::PendingDirection;
use crate::model::{Direction, ItemGeometry, Orientation, Rect};

/// Map a D-pad direction to a movement along the list.
///
/// On a horizontal grid Left/Right move between items and Up/Down between
/// rows; a vertical grid swaps the two.
pub fn movement_for(direction: Direction, orientation: Orientation) -> PendingDirection {
    match (orientation, direction) {
        (Orientation::Horizontal, Direction::Left) => PendingDirection::Prev,
        (Orientation::Horizontal, Direction::Right) => PendingDirection::Next,
        (Orientation::Horizontal, Direction::Up) => PendingDirection::PrevRow,
        (Orientation::Horizontal, Direction::Down) => PendingDirection::NextRow,
        (Orientation::Vertical, Direction::Up) => PendingDirection::Prev,
        (Orientation::Vertical, Direction::Down) => PendingDirection::Next,
        (Orientation::Vertical, Direction::Left) => PendingDirection::PrevRow,
        (Orientation::Vertical, Direction::Right) => PendingDirection::NextRow,
    }
}

/// Whether focus may leave the container through each end of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FocusOutPolicy {
    /// Focus may leave before the first item.
    pub front: bool,
    /// Focus may leave after the last item.
    pub end: bool,
}

impl FocusOutPolicy {
    /// Whether a failed search for `movement` is consumed by the container.
    ///
    /// Along-the-list misses are consumed unless focus-out is allowed at that
    /// end, and always while a scroll is in flight. Row misses propagate.
    pub fn consumes(&self, movement: PendingDirection, scrolling: bool) -> bool {
        match movement {
            PendingDirection::Next => scrolling || !self.end,
            PendingDirection::Prev => scrolling || !self.front,
            PendingDirection::PrevRow | PendingDirection::NextRow | PendingDirection::None => false,
        }
    }
}

/// Focus-search collaborator: picks the next item in a direction.
pub trait FocusFinder {
    /// Index of the best candidate to move to from `current` in `direction`.
    ///
    /// `candidates` holds rectangles in one common coordinate space and may
    /// include `current` itself.
    fn find_next(
        &self,
        current: usize,
        direction: Direction,
        candidates: &[ItemGeometry],
    ) -> Option<usize>;
}

/// Geometric focus search over item rectangles.
///
/// Candidates strictly beyond the source edge in the search direction are
/// eligible. Candidates overlapping the source on the perpendicular axis (in
/// the beam) win over those that don't; ties break by the weighted distance
/// `13 * major² + minor²`, then by lower index.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpatialFocusFinder;

impl SpatialFocusFinder {
    fn is_candidate(source: &Rect, dest: &Rect, direction: Direction) -> bool {
        match direction {
            Direction::Left => {
                (source.right > dest.right || source.left >= dest.right) && source.left > dest.left
            }
            Direction::Right => {
                (source.left < dest.left || source.right <= dest.left) && source.right < dest.right
            }
            Direction::Up => {
                (source.bottom > dest.bottom || source.top >= dest.bottom) && source.top > dest.top
            }
            Direction::Down => {
                (source.top < dest.top || source.bottom <= dest.top) && source.bottom < dest.bottom
            }
        }
    }

    fn in_beam(source: &Rect, dest: &Rect, direction: Direction) -> bool {
        if direction.is_horizontal() {
            dest.bottom > source.top && dest.top < source.bottom
        } else {
            dest.right > source.left && dest.left < source.right
        }
    }

    fn score(source: &Rect, dest: &Rect, direction: Direction) -> i64 {
        let major = match direction {
            Direction::Left => source.left - dest.right,
            Direction::Right => dest.left - source.right,
            Direction::Up => source.top - dest.bottom,
            Direction::Down => dest.top - source.bottom,
        }
        .max(0) as i64;
        let minor = if direction.is_horizontal() {
            (source.center_y() - dest.center_y()) as i64
        } else {
            (source.center_x() - dest.center_x()) as i64
        };
        13 * major * major + minor * minor
    }
}

impl FocusFinder for SpatialFocusFinder {
    fn find_next(
        &self,
        current: usize,
        direction: Direction,
        candidates: &[ItemGeometry],
    ) -> Option<usize> {
        let source = candidates.iter().find(|g| g.index == current)?.rect;
        candidates
            .iter()
            .filter(|g| g.index != current && !g.rect.size().is_empty())
            .filter(|g| Self::is_candidate(&source, &g.rect, direction))
            .min_by_key(|g| {
                (
                    !Self::in_beam(&source, &g.rect, direction),
                    Self::score(&source, &g.rect, direction),
                    g.index,
                )
            })
            .map(|g| g.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two rows of 200x100 cells, `columns` wide.
    fn two_rows(columns: usize) -> Vec<ItemGeometry> {
        (0..columns * 2)
            .map(|index| {
                let left = (index / 2) as i32 * 200;
                let top = (index % 2) as i32 * 100;
                ItemGeometry {
                    index,
                    rect: Rect::new(left, top, left + 200, top + 100),
                }
            })
            .collect()
    }

    mod movement {
        use super::*;

        #[test]
        fn horizontal_grid_maps_left_right_to_items() {
            assert_eq!(movement_for(Direction::Left, Orientation::Horizontal), PendingDirection::Prev);
            assert_eq!(movement_for(Direction::Down, Orientation::Horizontal), PendingDirection::NextRow);
        }

        #[test]
        fn vertical_grid_maps_up_down_to_items() {
            assert_eq!(movement_for(Direction::Down, Orientation::Vertical), PendingDirection::Next);
            assert_eq!(movement_for(Direction::Left, Orientation::Vertical), PendingDirection::PrevRow);
        }
    }

    mod focus_out {
        use super::*;

        #[test]
        fn default_policy_keeps_focus_at_both_ends() {
            let policy = FocusOutPolicy::default();
            assert!(policy.consumes(PendingDirection::Next, false));
            assert!(policy.consumes(PendingDirection::Prev, false));
        }

        #[test]
        fn allowed_end_lets_event_propagate_unless_scrolling() {
            let policy = FocusOutPolicy {
                front: false,
                end: true,
            };
            assert!(!policy.consumes(PendingDirection::Next, false));
            assert!(policy.consumes(PendingDirection::Next, true));
            assert!(policy.consumes(PendingDirection::Prev, false));
        }

        #[test]
        fn row_misses_always_propagate() {
            let policy = FocusOutPolicy::default();
            assert!(!policy.consumes(PendingDirection::NextRow, true));
            assert!(!policy.consumes(PendingDirection::PrevRow, false));
        }
    }

    mod spatial {
        use super::*;

        #[test]
        fn right_picks_same_row_neighbour() {
            let rects = two_rows(4);
            assert_eq!(SpatialFocusFinder.find_next(0, Direction::Right, &rects), Some(2));
            assert_eq!(SpatialFocusFinder.find_next(3, Direction::Right, &rects), Some(5));
        }

        #[test]
        fn down_picks_cell_below() {
            let rects = two_rows(4);
            assert_eq!(SpatialFocusFinder.find_next(2, Direction::Down, &rects), Some(3));
            assert_eq!(SpatialFocusFinder.find_next(3, Direction::Down, &rects), None);
        }

        #[test]
        fn edges_report_no_candidate() {
            let rects = two_rows(4);
            assert_eq!(SpatialFocusFinder.find_next(0, Direction::Left, &rects), None);
            assert_eq!(SpatialFocusFinder.find_next(6, Direction::Right, &rects), None);
            assert_eq!(SpatialFocusFinder.find_next(0, Direction::Up, &rects), None);
        }

        #[test]
        fn beam_candidate_beats_closer_diagonal() {
            let rects = vec![
                ItemGeometry { index: 0, rect: Rect::new(0, 0, 100, 100) },
                ItemGeometry { index: 1, rect: Rect::new(110, 150, 210, 250) },
                ItemGeometry { index: 2, rect: Rect::new(400, 0, 500, 100) },
            ];
            assert_eq!(SpatialFocusFinder.find_next(0, Direction::Right, &rects), Some(2));
        }

        #[test]
        fn spanning_tile_is_reachable_from_both_rows() {
            let rects = vec![
                ItemGeometry { index: 0, rect: Rect::new(0, 0, 100, 100) },
                ItemGeometry { index: 1, rect: Rect::new(0, 100, 100, 200) },
                ItemGeometry { index: 2, rect: Rect::new(100, 0, 200, 200) },
            ];
            assert_eq!(SpatialFocusFinder.find_next(0, Direction::Right, &rects), Some(2));
            assert_eq!(SpatialFocusFinder.find_next(1, Direction::Right, &rects), Some(2));
        }

        #[test]
        fn unknown_current_finds_nothing() {
            assert_eq!(SpatialFocusFinder.find_next(9, Direction::Right, &two_rows(2)), None);
        }
    }
}
