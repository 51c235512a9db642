//! Tests for the module layout.

use super::*;
use crate::source::{TableModule, UniformItems};
use crate::viewport::HeadlessHost;

const STARTS: [usize; 17] = [0, 1, 3, 7, 8, 9, 11, 12, 13, 14, 20, 21, 22, 23, 25, 26, 27];
const ROWS: [u32; 17] = [2, 2, 1, 1, 1, 1, 1, 2, 2, 2, 2, 1, 1, 1, 1, 1, 1];
const COLUMNS: [u32; 17] = [1, 2, 1, 1, 1, 2, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1];

/// 17 tiles on four 100x50 columns with 10px gaps in a 440x200 container.
fn tiles() -> (ModuleLayout<TableModule>, UniformItems, HeadlessHost) {
    let module = TableModule::from_tables(&STARTS, &ROWS, &COLUMNS).with_spacing(10, 10);
    let mut layout =
        ModuleLayout::new(module, Orientation::Vertical, 4, Size::new(100, 50)).unwrap();
    layout.measure(Size::new(440, 200), Insets::default());
    (layout, UniformItems::new(17), HeadlessHost::new())
}

fn attached<D: ModuleDescriptor>(layout: &ModuleLayout<D>) -> Vec<usize> {
    layout.attached().indices().collect()
}

#[test]
fn empty_cell_size_is_rejected() {
    assert!(matches!(
        ModuleLayout::new(TableModule::default(), Orientation::Vertical, 4, Size::ZERO),
        Err(GridError::InvalidConfiguration {
            field: "module_cell_size",
            ..
        })
    ));
}

#[test]
fn spans_map_onto_lane_first_cells() {
    let module = TableModule::from_tables(&[0, 1, 3], &[2, 1, 1], &[1, 2, 1]);
    let mut layout =
        ModuleLayout::new(module, Orientation::Vertical, 4, Size::new(100, 100)).unwrap();
    layout.measure(Size::new(400, 300), Insets::default());
    let mut host = HeadlessHost::new();
    layout
        .layout_children(&UniformItems::new(3), &mut host, None)
        .unwrap();
    assert_eq!(layout.cached_rect(0), Some(Rect::new(0, 0, 100, 200)));
    assert_eq!(layout.cached_rect(1), Some(Rect::new(100, 0, 300, 100)));
    assert_eq!(layout.cached_rect(2), Some(Rect::new(300, 0, 400, 100)));
}

#[test]
fn spacing_joins_spanned_cells() {
    let (mut layout, items, mut host) = tiles();
    layout.layout_children(&items, &mut host, None).unwrap();
    assert_eq!(layout.cached_rect(1), Some(Rect::new(110, 0, 320, 110)));
    assert_eq!(layout.cached_rect(3), Some(Rect::new(330, 60, 430, 110)));
}

#[test]
fn initial_pass_computes_every_rect_but_attaches_visible_ones() {
    let (mut layout, items, mut host) = tiles();
    layout.layout_children(&items, &mut host, None).unwrap();
    assert!((0..17).all(|index| layout.cached_rect(index).is_some()));
    assert_eq!(attached(&layout), (0..10).collect::<Vec<_>>());
    assert_eq!(layout.viewport().content_extent(), 410);
}

#[test]
fn scroll_recycles_and_refills_whole_range() {
    let (mut layout, items, mut host) = tiles();
    layout.layout_children(&items, &mut host, None).unwrap();
    let report = layout.scroll_by(&items, &mut host, 150);
    assert_eq!(report.applied, 150);
    assert_eq!(report.recycled, vec![0, 1, 2, 3]);
    assert_eq!(report.attached, vec![10, 11, 12, 13]);
}

#[test]
fn backward_scroll_recycles_from_the_back() {
    let (mut layout, items, mut host) = tiles();
    layout.layout_children(&items, &mut host, None).unwrap();
    layout.scroll_by(&items, &mut host, 210);
    let report = layout.scroll_by(&items, &mut host, -210);
    let mut sorted = report.recycled.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(report.recycled, sorted);
    assert_eq!(attached(&layout), (0..10).collect::<Vec<_>>());
}

#[test]
fn scroll_is_clamped_to_content() {
    let (mut layout, items, mut host) = tiles();
    layout.layout_children(&items, &mut host, None).unwrap();
    assert_eq!(layout.scroll_by(&items, &mut host, 1000).applied, 210);
    assert_eq!(layout.viewport().offset(), 210);
}

#[test]
fn off_screen_focus_is_revealed() {
    let (mut layout, items, mut host) = tiles();
    layout.layout_children(&items, &mut host, Some(16)).unwrap();
    assert_eq!(layout.viewport().offset(), 210);
    assert!(layout.attached().contains(16));
    assert!(!layout.attached().contains(0));
}

#[test]
fn orientation_change_drops_geometry() {
    let (mut layout, items, mut host) = tiles();
    layout.layout_children(&items, &mut host, None).unwrap();
    layout.set_orientation(Orientation::Horizontal);
    assert_eq!(layout.cached_rect(0), None);
    assert_eq!(layout.viewport().offset(), 0);
}
