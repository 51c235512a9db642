//! End-to-end scenarios for the grid core, driven through the public API
//! with a headless host.

use std::time::Duration;
use tvgrid::container::GridView;
use tvgrid::layout::{GridLayout, LayoutEngine, ModuleLayout};
use tvgrid::model::{Insets, Orientation, Rect, Size};
use tvgrid::source::{TableModule, UniformItems};
use tvgrid::viewport::HeadlessHost;

fn horizontal_grid(lanes: usize, count: usize, size: Size) -> (GridView<UniformItems>, HeadlessHost) {
    let engine = GridLayout::new(Orientation::Horizontal, lanes).unwrap();
    let mut grid = GridView::new(Box::new(engine)).with_provider(UniformItems::new(count));
    let mut host = HeadlessHost::new();
    grid.measure(&mut host, size, Insets::default()).unwrap();
    (grid, host)
}

#[test]
fn two_row_grid_packs_items_column_by_column() {
    let mut layout = GridLayout::new(Orientation::Horizontal, 2).unwrap();
    let items = UniformItems::new(10);
    let mut host = HeadlessHost::new();
    layout.measure(Size::new(1000, 300), Insets::default());
    layout.layout_children(&items, &mut host, None).unwrap();

    for index in 0..10 {
        let rect = layout.item_rect(&items, index).unwrap();
        let column = (index / 2) as i32;
        let row = (index % 2) as i32;
        assert_eq!(
            rect,
            Rect::new(column * 200, row * 100, column * 200 + 200, row * 100 + 100),
            "item {index}"
        );
    }
}

#[test]
fn module_spans_cover_their_cells() {
    let module = TableModule::from_tables(&[0, 1, 3], &[2, 1, 1], &[1, 2, 1]);
    let mut layout =
        ModuleLayout::new(module, Orientation::Vertical, 4, Size::new(100, 100)).unwrap();
    let items = UniformItems::new(3);
    let mut host = HeadlessHost::new();
    layout.measure(Size::new(400, 300), Insets::default());
    layout.layout_children(&items, &mut host, None).unwrap();

    // two cells tall in the first column
    assert_eq!(layout.item_rect(&items, 0).unwrap(), Rect::new(0, 0, 100, 200));
    // two cells wide next to it
    assert_eq!(layout.item_rect(&items, 1).unwrap(), Rect::new(100, 0, 300, 100));
    // the single cell at index 3
    assert_eq!(layout.item_rect(&items, 2).unwrap(), Rect::new(300, 0, 400, 100));
}

#[test]
fn off_screen_selection_scrolls_item_center_to_viewport_center() {
    let (mut grid, mut host) = horizontal_grid(1, 20, Size::new(600, 100));
    assert_eq!(grid.engine().viewport().offset(), 0);

    grid.set_selected_position(&mut host, 5);

    // item 5 spans 1000..1200, the viewport center sits at 300
    assert_eq!(grid.engine().viewport().offset(), 1100 - 300);
    assert_eq!(grid.selected_position(), Some(5));
    assert!(grid.engine().attached().contains(5));
}

#[test]
fn smooth_selection_lands_on_the_same_offset() {
    let (mut grid, mut host) = horizontal_grid(1, 20, Size::new(600, 100));
    grid.set_selected_position_smooth(&mut host, 5, Duration::ZERO);
    assert!(grid.is_animating());

    let mut now = Duration::ZERO;
    while grid.is_animating() && now < Duration::from_secs(2) {
        now += Duration::from_millis(16);
        grid.tick(&mut host, now);
    }

    assert_eq!(grid.engine().viewport().offset(), 800);
    assert_eq!(grid.selected_position(), Some(5));
}

#[test]
fn forward_scroll_past_last_item_is_clamped() {
    let (mut grid, mut host) = horizontal_grid(2, 20, Size::new(1000, 300));
    let max = grid.engine().viewport().max_scroll();
    assert_eq!(max, 1000);

    let applied = grid.scroll_by(&mut host, 300);
    assert_eq!(applied, 300);
    let applied = grid.scroll_by(&mut host, 5000);
    assert_eq!(applied, max - 300);
    assert_eq!(grid.engine().viewport().offset(), max);
    assert_eq!(grid.scroll_by(&mut host, 1), 0);
}

#[test]
fn shrinking_item_count_clamps_focus_to_last_item() {
    let (mut grid, mut host) = horizontal_grid(2, 10, Size::new(1000, 300));
    grid.set_selected_position(&mut host, 7);
    assert_eq!(grid.selected_position(), Some(7));

    if let Some(items) = grid.provider_mut() {
        items.set_count(3);
    }
    grid.notify_data_set_changed(&mut host).unwrap();

    assert_eq!(grid.selected_position(), Some(2));
    assert!(host.live_indices().iter().all(|&index| index < 3));
}
