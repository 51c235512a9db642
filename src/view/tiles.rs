//! Tile rendering.

use super::host::{to_cells, TerminalHost};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Render the live tiles of `host` into `area`.
///
/// # Arguments
/// * `order` - Drawing order; later indices paint over earlier ones, so the
///   focused tile comes last
/// * `focused` - Selected position, drawn highlighted
/// * `label` - Text shown inside the tile at a given index
///
/// # Behavior
/// - Tiles without a placement or outside `area` are skipped
/// - A scale above 1.0 grows the tile and switches to a thick border
/// - Labels wider than the tile are cut at a character boundary
pub fn render_tiles(
    frame: &mut Frame,
    area: Rect,
    host: &TerminalHost,
    order: &[usize],
    focused: Option<usize>,
    label: &dyn Fn(usize) -> String,
) {
    for &index in order {
        let Some(tile) = host.tile(index) else {
            continue;
        };
        let Some(rect) = tile.rect else {
            continue;
        };
        let Some(cells) = to_cells(rect, tile.scale, area) else {
            continue;
        };

        let is_focused = focused == Some(index);
        let (border_type, border_style) = if tile.scale > 1.0 {
            (BorderType::Thick, Style::default().fg(Color::Yellow))
        } else if is_focused {
            (BorderType::Double, Style::default().fg(Color::Yellow))
        } else {
            (BorderType::Plain, Style::default().fg(Color::Gray))
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(border_style);

        let inner_width = usize::from(cells.width.saturating_sub(2));
        let text = truncate_to_width(&label(index), inner_width);
        let text_style = if is_focused {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let paragraph = Paragraph::new(Line::styled(text, text_style))
            .alignment(Alignment::Center)
            .block(block);

        frame.render_widget(Clear, cells);
        frame.render_widget(paragraph, cells);
    }
}

/// Longest prefix of `text` that fits in `max_width` terminal columns.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut width = 0;
    text.chars()
        .take_while(|c| {
            width += c.width().unwrap_or(0);
            width <= max_width
        })
        .collect()
}
