/*
[INPUT]:  LogBufferHandle snapshots for UI
[OUTPUT]: Log panel rendered into Ratatui frame
[POS]:    TUI UI logs panel rendering
[UPDATE]: When changing log panel presentation
*/

use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::LogBufferHandle;
use crate::tui::ui::palette::Palette;

pub(in crate::tui) fn draw_logs(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    buffer: &LogBufferHandle,
    palette: &Palette,
) {
    let lines = {
        let guard = buffer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.snapshot()
    };
    let available = area.height.saturating_sub(2) as usize;
    let start = lines.len().saturating_sub(available);
    let view = &lines[start..];

    let text = view
        .iter()
        .map(|line| Line::from(Span::raw(line.clone())))
        .collect::<Vec<_>>();
    let log_widget = Paragraph::new(text).style(palette.base()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border())
            .title(format!("Logs ({} lines)", lines.len())),
    );
    frame.render_widget(log_widget, area);
}
