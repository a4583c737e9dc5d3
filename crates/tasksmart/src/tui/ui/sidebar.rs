/*
[INPUT]:  TaskSummary counts, active filter and sidebar selection
[OUTPUT]: Category and priority count list rendered into Ratatui frame
[POS]:    TUI UI sidebar rendering
[UPDATE]: When summary entries change
*/

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{AppState, Focus};
use crate::tui::ui::palette::Palette;

const ICON_COLUMN: usize = 3;

pub(in crate::tui) fn draw_sidebar(frame: &mut ratatui::Frame, area: Rect, app: &mut AppState, palette: &Palette) {
    let summary = app.summary.clone();
    let name_width = area.width.saturating_sub(2 + ICON_COLUMN as u16 + 6) as usize;

    let mut items: Vec<ListItem> = summary
        .categories
        .iter()
        .map(|entry| {
            let active = entry.filter == app.filter;
            entry_line(
                entry.icon,
                &entry.name,
                entry.count,
                palette.accent(entry.color),
                active,
                name_width,
            )
        })
        .collect();
    items.extend(summary.priorities.iter().map(|entry| {
        let active = entry.filter == app.filter;
        entry_line(
            "●",
            &entry.name,
            entry.count,
            palette.accent(Some(entry.color)),
            active,
            name_width,
        )
    }));

    let title = if summary.hidden > 0 {
        format!("Summary ({} in other categories)", summary.hidden)
    } else {
        "Summary".to_string()
    };
    let border = if app.focus == Focus::Sidebar {
        palette.border().add_modifier(Modifier::BOLD)
    } else {
        palette.muted()
    };

    let list = List::new(items)
        .style(palette.base())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(title),
        )
        .highlight_style(palette.highlight())
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut app.sidebar_state);
}

fn entry_line(
    icon: &str,
    name: &str,
    count: usize,
    accent: ratatui::style::Style,
    active: bool,
    name_width: usize,
) -> ListItem<'static> {
    let icon_pad = ICON_COLUMN.saturating_sub(icon.width());
    let name_pad = name_width.saturating_sub(name.width());
    let mut name_style = accent;
    if active {
        name_style = name_style.add_modifier(Modifier::UNDERLINED);
    }
    ListItem::new(Line::from(vec![
        Span::raw(format!("{icon}{}", " ".repeat(icon_pad))),
        Span::styled(format!("{name}{}", " ".repeat(name_pad)), name_style),
        Span::raw(format!("{count:>4}")),
    ]))
}
