/*
[INPUT]:  Frame layout regions, current tab and status message
[OUTPUT]: Tab bar, hotkey footer and centred modal area
[POS]:    TUI UI layout helpers
[UPDATE]: When adding tabs or hotkeys
*/

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};

use crate::tui::app::{AppState, Tab};
use crate::tui::ui::palette::Palette;

pub(in crate::tui) fn draw_tabs(frame: &mut ratatui::Frame, area: Rect, app: &AppState, palette: &Palette) {
    let titles = vec![Line::from("Tasks"), Line::from("Logs")];
    let selected = match app.current_tab {
        Tab::Tasks => 0,
        Tab::Logs => 1,
    };
    let title = format!(" TaskSmart · {} · {} theme ", app.user_label(), app.theme);

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border())
                .title(title),
        )
        .style(palette.base())
        .highlight_style(palette.header())
        .select(selected);

    frame.render_widget(tabs, area);
}

pub(in crate::tui) fn draw_footer(frame: &mut ratatui::Frame, area: Rect, app: &AppState, palette: &Palette) {
    let key = palette.key();
    let hint = |keys: &'static str, label: &'static str| {
        [Span::styled(keys, key), Span::raw(label)]
    };

    let task_keys: Vec<Span> = [
        hint("[↑/↓]", " Select  "),
        hint("[Tab]", " Sidebar  "),
        hint("[n]", " New  "),
        hint("[a]", " Quick add  "),
        hint("[e]", " Edit  "),
        hint("[c]", " Done  "),
        hint("[d]", " Delete  "),
        hint("[r]", " Refresh  "),
        hint("[t]", " Theme  "),
        hint("[1/2]", " Tabs"),
    ]
    .into_iter()
    .flatten()
    .collect();

    let account_keys: Vec<Span> = if app.signed_in() {
        let mut spans: Vec<Span> = Vec::new();
        if app.is_guest() {
            spans.extend(hint("[u]", " Register  "));
            spans.extend(hint("[i]", " Log in  "));
            if !app.banners.is_empty() {
                spans.extend(hint("[x]", " Dismiss banner  "));
            }
        } else {
            spans.extend(hint("[y]", " Retry transfer  "));
        }
        spans.extend(hint("[o]", " Log out  "));
        spans.extend(hint("[q]", " Quit  "));
        spans
    } else {
        [
            hint("[i]", " Log in  "),
            hint("[u]", " Register  "),
            hint("[g]", " Guest  "),
            hint("[p]", " Forgot password  "),
            hint("[q]", " Quit  "),
        ]
        .into_iter()
        .flatten()
        .collect()
    };

    let mut status_line = account_keys;
    status_line.push(Span::raw(format!("Status: {}", app.status_message)));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border())
        .title("Hotkeys");
    let text = Text::from(vec![Line::from(task_keys), Line::from(status_line)]);
    let widget = Paragraph::new(text)
        .block(block)
        .style(palette.base())
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

pub(in crate::tui) fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
