/*
[INPUT]:  AppState filtered task list
[OUTPUT]: Task list rendered into Ratatui frame
[POS]:    TUI UI task list rendering
[UPDATE]: When task row contents change
*/

use chrono::Local;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};

use crate::tui::app::{AppState, Focus};
use crate::tui::ui::palette::Palette;

pub(in crate::tui) fn draw_task_list(frame: &mut ratatui::Frame, area: Rect, app: &mut AppState, palette: &Palette) {
    let today = Local::now().date_naive();
    let items = if app.tasks.is_empty() {
        let hint = if app.signed_in() {
            "No tasks here. Press [n] to add one or [a] for quick add."
        } else {
            "Log in [i], register [u] or continue as a guest [g]."
        };
        vec![ListItem::new(Span::styled(hint, palette.muted()))]
    } else {
        app.tasks
            .iter()
            .map(|task| {
                let mark = if task.completed { "[x]" } else { "[ ]" };
                let mut title_style = palette.base();
                if task.completed {
                    title_style = palette.muted().add_modifier(Modifier::CROSSED_OUT);
                }
                let mut spans = vec![
                    Span::raw(format!("{mark} ")),
                    Span::styled(format!("{:<6} ", task.priority.as_str()), palette.priority(task.priority)),
                    Span::styled(task.title.clone(), title_style),
                    Span::styled(format!("  #{}", task.category), palette.muted()),
                ];
                if let Some(due) = task.due_date {
                    let style = if task.is_overdue(today) {
                        palette.error()
                    } else {
                        palette.muted()
                    };
                    spans.push(Span::styled(format!("  due {}", due.format("%Y-%m-%d")), style));
                }
                ListItem::new(Line::from(spans))
            })
            .collect()
    };

    let border = if app.focus == Focus::Tasks {
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
                .title(format!("Tasks · {} ({})", app.filter, app.tasks.len())),
        )
        .highlight_style(palette.highlight())
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut app.list_state);
}
