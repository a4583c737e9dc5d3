/*
[INPUT]:  Visible guest banners and the guest task count
[OUTPUT]: Banner strip above the task panes
[POS]:    TUI UI guest banner rendering
[UPDATE]: When banner wording or layout changes
*/

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use tasksmart::banner::Banner;

pub(in crate::tui) fn draw_banners(frame: &mut ratatui::Frame, area: Rect, banners: &[Banner], task_count: usize) {
    let lines: Vec<Line> = banners
        .iter()
        .map(|banner| {
            let style = match banner {
                Banner::Guest => Style::default().fg(Color::Black).bg(Color::LightYellow),
                Banner::Conversion => Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            };
            Line::from(vec![
                Span::styled(format!(" {} ", banner.message(task_count)), style),
                Span::raw(" [x] dismiss  [u] register"),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}
