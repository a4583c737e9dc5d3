/*
[INPUT]:  Modal state, fields, and key events
[OUTPUT]: Modal rendering output and modal action results
[POS]:    TUI UI modal module root
[UPDATE]: When adding field kinds or modal dialogs
*/

mod account;
mod task_form;

pub(in crate::tui) use account::{ForgotPasswordModal, LoginModal, RegisterModal, ResetPasswordModal};
pub(in crate::tui) use task_form::{ConfirmDeleteModal, QuickAddModal, TaskFormModal};

use crossterm::event::KeyCode;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::tui::ui::palette::Palette;

pub(in crate::tui) struct Modal {
    pub(super) title: String,
    pub(super) focus_index: usize,
    pub(super) fields: Vec<Field>,
    /// Validation feedback shown under the fields
    pub(super) error: Option<String>,
}

pub(in crate::tui) enum Field {
    TextInput {
        label: String,
        value: String,
        masked: bool,
    },
    Select {
        label: String,
        options: Vec<String>,
        selected: usize,
    },
    Toggle {
        label: String,
        value: bool,
    },
    Button {
        label: String,
        action: ModalAction,
    },
}

impl Field {
    pub(super) fn text(label: &str, value: impl Into<String>) -> Self {
        Field::TextInput {
            label: label.to_string(),
            value: value.into(),
            masked: false,
        }
    }

    pub(super) fn secret(label: &str) -> Self {
        Field::TextInput {
            label: label.to_string(),
            value: String::new(),
            masked: true,
        }
    }

    pub(super) fn select(label: &str, options: Vec<String>, selected: usize) -> Self {
        Field::Select {
            label: label.to_string(),
            options,
            selected,
        }
    }

    pub(super) fn toggle(label: &str, value: bool) -> Self {
        Field::Toggle {
            label: label.to_string(),
            value,
        }
    }

    pub(super) fn button(label: &str, action: ModalAction) -> Self {
        Field::Button {
            label: label.to_string(),
            action,
        }
    }

    fn label(&self) -> &str {
        match self {
            Field::TextInput { label, .. }
            | Field::Select { label, .. }
            | Field::Toggle { label, .. }
            | Field::Button { label, .. } => label,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui) enum ModalAction {
    Submit,
    /// Alternate button, e.g. "Forgot password" on the login dialog
    Secondary,
    Cancel,
    None,
}

impl Modal {
    pub(super) fn new(title: &str, fields: Vec<Field>) -> Self {
        Self {
            title: title.to_string(),
            focus_index: 0,
            fields,
            error: None,
        }
    }

    pub(super) fn text(&self, index: usize) -> &str {
        match self.fields.get(index) {
            Some(Field::TextInput { value, .. }) => value.as_str(),
            _ => "",
        }
    }

    pub(super) fn selected(&self, index: usize) -> usize {
        match self.fields.get(index) {
            Some(Field::Select { selected, .. }) => *selected,
            _ => 0,
        }
    }

    pub(super) fn toggled(&self, index: usize) -> bool {
        matches!(self.fields.get(index), Some(Field::Toggle { value: true, .. }))
    }

    pub(in crate::tui) fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }
}

pub(in crate::tui) fn draw_modal(
    frame: &mut ratatui::Frame,
    area: Rect,
    modal: &Modal,
    palette: &Palette,
) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border())
        .style(palette.base())
        .title(modal.title.as_str());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label_width = modal
        .fields
        .iter()
        .filter(|field| !matches!(field, Field::Button { .. }))
        .map(|field| field.label().width())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = modal
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let content = match field {
                Field::TextInput {
                    label,
                    value,
                    masked,
                } => {
                    let shown = if *masked {
                        "*".repeat(value.chars().count())
                    } else {
                        value.clone()
                    };
                    format!("{}: {shown}", pad(label, label_width))
                }
                Field::Select {
                    label,
                    options,
                    selected,
                } => {
                    let selected_value = options.get(*selected).map(String::as_str).unwrap_or("-");
                    format!("{}: < {selected_value} >", pad(label, label_width))
                }
                Field::Toggle { label, value } => {
                    let mark = if *value { "x" } else { " " };
                    format!("{}: [{mark}]", pad(label, label_width))
                }
                Field::Button { label, .. } => format!("[{label}]"),
            };
            let style = if index == modal.focus_index {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Line::from(Span::styled(content, style))
        })
        .collect();

    if let Some(error) = modal.error.as_ref() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(error.clone(), palette.error())));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab/Shift-Tab move · Up/Down change · Space toggle · Enter confirm · Esc close",
        palette.muted(),
    )));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

fn pad(label: &str, width: usize) -> String {
    let fill = width.saturating_sub(label.width());
    format!("{label}{}", " ".repeat(fill))
}

pub(in crate::tui) fn handle_modal_key(modal: &mut Modal, key: KeyCode) -> ModalAction {
    let count = modal.fields.len();
    match key {
        KeyCode::Esc => ModalAction::Cancel,
        KeyCode::Tab => {
            if count > 0 {
                modal.focus_index = (modal.focus_index + 1) % count;
            }
            ModalAction::None
        }
        KeyCode::BackTab => {
            if count > 0 {
                modal.focus_index = (modal.focus_index + count - 1) % count;
            }
            ModalAction::None
        }
        KeyCode::Up | KeyCode::Left => {
            if let Some(Field::Select {
                selected, options, ..
            }) = modal.fields.get_mut(modal.focus_index)
            {
                if !options.is_empty() {
                    *selected = selected.saturating_sub(1);
                }
            }
            ModalAction::None
        }
        KeyCode::Down | KeyCode::Right => {
            if let Some(Field::Select {
                selected, options, ..
            }) = modal.fields.get_mut(modal.focus_index)
            {
                if *selected + 1 < options.len() {
                    *selected += 1;
                }
            }
            ModalAction::None
        }
        KeyCode::Backspace => {
            if let Some(Field::TextInput { value, .. }) = modal.fields.get_mut(modal.focus_index) {
                value.pop();
            }
            ModalAction::None
        }
        KeyCode::Char(ch) => match modal.fields.get_mut(modal.focus_index) {
            Some(Field::TextInput { value, .. }) => {
                value.push(ch);
                modal.error = None;
                ModalAction::None
            }
            Some(Field::Toggle { value, .. }) if ch == ' ' => {
                *value = !*value;
                ModalAction::None
            }
            _ => ModalAction::None,
        },
        KeyCode::Enter => match modal.fields.get_mut(modal.focus_index) {
            Some(Field::Button { action, .. }) => *action,
            Some(Field::Toggle { value, .. }) => {
                *value = !*value;
                ModalAction::None
            }
            _ => {
                // Enter on an input moves to the next field
                if count > 0 {
                    modal.focus_index = (modal.focus_index + 1) % count;
                }
                ModalAction::None
            }
        },
        _ => ModalAction::None,
    }
}
