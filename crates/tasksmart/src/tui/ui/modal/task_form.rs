/*
[INPUT]:  Task being created or edited, free-text quick add input
[OUTPUT]: Task dialogs and the requests they submit
[POS]:    TUI UI modal task forms
[UPDATE]: When task fields change
*/

use crossterm::event::KeyCode;
use tasksmart_client::{
    Category, CreateTaskRequest, DEFAULT_CATEGORIES, PRIORITIES, Priority, Task,
    UpdateTaskRequest, parse_due_date,
};

use super::{Field, Modal, ModalAction, handle_modal_key};

const TITLE: usize = 0;
const CATEGORY: usize = 1;
const PRIORITY: usize = 2;
const DUE_DATE: usize = 3;
const NOTES: usize = 4;

/// New task or edit of an existing one
pub(in crate::tui) struct TaskFormModal {
    modal: Modal,
    categories: Vec<Category>,
    editing: Option<Task>,
}

impl TaskFormModal {
    pub(in crate::tui) fn create(default_category: Option<Category>) -> Self {
        let categories = DEFAULT_CATEGORIES.to_vec();
        let category_index = default_category
            .and_then(|wanted| categories.iter().position(|c| *c == wanted))
            .unwrap_or(0);
        let priority_index = priority_index(Priority::default());
        Self::build("New Task", categories, category_index, priority_index, "", "", "", None)
    }

    pub(in crate::tui) fn edit(task: &Task) -> Self {
        let mut categories = DEFAULT_CATEGORIES.to_vec();
        if !categories.contains(&task.category) {
            categories.push(task.category.clone());
        }
        let category_index = categories
            .iter()
            .position(|c| *c == task.category)
            .unwrap_or(0);
        let due = task
            .due_date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        Self::build(
            "Edit Task",
            categories,
            category_index,
            priority_index(task.priority),
            &task.title,
            &due,
            task.notes.as_deref().unwrap_or(""),
            Some(task.clone()),
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        title: &str,
        categories: Vec<Category>,
        category_index: usize,
        priority_index: usize,
        task_title: &str,
        due: &str,
        notes: &str,
        editing: Option<Task>,
    ) -> Self {
        let category_labels = categories.iter().map(ToString::to_string).collect();
        let priority_labels = PRIORITIES.iter().map(ToString::to_string).collect();
        let modal = Modal::new(
            title,
            vec![
                Field::text("Title", task_title),
                Field::select("Category", category_labels, category_index),
                Field::select("Priority", priority_labels, priority_index),
                Field::text("Due (YYYY-MM-DD)", due),
                Field::text("Notes", notes),
                Field::button("Save", ModalAction::Submit),
                Field::button("Cancel", ModalAction::Cancel),
            ],
        );
        Self {
            modal,
            categories,
            editing,
        }
    }

    pub(in crate::tui) fn modal(&self) -> &Modal {
        &self.modal
    }

    pub(in crate::tui) fn modal_mut(&mut self) -> &mut Modal {
        &mut self.modal
    }

    pub(in crate::tui) fn handle_key(&mut self, key: KeyCode) -> ModalAction {
        handle_modal_key(&mut self.modal, key)
    }

    pub(in crate::tui) fn editing(&self) -> Option<&Task> {
        self.editing.as_ref()
    }

    fn category(&self) -> Category {
        self.categories
            .get(self.modal.selected(CATEGORY))
            .cloned()
            .unwrap_or_default()
    }

    fn priority(&self) -> Priority {
        PRIORITIES
            .get(self.modal.selected(PRIORITY))
            .copied()
            .unwrap_or_default()
    }

    fn title(&self) -> Result<String, String> {
        let title = self.modal.text(TITLE).trim();
        if title.is_empty() {
            return Err("Title is required".to_string());
        }
        Ok(title.to_string())
    }

    fn due_date(&self) -> Result<Option<chrono::NaiveDate>, String> {
        let raw = self.modal.text(DUE_DATE).trim();
        if raw.is_empty() {
            return Ok(None);
        }
        parse_due_date(raw)
            .map(Some)
            .ok_or_else(|| format!("'{raw}' is not a valid date (use YYYY-MM-DD)"))
    }

    fn notes(&self) -> Option<String> {
        let notes = self.modal.text(NOTES).trim();
        (!notes.is_empty()).then(|| notes.to_string())
    }

    pub(in crate::tui) fn to_create_request(&self) -> Result<CreateTaskRequest, String> {
        Ok(CreateTaskRequest {
            title: self.title()?,
            category: self.category(),
            priority: self.priority(),
            due_date: self.due_date()?,
            notes: self.notes(),
        })
    }

    /// Only fields that differ from the task being edited
    pub(in crate::tui) fn to_update_request(&self, original: &Task) -> Result<UpdateTaskRequest, String> {
        let title = self.title()?;
        let category = self.category();
        let priority = self.priority();
        let due_date = self.due_date()?;
        let notes = self.notes();

        Ok(UpdateTaskRequest {
            title: (title != original.title).then_some(title),
            category: (category != original.category).then_some(category),
            priority: (priority != original.priority).then_some(priority),
            completed: None,
            due_date: due_date.filter(|date| Some(*date) != original.due_date),
            notes: notes.filter(|text| Some(text) != original.notes.as_ref()),
        })
    }
}

fn priority_index(priority: Priority) -> usize {
    PRIORITIES.iter().position(|p| *p == priority).unwrap_or(0)
}

/// Single-line task description parsed by the backend
pub(in crate::tui) struct QuickAddModal {
    modal: Modal,
}

impl QuickAddModal {
    pub(in crate::tui) fn new() -> Self {
        Self {
            modal: Modal::new(
                "Quick Add",
                vec![
                    Field::text("Describe the task", ""),
                    Field::button("Add", ModalAction::Submit),
                    Field::button("Cancel", ModalAction::Cancel),
                ],
            ),
        }
    }

    pub(in crate::tui) fn modal(&self) -> &Modal {
        &self.modal
    }

    pub(in crate::tui) fn modal_mut(&mut self) -> &mut Modal {
        &mut self.modal
    }

    pub(in crate::tui) fn handle_key(&mut self, key: KeyCode) -> ModalAction {
        // Enter in the text box submits directly
        if key == KeyCode::Enter && self.modal.focus_index == 0 {
            return ModalAction::Submit;
        }
        handle_modal_key(&mut self.modal, key)
    }

    pub(in crate::tui) fn text(&self) -> &str {
        self.modal.text(0).trim()
    }
}

pub(in crate::tui) struct ConfirmDeleteModal {
    modal: Modal,
    task_id: String,
}

impl ConfirmDeleteModal {
    pub(in crate::tui) fn new(task: &Task) -> Self {
        Self {
            modal: Modal::new(
                &format!("Delete \"{}\"?", task.title),
                vec![
                    Field::button("Delete", ModalAction::Submit),
                    Field::button("Keep", ModalAction::Cancel),
                ],
            ),
            task_id: task.id.clone(),
        }
    }

    pub(in crate::tui) fn modal(&self) -> &Modal {
        &self.modal
    }

    pub(in crate::tui) fn modal_mut(&mut self) -> &mut Modal {
        &mut self.modal
    }

    pub(in crate::tui) fn handle_key(&mut self, key: KeyCode) -> ModalAction {
        handle_modal_key(&mut self.modal, key)
    }

    pub(in crate::tui) fn task_id(&self) -> &str {
        &self.task_id
    }
}
