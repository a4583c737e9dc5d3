/*
[INPUT]:  Credentials typed by the user
[OUTPUT]: Login, registration and password recovery dialogs
[POS]:    TUI UI modal account forms
[UPDATE]: When auth forms gain fields
*/

use crossterm::event::KeyCode;

use super::{Field, Modal, ModalAction, handle_modal_key};

macro_rules! modal_accessors {
    ($ty:ty) => {
        impl $ty {
            pub(in crate::tui) fn modal(&self) -> &Modal {
                &self.modal
            }

            pub(in crate::tui) fn modal_mut(&mut self) -> &mut Modal {
                &mut self.modal
            }

            pub(in crate::tui) fn handle_key(&mut self, key: KeyCode) -> ModalAction {
                handle_modal_key(&mut self.modal, key)
            }
        }
    };
}

pub(in crate::tui) struct LoginModal {
    modal: Modal,
}

impl LoginModal {
    pub(in crate::tui) fn new() -> Self {
        Self {
            modal: Modal::new(
                "Log In",
                vec![
                    Field::text("Email", ""),
                    Field::secret("Password"),
                    Field::button("Log in", ModalAction::Submit),
                    Field::button("Forgot password?", ModalAction::Secondary),
                    Field::button("Cancel", ModalAction::Cancel),
                ],
            ),
        }
    }

    pub(in crate::tui) fn email(&self) -> &str {
        self.modal.text(0)
    }

    pub(in crate::tui) fn password(&self) -> &str {
        self.modal.text(1)
    }
}

modal_accessors!(LoginModal);

/// Account creation; the transfer toggle only appears for guests
pub(in crate::tui) struct RegisterModal {
    modal: Modal,
    offers_transfer: bool,
}

impl RegisterModal {
    pub(in crate::tui) fn new(guest_task_count: Option<usize>) -> Self {
        let mut fields = vec![
            Field::text("Name", ""),
            Field::text("Email", ""),
            Field::secret("Password"),
            Field::secret("Confirm password"),
        ];
        if let Some(count) = guest_task_count {
            fields.push(Field::toggle(
                &format!("Move my {count} guest tasks"),
                count > 0,
            ));
        }
        fields.push(Field::button("Create account", ModalAction::Submit));
        fields.push(Field::button("Cancel", ModalAction::Cancel));

        Self {
            modal: Modal::new("Create Account", fields),
            offers_transfer: guest_task_count.is_some(),
        }
    }

    pub(in crate::tui) fn name(&self) -> &str {
        self.modal.text(0).trim()
    }

    pub(in crate::tui) fn email(&self) -> &str {
        self.modal.text(1)
    }

    pub(in crate::tui) fn password(&self) -> &str {
        self.modal.text(2)
    }

    pub(in crate::tui) fn passwords_match(&self) -> bool {
        self.modal.text(2) == self.modal.text(3)
    }

    pub(in crate::tui) fn transfer_requested(&self) -> bool {
        self.offers_transfer && self.modal.toggled(4)
    }
}

modal_accessors!(RegisterModal);

pub(in crate::tui) struct ForgotPasswordModal {
    modal: Modal,
}

impl ForgotPasswordModal {
    pub(in crate::tui) fn new() -> Self {
        Self {
            modal: Modal::new(
                "Forgot Password",
                vec![
                    Field::text("Email", ""),
                    Field::button("Send reset link", ModalAction::Submit),
                    Field::button("I have a reset token", ModalAction::Secondary),
                    Field::button("Cancel", ModalAction::Cancel),
                ],
            ),
        }
    }

    pub(in crate::tui) fn email(&self) -> &str {
        self.modal.text(0)
    }
}

modal_accessors!(ForgotPasswordModal);

pub(in crate::tui) struct ResetPasswordModal {
    modal: Modal,
}

impl ResetPasswordModal {
    pub(in crate::tui) fn new() -> Self {
        Self {
            modal: Modal::new(
                "Reset Password",
                vec![
                    Field::text("Reset token", ""),
                    Field::secret("New password"),
                    Field::secret("Confirm password"),
                    Field::button("Reset password", ModalAction::Submit),
                    Field::button("Cancel", ModalAction::Cancel),
                ],
            ),
        }
    }

    pub(in crate::tui) fn token(&self) -> &str {
        self.modal.text(0)
    }

    pub(in crate::tui) fn password(&self) -> &str {
        self.modal.text(1)
    }

    pub(in crate::tui) fn passwords_match(&self) -> bool {
        self.modal.text(1) == self.modal.text(2)
    }
}

modal_accessors!(ResetPasswordModal);
