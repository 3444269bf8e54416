pub mod attachment;

use std::path::Path;

use anyhow::Result;

use crate::api::MailBackend;
use crate::domain::builder::EmailBuilder;
use crate::domain::email::{Attachment, Email, Priority};

pub const SEND_FAILED_ALERT: &str = "Something went wrong. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposeField {
    #[default]
    Receiver,
    Subject,
    Body,
    Priority,
    Attachments,
}

impl ComposeField {
    pub fn next(self) -> Self {
        match self {
            ComposeField::Receiver => ComposeField::Subject,
            ComposeField::Subject => ComposeField::Body,
            ComposeField::Body => ComposeField::Priority,
            ComposeField::Priority => ComposeField::Attachments,
            ComposeField::Attachments => ComposeField::Receiver,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ComposeField::Receiver => ComposeField::Attachments,
            ComposeField::Subject => ComposeField::Receiver,
            ComposeField::Body => ComposeField::Subject,
            ComposeField::Priority => ComposeField::Body,
            ComposeField::Attachments => ComposeField::Priority,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The backend accepted the email.
    Delivered,
    /// The request failed; the message is shown to the user as an alert.
    Failed { alert: String },
    /// A required field is empty. Nothing was sent and the form is untouched.
    Incomplete(&'static str),
}

/// State of one compose session.
///
/// Fields are edited in place and turned into an `Email` on submit. After any
/// submit attempt that reaches the backend the fields are cleared, whether or
/// not the request succeeded.
#[derive(Debug, Default)]
pub struct ComposeForm {
    pub subject: String,
    pub receiver_email: String,
    pub to_address: Vec<String>,
    pub body: String,
    pub attachments: Vec<Attachment>,
    pub priority: Priority,

    // Set once the priority selector is used; survives resets for the rest
    // of the session.
    priority_touched: bool,

    pub focus: ComposeField,
    pub attachment_path: String,
    pub selected_attachment: usize,
}

impl ComposeForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// The text buffer behind a field, if it has one.
    pub fn text_mut(&mut self, field: ComposeField) -> Option<&mut String> {
        match field {
            ComposeField::Receiver => Some(&mut self.receiver_email),
            ComposeField::Subject => Some(&mut self.subject),
            ComposeField::Body => Some(&mut self.body),
            ComposeField::Attachments => Some(&mut self.attachment_path),
            ComposeField::Priority => None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(buf) = self.text_mut(self.focus) {
            buf.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(buf) = self.text_mut(self.focus) {
            buf.pop();
        }
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority_touched = true;
        self.priority = priority;
    }

    pub fn priority_touched(&self) -> bool {
        self.priority_touched
    }

    /// Move the pending receiver entry into the recipient list.
    pub fn add_recipient(&mut self) {
        let addr = self.receiver_email.trim();
        if addr.is_empty() {
            return;
        }
        self.to_address.push(addr.to_string());
        self.receiver_email.clear();
    }

    pub fn attach(&mut self, attachment: Attachment) {
        self.attachments.push(attachment);
    }

    pub fn attach_file(&mut self, path: &Path) -> Result<()> {
        let a = attachment::read_file(path)?;
        log::info!("Attached {} ({} bytes)", a.name, a.size);
        self.attach(a);
        Ok(())
    }

    pub fn delete_attachment(&mut self, index: usize) {
        if index < self.attachments.len() {
            self.attachments.remove(index);
        }
        if self.selected_attachment >= self.attachments.len() {
            self.selected_attachment = self.attachments.len().saturating_sub(1);
        }
    }

    pub fn is_not_empty(&self) -> bool {
        !self.subject.is_empty()
            || !self.receiver_email.is_empty()
            || !self.to_address.is_empty()
            || !self.body.is_empty()
            || !self.attachments.is_empty()
            || self.priority_touched
    }

    pub fn build(&self, from_address: &str, is_draft: bool) -> Email {
        let builder = EmailBuilder::new()
            .from_address(from_address)
            .subject(self.subject.clone())
            .body(self.body.clone());
        let builder = self
            .to_address
            .iter()
            .fold(builder, |b, addr| b.to_address(addr.clone()));
        self.attachments
            .iter()
            .fold(builder, |b, a| b.attachment(a.clone()))
            .priority(self.priority)
            .draft(is_draft)
            .build()
    }

    /// Build the email from the current fields, send it and reset the form.
    pub fn submit(
        &mut self,
        backend: &dyn MailBackend,
        from_address: &str,
        is_draft: bool,
    ) -> SubmitOutcome {
        if !is_draft {
            if self.subject.is_empty() {
                return SubmitOutcome::Incomplete("Subject is required");
            }
            if self.body.is_empty() {
                return SubmitOutcome::Incomplete("Email body is required");
            }
        }

        let email = self.build(from_address, is_draft);
        let outcome = match backend.send_email(&email) {
            Ok(()) => SubmitOutcome::Delivered,
            Err(e) => {
                log::error!("Error during email sending: {e:#}");
                SubmitOutcome::Failed {
                    alert: SEND_FAILED_ALERT.to_string(),
                }
            }
        };

        self.reset();
        outcome
    }

    /// Teardown hook: saves unsent input as a draft.
    ///
    /// There is no record of an earlier teardown, so calling this twice on a
    /// form whose priority was touched submits twice.
    pub fn unmount(
        &mut self,
        backend: &dyn MailBackend,
        from_address: &str,
    ) -> Option<SubmitOutcome> {
        if !self.is_not_empty() {
            return None;
        }
        log::info!("Saving unsent compose form as draft");
        Some(self.submit(backend, from_address, true))
    }

    fn reset(&mut self) {
        self.subject.clear();
        self.receiver_email.clear();
        self.to_address.clear();
        self.body.clear();
        self.attachments.clear();
        self.priority = Priority::Medium;
        self.attachment_path.clear();
        self.selected_attachment = 0;
    }
}
