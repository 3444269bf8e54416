pub mod http;

use anyhow::Result;

use crate::domain::email::{Email, EmailId, EmailSummary};
use crate::domain::mailbox::{ListQuery, MailboxView};

/// The remote mail service. Everything that sends, deletes, files or lists
/// mail goes through here.
pub trait MailBackend {
    fn send_email(&self, email: &Email) -> Result<()>;

    fn delete_emails(&self, owner: &str, ids: &[EmailId]) -> Result<()>;

    fn add_to_folder(&self, owner: &str, ids: &[EmailId], folder: &str) -> Result<()>;

    fn fetch_emails(
        &self,
        owner: &str,
        view: &MailboxView,
        query: &ListQuery,
    ) -> Result<Vec<EmailSummary>>;
}

/// Ids as the backend expects them in a single query value.
pub fn join_ids(ids: &[EmailId]) -> String {
    ids.iter()
        .map(EmailId::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
pub(crate) mod fake {
    use std::cell::RefCell;

    use anyhow::{Result, anyhow};

    use super::MailBackend;
    use crate::domain::email::{Email, EmailId, EmailSummary};
    use crate::domain::mailbox::{ListQuery, MailboxView};

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Send(Email),
        Delete { owner: String, ids: Vec<EmailId> },
        Move { owner: String, ids: Vec<EmailId>, folder: String },
        Fetch { owner: String, view: MailboxView, query: ListQuery },
    }

    /// Records every call and answers from canned data.
    #[derive(Default)]
    pub struct RecordingBackend {
        pub calls: RefCell<Vec<Call>>,
        pub summaries: Vec<EmailSummary>,
        pub fail: bool,
    }

    impl RecordingBackend {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn with_summaries(summaries: Vec<EmailSummary>) -> Self {
            Self {
                summaries,
                ..Self::default()
            }
        }

        pub fn sent(&self) -> Vec<Email> {
            self.calls
                .borrow()
                .iter()
                .filter_map(|c| match c {
                    Call::Send(e) => Some(e.clone()),
                    _ => None,
                })
                .collect()
        }

        pub fn fetch_count(&self) -> usize {
            self.calls
                .borrow()
                .iter()
                .filter(|c| matches!(c, Call::Fetch { .. }))
                .count()
        }

        fn outcome(&self) -> Result<()> {
            if self.fail {
                Err(anyhow!("backend unavailable"))
            } else {
                Ok(())
            }
        }
    }

    impl MailBackend for RecordingBackend {
        fn send_email(&self, email: &Email) -> Result<()> {
            self.calls.borrow_mut().push(Call::Send(email.clone()));
            self.outcome()
        }

        fn delete_emails(&self, owner: &str, ids: &[EmailId]) -> Result<()> {
            self.calls.borrow_mut().push(Call::Delete {
                owner: owner.to_string(),
                ids: ids.to_vec(),
            });
            self.outcome()
        }

        fn add_to_folder(&self, owner: &str, ids: &[EmailId], folder: &str) -> Result<()> {
            self.calls.borrow_mut().push(Call::Move {
                owner: owner.to_string(),
                ids: ids.to_vec(),
                folder: folder.to_string(),
            });
            self.outcome()
        }

        fn fetch_emails(
            &self,
            owner: &str,
            view: &MailboxView,
            query: &ListQuery,
        ) -> Result<Vec<EmailSummary>> {
            self.calls.borrow_mut().push(Call::Fetch {
                owner: owner.to_string(),
                view: view.clone(),
                query: query.clone(),
            });
            self.outcome()?;
            Ok(self.summaries.clone())
        }
    }

    pub fn summary(id: &str, subject: &str) -> EmailSummary {
        EmailSummary {
            id: EmailId::new(id),
            from_address: "sender@example.com".into(),
            subject: subject.into(),
            body: format!("body of {subject}"),
            to_address: vec!["me@example.com".into()],
            time: "2024-01-01 10:00".into(),
            attachments: vec![],
            kind: "inbox".into(),
            color: None,
        }
    }
}
