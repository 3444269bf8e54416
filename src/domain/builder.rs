use crate::domain::email::{Attachment, Email, Priority};

/// Step-by-step construction of an outgoing `Email`.
#[derive(Debug, Default)]
pub struct EmailBuilder {
    from_address: String,
    subject: String,
    to_address: Vec<String>,
    body: String,
    attachments: Vec<Attachment>,
    priority: Priority,
    is_draft: bool,
}

impl EmailBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_address(mut self, addr: impl Into<String>) -> Self {
        self.from_address = addr.into();
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn to_address(mut self, addr: impl Into<String>) -> Self {
        self.to_address.push(addr.into());
        self
    }

    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn draft(mut self, is_draft: bool) -> Self {
        self.is_draft = is_draft;
        self
    }

    pub fn build(self) -> Email {
        Email {
            from_address: self.from_address,
            subject: self.subject,
            to_address: self.to_address,
            body: self.body,
            attachments: self.attachments,
            priority: self.priority,
            is_draft: self.is_draft,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_recipient_order() {
        let email = EmailBuilder::new()
            .from_address("me@example.com")
            .to_address("b@example.com")
            .to_address("a@example.com")
            .subject("S")
            .body("B")
            .build();
        assert_eq!(email.to_address, vec!["b@example.com", "a@example.com"]);
        assert_eq!(email.priority, Priority::Medium);
        assert!(!email.is_draft);
    }
}
