//! Email message type.

use lettre::message::{Mailbox, SinglePart};
use lettre::Message;

use super::MailError;

/// A single-recipient HTML email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl Email {
    pub fn html(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Email {
            from: from.into(),
            to: to.into(),
            subject: subject.into(),
            html: html.into(),
        }
    }

    /// Build the lettre message: one `text/html` part, no plain-text alternative.
    pub(crate) fn to_message(&self) -> Result<Message, MailError> {
        let from: Mailbox = self
            .from
            .parse()
            .map_err(|_| MailError::InvalidAddress(self.from.clone()))?;
        let to: Mailbox = self
            .to
            .parse()
            .map_err(|_| MailError::InvalidAddress(self.to.clone()))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(&self.subject)
            .singlepart(SinglePart::html(self.html.clone()))
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_single_part_html() {
        let email = Email::html(
            "bot@example.com",
            "ops@example.com",
            "Disk full",
            "<p>97%</p>",
        );
        let message = email.to_message().unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("From: bot@example.com"));
        assert!(raw.contains("To: ops@example.com"));
        assert!(raw.contains("Subject: Disk full"));
        assert!(raw.contains("Content-Type: text/html; charset=utf-8"));
        assert!(!raw.contains("multipart"));
    }

    #[test]
    fn rejects_invalid_sender() {
        let email = Email::html("not an address", "ops@example.com", "s", "b");
        assert!(matches!(
            email.to_message(),
            Err(MailError::InvalidAddress(a)) if a == "not an address"
        ));
    }

    #[test]
    fn rejects_invalid_recipient() {
        let email = Email::html("bot@example.com", "", "s", "b");
        assert!(matches!(email.to_message(), Err(MailError::InvalidAddress(_))));
    }
}
