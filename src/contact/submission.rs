// Contact form submission
// Built per request from the `contact[...]` form namespace

use std::collections::HashMap;

/// Form fields of the contact form, in validation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// Key inside the `contact[...]` namespace and in error reports
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    /// Default label the form shows in an untouched input
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Subject => "Subject",
            Self::Message => "Message",
        }
    }
}

/// Raw contact submission; `None` means the field was not sent at all
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl ContactSubmission {
    /// Read the four fields from the `contact` namespace.
    ///
    /// A missing namespace yields a submission with every field absent.
    pub fn from_namespace(fields: Option<&HashMap<String, String>>) -> Self {
        let Some(fields) = fields else {
            return Self::default();
        };
        let take = |field: Field| fields.get(field.key()).cloned();
        Self {
            name: take(Field::Name),
            email: take(Field::Email),
            subject: take(Field::Subject),
            message: take(Field::Message),
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Subject => self.subject.as_deref(),
            Field::Message => self.message.as_deref(),
        }
    }
}
