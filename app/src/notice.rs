use std::fmt;

use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

/// A short-lived message for the shopper, shown as a toast by whichever
/// surface triggered it.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Notice {
    pub fn success<S: Into<String>>(title: S) -> Self {
        Self::of(NoticeKind::Success, title)
    }

    pub fn info<S: Into<String>>(title: S) -> Self {
        Self::of(NoticeKind::Info, title)
    }

    pub fn error<S: Into<String>>(title: S) -> Self {
        Self::of(NoticeKind::Error, title)
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    fn of<S: Into<String>>(kind: NoticeKind, title: S) -> Self {
        Notice {
            kind,
            title: title.into(),
            description: None,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let tag = match self.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Info => "info",
            NoticeKind::Error => "error",
        };
        write!(fmt, "[{}] {}", tag, self.title)?;
        if let Some(desc) = self.description.as_ref() {
            write!(fmt, " ({})", desc)?;
        }
        Ok(())
    }
}
