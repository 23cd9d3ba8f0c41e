use mockall::automock;
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
    Info(String),
}

impl Notice {
    pub fn success(message: &str) -> Notice {
        Notice::Success(message.to_string())
    }

    pub fn error(message: &str) -> Notice {
        Notice::Error(message.to_string())
    }

    pub fn info(message: &str) -> Notice {
        Notice::Info(message.to_string())
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(message) => message,
            Notice::Error(message) => message,
            Notice::Info(message) => message,
        }
    }
}

/// User-legible notices. Every abort path in the workflow surfaces exactly
/// one of these; nothing fails silently.
#[automock]
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

pub struct NoticeLog {
    pub notices: Vec<Notice>,
}

impl NoticeLog {
    pub fn new() -> NoticeLog {
        NoticeLog {
            notices: Vec::new(),
        }
    }
}

impl Default for NoticeLog {
    fn default() -> NoticeLog {
        NoticeLog::new()
    }
}

impl Notifier for NoticeLog {
    fn notify(&mut self, notice: Notice) {
        match &notice {
            Notice::Error(message) => error!("{}", message),
            _ => info!("{}", notice.message()),
        }
        self.notices.push(notice);
    }
}
