//! Messages printed around a dashboard session

// ANSI Color Codes for session messages
pub const COLOR_INFO: &str = "\x1b[1;36m"; // Bold Cyan
pub const COLOR_SUCCESS: &str = "\x1b[1;32m"; // Bold Green
pub const COLOR_RESET: &str = "\x1b[0m";

/// Session-specific message types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMessage {
    Info(String),
    Success(String),
}

impl SessionMessage {
    pub fn info(msg: impl Into<String>) -> Self {
        Self::Info(msg.into())
    }

    pub fn success(msg: impl Into<String>) -> Self {
        Self::Success(msg.into())
    }

    /// The message as it appears on stdout.
    pub fn formatted(&self) -> String {
        match self {
            Self::Info(msg) => format!("{}[INFO]{} {}", COLOR_INFO, COLOR_RESET, msg),
            Self::Success(msg) => format!("{}[SUCCESS]{} {}", COLOR_SUCCESS, COLOR_RESET, msg),
        }
    }

    pub fn print(&self) {
        println!("{}", self.formatted());
    }
}

pub fn print_session_starting(layout: &str, chat_mirror: &str) {
    SessionMessage::info(format!(
        "Starting ART in {} layout, chat mirror at {}",
        layout, chat_mirror
    ))
    .print();
}

pub fn print_session_shutdown() {
    SessionMessage::info("Shutting down...").print();
}

pub fn print_session_exit_success() {
    SessionMessage::success("ART exited successfully").print();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_tagged() {
        let info = SessionMessage::info("Shutting down...").formatted();
        assert!(info.contains("[INFO]"));
        assert!(info.ends_with("Shutting down..."));

        let success = SessionMessage::success("done").formatted();
        assert!(success.starts_with(COLOR_SUCCESS));
        assert!(success.contains("[SUCCESS]"));
    }
}
