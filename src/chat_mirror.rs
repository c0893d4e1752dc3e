//! Durable mirror of the chat message log.
//!
//! One fixed slot holds the whole conversation as a JSON array. It is
//! overwritten on every change (last writer wins, no versioning) and read
//! back when a chat or coding view is created.

use crate::consts::cli_consts::{APP_DIR, CHAT_MIRROR_FILE};
use crate::error::{ConfigError, MirrorError};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn new(content: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            sender,
            timestamp: Local::now(),
        }
    }
}

/// Storage slot for the chat log.
#[cfg_attr(test, automock)]
pub trait ChatMirror: Send + Sync {
    /// Read the last written log. An absent slot is an empty log.
    fn load(&self) -> Result<Vec<ChatMessage>, MirrorError>;

    /// Replace the slot's content with `messages`.
    fn save(&self, messages: &[ChatMessage]) -> Result<(), MirrorError>;
}

/// Chat mirror stored as a JSON file.
#[derive(Debug, Clone)]
pub struct FileChatMirror {
    path: PathBuf,
}

impl FileChatMirror {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the slot. Deleting an absent slot is not an error.
    pub fn clear(&self) -> Result<(), MirrorError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl ChatMirror for FileChatMirror {
    fn load(&self) -> Result<Vec<ChatMessage>, MirrorError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let buf = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&buf)?)
    }

    fn save(&self, messages: &[ChatMessage]) -> Result<(), MirrorError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(messages)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Default location of the mirror: `~/.art/chat_messages.json`.
pub fn get_chat_mirror_path() -> Result<PathBuf, ConfigError> {
    let home = home::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(APP_DIR).join(CHAT_MIRROR_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    // An absent slot reads as an empty conversation.
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let mirror = FileChatMirror::new(dir.path().join("chat.json"));
        assert!(mirror.load().unwrap().is_empty());
    }

    #[test]
    // Every save replaces the whole slot.
    fn test_save_overwrites_previous_log() {
        let dir = tempdir().unwrap();
        let mirror = FileChatMirror::new(dir.path().join("nested").join("chat.json"));

        let first = vec![ChatMessage::new("hello", Sender::User)];
        mirror.save(&first).unwrap();

        let second = vec![
            ChatMessage::new("hello", Sender::User),
            ChatMessage::new("hi there", Sender::Assistant),
        ];
        mirror.save(&second).unwrap();

        assert_eq!(mirror.load().unwrap(), second);
    }

    #[test]
    // Records use the flat {id, content, sender, timestamp} shape.
    fn test_records_are_flat_json_objects() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chat.json");
        let mirror = FileChatMirror::new(&path);
        mirror
            .save(&[ChatMessage::new("ping", Sender::Assistant)])
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let record = &raw[0];
        assert_eq!(record["content"], "ping");
        assert_eq!(record["sender"], "assistant");
        assert!(record["id"].is_string());
        assert!(record["timestamp"].is_string());
    }

    #[test]
    // A corrupt slot surfaces as a serialization error.
    fn test_load_rejects_corrupt_slot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chat.json");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "{{not json").unwrap();

        let result = FileChatMirror::new(&path).load();
        assert!(matches!(result, Err(MirrorError::Serialization(_))));
    }

    #[test]
    fn test_clear_removes_slot_and_tolerates_absence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chat.json");
        let mirror = FileChatMirror::new(&path);
        mirror.save(&[]).unwrap();
        assert!(path.exists());

        mirror.clear().unwrap();
        assert!(!path.exists());
        mirror.clear().unwrap();
    }
}
