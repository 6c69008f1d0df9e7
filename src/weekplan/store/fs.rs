use super::SlotStore;
use crate::error::{PlannerError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const SLOT_EXT: &str = ".json";

/// File-backed slot storage: `{root}/{encoded key}.json` per slot.
///
/// Keys are user-visible week names, so they are percent-encoded into file
/// names: bytes outside `[a-z0-9_-]` become `%XX`. Uppercase letters are
/// encoded too, so keys differing only by case never share a file on a
/// case-insensitive filesystem.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}{}", encode_key(key), SLOT_EXT))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(PlannerError::Io)?;
        }
        Ok(())
    }
}

impl SlotStore for FileStore {
    fn read_slot(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(PlannerError::Io)?;
        Ok(Some(content))
    }

    fn write_slot(&mut self, key: &str, payload: &str) -> Result<()> {
        self.ensure_dir()?;
        let path = self.slot_path(key);

        let tmp_file = self.root.join(format!(".slot-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, payload).map_err(PlannerError::Io)?;
        fs::rename(&tmp_file, &path).map_err(PlannerError::Io)?;
        Ok(())
    }

    fn remove_slot(&mut self, key: &str) -> Result<()> {
        let path = self.slot_path(key);
        if path.exists() {
            fs::remove_file(path).map_err(PlannerError::Io)?;
        }
        Ok(())
    }

    fn slot_keys(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(PlannerError::Io)? {
            let entry = entry.map_err(PlannerError::Io)?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(stem) = name.strip_suffix(SLOT_EXT) {
                if let Some(key) = decode_key(stem) {
                    keys.push(key);
                }
            }
        }
        Ok(keys)
    }
}

fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_lowercase() || byte.is_ascii_digit() || byte == b'-' || byte == b'_' {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

fn decode_key(name: &str) -> Option<String> {
    let bytes = name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = name.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}
