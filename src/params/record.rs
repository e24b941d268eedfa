use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

pub type ParamResult<T> = std::result::Result<T, ParamError>;

#[derive(Debug, Error)]
pub enum ParamError {
    #[error("malformed parameter record `{0}`")]
    Malformed(String),
    #[error("parameter `{subsystem}:{name}` is already registered")]
    Duplicate { subsystem: String, name: String },
    #[error("unknown parameter `{subsystem}:{name}`")]
    Unknown { subsystem: String, name: String },
    #[error("parameter `{key}` expects {expected}, got `{value}`")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
    #[error("unknown gamepad input `{0}`")]
    UnknownInput(String),
    #[error("parameter store I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ParamError> for crate::MenuError {
    fn from(err: ParamError) -> Self {
        crate::MenuError::Params(err.to_string())
    }
}

const SEPARATOR: char = ':';
const LINE_END: &str = "\r\n";

/// One persisted parameter: `subsystem:name:value[:gamepadValue]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamRecord {
    pub subsystem: String,
    pub name: String,
    pub value: String,
    pub gamepad: Option<String>,
}

impl ParamRecord {
    pub fn new(
        subsystem: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            subsystem: subsystem.into(),
            name: name.into(),
            value: value.into(),
            gamepad: None,
        }
    }

    pub fn with_gamepad(mut self, gamepad: impl Into<String>) -> Self {
        self.gamepad = Some(gamepad.into());
        self
    }

    /// Records joined by CRLF, without a trailing line ending.
    pub fn encode_all(records: &[ParamRecord]) -> String {
        records
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(LINE_END)
    }

    /// Parse a CRLF (or LF) separated document. Blank lines are skipped.
    pub fn decode_all(contents: &str) -> ParamResult<Vec<ParamRecord>> {
        contents
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .map(str::parse)
            .collect()
    }
}

impl fmt::Display for ParamRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.subsystem, self.name, self.value)?;
        if let Some(gamepad) = &self.gamepad {
            write!(f, ":{gamepad}")?;
        }
        Ok(())
    }
}

impl FromStr for ParamRecord {
    type Err = ParamError;

    fn from_str(line: &str) -> ParamResult<Self> {
        let fields: Vec<&str> = line.split(SEPARATOR).collect();
        let malformed = || ParamError::Malformed(line.to_string());
        let (subsystem, name, value, gamepad) = match fields.as_slice() {
            [subsystem, name, value] => (*subsystem, *name, *value, None),
            [subsystem, name, value, gamepad] => (*subsystem, *name, *value, Some(*gamepad)),
            _ => return Err(malformed()),
        };
        if subsystem.is_empty() || name.is_empty() {
            return Err(malformed());
        }
        Ok(Self {
            subsystem: subsystem.to_string(),
            name: name.to_string(),
            value: value.to_string(),
            gamepad: gamepad.filter(|g| !g.is_empty()).map(str::to_string),
        })
    }
}

/// Persistence backend for parameter records.
pub trait ParamStore {
    fn load(&self) -> ParamResult<Vec<ParamRecord>>;
    fn save(&mut self, records: &[ParamRecord]) -> ParamResult<()>;
}

/// Holds the serialized document in memory. An empty store fails to load,
/// like a missing file.
#[derive(Debug, Clone, Default)]
pub struct MemoryParamStore {
    contents: Option<String>,
}

impl MemoryParamStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ParamStore for MemoryParamStore {
    fn load(&self) -> ParamResult<Vec<ParamRecord>> {
        let contents = self.contents.as_deref().ok_or_else(|| {
            ParamError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no stored parameters",
            ))
        })?;
        ParamRecord::decode_all(contents)
    }

    fn save(&mut self, records: &[ParamRecord]) -> ParamResult<()> {
        self.contents = Some(ParamRecord::encode_all(records));
        Ok(())
    }
}

/// Parameter document on disk.
#[derive(Debug, Clone)]
pub struct FileParamStore {
    path: PathBuf,
}

impl FileParamStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ParamStore for FileParamStore {
    fn load(&self) -> ParamResult<Vec<ParamRecord>> {
        let contents = std::fs::read_to_string(&self.path)?;
        ParamRecord::decode_all(&contents)
    }

    fn save(&mut self, records: &[ParamRecord]) -> ParamResult<()> {
        std::fs::write(&self.path, ParamRecord::encode_all(records))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_text_form() {
        let plain = ParamRecord::new("arm", "speed", "0.5");
        assert_eq!(plain.to_string(), "arm:speed:0.5");
        let bound = ParamRecord::new("claw", "toggle", "true").with_gamepad("b");
        assert_eq!(bound.to_string(), "claw:toggle:true:b");
        assert_eq!("claw:toggle:true:b".parse::<ParamRecord>().unwrap(), bound);
    }

    #[test]
    fn malformed_records_are_rejected() {
        assert!(matches!("arm:speed".parse::<ParamRecord>(), Err(ParamError::Malformed(_))));
        assert!(matches!("a:b:c:d:e".parse::<ParamRecord>(), Err(ParamError::Malformed(_))));
        assert!(matches!(":speed:1".parse::<ParamRecord>(), Err(ParamError::Malformed(_))));
    }

    #[test]
    fn documents_use_crlf_without_trailing_line() {
        let records = vec![
            ParamRecord::new("arm", "speed", "0.5"),
            ParamRecord::new("claw", "toggle", "true").with_gamepad("b"),
        ];
        let encoded = ParamRecord::encode_all(&records);
        assert_eq!(encoded, "arm:speed:0.5\r\nclaw:toggle:true:b");
        assert!(!encoded.ends_with("\r\n"));
        assert_eq!(ParamRecord::decode_all(&encoded).unwrap(), records);
    }

    #[test]
    fn memory_store_roundtrips_document() {
        let mut store = MemoryParamStore::new();
        assert!(matches!(store.load(), Err(ParamError::Io(_))));
        store.save(&[ParamRecord::new("lift", "height", "3")]).unwrap();
        assert_eq!(store.contents(), Some("lift:height:3"));
        assert_eq!(store.load().unwrap().len(), 1);
    }
}
