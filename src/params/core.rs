use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::input::Button;
use crate::logging::{LogLevel, Logger, PARAMS_TARGET, emit, json_kv};

use super::record::{ParamError, ParamRecord, ParamResult, ParamStore};

/// Typed parameter value. Stored values are parsed into the variant of the
/// registered default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Bool(_) => "bool",
            ParamValue::Int(_) => "int",
            ParamValue::Float(_) => "float",
            ParamValue::Text(_) => "text",
        }
    }

    pub fn same_type(&self, other: &ParamValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Parse `raw` as the same variant as `self`.
    pub fn parse_like(&self, key: &str, raw: &str) -> ParamResult<ParamValue> {
        let invalid = || ParamError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
            expected: self.type_name(),
        };
        match self {
            ParamValue::Bool(_) => raw.parse().map(ParamValue::Bool).map_err(|_| invalid()),
            ParamValue::Int(_) => raw.parse().map(ParamValue::Int).map_err(|_| invalid()),
            ParamValue::Float(_) => raw.parse().map(ParamValue::Float).map_err(|_| invalid()),
            ParamValue::Text(_) => Ok(ParamValue::Text(raw.to_string())),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(value) => write!(f, "{value}"),
            ParamValue::Int(value) => write!(f, "{value}"),
            ParamValue::Float(value) => write!(f, "{value}"),
            ParamValue::Text(value) => f.write_str(value),
        }
    }
}

/// A tunable value exposed by a subsystem, optionally bound to a button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub subsystem: String,
    pub name: String,
    pub value: ParamValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamepad: Option<Button>,
}

impl Param {
    pub fn new(subsystem: impl Into<String>, name: impl Into<String>, value: ParamValue) -> Self {
        Self {
            subsystem: subsystem.into(),
            name: name.into(),
            value,
            gamepad: None,
        }
    }

    pub fn with_gamepad(mut self, button: Button) -> Self {
        self.gamepad = Some(button);
        self
    }

    pub fn key(&self) -> String {
        format!("{}:{}", self.subsystem, self.name)
    }

    pub fn matches(&self, subsystem: &str, name: &str) -> bool {
        self.subsystem == subsystem && self.name == name
    }

    pub fn to_record(&self) -> ParamRecord {
        let record = ParamRecord::new(&self.subsystem, &self.name, self.value.to_string());
        match self.gamepad {
            Some(button) => record.with_gamepad(button.name()),
            None => record,
        }
    }
}

/// Implemented by every subsystem that exposes parameters to the menus.
pub trait ParamSource {
    /// Parameters with their default values.
    fn list_teleop_params(&self) -> Vec<Param>;
}

/// Parameters of all registered subsystems, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ParamRegistry {
    params: Vec<Param>,
}

impl ParamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every parameter of `source`. Fails without registering anything
    /// if one of them is already known.
    pub fn register(&mut self, source: &dyn ParamSource) -> ParamResult<usize> {
        let incoming = source.list_teleop_params();
        for (idx, param) in incoming.iter().enumerate() {
            let clash = self.get(&param.subsystem, &param.name).is_some()
                || incoming[..idx]
                    .iter()
                    .any(|earlier| earlier.matches(&param.subsystem, &param.name));
            if clash {
                return Err(ParamError::Duplicate {
                    subsystem: param.subsystem.clone(),
                    name: param.name.clone(),
                });
            }
        }
        let count = incoming.len();
        self.params.extend(incoming);
        Ok(count)
    }

    pub fn get(&self, subsystem: &str, name: &str) -> Option<&Param> {
        self.params.iter().find(|param| param.matches(subsystem, name))
    }

    pub fn value(&self, subsystem: &str, name: &str) -> Option<&ParamValue> {
        self.get(subsystem, name).map(|param| &param.value)
    }

    /// Replace a value, keeping its registered type.
    pub fn set(&mut self, subsystem: &str, name: &str, value: ParamValue) -> ParamResult<()> {
        let param = self
            .params
            .iter_mut()
            .find(|param| param.matches(subsystem, name))
            .ok_or_else(|| ParamError::Unknown {
                subsystem: subsystem.to_string(),
                name: name.to_string(),
            })?;
        if !param.value.same_type(&value) {
            return Err(ParamError::InvalidValue {
                key: param.key(),
                value: value.to_string(),
                expected: param.value.type_name(),
            });
        }
        param.value = value;
        Ok(())
    }

    pub fn bind_gamepad(&mut self, subsystem: &str, name: &str, button: Option<Button>) -> ParamResult<()> {
        let param = self
            .params
            .iter_mut()
            .find(|param| param.matches(subsystem, name))
            .ok_or_else(|| ParamError::Unknown {
                subsystem: subsystem.to_string(),
                name: name.to_string(),
            })?;
        param.gamepad = button;
        Ok(())
    }

    pub fn params(&self) -> impl Iterator<Item = &Param> {
        self.params.iter()
    }

    pub fn subsystem<'a>(&'a self, subsystem: &'a str) -> impl Iterator<Item = &'a Param> + 'a {
        self.params.iter().filter(move |param| param.subsystem == subsystem)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn records(&self) -> Vec<ParamRecord> {
        self.params.iter().map(Param::to_record).collect()
    }

    /// Overlay stored values onto the defaults. A store that cannot be read
    /// leaves every default in place; bad records are skipped one by one.
    /// Returns how many records were applied.
    pub fn load_from(&mut self, store: &dyn ParamStore, logger: Option<&Logger>) -> usize {
        let records = match store.load() {
            Ok(records) => records,
            Err(err) => {
                emit(
                    logger,
                    LogLevel::Warn,
                    PARAMS_TARGET,
                    "param_store_unavailable",
                    [
                        json_kv("error", json!(err.to_string())),
                        json_kv("defaults", json!(self.params.len())),
                    ],
                );
                return 0;
            }
        };

        let mut applied = 0;
        for record in records {
            match self.apply_record(&record) {
                Ok(()) => applied += 1,
                Err(err) => emit(
                    logger,
                    LogLevel::Warn,
                    PARAMS_TARGET,
                    "param_record_skipped",
                    [
                        json_kv("record", json!(record.to_string())),
                        json_kv("error", json!(err.to_string())),
                    ],
                ),
            }
        }

        emit(
            logger,
            LogLevel::Debug,
            PARAMS_TARGET,
            "params_loaded",
            [json_kv("applied", json!(applied))],
        );
        applied
    }

    pub fn save_to(&self, store: &mut dyn ParamStore) -> ParamResult<()> {
        store.save(&self.records())
    }

    fn apply_record(&mut self, record: &ParamRecord) -> ParamResult<()> {
        let param = self
            .params
            .iter_mut()
            .find(|param| param.matches(&record.subsystem, &record.name))
            .ok_or_else(|| ParamError::Unknown {
                subsystem: record.subsystem.clone(),
                name: record.name.clone(),
            })?;
        let value = param.value.parse_like(&param.key(), &record.value)?;
        let gamepad = match record.gamepad.as_deref() {
            Some(name) => Some(
                Button::from_name(name).ok_or_else(|| ParamError::UnknownInput(name.to_string()))?,
            ),
            None => param.gamepad,
        };
        param.value = value;
        param.gamepad = gamepad;
        Ok(())
    }
}
