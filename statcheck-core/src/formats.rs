// Native writer toggles for Hive file formats, mapped from dotted property keys

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const AVRO_NATIVE_WRITER_ENABLED: &str = "avro.native-writer.enabled";
pub const CSV_NATIVE_WRITER_ENABLED: &str = "csv.native-writer.enabled";
pub const JSON_NATIVE_WRITER_ENABLED: &str = "json.native-writer.enabled";
pub const OPENX_JSON_NATIVE_WRITER_ENABLED: &str = "openx-json.native-writer.enabled";
pub const TEXT_FILE_NATIVE_WRITER_ENABLED: &str = "text-file.native-writer.enabled";
pub const SEQUENCE_FILE_NATIVE_WRITER_ENABLED: &str = "sequence-file.native-writer.enabled";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiveFormatsConfig {
    pub avro_file_native_writer_enabled: bool,
    pub csv_native_writer_enabled: bool,
    pub json_native_writer_enabled: bool,
    pub openx_json_native_writer_enabled: bool,
    pub text_file_native_writer_enabled: bool,
    pub sequence_file_native_writer_enabled: bool,
}

impl Default for HiveFormatsConfig {
    fn default() -> Self {
        Self {
            avro_file_native_writer_enabled: true,
            csv_native_writer_enabled: true,
            json_native_writer_enabled: true,
            openx_json_native_writer_enabled: true,
            text_file_native_writer_enabled: true,
            sequence_file_native_writer_enabled: true,
        }
    }
}

impl HiveFormatsConfig {
    /// Apply `key -> "true"|"false"` pairs over the defaults.
    /// Unknown keys and any other spelling of a boolean are rejected.
    pub fn from_properties<I, K, V>(properties: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in properties {
            let (key, value) = (key.as_ref(), value.as_ref());
            let enabled = parse_flag(key, value)?;
            *config.flag_mut(key)? = enabled;
        }
        Ok(config)
    }

    /// Full mapping, one entry per known key
    pub fn to_properties(&self) -> BTreeMap<String, String> {
        [
            (AVRO_NATIVE_WRITER_ENABLED, self.avro_file_native_writer_enabled),
            (CSV_NATIVE_WRITER_ENABLED, self.csv_native_writer_enabled),
            (JSON_NATIVE_WRITER_ENABLED, self.json_native_writer_enabled),
            (OPENX_JSON_NATIVE_WRITER_ENABLED, self.openx_json_native_writer_enabled),
            (TEXT_FILE_NATIVE_WRITER_ENABLED, self.text_file_native_writer_enabled),
            (SEQUENCE_FILE_NATIVE_WRITER_ENABLED, self.sequence_file_native_writer_enabled),
        ]
        .into_iter()
        .map(|(key, enabled)| (key.to_string(), enabled.to_string()))
        .collect()
    }

    fn flag_mut(&mut self, key: &str) -> Result<&mut bool, ConfigError> {
        match key {
            AVRO_NATIVE_WRITER_ENABLED => Ok(&mut self.avro_file_native_writer_enabled),
            CSV_NATIVE_WRITER_ENABLED => Ok(&mut self.csv_native_writer_enabled),
            JSON_NATIVE_WRITER_ENABLED => Ok(&mut self.json_native_writer_enabled),
            OPENX_JSON_NATIVE_WRITER_ENABLED => Ok(&mut self.openx_json_native_writer_enabled),
            TEXT_FILE_NATIVE_WRITER_ENABLED => Ok(&mut self.text_file_native_writer_enabled),
            SEQUENCE_FILE_NATIVE_WRITER_ENABLED => Ok(&mut self.sequence_file_native_writer_enabled),
            other => Err(ConfigError::UnknownProperty(other.to_string())),
        }
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
