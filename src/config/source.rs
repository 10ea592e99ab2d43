//! Section-structured configuration file (INI dialect), read through the `config` crate.
//!
//! Section and option names compare case-insensitively. Values of the `DEFAULT`
//! section are visible from every other section. Values may reference other values
//! with `${option}` (same section) or `${Section:option}`; `$$` is a literal dollar sign.

use crate::error::ConfigError;
use ::config::{Config, File, FileFormat, Map, Source, Value, ValueKind};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_SECTION: &str = "DEFAULT";

const MAX_INTERPOLATION_DEPTH: usize = 10;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    fn new(name: &str) -> Self {
        Section {
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in file order, option names as written.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn get(&self, option: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(option))
            .map(|(_, v)| v.as_str())
    }

    fn set(&mut self, option: &str, value: &str) {
        match self
            .entries
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(option))
        {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((option.to_string(), value.to_string())),
        }
    }
}

/// Raw key/value store loaded from the configuration file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawConfigSource {
    defaults: Section,
    sections: Vec<Section>,
}

impl Default for RawConfigSource {
    fn default() -> Self {
        RawConfigSource {
            defaults: Section::new(DEFAULT_SECTION),
            sections: Vec::new(),
        }
    }
}

impl RawConfigSource {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }
        let config = Config::builder()
            .add_source(File::from(path).format(FileFormat::Ini).required(true))
            .build()?;
        let source = Self::from_config(&config)?;
        tracing::debug!(path = %path.display(), sections = source.sections.len(), "config file loaded");
        Ok(source)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from_str(text, FileFormat::Ini))
            .build()?;
        Self::from_config(&config)
    }

    fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let mut out = RawConfigSource::default();
        for (name, value) in config.collect()? {
            if !matches!(value.kind, ValueKind::Table(_)) {
                return Err(ConfigError::Unsectioned(name));
            }
            let section = out.section_or_insert(&name);
            let mut entries = Vec::new();
            flatten("", value.into_table()?, &mut entries)?;
            for (option, value) in entries {
                section.set(&option, &value);
            }
        }
        Ok(out)
    }

    fn section_or_insert(&mut self, name: &str) -> &mut Section {
        if is_default(name) {
            return &mut self.defaults;
        }
        match self.sections.iter().position(|s| s.name.eq_ignore_ascii_case(name)) {
            Some(i) => &mut self.sections[i],
            None => {
                self.sections.push(Section::new(name));
                let last = self.sections.len() - 1;
                &mut self.sections[last]
            }
        }
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Named section; `DEFAULT` is not returned here, see [`Self::defaults`].
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn defaults(&self) -> &Section {
        &self.defaults
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    /// Write `value`, creating the section when absent.
    pub fn set(&mut self, section: &str, option: &str, value: &str) {
        self.section_or_insert(section).set(option, value);
    }

    pub fn set_default(&mut self, option: &str, value: &str) {
        self.defaults.set(option, value);
    }

    /// Uninterpolated value. Existing sections fall back to `DEFAULT`; a missing section yields `None`.
    pub fn get_raw(&self, section: &str, option: &str) -> Option<&str> {
        if is_default(section) {
            return self.defaults.get(option);
        }
        self.section(section)
            .and_then(|s| s.get(option).or_else(|| self.defaults.get(option)))
    }

    /// Interpolated value.
    pub fn get(&self, section: &str, option: &str) -> Result<Option<String>, ConfigError> {
        match self.get_raw(section, option) {
            Some(raw) => self.interpolate(section, option, raw, 1).map(Some),
            None => Ok(None),
        }
    }

    fn interpolate(&self, section: &str, option: &str, raw: &str, depth: usize) -> Result<String, ConfigError> {
        let fail = |message: String| ConfigError::Interpolation {
            section: section.to_string(),
            option: option.to_string(),
            message,
        };
        if depth > MAX_INTERPOLATION_DEPTH {
            return Err(fail(format!("recursion deeper than {}", MAX_INTERPOLATION_DEPTH)));
        }
        if has_stray_dollar(raw) {
            return Err(fail("'$' must be followed by '$' or '{'".into()));
        }

        let mut out = String::with_capacity(raw.len());
        let mut rest = 0;
        for caps in reference_pattern().captures_iter(raw) {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            out.push_str(&raw[rest..whole.start]);
            rest = whole.end;
            let Some(reference) = caps.get(1) else {
                out.push('$');
                continue;
            };
            let (ref_section, ref_option) = match reference.as_str().split_once(':') {
                Some((s, o)) => (s, o),
                None => (section, reference.as_str()),
            };
            let value = self
                .get_raw(ref_section, ref_option)
                .ok_or_else(|| fail(format!("unresolved reference ${{{}}}", reference.as_str())))?;
            out.push_str(&self.interpolate(ref_section, ref_option, value, depth + 1)?);
        }
        out.push_str(&raw[rest..]);
        Ok(out)
    }
}

fn reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$(?:\$|\{([^}]*)\})").expect("static pattern"))
}

fn has_stray_dollar(raw: &str) -> bool {
    reference_pattern().replace_all(raw, "").contains('$')
}

fn is_default(section: &str) -> bool {
    section.eq_ignore_ascii_case(DEFAULT_SECTION)
}

/// Option entries of one section. Nested tables come back as dotted option names.
fn flatten(prefix: &str, table: Map<String, Value>, out: &mut Vec<(String, String)>) -> Result<(), ConfigError> {
    for (key, value) in table {
        let key = if prefix.is_empty() { key } else { format!("{}.{}", prefix, key) };
        if matches!(value.kind, ValueKind::Table(_)) {
            flatten(&key, value.into_table()?, out)?;
        } else {
            out.push((key, value.into_string()?));
        }
    }
    Ok(())
}
