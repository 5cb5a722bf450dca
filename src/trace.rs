//! Section-gated debug channels.
//!
//! Enablement comes from injected configuration — comma-separated section
//! lists, typically sourced from environment variables by the embedder —
//! never from process-wide state owned by this crate. Output goes through
//! the `log` facade with the section as target, formatted by the template
//! formatter.

use std::cell::Cell;

use crate::template;
use crate::value::Value;

/// Which debug sections are enabled.
#[derive(Clone, Debug, Default)]
pub struct DebugConfig {
    sections: Vec<String>,
}

impl DebugConfig {
    pub fn new() -> Self {
        DebugConfig::default()
    }

    /// Build from comma-separated section lists; entries are trimmed and
    /// empties dropped.
    pub fn from_lists<I, S>(lists: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sections = Vec::new();
        for list in lists {
            for section in list.as_ref().split(',') {
                let section = section.trim();
                if !section.is_empty() {
                    sections.push(section.to_string());
                }
            }
        }
        DebugConfig { sections }
    }

    pub fn enables(&self, section: &str) -> bool {
        self.sections.iter().any(|s| s == section)
    }
}

/// One section's logger. Disabled channels drop their arguments without
/// formatting them.
pub struct DebugChannel {
    section: String,
    enabled: Cell<bool>,
}

impl DebugChannel {
    pub fn enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    /// Log `args` through the template formatter: the first argument is
    /// the template, the rest are positional.
    pub fn log(&self, args: &[Value]) {
        if !self.enabled.get() {
            return;
        }
        let message = match args.split_first() {
            Some((template, rest)) => template::format(template, rest),
            None => String::new(),
        };
        log::debug!(target: self.section.as_str(), "{}", message);
    }
}

/// Create the logger for a section; enabled iff the config lists it.
pub fn debug(section: &str, config: &DebugConfig) -> DebugChannel {
    DebugChannel {
        section: section.to_string(),
        enabled: Cell::new(config.enables(section)),
    }
}
