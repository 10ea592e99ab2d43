//! Environment-variable lookup. Resolution takes the environment as a value so tests never touch process state.

use std::collections::HashMap;

pub trait Environment {
    fn var(&self, key: &str) -> Option<String>;

    /// First alias that is set, in declaration order.
    fn first_of(&self, aliases: &[&str]) -> Option<String> {
        aliases.iter().find_map(|alias| self.var(alias))
    }
}

/// The real process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Environment for [(&str, &str)] {
    fn var(&self, key: &str) -> Option<String> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| (*v).to_string())
    }
}

impl<const N: usize> Environment for [(&str, &str); N] {
    fn var(&self, key: &str) -> Option<String> {
        self.as_slice().var(key)
    }
}
