//! Key bindings for the terminal shell.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use tracing::warn;

/// A user action the shell can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    Start,
    Pause,
    Reset,
    ResetAll,
    Exit,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Start,
        Action::Pause,
        Action::Reset,
        Action::ResetAll,
        Action::Exit,
    ];

    /// Name used in the `[key_bindings]` config section.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Pause => "pause",
            Action::Reset => "reset",
            Action::ResetAll => "reset_all",
            Action::Exit => "exit",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.as_str() == name)
    }

    fn default_keys(&self) -> &'static str {
        match self {
            Action::Start => "s",
            Action::Pause => "p",
            Action::Reset => "r",
            Action::ResetAll => "a",
            Action::Exit => "q",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps input strings to actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    keys: HashMap<String, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_table(&BTreeMap::new())
    }
}

impl KeyBindings {
    /// The default `[key_bindings]` table.
    #[must_use]
    pub fn default_table() -> BTreeMap<String, String> {
        Action::ALL
            .iter()
            .map(|action| (action.as_str().to_string(), action.default_keys().to_string()))
            .collect()
    }

    /// Builds bindings from an action → comma-separated keys table.
    ///
    /// Actions missing from `table` keep their default keys; unknown action
    /// names are skipped.
    #[must_use]
    pub fn from_table(table: &BTreeMap<String, String>) -> Self {
        let mut per_action: BTreeMap<Action, &str> = Action::ALL
            .iter()
            .map(|action| (*action, action.default_keys()))
            .collect();

        for (name, keys) in table {
            match Action::from_name(name.trim()) {
                Some(action) => {
                    per_action.insert(action, keys.as_str());
                }
                None => warn!("Ignoring key binding for unknown action '{}'", name),
            }
        }

        let mut bindings = HashMap::new();
        for (action, keys) in per_action {
            for key in keys.split(',').map(str::trim).filter(|k| !k.is_empty()) {
                if let Some(previous) = bindings.insert(key.to_string(), action) {
                    if previous != action {
                        warn!("Key '{}' bound to both {} and {}", key, previous, action);
                    }
                }
            }
        }
        Self { keys: bindings }
    }

    /// Looks up the action for a line of input.
    #[must_use]
    pub fn action_for(&self, input: &str) -> Option<Action> {
        self.keys.get(input.trim()).copied()
    }

    /// Keys bound to `action`, sorted.
    #[must_use]
    pub fn keys_for(&self, action: Action) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .keys
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(key, _)| key.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_action_names() {
        for action in Action::ALL {
            assert_eq!(Action::from_name(action.as_str()), Some(action));
        }
        assert_eq!(Action::from_name("focus_next"), None);
        assert_eq!(Action::ResetAll.to_string(), "reset_all");
    }

    #[test]
    fn test_default_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(keys.action_for("s"), Some(Action::Start));
        assert_eq!(keys.action_for("p"), Some(Action::Pause));
        assert_eq!(keys.action_for("r"), Some(Action::Reset));
        assert_eq!(keys.action_for("a"), Some(Action::ResetAll));
        assert_eq!(keys.action_for("q"), Some(Action::Exit));
        assert_eq!(keys.action_for("x"), None);
    }

    #[test]
    fn test_input_is_trimmed() {
        let keys = KeyBindings::default();
        assert_eq!(keys.action_for("  s \n"), Some(Action::Start));
    }

    #[test]
    fn test_multiple_keys_per_action() {
        let keys = KeyBindings::from_table(&table(&[("exit", "q, quit ,x")]));
        assert_eq!(keys.keys_for(Action::Exit), vec!["q", "quit", "x"]);
        assert_eq!(keys.action_for("quit"), Some(Action::Exit));
    }

    #[test]
    fn test_override_replaces_default_keys() {
        let keys = KeyBindings::from_table(&table(&[("pause", "space")]));
        assert_eq!(keys.action_for("p"), None);
        assert_eq!(keys.action_for("space"), Some(Action::Pause));
        assert_eq!(keys.action_for("s"), Some(Action::Start));
    }

    #[test]
    fn test_unknown_actions_ignored() {
        let keys = KeyBindings::from_table(&table(&[("focus_next", "tab")]));
        assert_eq!(keys.action_for("tab"), None);
        assert_eq!(keys, KeyBindings::default());
    }

    #[test]
    fn test_empty_keys_skipped() {
        let keys = KeyBindings::from_table(&table(&[("reset_all", " , ")]));
        assert!(keys.keys_for(Action::ResetAll).is_empty());
        assert_eq!(keys.action_for(""), None);
    }
}
