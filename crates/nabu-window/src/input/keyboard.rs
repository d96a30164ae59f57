use std::collections::HashMap;

use crate::error::{Error, Result};

use super::keysym::Keysym;
use super::types::Key;

/// Keyboard tracker for a single window.
///
/// The name table is configured once and is read-only afterwards. Down/up
/// state is keyed by native symbol so keys outside the table are still
/// tracked, just not addressable by name.
#[derive(Debug, Default, Clone)]
pub struct Keyboard {
    names: HashMap<String, Keysym>,
    down: HashMap<Keysym, bool>,
    mapped: bool,
}

impl Keyboard {
    /// Installs the logical name → symbol table.
    pub fn map_keys<I, S>(&mut self, mapping: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, Keysym)>,
        S: Into<String>,
    {
        if self.mapped {
            return Err(Error::KeysAlreadyMapped);
        }

        self.names = mapping
            .into_iter()
            .map(|(name, sym)| (name.into(), sym))
            .collect();
        self.mapped = true;
        Ok(())
    }

    /// Records a press or release. The last event for a symbol wins.
    pub fn register_event(&mut self, symbol: Keysym, is_down: bool) {
        self.down.insert(symbol, is_down);
    }

    /// Current state of the key bound to `name`.
    pub fn key_state(&self, name: &str) -> Result<bool> {
        let symbol = self
            .names
            .get(name)
            .ok_or_else(|| Error::UnknownKey(name.to_string()))?;
        Ok(self.symbol_down(*symbol))
    }

    /// Typed shorthand for [`Keyboard::key_state`].
    pub fn key_down(&self, key: Key) -> Result<bool> {
        self.key_state(key.name())
    }

    /// Current state of a raw symbol, mapped or not.
    pub fn symbol_down(&self, symbol: Keysym) -> bool {
        self.down.get(&symbol).copied().unwrap_or(false)
    }

    /// Symbol bound to `name`, if any.
    pub fn symbol_for(&self, name: &str) -> Option<Keysym> {
        self.names.get(name).copied()
    }

    pub fn is_mapped(&self) -> bool {
        self.mapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keysym;

    fn mapped() -> Keyboard {
        let mut kb = Keyboard::default();
        kb.map_keys(Key::default_mapping()).unwrap();
        kb
    }

    #[test]
    fn last_event_for_symbol_wins() {
        let mut kb = mapped();
        kb.register_event(keysym::SPACE, true);
        kb.register_event(keysym::SPACE, true);
        kb.register_event(keysym::SPACE, false);
        assert_eq!(kb.key_state("SPACE"), Ok(false));

        kb.register_event(keysym::SPACE, true);
        assert_eq!(kb.key_state("SPACE"), Ok(true));
    }

    #[test]
    fn unknown_name_is_an_error() {
        let kb = mapped();
        assert_eq!(
            kb.key_state("NONEXISTENT"),
            Err(Error::UnknownKey("NONEXISTENT".to_string()))
        );
    }

    #[test]
    fn unmapped_symbols_are_tracked_but_unnamed() {
        let mut kb = mapped();
        let letter_a: Keysym = 0x0061;
        kb.register_event(letter_a, true);
        assert!(kb.symbol_down(letter_a));
        assert!(kb.key_state("A").is_err());
    }

    #[test]
    fn typed_lookup_matches_name_lookup() {
        let mut kb = mapped();
        kb.register_event(keysym::ESCAPE, true);
        assert_eq!(kb.key_down(Key::Escape), Ok(true));
        assert_eq!(kb.key_state("ESC"), Ok(true));
        assert_eq!(kb.key_down(Key::Enter), Ok(false));
    }

    #[test]
    fn mapping_is_configured_once() {
        let mut kb = mapped();
        assert_eq!(
            kb.map_keys([("X", 0x78)]),
            Err(Error::KeysAlreadyMapped)
        );
        assert_eq!(kb.symbol_for("ENTER"), Some(keysym::RETURN));
    }
}
