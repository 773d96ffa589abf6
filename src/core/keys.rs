/// Named keys the remote client can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Space,
    Home,
    End,
    PageUp,
    PageDown,
}

/// Remote key name -> key, in slot order
static KEY_TABLE: [(&str, NamedKey); NamedKey::COUNT] = [
    ("ArrowLeft", NamedKey::ArrowLeft),
    ("ArrowRight", NamedKey::ArrowRight),
    ("ArrowUp", NamedKey::ArrowUp),
    ("ArrowDown", NamedKey::ArrowDown),
    ("Enter", NamedKey::Enter),
    ("Escape", NamedKey::Escape),
    ("Tab", NamedKey::Tab),
    ("Backspace", NamedKey::Backspace),
    ("Delete", NamedKey::Delete),
    ("Space", NamedKey::Space),
    ("Home", NamedKey::Home),
    ("End", NamedKey::End),
    ("PageUp", NamedKey::PageUp),
    ("PageDown", NamedKey::PageDown),
];

impl NamedKey {
    pub const COUNT: usize = 14;

    /// Look up a remote key name; unknown names map to None
    pub fn from_name(name: &str) -> Option<Self> {
        KEY_TABLE
            .iter()
            .find(|(key_name, _)| *key_name == name)
            .map(|&(_, key)| key)
    }

    /// All keys in slot order
    pub fn all() -> impl Iterator<Item = NamedKey> {
        KEY_TABLE.iter().map(|&(_, key)| key)
    }

    /// Index into a key slot array
    pub fn slot(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        KEY_TABLE[self.slot()].0
    }

    pub fn to_egui(self) -> egui::Key {
        match self {
            NamedKey::ArrowLeft => egui::Key::ArrowLeft,
            NamedKey::ArrowRight => egui::Key::ArrowRight,
            NamedKey::ArrowUp => egui::Key::ArrowUp,
            NamedKey::ArrowDown => egui::Key::ArrowDown,
            NamedKey::Enter => egui::Key::Enter,
            NamedKey::Escape => egui::Key::Escape,
            NamedKey::Tab => egui::Key::Tab,
            NamedKey::Backspace => egui::Key::Backspace,
            NamedKey::Delete => egui::Key::Delete,
            NamedKey::Space => egui::Key::Space,
            NamedKey::Home => egui::Key::Home,
            NamedKey::End => egui::Key::End,
            NamedKey::PageUp => egui::Key::PageUp,
            NamedKey::PageDown => egui::Key::PageDown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup_known_names() {
        assert_eq!(NamedKey::from_name("ArrowLeft"), Some(NamedKey::ArrowLeft));
        assert_eq!(NamedKey::from_name("Enter"), Some(NamedKey::Enter));
        assert_eq!(NamedKey::from_name("PageDown"), Some(NamedKey::PageDown));
    }

    #[test]
    fn test_unknown_names_are_unmapped() {
        assert_eq!(NamedKey::from_name("F13"), None);
        assert_eq!(NamedKey::from_name("a"), None);
        assert_eq!(NamedKey::from_name("enter"), None);
        assert_eq!(NamedKey::from_name(""), None);
    }

    #[test]
    fn test_slots_match_table_order() {
        for (index, key) in NamedKey::all().enumerate() {
            assert_eq!(key.slot(), index);
            assert_eq!(NamedKey::from_name(key.name()), Some(key));
        }
    }

    #[test]
    fn test_all_keys_unique() {
        let keys: HashSet<_> = NamedKey::all().collect();
        assert_eq!(keys.len(), NamedKey::COUNT);

        let egui_keys: HashSet<_> = NamedKey::all().map(NamedKey::to_egui).collect();
        assert_eq!(egui_keys.len(), NamedKey::COUNT);
    }
}
