//! Game mode selection.

/// Who turns the cards over?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumIter)]
pub enum PlayMode {
    /// The person at the keyboard.
    #[default]
    Human,
    /// A perfect-recall bot, endlessly replaying.
    Watch,
}

impl PlayMode {
    /// Returns display name.
    pub fn name(&self) -> &'static str {
        match self {
            PlayMode::Human => "Player",
            PlayMode::Watch => "RecallBot",
        }
    }

    /// Key help shown in the footer.
    pub fn help(&self) -> &'static str {
        match self {
            PlayMode::Human => "←↑↓→ move · Enter/Space flip · r restart · q quit",
            PlayMode::Watch => "Watching RecallBot · q quit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_mode_has_help() {
        for mode in PlayMode::iter() {
            assert!(mode.help().contains("q quit"), "{} help", mode);
        }
    }

    #[test]
    fn test_labels_outlive_the_mode() {
        let (name, help): (&'static str, &'static str) = {
            let mode = PlayMode::Watch;
            (mode.name(), mode.help())
        };
        assert_eq!(name, "RecallBot");
        assert!(help.starts_with("Watching"));
    }
}
