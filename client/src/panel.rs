/// Whether the shelter list panel is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Expanded,
    Collapsed,
}

impl PanelState {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Expanded => Self::Collapsed,
            Self::Collapsed => Self::Expanded,
        }
    }

    pub const fn is_collapsed(self) -> bool {
        matches!(self, Self::Collapsed)
    }

    /// Toggle button glyph, pointing the way the panel will move.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Expanded => "\u{00AB}",
            Self::Collapsed => "\u{00BB}",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Expanded => "一覧を閉じる",
            Self::Collapsed => "一覧を開く",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_state() {
        for state in [PanelState::Expanded, PanelState::Collapsed] {
            assert_ne!(state.toggled(), state);
            assert_eq!(state.toggled().toggled(), state);
            assert_eq!(state.toggled().toggled().glyph(), state.glyph());
        }
    }

    #[test]
    fn glyph_follows_state() {
        assert_eq!(PanelState::default(), PanelState::Expanded);
        assert_eq!(PanelState::Expanded.glyph(), "«");
        assert_eq!(PanelState::Collapsed.glyph(), "»");
        assert!(PanelState::Collapsed.is_collapsed());
        assert!(!PanelState::Expanded.is_collapsed());
    }
}
