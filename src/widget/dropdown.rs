#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dropdown {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownEvent {
    /// The response for the latest query was applied
    Resolved,
    Focused { has_query: bool },
    /// Input set to the empty string
    Cleared,
    /// Blur grace delay elapsed without a selection
    BlurElapsed,
    Selected,
}

impl Dropdown {
    pub fn on(self, event: DropdownEvent) -> Self {
        match event {
            DropdownEvent::Resolved => Dropdown::Open,
            DropdownEvent::Focused { has_query: true } => Dropdown::Open,
            DropdownEvent::Focused { has_query: false } => self,
            DropdownEvent::Cleared | DropdownEvent::BlurElapsed | DropdownEvent::Selected => {
                Dropdown::Closed
            }
        }
    }

    pub fn is_open(self) -> bool {
        self == Dropdown::Open
    }

    /// The list only shows when open and there is something to show.
    pub fn is_visible(self, results: usize) -> bool {
        self.is_open() && results > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_closed() {
        assert_eq!(Dropdown::default(), Dropdown::Closed);
    }

    #[test]
    fn test_resolve_opens_even_when_empty() {
        let dropdown = Dropdown::Closed.on(DropdownEvent::Resolved);
        assert!(dropdown.is_open());
        assert!(!dropdown.is_visible(0));
        assert!(dropdown.is_visible(2));
    }

    #[test]
    fn test_focus_opens_only_with_query() {
        assert_eq!(
            Dropdown::Closed.on(DropdownEvent::Focused { has_query: false }),
            Dropdown::Closed
        );
        assert_eq!(
            Dropdown::Closed.on(DropdownEvent::Focused { has_query: true }),
            Dropdown::Open
        );
        assert_eq!(
            Dropdown::Open.on(DropdownEvent::Focused { has_query: false }),
            Dropdown::Open
        );
    }

    #[test]
    fn test_closing_events() {
        for event in [
            DropdownEvent::Cleared,
            DropdownEvent::BlurElapsed,
            DropdownEvent::Selected,
        ] {
            assert_eq!(Dropdown::Open.on(event), Dropdown::Closed);
            assert_eq!(Dropdown::Closed.on(event), Dropdown::Closed);
        }
    }
}
