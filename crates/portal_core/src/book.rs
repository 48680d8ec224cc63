use serde::Serialize;

/// Whether the portal book is showing its cover or its pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookTransition {
    Opened,
    Closed,
}

impl BookState {
    pub fn is_open(self) -> bool {
        self == BookState::Open
    }

    pub fn toggled(self) -> Self {
        match self {
            BookState::Closed => BookState::Open,
            BookState::Open => BookState::Closed,
        }
    }

    /// `None` when the book is already in `target`.
    pub fn transition(self, target: BookState) -> Option<BookTransition> {
        match (self, target) {
            (BookState::Closed, BookState::Open) => Some(BookTransition::Opened),
            (BookState::Open, BookState::Closed) => Some(BookTransition::Closed),
            _ => None,
        }
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            BookState::Closed => "Enter Portal",
            BookState::Open => "Close Portal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_only_between_distinct_states() {
        assert_eq!(
            BookState::Closed.transition(BookState::Open),
            Some(BookTransition::Opened)
        );
        assert_eq!(
            BookState::Open.transition(BookState::Closed),
            Some(BookTransition::Closed)
        );
        assert_eq!(BookState::Open.transition(BookState::Open), None);
        assert_eq!(BookState::Closed.transition(BookState::Closed), None);
    }

    #[test]
    fn toggling_twice_is_identity() {
        let start = BookState::default();
        assert_eq!(start, BookState::Closed);
        assert_eq!(start.toggled().toggled(), start);
        assert_eq!(start.toggled().toggle_label(), "Close Portal");
    }
}
