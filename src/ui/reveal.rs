//! One-shot fade-in of page sections as they scroll into view

/// Index of a registered section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    Hidden,
    Revealed,
}

/// What the caller should do with a visibility notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealAction {
    /// Add the visible class and stop observing the section
    Reveal,
    Ignore,
}

/// Tracks which sections have already faded in
#[derive(Debug, Clone, Default)]
pub struct RevealBoard {
    sections: Vec<SectionState>,
}

impl RevealBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a section in the hidden state
    pub fn register(&mut self) -> SectionId {
        self.sections.push(SectionState::Hidden);
        SectionId(self.sections.len() - 1)
    }

    /// Handle a visibility change. Only the first transition into view
    /// reveals; a revealed section never hides again.
    pub fn notify(&mut self, id: SectionId, intersecting: bool) -> RevealAction {
        let Some(state) = self.sections.get_mut(id.0) else {
            return RevealAction::Ignore;
        };
        if intersecting && *state == SectionState::Hidden {
            *state = SectionState::Revealed;
            RevealAction::Reveal
        } else {
            RevealAction::Ignore
        }
    }

    pub fn state(&self, id: SectionId) -> Option<SectionState> {
        self.sections.get(id.0).copied()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sections not yet revealed
    pub fn hidden_count(&self) -> usize {
        self.sections
            .iter()
            .filter(|s| **s == SectionState::Hidden)
            .count()
    }
}
