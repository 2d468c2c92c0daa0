//! Focus signal from the view layer.
//!
//! A recompute pass must not overwrite a field the user is actively
//! editing. The view answers that question through this port; the pass
//! samples it fresh each time it runs, so a stale focus can never shield
//! a field across passes.

use std::collections::HashSet;

/// An editable field of the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditField {
    /// The bankroll (total money) entry.
    Bankroll,
    /// A row's stake entry.
    Stake(usize),
    /// A row's odds entry.
    Odds(usize),
}

/// Answers whether a field is currently under active edit.
pub trait FocusSource {
    /// `true` while the user is editing the given field.
    fn is_focused(&self, field: EditField) -> bool;
}

/// No field focused. For batch and headless callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFocus;

impl FocusSource for NoFocus {
    fn is_focused(&self, _field: EditField) -> bool {
        false
    }
}

/// Set-backed focus source for views that track focus and blur events.
#[derive(Debug, Clone, Default)]
pub struct FocusSet {
    focused: HashSet<EditField>,
}

impl FocusSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a field as under active edit.
    pub fn focus(&mut self, field: EditField) {
        self.focused.insert(field);
    }

    /// Clears a field's active-edit mark.
    pub fn blur(&mut self, field: EditField) {
        self.focused.remove(&field);
    }
}

impl FocusSource for FocusSet {
    fn is_focused(&self, field: EditField) -> bool {
        self.focused.contains(&field)
    }
}
