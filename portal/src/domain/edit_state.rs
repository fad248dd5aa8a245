//! Row editing state for dashboard tables.
//!
//! A table holds a single [`EditState`], so at most one row can be in edit
//! mode at a time. Each row derives its own [`RowMode`] from it.

/// Table-wide edit state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState<K, F> {
    /// Every row is displayed read-only.
    Viewing,
    /// The row identified by `id` is being edited through `scratch`.
    Editing {
        /// Identifier of the row being edited.
        id: K,
        /// Scratch form seeded from the row when editing started.
        scratch: F,
    },
}

impl<K, F> Default for EditState<K, F> {
    fn default() -> Self {
        Self::Viewing
    }
}

/// How a single row should be presented.
#[derive(Debug, PartialEq, Eq)]
pub enum RowMode<'a, F> {
    /// Read-only.
    View,
    /// Editable, backed by the scratch form.
    Edit(&'a F),
}

impl<K: PartialEq, F> EditState<K, F> {
    /// Enter edit mode for `id`, replacing any row already being edited.
    ///
    /// # Examples
    /// ```
    /// use portal::domain::{EditState, RowMode};
    ///
    /// let mut state: EditState<&str, String> = EditState::default();
    /// state.start("r1", "draft".to_owned());
    /// assert_eq!(state.row_mode(&"r1"), RowMode::Edit(&"draft".to_owned()));
    /// assert_eq!(state.row_mode(&"r2"), RowMode::View);
    /// ```
    pub fn start(&mut self, id: K, scratch: F) {
        *self = Self::Editing { id, scratch };
    }

    /// Leave edit mode, discarding the scratch form.
    pub fn cancel(&mut self) {
        *self = Self::Viewing;
    }

    /// Whether any row is being edited.
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    /// Identifier and scratch form of the row being edited.
    pub fn editing(&self) -> Option<(&K, &F)> {
        match self {
            Self::Viewing => None,
            Self::Editing { id, scratch } => Some((id, scratch)),
        }
    }

    /// Mutable scratch form, for applying user input.
    pub fn scratch_mut(&mut self) -> Option<&mut F> {
        match self {
            Self::Viewing => None,
            Self::Editing { scratch, .. } => Some(scratch),
        }
    }

    /// Presentation mode for the row identified by `id`.
    pub fn row_mode(&self, id: &K) -> RowMode<'_, F> {
        match self {
            Self::Editing { id: editing, scratch } if editing == id => RowMode::Edit(scratch),
            _ => RowMode::View,
        }
    }
}
