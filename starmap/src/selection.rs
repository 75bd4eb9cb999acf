use crate::model::EntityId;
use log::debug;

/// Holds at most one selected body. `select` and `clear` are the only writers.
#[derive(Clone, Debug, Default)]
pub struct SelectionController {
    selected: Option<EntityId>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever was selected. Returns the previous selection.
    pub fn select(&mut self, id: EntityId) -> Option<EntityId> {
        debug!("select {:?}", id);
        self.selected.replace(id)
    }

    pub fn clear(&mut self) -> Option<EntityId> {
        debug!("clear selection");
        self.selected.take()
    }

    pub fn current(&self) -> Option<EntityId> {
        self.selected
    }

    pub fn is_selected(&self, id: EntityId) -> bool {
        self.selected == Some(id)
    }
}
