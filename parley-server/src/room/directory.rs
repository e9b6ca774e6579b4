use crate::error::DirectoryError;
use crate::room::member_store::{InMemoryMemberStore, MemberStore, Participant};
use parley_core::ParticipantId;
use tracing::debug;

/// Who is currently in the room.
pub struct RoomDirectory {
    store: Box<dyn MemberStore>,
}

impl RoomDirectory {
    pub fn new(store: Box<dyn MemberStore>) -> Self {
        Self { store }
    }

    /// Adds `id` and returns the members that were already present, in
    /// join order.
    pub fn join(
        &mut self,
        id: ParticipantId,
        name: Option<String>,
    ) -> Result<Vec<ParticipantId>, DirectoryError> {
        if self.store.contains(&id) {
            return Err(DirectoryError::AlreadyMember(id));
        }

        let existing = self.store.ids();
        self.store.insert(Participant { id, name });
        debug!(participant_id = %id, members = self.store.len(), "participant joined");

        Ok(existing)
    }

    pub fn leave(&mut self, id: &ParticipantId) -> Option<Participant> {
        let removed = self.store.remove(id);
        if removed.is_some() {
            debug!(participant_id = %id, members = self.store.len(), "participant left");
        }
        removed
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.store.contains(id)
    }

    pub fn member_ids(&self) -> Vec<ParticipantId> {
        self.store.ids()
    }

    /// Every member except `id`.
    pub fn others(&self, id: &ParticipantId) -> Vec<ParticipantId> {
        self.store.ids().into_iter().filter(|m| m != id).collect()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl Default for RoomDirectory {
    fn default() -> Self {
        Self::new(Box::new(InMemoryMemberStore::new()))
    }
}
