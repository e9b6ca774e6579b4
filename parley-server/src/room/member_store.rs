use parley_core::ParticipantId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    /// Informational only, never used for routing.
    pub name: Option<String>,
}

/// Backing storage for room membership.
///
/// The directory only needs set semantics plus join order; anything that
/// can provide those (a shared store for multi-instance setups, say) can
/// stand in for [`InMemoryMemberStore`].
pub trait MemberStore: Send + 'static {
    /// Adds the participant. Returns `false` and leaves the store untouched
    /// if the id is already present.
    fn insert(&mut self, participant: Participant) -> bool;

    fn remove(&mut self, id: &ParticipantId) -> Option<Participant>;

    fn contains(&self, id: &ParticipantId) -> bool;

    /// Member ids in join order.
    fn ids(&self) -> Vec<ParticipantId>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
pub struct InMemoryMemberStore {
    members: Vec<Participant>,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemberStore for InMemoryMemberStore {
    fn insert(&mut self, participant: Participant) -> bool {
        if self.contains(&participant.id) {
            return false;
        }
        self.members.push(participant);
        true
    }

    fn remove(&mut self, id: &ParticipantId) -> Option<Participant> {
        let index = self.members.iter().position(|p| &p.id == id)?;
        Some(self.members.remove(index))
    }

    fn contains(&self, id: &ParticipantId) -> bool {
        self.members.iter().any(|p| &p.id == id)
    }

    fn ids(&self) -> Vec<ParticipantId> {
        self.members.iter().map(|p| p.id).collect()
    }

    fn len(&self) -> usize {
        self.members.len()
    }
}
