//! InMemory 接続レジストリ実装
//!
//! ドメイン層が定義する ParticipantRepository trait の具体的な実装。
//! `call_partner` を両側同時に書き換える操作は 1 回のロック取得の中で行い、
//! 他のタスクから片側だけ更新された状態が見えないようにします。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, PairOutcome, Participant, ParticipantRepository, RepositoryError, Role, RoomId,
};

/// インメモリ接続レジストリ
#[derive(Default)]
pub struct InMemoryParticipantRepository {
    /// Key: 接続 ID, Value: 参加者
    participants: Mutex<HashMap<ConnectionId, Participant>>,
}

impl InMemoryParticipantRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// `id` の通話相手を解除し、相手側の back-reference も消す
fn detach(
    participants: &mut HashMap<ConnectionId, Participant>,
    id: &ConnectionId,
) -> Option<ConnectionId> {
    let partner = participants.get_mut(id)?.call_partner.take()?;
    if let Some(other) = participants.get_mut(&partner)
        && other.call_partner.as_ref() == Some(id)
    {
        other.call_partner = None;
    }
    Some(partner)
}

#[async_trait]
impl ParticipantRepository for InMemoryParticipantRepository {
    async fn register(&self, participant: Participant) -> Result<(), RepositoryError> {
        let mut participants = self.participants.lock().await;
        if participants.contains_key(&participant.id) {
            return Err(RepositoryError::DuplicateConnection(
                participant.id.as_str().to_string(),
            ));
        }
        participants.insert(participant.id.clone(), participant);
        Ok(())
    }

    async fn get(&self, connection_id: &ConnectionId) -> Option<Participant> {
        let participants = self.participants.lock().await;
        participants.get(connection_id).cloned()
    }

    async fn set_role(&self, connection_id: &ConnectionId, role: Role) -> Option<Role> {
        let mut participants = self.participants.lock().await;
        let participant = participants.get_mut(connection_id)?;
        Some(std::mem::replace(&mut participant.role, role))
    }

    async fn remove(&self, connection_id: &ConnectionId) -> Option<Participant> {
        let mut participants = self.participants.lock().await;
        let removed = participants.remove(connection_id)?;
        // 返り値の call_partner は通知先として残す
        if let Some(partner) = &removed.call_partner
            && let Some(other) = participants.get_mut(partner)
            && other.call_partner.as_ref() == Some(connection_id)
        {
            other.call_partner = None;
        }
        Some(removed)
    }

    async fn pair(
        &self,
        a: &ConnectionId,
        b: &ConnectionId,
    ) -> Result<PairOutcome, RepositoryError> {
        if a == b {
            return Err(RepositoryError::SelfPairing(a.as_str().to_string()));
        }

        let mut participants = self.participants.lock().await;
        for id in [a, b] {
            if !participants.contains_key(id) {
                return Err(RepositoryError::ParticipantNotFound(id.as_str().to_string()));
            }
        }

        let mut outcome = PairOutcome::default();
        for (id, peer) in [(a, b), (b, a)] {
            if let Some(previous) = detach(&mut participants, id)
                && &previous != peer
                && !outcome.displaced.contains(&previous)
            {
                outcome.displaced.push(previous);
            }
        }

        if let Some(participant) = participants.get_mut(a) {
            participant.call_partner = Some(b.clone());
        }
        if let Some(participant) = participants.get_mut(b) {
            participant.call_partner = Some(a.clone());
        }

        Ok(outcome)
    }

    async fn unpair(&self, connection_id: &ConnectionId) -> Option<ConnectionId> {
        let mut participants = self.participants.lock().await;
        detach(&mut participants, connection_id)
    }

    async fn unpair_between(&self, a: &ConnectionId, b: &ConnectionId) -> bool {
        let mut participants = self.participants.lock().await;
        let paired = participants
            .get(a)
            .is_some_and(|p| p.call_partner.as_ref() == Some(b));
        if paired {
            detach(&mut participants, a);
        }
        paired
    }

    async fn find_doctors_in_room(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        let participants = self.participants.lock().await;
        let mut doctors: Vec<&Participant> = participants
            .values()
            .filter(|p| p.role.is_doctor_of(room_id))
            .collect();
        // 通知順を安定させるため接続時刻順
        doctors.sort_by_key(|p| p.connected_at);
        doctors.into_iter().map(|p| p.id.clone()).collect()
    }

    async fn count(&self) -> usize {
        let participants = self.participants.lock().await;
        participants.len()
    }

    async fn clear(&self) {
        let mut participants = self.participants.lock().await;
        participants.clear();
    }
}
