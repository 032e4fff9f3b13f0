//! Conversion logic between DTOs and domain entities.

use telecare_shared::time::timestamp_to_rfc3339;

use crate::domain::{IceServer, Lobby, LobbyEntry, Notification};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain → DTO
// ========================================

impl From<LobbyEntry> for dto::LobbyEntryDto {
    fn from(entry: LobbyEntry) -> Self {
        Self {
            name: entry.display_name.into_string(),
            socket_id: entry.connection_id.into_string(),
            checked_in_at: entry.checked_in_at.value(),
        }
    }
}

impl From<&Notification> for dto::ServerEvent {
    fn from(notification: &Notification) -> Self {
        match notification.clone() {
            Notification::Connected { connection_id } => {
                Self::Connected(dto::ConnectedPayload {
                    connection_id: connection_id.into_string(),
                })
            }
            Notification::LobbyUpdated { entries } => {
                Self::LobbyUpdated(entries.into_iter().map(Into::into).collect())
            }
            Notification::CallIncoming { from_doctor, offer } => {
                Self::CallIncomingFromDoctor(dto::CallIncomingPayload {
                    from_doctor_id: from_doctor.into_string(),
                    offer: offer.into_value(),
                })
            }
            Notification::CallAnswered {
                from_patient,
                answer,
            } => Self::CallAnsweredByPatient(dto::CallAnsweredPayload {
                from_patient_id: from_patient.into_string(),
                answer: answer.into_value(),
            }),
            Notification::IceCandidate { from, candidate } => {
                Self::ReceiveIceCandidate(dto::ReceiveIceCandidatePayload {
                    from_id: from.into_string(),
                    candidate: candidate.into_value(),
                })
            }
            Notification::CallDeclined => Self::CallDeclinedByPatient,
            Notification::CallEnded => Self::CallEnded,
        }
    }
}

impl From<Lobby> for http::RoomSummaryDto {
    fn from(lobby: Lobby) -> Self {
        Self {
            id: lobby.room_id.into_string(),
            waiting_patients: lobby.entries.len(),
            created_at: timestamp_to_rfc3339(lobby.created_at.value()),
        }
    }
}

impl From<Lobby> for http::RoomDetailDto {
    fn from(lobby: Lobby) -> Self {
        Self {
            id: lobby.room_id.into_string(),
            patients: lobby.entries.into_iter().map(Into::into).collect(),
            created_at: timestamp_to_rfc3339(lobby.created_at.value()),
        }
    }
}

impl From<IceServer> for http::IceServerDto {
    fn from(server: IceServer) -> Self {
        Self {
            urls: server.urls,
            username: server.username,
            credential: server.credential,
        }
    }
}
