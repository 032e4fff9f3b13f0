//! WebSocket event DTOs.
//!
//! Every text frame carries one envelope: `{"event": "<name>", "data": <payload>}`.
//! Event names and camelCase payload fields match what the browser client emits.

use serde::{Deserialize, Serialize};

/// Events sent by browser clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Payload is the room id itself
    DoctorJoinRoom(String),
    PatientCheckIn(PatientCheckInPayload),
    OfferToPatient(OfferToPatientPayload),
    AnswerToDoctor(AnswerToDoctorPayload),
    SendIceCandidate(SendIceCandidatePayload),
    CallDeclinedByPatient(CallDeclinedPayload),
    HangUp(HangUpPayload),
}

impl ClientEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::DoctorJoinRoom(_) => "doctor-join-room",
            ClientEvent::PatientCheckIn(_) => "patient-check-in",
            ClientEvent::OfferToPatient(_) => "offer-to-patient",
            ClientEvent::AnswerToDoctor(_) => "answer-to-doctor",
            ClientEvent::SendIceCandidate(_) => "send-ice-candidate",
            ClientEvent::CallDeclinedByPatient(_) => "call-declined-by-patient",
            ClientEvent::HangUp(_) => "hang-up",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientInfo {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientCheckInPayload {
    pub doctor_room_id: String,
    pub patient_info: PatientInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferToPatientPayload {
    pub to_patient_id: String,
    pub offer: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerToDoctorPayload {
    pub to_doctor_id: String,
    pub answer: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendIceCandidatePayload {
    pub to_id: String,
    pub candidate: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallDeclinedPayload {
    pub to_doctor_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HangUpPayload {
    pub to_id: String,
}

/// Events sent by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    Connected(ConnectedPayload),
    LobbyUpdated(Vec<LobbyEntryDto>),
    CallIncomingFromDoctor(CallIncomingPayload),
    CallAnsweredByPatient(CallAnsweredPayload),
    ReceiveIceCandidate(ReceiveIceCandidatePayload),
    CallDeclinedByPatient,
    CallEnded,
    Error(ErrorPayload),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedPayload {
    pub connection_id: String,
}

/// One waiting patient, as listed to doctors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyEntryDto {
    pub name: String,
    pub socket_id: String,
    pub checked_in_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallIncomingPayload {
    pub from_doctor_id: String,
    pub offer: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallAnsweredPayload {
    pub from_patient_id: String,
    pub answer: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveIceCandidatePayload {
    pub from_id: String,
    pub candidate: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_doctor_join_room() {
        // テスト項目: doctor-join-room はルーム ID の文字列をそのままペイロードに持つ
        // given (前提条件):
        let text = r#"{"event":"doctor-join-room","data":"R1"}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(event, ClientEvent::DoctorJoinRoom("R1".to_string()));
    }

    #[test]
    fn test_parse_patient_check_in() {
        // テスト項目: patient-check-in の camelCase フィールドが読める
        // given (前提条件):
        let text = r#"{"event":"patient-check-in","data":{"doctorRoomId":"R1","patientInfo":{"name":"Ann"}}}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::PatientCheckIn(PatientCheckInPayload {
                doctor_room_id: "R1".to_string(),
                patient_info: PatientInfo {
                    name: "Ann".to_string()
                },
            })
        );
    }

    #[test]
    fn test_parse_offer_keeps_payload_verbatim() {
        // テスト項目: offer の中身は解釈されずそのまま保持される
        // given (前提条件):
        let offer = json!({"type": "offer", "sdp": "v=0\r\no=- 1 2 IN IP4 127.0.0.1"});
        let text = json!({
            "event": "offer-to-patient",
            "data": {"toPatientId": "p1", "offer": offer}
        })
        .to_string();

        // when (操作):
        let event: ClientEvent = serde_json::from_str(&text).unwrap();

        // then (期待する結果):
        match event {
            ClientEvent::OfferToPatient(payload) => {
                assert_eq!(payload.to_patient_id, "p1");
                assert_eq!(payload.offer, offer);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_missing_fields_and_unknown_events() {
        // テスト項目: 必須フィールドの欠落や未知のイベントはパースエラーになる
        // given (前提条件):
        let missing_offer = r#"{"event":"offer-to-patient","data":{"toPatientId":"p1"}}"#;
        let missing_to = r#"{"event":"hang-up","data":{}}"#;
        let unknown = r#"{"event":"reboot-server","data":null}"#;
        let not_json = "hello";

        // when (操作) / then (期待する結果):
        assert!(serde_json::from_str::<ClientEvent>(missing_offer).is_err());
        assert!(serde_json::from_str::<ClientEvent>(missing_to).is_err());
        assert!(serde_json::from_str::<ClientEvent>(unknown).is_err());
        assert!(serde_json::from_str::<ClientEvent>(not_json).is_err());
    }

    #[test]
    fn test_serialize_lobby_updated() {
        // テスト項目: lobby-updated は name / socketId を持つ配列として送られる
        // given (前提条件):
        let event = ServerEvent::LobbyUpdated(vec![LobbyEntryDto {
            name: "Ann".to_string(),
            socket_id: "p1".to_string(),
            checked_in_at: 1000,
        }]);

        // when (操作):
        let value = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({
                "event": "lobby-updated",
                "data": [{"name": "Ann", "socketId": "p1", "checkedInAt": 1000}]
            })
        );
    }

    #[test]
    fn test_serialize_unit_events_without_data() {
        // テスト項目: call-ended / call-declined-by-patient はペイロードなしで送られる
        // given (前提条件):
        let ended = ServerEvent::CallEnded;
        let declined = ServerEvent::CallDeclinedByPatient;

        // when (操作):
        let ended_value = serde_json::to_value(&ended).unwrap();
        let declined_value = serde_json::to_value(&declined).unwrap();

        // then (期待する結果):
        assert_eq!(ended_value, json!({"event": "call-ended"}));
        assert_eq!(declined_value, json!({"event": "call-declined-by-patient"}));
    }
}
