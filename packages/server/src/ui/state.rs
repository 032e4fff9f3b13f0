//! Shared application state.

use std::sync::Arc;

use telecare_shared::time::Clock;

use crate::{
    domain::{IceServerProvider, LobbyRepository, MessagePusher, ParticipantRepository},
    usecase::{
        CheckInPatientUseCase, ClearStateUseCase, ConnectParticipantUseCase,
        DisconnectParticipantUseCase, GetIceServersUseCase, GetRoomDetailUseCase,
        GetRoomsUseCase, JoinAsDoctorUseCase, LobbyNotifier, RelaySignalUseCase,
    },
};

/// Use cases shared by every handler
pub struct AppState {
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    pub join_as_doctor_usecase: Arc<JoinAsDoctorUseCase>,
    pub check_in_patient_usecase: Arc<CheckInPatientUseCase>,
    pub relay_signal_usecase: Arc<RelaySignalUseCase>,
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    pub get_ice_servers_usecase: Arc<GetIceServersUseCase>,
    pub clear_state_usecase: Arc<ClearStateUseCase>,
}

impl AppState {
    /// Wire every use case on top of the given repositories, pusher and ICE provider.
    pub fn new(
        participant_repository: Arc<dyn ParticipantRepository>,
        lobby_repository: Arc<dyn LobbyRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        ice_server_provider: Arc<dyn IceServerProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let lobby_notifier = Arc::new(LobbyNotifier::new(
            participant_repository.clone(),
            lobby_repository.clone(),
            message_pusher.clone(),
        ));

        Self {
            connect_participant_usecase: Arc::new(ConnectParticipantUseCase::new(
                participant_repository.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(
                participant_repository.clone(),
                lobby_repository.clone(),
                message_pusher.clone(),
                lobby_notifier.clone(),
            )),
            join_as_doctor_usecase: Arc::new(JoinAsDoctorUseCase::new(
                participant_repository.clone(),
                lobby_repository.clone(),
                lobby_notifier.clone(),
                clock.clone(),
            )),
            check_in_patient_usecase: Arc::new(CheckInPatientUseCase::new(
                participant_repository.clone(),
                lobby_repository.clone(),
                lobby_notifier,
                clock,
            )),
            relay_signal_usecase: Arc::new(RelaySignalUseCase::new(
                participant_repository.clone(),
                message_pusher.clone(),
            )),
            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(lobby_repository.clone())),
            get_room_detail_usecase: Arc::new(GetRoomDetailUseCase::new(
                lobby_repository.clone(),
            )),
            get_ice_servers_usecase: Arc::new(GetIceServersUseCase::new(ice_server_provider)),
            clear_state_usecase: Arc::new(ClearStateUseCase::new(
                participant_repository,
                lobby_repository,
                message_pusher,
            )),
        }
    }
}
