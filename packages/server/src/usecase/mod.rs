//! UseCase 層
//!
//! 1 つの操作につき 1 つの UseCase 構造体を定義します。
//! UseCase はドメイン層の trait（`Arc<dyn Trait>`）にのみ依存します。

mod check_in_patient;
mod clear_state;
mod connect_participant;
mod disconnect_participant;
mod error;
mod get_ice_servers;
mod get_room_detail;
mod get_rooms;
mod join_as_doctor;
mod lobby_notifier;
mod relay_signal;

#[cfg(test)]
mod test_support;

pub use check_in_patient::CheckInPatientUseCase;
pub use clear_state::ClearStateUseCase;
pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{
    ConnectError, DisconnectError, GetIceServersError, GetRoomDetailError, LobbyError,
};
pub use get_ice_servers::GetIceServersUseCase;
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_as_doctor::JoinAsDoctorUseCase;
pub use lobby_notifier::LobbyNotifier;
pub use relay_signal::{RelayOutcome, RelaySignalUseCase};
