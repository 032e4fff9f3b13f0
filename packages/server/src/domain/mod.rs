//! ドメイン層
//!
//! シグナリングとロビー管理のドメインモデル、およびドメイン層が必要とする
//! インターフェース（Repository, MessagePusher, IceServerProvider）を定義します。

pub mod entity;
pub mod error;
pub mod factory;
pub mod ice_server;
pub mod message_pusher;
pub mod notification;
pub mod repository;
pub mod value_object;

pub use entity::{Lobby, LobbyEntry, Participant, Role};
pub use error::{IceServerError, MessagePushError, RepositoryError, ValueObjectError};
pub use factory::ConnectionIdFactory;
pub use ice_server::{IceServer, IceServerProvider};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use notification::Notification;
pub use repository::{LobbyRepository, ParticipantRepository, PairOutcome};
pub use value_object::{ConnectionId, DisplayName, RoomId, SignalPayload, Timestamp};
