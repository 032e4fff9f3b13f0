//! HashMap をインメモリ DB として使う Repository 実装
//!
//! プロセス再起動をまたいだ永続化は行いません。

mod lobby;
mod participant;

pub use lobby::InMemoryLobbyRepository;
pub use participant::InMemoryParticipantRepository;
