//! UseCase: シグナリングの中継
//!
//! offer / answer / ICE candidate / 辞退 / 切断要求を、宛先の接続へそのまま転送します。
//! メッセージの順序は検証しません（ブラウザ側が順序を管理する）。
//! 宛先が存在しない場合は何もせずに捨て、再送も保留もしません。
//!
//! 通話相手（`call_partner`）の管理:
//!
//! | メッセージ | 転送するイベント              | 通話相手       |
//! |------------|-------------------------------|----------------|
//! | offer      | call-incoming-from-doctor     | 結びつける     |
//! | answer     | call-answered-by-patient      | 結びつける     |
//! | candidate  | receive-ice-candidate         | 変更なし       |
//! | decline    | call-declined-by-patient      | 宛先との間のみ解除 |
//! | hang-up    | call-ended                    | 解除           |
//!
//! ## テスト実装の作業記録
//!
//! ### どのような状況を想定しているか
//! - 正常系：offer → answer → hang-up の一連の流れ
//! - 正常系：candidate は offer の前後どちらでも転送される
//! - エッジケース：存在しない宛先（何も起きない）
//! - エッジケース：通話中の医師が別の患者に offer（元の相手に call-ended）

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePushError, MessagePusher, Notification, ParticipantRepository,
    SignalPayload,
};

/// 中継の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    Delivered,
    /// 宛先が存在しない（または送信できない）ため捨てた
    Dropped,
}

/// シグナリング中継のユースケース
pub struct RelaySignalUseCase {
    repository: Arc<dyn ParticipantRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelaySignalUseCase {
    pub fn new(
        repository: Arc<dyn ParticipantRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 医師 → 患者: offer を call-incoming-from-doctor として転送
    pub async fn offer(
        &self,
        from: &ConnectionId,
        to: &ConnectionId,
        offer: SignalPayload,
    ) -> RelayOutcome {
        let notification = Notification::CallIncoming {
            from_doctor: from.clone(),
            offer,
        };
        let outcome = self.forward(from, to, &notification).await;
        if outcome == RelayOutcome::Delivered {
            self.pair(from, to).await;
        }
        outcome
    }

    /// 患者 → 医師: answer を call-answered-by-patient として転送
    pub async fn answer(
        &self,
        from: &ConnectionId,
        to: &ConnectionId,
        answer: SignalPayload,
    ) -> RelayOutcome {
        let notification = Notification::CallAnswered {
            from_patient: from.clone(),
            answer,
        };
        let outcome = self.forward(from, to, &notification).await;
        if outcome == RelayOutcome::Delivered {
            self.pair(from, to).await;
        }
        outcome
    }

    /// 双方向: ICE candidate を receive-ice-candidate として転送
    pub async fn ice_candidate(
        &self,
        from: &ConnectionId,
        to: &ConnectionId,
        candidate: SignalPayload,
    ) -> RelayOutcome {
        let notification = Notification::IceCandidate {
            from: from.clone(),
            candidate,
        };
        self.forward(from, to, &notification).await
    }

    /// 患者 → 医師: 着信の辞退
    pub async fn decline(&self, from: &ConnectionId, to: &ConnectionId) -> RelayOutcome {
        // 宛先以外との通話は続いているので解除しない
        self.repository.unpair_between(from, to).await;
        self.forward(from, to, &Notification::CallDeclined).await
    }

    /// 双方向: 通話の終了
    ///
    /// 送信者の通話相手を両側で解除し、宛先に call-ended を送る。
    /// 送信者または宛先がそれぞれ別の相手と結びついていた場合は、
    /// その相手にも call-ended を送る（通話相手を失った参加者には必ず通知する）。
    pub async fn hang_up(&self, from: &ConnectionId, to: &ConnectionId) -> RelayOutcome {
        tracing::info!("Hang up from '{}' to '{}'", from, to);

        if let Some(previous) = self.repository.unpair(from).await
            && &previous != to
        {
            self.end_call_best_effort(&previous).await;
        }
        if let Some(previous) = self.repository.unpair(to).await
            && &previous != from
        {
            self.end_call_best_effort(&previous).await;
        }

        self.forward(from, to, &Notification::CallEnded).await
    }

    async fn forward(
        &self,
        from: &ConnectionId,
        to: &ConnectionId,
        notification: &Notification,
    ) -> RelayOutcome {
        match self.message_pusher.push_to(to, notification).await {
            Ok(()) => {
                tracing::debug!("Relayed '{}' from '{}' to '{}'", notification.kind(), from, to);
                RelayOutcome::Delivered
            }
            Err(MessagePushError::ClientNotFound(_)) => {
                tracing::debug!(
                    "Dropped '{}' from '{}': destination '{}' is not connected",
                    notification.kind(),
                    from,
                    to
                );
                RelayOutcome::Dropped
            }
            Err(e) => {
                tracing::warn!(
                    "Dropped '{}' from '{}' to '{}': {}",
                    notification.kind(),
                    from,
                    to,
                    e
                );
                RelayOutcome::Dropped
            }
        }
    }

    /// 通話相手として結びつけ、それまでの相手を失った参加者に call-ended を送る
    async fn pair(&self, a: &ConnectionId, b: &ConnectionId) {
        match self.repository.pair(a, b).await {
            Ok(outcome) => {
                for displaced in &outcome.displaced {
                    self.end_call_best_effort(displaced).await;
                }
            }
            Err(e) => tracing::debug!("Call between '{}' and '{}' not tracked: {}", a, b, e),
        }
    }

    async fn end_call_best_effort(&self, target: &ConnectionId) {
        if let Err(e) = self
            .message_pusher
            .push_to(target, &Notification::CallEnded)
            .await
        {
            tracing::debug!("Skipped call-ended for '{}': {}", target, e);
        }
    }
}
