//! UseCase: イベントチャット参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinEventUseCase::execute() メソッド
//! - 参加資格の判定（ホスト / RSVP 保持者 / 資格なし）
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：ホストまたは RSVP 保持者のみが参加できる
//! - 存在しないイベント・ユーザーへの参加試行が拒否されることを保証
//! - 永続化層の障害がエラーとして伝播することを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：ホストの参加、RSVP 保持者の参加
//! - 異常系：資格のないユーザーの参加試行、存在しないイベント
//! - エッジケース：永続化層の障害

use std::sync::Arc;

use crate::domain::{ChatRepository, Event, EventId, User, UserId};

use super::error::JoinEventError;

/// イベントチャット参加のユースケース
pub struct JoinEventUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
}

impl JoinEventUseCase {
    /// 新しい JoinEventUseCase を作成
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// イベントチャットへの参加を実行
    ///
    /// # Arguments
    ///
    /// * `event_id` - 参加先イベントの ID
    /// * `user_id` - 参加するユーザーの ID（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - 参加許可。表示用のユーザー情報を返す
    /// * `Err(JoinEventError)` - 参加拒否
    pub async fn execute(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<User, JoinEventError> {
        // 1. イベントの存在確認
        let event = self
            .repository
            .get_event_by_id(event_id)
            .await?
            .ok_or(JoinEventError::EventNotFound)?;

        // 2. 参加資格の確認（ホストまたは RSVP 保持者のみ）
        if !self.is_eligible(&event, &user_id).await? {
            return Err(JoinEventError::AccessDenied);
        }

        // 3. 表示用のユーザー情報を取得
        let user = self
            .repository
            .get_user(&user_id)
            .await?
            .ok_or(JoinEventError::UserNotFound)?;

        Ok(user)
    }

    /// 参加資格を判定
    ///
    /// ホストは RSVP の有無に関わらず参加できる。ステータスを問わず
    /// RSVP 行を保持していれば参加できる。
    async fn is_eligible(&self, event: &Event, user_id: &UserId) -> Result<bool, JoinEventError> {
        if event.is_hosted_by(user_id) {
            return Ok(true);
        }

        let rsvps = self.repository.get_rsvps_by_user(user_id).await?;
        Ok(rsvps.iter().any(|rsvp| rsvp.event_id == event.id))
    }
}
