//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - メッセージ送信処理（バリデーション、永続化）
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：空白のみのメッセージは永続化されない
//! - ブロードキャストより先に永続化が行われることを保証（write-then-broadcast）
//! - 永続化失敗時にエラーが送信者にのみ返ることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージの永続化と保存済み行の返却
//! - 異常系：空白のみの本文、長すぎる本文、永続化失敗
//! - エッジケース：前後に空白を含む本文（本文はそのまま保存される）

use std::sync::Arc;

use crate::domain::{
    ChatRepository, EventId, EventMessage, MessageText, NewEventMessage, UserId, ValueObjectError,
};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// メッセージ送信を実行
    ///
    /// ブロードキャストより先に永続化する（write-then-broadcast）。
    /// 呼び出し側は返された保存済み行からブロードキャスト用のペイロードを
    /// 組み立てる。
    ///
    /// # Arguments
    ///
    /// * `event_id` - 送信先イベントの ID
    /// * `author_id` - 送信者のユーザー ID（Domain Model）
    /// * `text` - メッセージ本文（未検証の生テキスト）
    ///
    /// # Returns
    ///
    /// * `Ok(EventMessage)` - 永続化された行
    /// * `Err(SendMessageError)` - 送信失敗。何もブロードキャストしてはならない
    pub async fn execute(
        &self,
        event_id: EventId,
        author_id: UserId,
        text: String,
    ) -> Result<EventMessage, SendMessageError> {
        // 1. 本文のバリデーション（空白のみのメッセージは拒否）
        let message = match MessageText::new(text) {
            Ok(message) => message,
            Err(ValueObjectError::MessageTextTooLong { .. }) => {
                return Err(SendMessageError::TextTooLong);
            }
            Err(_) => return Err(SendMessageError::EmptyText),
        };

        // 2. 永続化（失敗したらブロードキャストせずエラーを返す）
        let saved = self
            .repository
            .create_event_message(NewEventMessage {
                event_id,
                user_id: author_id,
                message,
            })
            .await
            .map_err(SendMessageError::Persistence)?;

        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageId, RepositoryError, Timestamp, repository::MockChatRepository};

    fn user_id(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    fn saving_mock() -> MockChatRepository {
        let mut mock = MockChatRepository::new();
        mock.expect_create_event_message().returning(|new_message| {
            Ok(EventMessage {
                id: MessageId::new(1),
                event_id: new_message.event_id,
                user_id: new_message.user_id,
                message: new_message.message,
                created_at: Timestamp::new(1_000),
            })
        });
        mock
    }

    #[tokio::test]
    async fn test_send_message_persists_row() {
        // テスト項目: メッセージ送信で行が永続化され、保存済み行が返される
        // given (前提条件):
        let usecase = SendMessageUseCase::new(Arc::new(saving_mock()));

        // when (操作):
        let result = usecase
            .execute(EventId::new(7), user_id("alice"), "hello".to_string())
            .await;

        // then (期待する結果):
        let saved = result.unwrap();
        assert_eq!(saved.event_id, EventId::new(7));
        assert_eq!(saved.user_id, user_id("alice"));
        assert_eq!(saved.message.as_str(), "hello");
        assert_eq!(saved.id, MessageId::new(1));
    }

    #[tokio::test]
    async fn test_send_message_preserves_raw_text() {
        // テスト項目: 前後の空白を含む本文はそのまま永続化される
        // given (前提条件):
        let usecase = SendMessageUseCase::new(Arc::new(saving_mock()));

        // when (操作):
        let result = usecase
            .execute(EventId::new(7), user_id("alice"), "  hello  ".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(result.unwrap().message.as_str(), "  hello  ");
    }

    #[tokio::test]
    async fn test_whitespace_only_text_is_rejected_without_persisting() {
        // テスト項目: 空白のみの本文は拒否され、永続化は呼ばれない
        // given (前提条件):
        let mut mock = MockChatRepository::new();
        mock.expect_create_event_message().times(0);
        let usecase = SendMessageUseCase::new(Arc::new(mock));

        // when (操作):
        let result = usecase
            .execute(EventId::new(7), user_id("alice"), "   \t ".to_string())
            .await;

        // then (期待する結果):
        let err = result.unwrap_err();
        assert_eq!(err, SendMessageError::EmptyText);
        assert_eq!(err.to_string(), "Message cannot be empty");
    }

    #[tokio::test]
    async fn test_oversized_text_is_rejected_without_persisting() {
        // テスト項目: 長すぎる本文は拒否され、永続化は呼ばれない
        // given (前提条件):
        let mut mock = MockChatRepository::new();
        mock.expect_create_event_message().times(0);
        let usecase = SendMessageUseCase::new(Arc::new(mock));

        // when (操作):
        let result = usecase
            .execute(EventId::new(7), user_id("alice"), "a".repeat(10_001))
            .await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), SendMessageError::TextTooLong);
    }

    #[tokio::test]
    async fn test_persistence_failure_surfaces_to_sender() {
        // テスト項目: 永続化失敗は Persistence エラーとして返される
        // given (前提条件):
        let mut mock = MockChatRepository::new();
        mock.expect_create_event_message()
            .returning(|_| Err(RepositoryError::Backend("insert failed".to_string())));
        let usecase = SendMessageUseCase::new(Arc::new(mock));

        // when (操作):
        let result = usecase
            .execute(EventId::new(7), user_id("alice"), "hi".to_string())
            .await;

        // then (期待する結果):
        let err = result.unwrap_err();
        assert!(matches!(err, SendMessageError::Persistence(_)));
        assert_eq!(err.to_string(), "Failed to save message");
    }
}
