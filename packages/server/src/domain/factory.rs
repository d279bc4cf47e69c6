//! Domain factories for creating domain entities and value objects.

use super::value_object::ConnectionId;

/// Factory for generating ConnectionId instances.
///
/// Encapsulates id generation for live connections, separating the
/// generation concern from the value object itself.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId with a random UUID v4.
    pub fn generate() -> ConnectionId {
        ConnectionId::from_uuid(uuid::Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_factory_generate_uniqueness() {
        // テスト項目: ConnectionIdFactory::generate() は毎回異なる ID を生成する
        // when (操作):
        let id1 = ConnectionIdFactory::generate();
        let id2 = ConnectionIdFactory::generate();

        // then (期待する結果):
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_connection_id_display_is_uuid() {
        // テスト項目: ConnectionId は UUID 形式で表示される
        // when (操作):
        let id = ConnectionIdFactory::generate();

        // then (期待する結果):
        assert_eq!(id.to_string().len(), 36);
    }
}
