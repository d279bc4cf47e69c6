//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod error;
pub mod join_event;
pub mod send_message;

pub use error::{JoinEventError, SendMessageError};
pub use join_event::JoinEventUseCase;
pub use send_message::SendMessageUseCase;
