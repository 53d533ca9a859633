//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod error;
pub mod handle_server_frame;
pub mod register_participant;
pub mod send_message;

pub use error::{RegisterError, SendMessageError};
pub use handle_server_frame::{HandleServerFrameUseCase, ReceivedMessage, SessionUpdate};
pub use register_participant::RegisterParticipantUseCase;
pub use send_message::SendMessageUseCase;
