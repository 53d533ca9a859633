//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 送信フレームの構築（トリム、送信者タグ、接続状態チェック）
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：未接続時は何も送信されない
//! - 空白のみの入力が no-op になることを保証
//! - 登録戦略に応じて送信者タグの有無が切り替わることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：接続中の送信（トリム済み本文でフレームが 1 つできる）
//! - 異常系：未接続・未登録での送信試行
//! - エッジケース：空白のみの入力

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{MessageText, Session};
use crate::infrastructure::dto::websocket::ClientFrame;

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// セッション状態（接続と識別の保持者）
    session: Arc<Mutex<Session>>,
    /// 送信フレームに送信者を含めるか（HTTP 登録モードでは true）
    include_sender: bool,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(session: Arc<Mutex<Session>>, include_sender: bool) -> Self {
        Self {
            session,
            include_sender,
        }
    }

    /// 送信フレームを構築する
    ///
    /// # Arguments
    ///
    /// * `raw_input` - 入力されたままのメッセージ本文
    ///
    /// # Returns
    ///
    /// * `Ok(ClientFrame)` - 送信すべきフレーム（ちょうど 1 つ）
    /// * `Err(SendMessageError)` - no-op（空入力・未接続）
    pub async fn execute(&self, raw_input: &str) -> Result<ClientFrame, SendMessageError> {
        // 1. 入力検証（空白のみなら no-op）
        let text = MessageText::new(raw_input.to_string())?;

        // 2. 接続状態チェック
        let session = self.session.lock().await;
        if !session.can_send() {
            return Err(SendMessageError::NotConnected);
        }

        // 3. フレーム構築
        let sender = if self.include_sender {
            session.current_user()
        } else {
            None
        };
        Ok(ClientFrame::send(text, sender))
    }
}
