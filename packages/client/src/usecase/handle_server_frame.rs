//! UseCase: サーバフレーム処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - HandleServerFrameUseCase::execute() メソッド
//! - 受信フレームのセッション状態への適用と UI 向け更新の生成
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：ロースターがサーバ報告の集合を常に反映する
//! - 重複 join・不在 leave が no-op になることを保証
//! - own/other 判定と登録 ack の処理を確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：スナップショット・増分イベント・チャットメッセージ
//! - 異常系：不正なユーザを含むフレーム（破棄してログ）
//! - エッジケース：登録済みセッションへの余分な ack

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{Session, User, UserId};
use crate::infrastructure::dto::websocket::{ServerEvent, ServerFrame, UserDto};

/// UI 向けのセッション更新イベント。
///
/// フレーム処理の結果をビュー層が純関数で描画する。
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    /// ロースターがスナップショットで置き換えられた
    RosterReplaced(Vec<User>),
    /// 参加者が 1 人加わった
    ParticipantJoined(User),
    /// 参加者が 1 人離脱した
    ParticipantLeft(User),
    /// チャットメッセージが到着した
    MessageReceived(ReceivedMessage),
    /// ソケット登録が成功した
    Registered(User),
    /// ソケット登録が拒否された
    RegistrationRejected(String),
    /// トランスポートエラー（接続層が発行する）
    ConnectionLost(String),
    /// 可視の効果がないフレーム（重複 join、不在 leave、余分な ack）
    Ignored,
}

/// ビューが描画するチャットメッセージ
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedMessage {
    /// 送信者
    pub sender: User,
    /// 本文（未サニタイズ。描画側で処理する）
    pub text: String,
    /// 送信者 ID がセッションの識別と一致するか
    pub own: bool,
}

/// サーバフレーム処理のユースケース
pub struct HandleServerFrameUseCase {
    /// セッション状態（接続と識別の保持者）
    session: Arc<Mutex<Session>>,
}

impl HandleServerFrameUseCase {
    /// 新しい HandleServerFrameUseCase を作成
    pub fn new(session: Arc<Mutex<Session>>) -> Self {
        Self { session }
    }

    /// 受信フレームをセッションに適用する
    ///
    /// # Arguments
    ///
    /// * `frame` - デコード済みのサーバフレーム
    ///
    /// # Returns
    ///
    /// ビュー層が描画する `SessionUpdate`
    pub async fn execute(&self, frame: ServerFrame) -> SessionUpdate {
        match frame {
            ServerFrame::Roster(users) => self.replace_roster(users).await,
            ServerFrame::Event(event) => match event {
                ServerEvent::Users { users } => self.replace_roster(users).await,
                ServerEvent::UserJoined { user } => self.join(user).await,
                ServerEvent::UserLeft { user_id } => self.leave(user_id).await,
                ServerEvent::Message { message, user } => self.message(message, user).await,
                ServerEvent::Reg {
                    success,
                    user,
                    message,
                } => self.registration_ack(success, user, message).await,
            },
        }
    }

    async fn replace_roster(&self, users: Vec<UserDto>) -> SessionUpdate {
        let users: Vec<User> = users
            .into_iter()
            .filter_map(|dto| match User::try_from(dto) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!("Dropping invalid roster entry: {}", e);
                    None
                }
            })
            .collect();

        let mut session = self.session.lock().await;
        session.roster_mut().replace_all(users);
        SessionUpdate::RosterReplaced(session.roster().users().to_vec())
    }

    async fn join(&self, dto: UserDto) -> SessionUpdate {
        let user = match User::try_from(dto) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Dropping user_joined with invalid user: {}", e);
                return SessionUpdate::Ignored;
            }
        };

        let mut session = self.session.lock().await;
        if session.roster_mut().join(user.clone()) {
            SessionUpdate::ParticipantJoined(user)
        } else {
            tracing::debug!("user_joined for already-present id '{}'", user.id);
            SessionUpdate::Ignored
        }
    }

    async fn leave(&self, user_id: String) -> SessionUpdate {
        let user_id = match UserId::new(user_id) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("Dropping user_left with invalid id: {}", e);
                return SessionUpdate::Ignored;
            }
        };

        let mut session = self.session.lock().await;
        match session.roster_mut().leave(&user_id) {
            Some(user) => SessionUpdate::ParticipantLeft(user),
            None => {
                tracing::debug!("user_left for absent id '{}'", user_id);
                SessionUpdate::Ignored
            }
        }
    }

    async fn message(&self, text: String, dto: UserDto) -> SessionUpdate {
        let sender = match User::try_from(dto) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Dropping message with invalid sender: {}", e);
                return SessionUpdate::Ignored;
            }
        };

        let session = self.session.lock().await;
        let own = session.is_own(&sender.id);
        SessionUpdate::MessageReceived(ReceivedMessage { sender, text, own })
    }

    async fn registration_ack(
        &self,
        success: bool,
        user: Option<UserDto>,
        message: Option<String>,
    ) -> SessionUpdate {
        if !success {
            return SessionUpdate::RegistrationRejected(
                message.unwrap_or_else(|| "nickname was rejected by the server".to_string()),
            );
        }

        let user = match user.map(User::try_from) {
            Some(Ok(user)) => user,
            Some(Err(e)) => {
                tracing::warn!("Dropping reg ack with invalid user: {}", e);
                return SessionUpdate::Ignored;
            }
            None => {
                tracing::warn!("Dropping successful reg ack without a user");
                return SessionUpdate::Ignored;
            }
        };

        let mut session = self.session.lock().await;
        if session.registered(user.clone()) {
            SessionUpdate::Registered(user)
        } else {
            tracing::debug!("Ignoring stray reg ack; session is already registered");
            SessionUpdate::Ignored
        }
    }
}
