//! UseCase: 参加者登録処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RegisterParticipantUseCase::execute() メソッド
//! - ニックネームのローカル検証と HTTP 登録の呼び出し
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：空のニックネームはネットワークに到達しない
//! - 登録成功時にサーバが割り当てたユーザが返ることを保証
//! - サーバ拒否（名前の重複など）がインラインエラーとして伝わることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：有効なニックネームでの登録
//! - 異常系：空・空白のみのニックネーム（ネットワーク呼び出しなし）
//! - 異常系：サーバによる拒否、到達不能なエンドポイント

use std::sync::Arc;

use crate::domain::{Nickname, User};
use crate::infrastructure::registration::RegistrationApi;

use super::error::RegisterError;

/// 参加者登録のユースケース
pub struct RegisterParticipantUseCase {
    /// 登録エンドポイント（データアクセス層の抽象化）
    api: Arc<dyn RegistrationApi>,
}

impl RegisterParticipantUseCase {
    /// 新しい RegisterParticipantUseCase を作成
    pub fn new(api: Arc<dyn RegistrationApi>) -> Self {
        Self { api }
    }

    /// ニックネームをローカル検証する
    ///
    /// ソケット登録モードでは検証のみ行い、登録フレームは接続確立後に
    /// 送信される。
    pub fn validate_nickname(raw_name: &str) -> Result<Nickname, RegisterError> {
        Ok(Nickname::new(raw_name.to_string())?)
    }

    /// 参加者登録を実行
    ///
    /// # Arguments
    ///
    /// * `raw_name` - 入力されたままのニックネーム
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - サーバが割り当てたユーザ
    /// * `Err(RegisterError)` - 検証失敗または登録失敗
    pub async fn execute(&self, raw_name: &str) -> Result<User, RegisterError> {
        // 1. ローカル検証（失敗時はネットワーク呼び出しなし）
        let nickname = Self::validate_nickname(raw_name)?;

        // 2. 外部エンドポイントへ登録
        let user = self.api.register(&nickname).await?;

        Ok(user)
    }
}
