//! Application Error - Unified error type for the application
//!
//! Defines [`AppError`] struct and [`AppResult<T>`] type alias.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use serde_json::{Map, Value};

use super::kind::ErrorKind;

/// アプリケーション統一エラー型
///
/// コンソール全体で使用する標準エラー型です。
/// レスポンスでは `{ "error": message }` に、追加フィールドがあれば
/// それらを同じオブジェクトに並べて返します。
///
/// ## Fields
/// * `kind` - エラーの分類（HTTP ステータスコードにマッピング）
/// * `message` - 呼び出し側に返すエラーメッセージ
/// * `fields` - レスポンスに追加する JSON フィールド（オプション）
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::BadRequest, "tenantId is required");
/// assert_eq!(err.status_code(), 400);
///
/// let body = AppError::service_unavailable("Core unreachable")
///     .with_field("status", "down")
///     .to_body();
/// assert_eq!(body["status"], "down");
/// ```
pub struct AppError {
    /// エラー種別
    kind: ErrorKind,
    /// 呼び出し側向けメッセージ
    message: Cow<'static, str>,
    /// 追加の JSON フィールド
    fields: Option<Map<String, Value>>,
}

/// アプリケーション結果型エイリアス
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// 新しいエラーを作成
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            fields: None,
        }
    }

    /// 400 Bad Request エラー
    #[inline]
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    /// 401 Unauthorized エラー
    #[inline]
    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// 503 Service Unavailable エラー
    #[inline]
    pub fn service_unavailable(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    /// レスポンスに追加フィールドを設定
    ///
    /// `error` キーは常にメッセージが優先されます。
    #[inline]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// HTTP ステータスコードを取得
    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// レスポンスボディを構築
    ///
    /// `{ "error": message, ...fields }` の形式です。
    pub fn to_body(&self) -> Value {
        let mut body = self.fields.clone().unwrap_or_default();
        body.insert("error".to_string(), Value::String(self.message.to_string()));
        Value::Object(body)
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("message", &self.message);
        if let Some(fields) = &self.fields {
            builder.field("fields", fields);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl Error for AppError {}
