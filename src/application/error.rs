use crate::domain::error::{BookingRejection, DomainError};
use crate::domain::port::RepositoryError;

/// アプリケーション層のエラー型
/// 予約の却下、ストア失敗、ドメインエラー、リポジトリエラーをラップする
#[derive(Debug)]
pub enum ApplicationError {
    /// 予約の却下（利用者が入力を修正できる）
    Rejected(BookingRejection),
    /// 予約ストアが記録を受け付けなかった（同じリクエストで再試行できる）
    StoreFailure(String),
    /// ドメインエラー（値オブジェクトのルール違反）
    DomainError(DomainError),
    /// リポジトリエラー（参照データの取得失敗）
    RepositoryError(RepositoryError),
    /// エンティティが見つからない
    NotFound(String),
    /// 同じフォームで送信処理が進行中
    SubmissionInProgress,
}

impl std::fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationError::Rejected(rejection) => write!(f, "Booking rejected: {}", rejection),
            ApplicationError::StoreFailure(msg) => write!(f, "Booking store failure: {}", msg),
            ApplicationError::DomainError(err) => write!(f, "Domain error: {}", err),
            ApplicationError::RepositoryError(err) => write!(f, "Repository error: {}", err),
            ApplicationError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApplicationError::SubmissionInProgress => write!(f, "Submission already in progress"),
        }
    }
}

impl std::error::Error for ApplicationError {}

impl ApplicationError {
    /// 利用者に表示するメッセージ
    pub fn user_message(&self) -> String {
        match self {
            ApplicationError::Rejected(rejection) => rejection.description(),
            ApplicationError::StoreFailure(_) => {
                "予約に失敗しました。もう一度お試しください".to_string()
            }
            ApplicationError::NotFound(msg) => msg.clone(),
            ApplicationError::SubmissionInProgress => "予約を処理中です".to_string(),
            ApplicationError::DomainError(err) => err.to_string(),
            ApplicationError::RepositoryError(_) => {
                "エラーが発生しました。もう一度お試しください".to_string()
            }
        }
    }

    /// 同じリクエストで再試行してよいか
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApplicationError::StoreFailure(_) | ApplicationError::RepositoryError(_)
        )
    }
}

// From実装でエラー変換を簡潔に
impl From<BookingRejection> for ApplicationError {
    fn from(rejection: BookingRejection) -> Self {
        ApplicationError::Rejected(rejection)
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        ApplicationError::DomainError(err)
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        ApplicationError::RepositoryError(err)
    }
}
