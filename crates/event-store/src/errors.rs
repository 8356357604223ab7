use futuboard_core_types::TicketEventId;
use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum EsErrorKind {
    #[error("append rejected: {0}")]
    AppendRejected(String),
    #[error("duplicate ticket event {0}")]
    DuplicateEvent(TicketEventId),
    #[error("{0} not found")]
    NotFound(String),
    #[error("snapshot error: {0}")]
    Snapshot(String),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Clone, Debug, Error)]
#[error(transparent)]
pub struct EsError(pub EsErrorKind);

impl EsError {
    pub fn new(kind: EsErrorKind) -> Self {
        Self(kind)
    }

    pub fn kind(&self) -> &EsErrorKind {
        &self.0
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.0, EsErrorKind::NotFound(_))
    }
}

impl From<EsErrorKind> for EsError {
    fn from(kind: EsErrorKind) -> Self {
        EsError(kind)
    }
}

pub type EsResult<T> = Result<T, EsError>;
