use thiserror::Error;

/// Local input rejection. These never reach the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("latitude or longitude is empty")]
    MissingInput,

    #[error("latitude or longitude is not a number")]
    NonNumeric,

    #[error("latitude must be within [-90, 90] and longitude within [-180, 180]")]
    OutOfRange,
}

/// Failure of the outbound weather request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("weather provider rejected the API key (401)")]
    InvalidCredential,

    #[error("weather provider rejected the request parameters (400)")]
    InvalidParameters,

    #[error("weather provider internal error (500)")]
    ServerError,

    #[error("weather request failed (status: {status:?}): {detail}")]
    Unknown { status: Option<u16>, detail: String },
}

impl FetchError {
    /// Categorize a non-success HTTP status.
    pub fn from_status(status: u16, detail: impl Into<String>) -> Self {
        match status {
            401 => FetchError::InvalidCredential,
            400 => FetchError::InvalidParameters,
            500 => FetchError::ServerError,
            other => FetchError::Unknown {
                status: Some(other),
                detail: detail.into(),
            },
        }
    }
}

/// Everything a submission can fail with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClimaError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Fieldless view of [`ClimaError`], handy for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingInput,
    NonNumeric,
    OutOfRange,
    InvalidCredential,
    InvalidParameters,
    ServerError,
    Unknown,
}

impl ClimaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClimaError::Validation(ValidationError::MissingInput) => ErrorKind::MissingInput,
            ClimaError::Validation(ValidationError::NonNumeric) => ErrorKind::NonNumeric,
            ClimaError::Validation(ValidationError::OutOfRange) => ErrorKind::OutOfRange,
            ClimaError::Fetch(FetchError::InvalidCredential) => ErrorKind::InvalidCredential,
            ClimaError::Fetch(FetchError::InvalidParameters) => ErrorKind::InvalidParameters,
            ClimaError::Fetch(FetchError::ServerError) => ErrorKind::ServerError,
            ClimaError::Fetch(FetchError::Unknown { .. }) => ErrorKind::Unknown,
        }
    }

    /// Message shown to the user in the alert, in pt-BR.
    pub fn user_message(&self) -> &'static str {
        self.kind().user_message()
    }
}

impl ErrorKind {
    pub fn user_message(self) -> &'static str {
        match self {
            ErrorKind::MissingInput => {
                "Por favor, insira valores válidos de latitude e longitude."
            }
            ErrorKind::NonNumeric => "A latitude e a longitude devem ser numéricas.",
            ErrorKind::OutOfRange => {
                "Latitude deve estar entre -90 e 90 e longitude entre -180 e 180."
            }
            ErrorKind::InvalidCredential => "Chave de API inválida. Verifique sua configuração.",
            ErrorKind::InvalidParameters => {
                "Parâmetros inválidos. Verifique latitude e longitude."
            }
            ErrorKind::ServerError => "Erro interno do servidor. Tente novamente mais tarde.",
            ErrorKind::Unknown => "Algo deu errado. Verifique a conexão ou os parâmetros.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_categories() {
        assert_eq!(FetchError::from_status(401, ""), FetchError::InvalidCredential);
        assert_eq!(FetchError::from_status(400, ""), FetchError::InvalidParameters);
        assert_eq!(FetchError::from_status(500, ""), FetchError::ServerError);
        assert_eq!(
            FetchError::from_status(404, "city not found"),
            FetchError::Unknown {
                status: Some(404),
                detail: "city not found".to_string(),
            }
        );
    }

    #[test]
    fn other_5xx_is_unknown() {
        let err = ClimaError::from(FetchError::from_status(503, "unavailable"));
        assert_eq!(err.kind(), ErrorKind::Unknown);
    }

    #[test]
    fn every_kind_has_distinct_message() {
        let kinds = [
            ErrorKind::MissingInput,
            ErrorKind::NonNumeric,
            ErrorKind::OutOfRange,
            ErrorKind::InvalidCredential,
            ErrorKind::InvalidParameters,
            ErrorKind::ServerError,
            ErrorKind::Unknown,
        ];

        let mut messages: Vec<&str> = kinds.iter().map(|k| k.user_message()).collect();
        messages.sort_unstable();
        messages.dedup();
        assert_eq!(messages.len(), kinds.len());
    }

    #[test]
    fn validation_error_converts_into_clima_error() {
        let err: ClimaError = ValidationError::OutOfRange.into();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert!(err.user_message().contains("entre -90 e 90"));
    }
}
