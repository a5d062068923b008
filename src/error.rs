pub type BoardResult<T> = Result<T, BoardError>;

#[derive(thiserror::Error, Debug)]
pub enum BoardError {
    #[error("io error: {0}")]
    Io(String),

    #[error("http error: {0}")]
    Http(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoardError {
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<serde_json::Error> for BoardError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(BoardError::io("x").to_string().contains("io error:"));
        assert!(BoardError::http("x").to_string().contains("http error:"));
        assert!(BoardError::parse("x").to_string().contains("parse error:"));
        assert!(BoardError::config("x").to_string().contains("config error:"));
        assert!(
            BoardError::validation("x")
                .to_string()
                .contains("validation error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = BoardError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn missing_anchor_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anchors.json");
        let err = crate::source::AnchorSource::File(path.clone())
            .read()
            .await
            .unwrap_err();
        match err {
            BoardError::Io(msg) => assert!(msg.contains(&path.display().to_string()), "{msg}"),
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn json_errors_become_parse_errors() {
        let err: BoardError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, BoardError::Parse(_)));
    }
}
