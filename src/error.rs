pub type CineplanResult<T> = Result<T, CineplanError>;

#[derive(thiserror::Error, Debug)]
pub enum CineplanError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("animation error: {0}")]
    Animation(String),

    #[error("planning error: {0}")]
    Planning(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CineplanError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    pub fn planning(msg: impl Into<String>) -> Self {
        Self::Planning(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            CineplanError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            CineplanError::animation("x")
                .to_string()
                .contains("animation error:")
        );
        assert!(
            CineplanError::planning("x")
                .to_string()
                .contains("planning error:")
        );
        assert!(
            CineplanError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = CineplanError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
