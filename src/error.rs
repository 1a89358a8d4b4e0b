pub type EmergraphResult<T> = Result<T, EmergraphError>;

#[derive(thiserror::Error, Debug)]
pub enum EmergraphError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("simulation error: {0}")]
    Simulation(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EmergraphError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn simulation(msg: impl Into<String>) -> Self {
        Self::Simulation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
