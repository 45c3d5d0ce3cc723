pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no brace-delimited structure found in model output")]
    StructureNotFound,

    #[error("structure decode error: {0}")]
    StructureDecode(#[from] serde_json::Error),
}
