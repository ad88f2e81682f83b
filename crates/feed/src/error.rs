#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Quill API error: {0}")]
    Api(#[from] quill_api::error::Error),
}
