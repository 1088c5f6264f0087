use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the query to the backend. The shell decides whether the
    /// streaming or the batch endpoint answers it.
    SendQuery { query: String },
    /// Post the selected files to the upload endpoint as one request.
    UploadFiles { paths: Vec<PathBuf> },
}
