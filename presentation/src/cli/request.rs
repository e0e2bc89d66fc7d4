//! Assemble a verification request from command-line input

use super::commands::Cli;
use std::path::{Path, PathBuf};
use thiserror::Error;
use veriquorum_domain::{EvidenceBlock, VerificationRequest};

#[derive(Error, Debug)]
pub enum RequestInputError {
    #[error("Could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid request file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Nothing to verify: pass TEXT, --url, --image, --evidence or --request")]
    Empty,
}

impl Cli {
    /// Build the request: the `--request` file first, then flags on top
    ///
    /// Text and URL flags replace the file's values; images and evidence
    /// are appended.
    pub fn build_request(&self) -> Result<VerificationRequest, RequestInputError> {
        let mut request = match &self.request {
            Some(path) => load_request_file(path)?,
            None => VerificationRequest::default(),
        };

        if let Some(text) = &self.text {
            request.content_text = text.clone();
        }
        if let Some(url) = &self.url {
            request.content_url = url.clone();
        }
        request.image_urls.extend(self.image.iter().cloned());

        for arg in &self.evidence {
            let text = read_file(&arg.path)?;
            request.evidence.push(EvidenceBlock::new(arg.kind, text.trim()));
        }

        if request.is_empty() {
            return Err(RequestInputError::Empty);
        }
        Ok(request)
    }
}

fn read_file(path: &Path) -> Result<String, RequestInputError> {
    std::fs::read_to_string(path).map_err(|source| RequestInputError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn load_request_file(path: &Path) -> Result<VerificationRequest, RequestInputError> {
    let raw = read_file(path)?;
    serde_json::from_str(&raw).map_err(|source| RequestInputError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
