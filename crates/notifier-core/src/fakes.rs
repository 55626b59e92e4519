//! In-memory fakes for the injectable seams (testing only)
//!
//! Provides fixed and failing temp-dir factories, fixed and failing media
//! locators, and `ScriptedTransport`, a webhook transport that records
//! requests and replays queued responses.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::action::TempDirFactory;
use crate::error::{HttpPhase, NotifierError};
use crate::media::{MediaDirectory, MediaLocator};
use crate::webhook::{WebhookRequest, WebhookResponse, WebhookTransport};
use crate::Result;

// ---------------------------------------------------------------------------
// Temp directories
// ---------------------------------------------------------------------------

/// Always hands out the same directory and records requested prefixes.
#[derive(Debug)]
pub struct FixedTempDir {
    dir: PathBuf,
    prefixes: Mutex<Vec<String>>,
}

impl FixedTempDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefixes: Mutex::new(Vec::new()),
        }
    }

    pub fn prefixes(&self) -> Vec<String> {
        self.prefixes.lock().unwrap().clone()
    }
}

impl TempDirFactory for FixedTempDir {
    fn create(&self, prefix: &str) -> std::io::Result<PathBuf> {
        self.prefixes.lock().unwrap().push(prefix.to_string());
        Ok(self.dir.clone())
    }
}

/// Every creation fails with `PermissionDenied`.
#[derive(Debug, Default)]
pub struct FailingTempDirs;

impl TempDirFactory for FailingTempDirs {
    fn create(&self, _prefix: &str) -> std::io::Result<PathBuf> {
        Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "temp dir unavailable",
        ))
    }
}

// ---------------------------------------------------------------------------
// Media locators
// ---------------------------------------------------------------------------

/// Resolves to a caller-chosen directory.
#[derive(Debug, Clone)]
pub struct FixedMediaLocator {
    dir: PathBuf,
}

impl FixedMediaLocator {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }
}

impl MediaLocator for FixedMediaLocator {
    fn resolve(&self) -> Result<MediaDirectory> {
        Ok(MediaDirectory::new(self.dir.clone()))
    }
}

/// Behaves like a runtime that cannot report its own location.
#[derive(Debug, Default)]
pub struct FailingMediaLocator;

impl MediaLocator for FailingMediaLocator {
    fn resolve(&self) -> Result<MediaDirectory> {
        Err(NotifierError::LocatorFailure(
            "executable location unavailable".to_string(),
        ))
    }
}

// ---------------------------------------------------------------------------
// ScriptedTransport
// ---------------------------------------------------------------------------

/// One queued outcome for [`ScriptedTransport`].
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    Respond { status: u16, body: String },
    Fail { phase: HttpPhase, message: String },
}

impl ScriptedResponse {
    pub fn ok(body: &str) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: &str) -> Self {
        ScriptedResponse::Respond {
            status,
            body: body.to_string(),
        }
    }

    pub fn post_error(message: &str) -> Self {
        ScriptedResponse::Fail {
            phase: HttpPhase::Post,
            message: message.to_string(),
        }
    }

    pub fn read_error(message: &str) -> Self {
        ScriptedResponse::Fail {
            phase: HttpPhase::ReadBody,
            message: message.to_string(),
        }
    }
}

/// Records every request and answers from a queue.
///
/// An empty queue answers with a post error so a missing stub shows up as a
/// failed send rather than a hang.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    requests: Mutex<Vec<WebhookRequest>>,
    responses: Mutex<VecDeque<ScriptedResponse>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<ScriptedResponse>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(responses.into()),
        }
    }

    pub fn requests(&self) -> Vec<WebhookRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn unused_responses(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

#[async_trait]
impl WebhookTransport for ScriptedTransport {
    async fn post(&self, request: &WebhookRequest) -> Result<WebhookResponse> {
        self.requests.lock().unwrap().push(request.clone());

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(ScriptedResponse::Respond { status, body }) => Ok(WebhookResponse { status, body }),
            Some(ScriptedResponse::Fail { phase, message }) => {
                Err(NotifierError::Http { phase, message })
            }
            None => Err(NotifierError::Http {
                phase: HttpPhase::Post,
                message: "ran out of stubbed responses".to_string(),
            }),
        }
    }
}
