use std::error::Error;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde_json::Value;

/// Upper bound on one prediction round trip.
pub const PREDICT_TIMEOUT: Duration = Duration::from_secs(15);

const PREDICT_ENDPOINT: &str = "predict";
const UPLOAD_FIELD: &str = "file";
const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictionError {
    #[error("cannot open image {}: {message}", .path.display())]
    ImageUnreadable { path: PathBuf, message: String },
    #[error("connection timed out after {timeout:?}: {message}")]
    Timeout { timeout: Duration, message: String },
    #[error("connection error: {message}")]
    Connection { message: String },
    #[error("server error {status}: {body}")]
    Server { status: u16, body: String },
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },
    #[error("transport error: {message}")]
    Transport { message: String },
}

pub type PredictResult<T> = Result<T, PredictionError>;

impl PredictionError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// One classify action: which image, sent where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRequest {
    pub image_path: PathBuf,
    pub server_url: String,
}

impl PredictionRequest {
    pub fn new(image_path: impl Into<PathBuf>, server_url: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            server_url: server_url.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/{PREDICT_ENDPOINT}",
            self.server_url.trim_end_matches('/')
        )
    }
}

/// Fields of a successful classification. Each may be missing from the
/// response; the view decides how to present gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub class_index: Option<i64>,
    pub confidence: f64,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Success(Prediction),
    Failure(PredictionError),
}

impl PredictionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn failure_message(&self) -> Option<String> {
        match self {
            Self::Success(_) => None,
            Self::Failure(err) => Some(err.to_string()),
        }
    }
}

impl From<PredictResult<Prediction>> for PredictionOutcome {
    fn from(result: PredictResult<Prediction>) -> Self {
        match result {
            Ok(prediction) => Self::Success(prediction),
            Err(err) => Self::Failure(err),
        }
    }
}

/// Turns a [`PredictionRequest`] into an outcome. Implementations block and
/// never panic on I/O failure; every problem becomes a `Failure`.
pub trait Classifier: Send + Sync {
    fn predict(&self, request: &PredictionRequest) -> PredictionOutcome;
}

/// Classifier backed by the remote `/predict` HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpClassifier {
    client: Client,
    timeout: Duration,
}

impl HttpClassifier {
    pub fn new() -> PredictResult<Self> {
        Self::with_timeout(PREDICT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> PredictResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| PredictionError::Transport {
                message: format!("failed to build HTTP client: {err}"),
            })?;
        Ok(Self { client, timeout })
    }

    fn send(&self, request: &PredictionRequest) -> PredictResult<Prediction> {
        let bytes =
            std::fs::read(&request.image_path).map_err(|err| PredictionError::ImageUnreadable {
                path: request.image_path.clone(),
                message: err.to_string(),
            })?;
        let form = Form::new().part(UPLOAD_FIELD, upload_part(&request.image_path, bytes)?);
        let (content_type, body) = encode_form(form)?;

        let endpoint = request.endpoint();
        tracing::debug!(%endpoint, path = %request.image_path.display(), "sending prediction request");
        let response = self
            .client
            .post(&endpoint)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .map_err(|err| self.transport_error(&err))?;

        let status = response.status();
        let body = response.text().map_err(|err| self.transport_error(&err))?;
        if status != StatusCode::OK {
            return Err(PredictionError::Server {
                status: status.as_u16(),
                body,
            });
        }

        parse_prediction(&body)
    }

    fn transport_error(&self, err: &reqwest::Error) -> PredictionError {
        let message = error_chain(err);
        if err.is_timeout() {
            PredictionError::Timeout {
                timeout: self.timeout,
                message,
            }
        } else if is_connection_failure(err) {
            PredictionError::Connection { message }
        } else {
            PredictionError::Transport { message }
        }
    }
}

impl Classifier for HttpClassifier {
    fn predict(&self, request: &PredictionRequest) -> PredictionOutcome {
        let result = self.send(request);
        match &result {
            Ok(prediction) => tracing::info!(
                class_index = ?prediction.class_index,
                confidence = prediction.confidence,
                label = ?prediction.label,
                "prediction received"
            ),
            Err(err) => tracing::error!(%err, path = %request.image_path.display(), "prediction failed"),
        }
        result.into()
    }
}

fn upload_part(path: &Path, bytes: Vec<u8>) -> PredictResult<Part> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let mime = image::ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(FALLBACK_MIME);

    Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime)
        .map_err(|err| PredictionError::Transport {
            message: format!("invalid upload content type {mime}: {err}"),
        })
}

/// Buffer the whole multipart body so a failed connect is reported as such
/// instead of racing the body writer.
fn encode_form(form: Form) -> PredictResult<(String, Vec<u8>)> {
    let content_type = format!("multipart/form-data; boundary={}", form.boundary());
    let mut body = Vec::new();
    form.into_reader()
        .read_to_end(&mut body)
        .map_err(|err| PredictionError::Transport {
            message: format!("cannot encode upload: {err}"),
        })?;
    Ok((content_type, body))
}

fn is_connection_failure(err: &reqwest::Error) -> bool {
    let mut source: Option<&(dyn Error + 'static)> = Some(err);
    while let Some(link) = source {
        if link
            .downcast_ref::<reqwest::Error>()
            .is_some_and(reqwest::Error::is_connect)
        {
            return true;
        }
        if let Some(io) = link.downcast_ref::<io::Error>() {
            if matches!(
                io.kind(),
                io::ErrorKind::ConnectionRefused
                    | io::ErrorKind::ConnectionReset
                    | io::ErrorKind::AddrNotAvailable
            ) {
                return true;
            }
        }
        source = link.source();
    }
    false
}

/// `err` followed by each of its sources, joined with `": "`. Links whose text
/// repeats the previous one are skipped.
fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut previous = message.clone();
    let mut source = err.source();
    while let Some(link) = source {
        let text = link.to_string();
        if !text.is_empty() && !previous.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        previous = text;
        source = link.source();
    }
    message
}

/// Parse a `200 OK` body. Fields with a missing or mistyped value are treated
/// as absent; only a body that is not a JSON object is rejected.
pub fn parse_prediction(body: &str) -> PredictResult<Prediction> {
    let value: Value =
        serde_json::from_str(body).map_err(|err| PredictionError::MalformedResponse {
            message: err.to_string(),
        })?;
    let object = value
        .as_object()
        .ok_or_else(|| PredictionError::MalformedResponse {
            message: format!("expected a JSON object, got {body}"),
        })?;

    let class_index = object.get("class_id").and_then(Value::as_i64);
    let confidence = object
        .get("confidence")
        .and_then(Value::as_f64)
        .filter(|value| value.is_finite())
        .map_or(0.0, |value| value.clamp(0.0, 1.0));
    let label = object
        .get("prediction")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(Prediction {
        class_index,
        confidence,
        label,
    })
}
