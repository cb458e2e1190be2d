//! Natural-language insight requests.
//!
//! The requester formats the derived records into a prompt and asks the
//! configured [`TextGenerator`] for a summary. Failures never propagate:
//! they degrade to [`INSIGHT_FALLBACK`]. Every request is stamped with a
//! monotonic sequence number, and a response that comes back after a newer
//! request was issued is reported as [`InsightOutcome::Superseded`] so the
//! caller never shows stale text.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::DerivedStudent;
use crate::traits::{GenerateRequest, GenerateResponse, TextGenerator};

/// Shown when the service call fails for any reason.
pub const INSIGHT_FALLBACK: &str = "AI insights currently unavailable. Please try again later.";

/// Shown when the service answered with no text.
pub const NO_INSIGHT: &str = "No insights available.";

const PROMPT_PREAMBLE: &str = "You are an expert academic counselor. Analyze the following student performance data and provide a professional, concise summary of the group's strengths, weaknesses, and 3-5 specific actionable recommendations for improvement.";

const PROMPT_INSTRUCTION: &str =
    "Format the response in Markdown with clear sections. Keep it encouraging but realistic.";

/// Build the prompt for a collection. Deterministic for a given input.
pub fn build_prompt(students: &[DerivedStudent]) -> String {
    let mut prompt = String::new();
    prompt.push_str(PROMPT_PREAMBLE);
    prompt.push_str("\n\nData:\n");
    for s in students {
        prompt.push_str(&format!(
            "{}: Marks {}, Attendance {}%, Study {}h/day, Status: {}\n",
            s.student.name, s.student.marks, s.student.attendance, s.student.study_hours, s.status
        ));
    }
    prompt.push('\n');
    prompt.push_str(PROMPT_INSTRUCTION);
    prompt
}

/// Where the insight text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightSource {
    /// Text produced by the service.
    Generated,
    /// The service failed; the text is [`INSIGHT_FALLBACK`].
    Fallback,
    /// No students, so nothing was requested.
    NotRequested,
}

/// A settled insight for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub sequence: u64,
    pub text: String,
    pub source: InsightSource,
}

impl Insight {
    /// Text for the insight panel.
    pub fn display_text(&self) -> &str {
        if self.text.trim().is_empty() {
            NO_INSIGHT
        } else {
            &self.text
        }
    }
}

/// Result of [`InsightRequester::request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightOutcome {
    /// This is the latest request; show it.
    Current(Insight),
    /// A newer request was issued while this one was in flight.
    Superseded { sequence: u64, latest: u64 },
}

impl InsightOutcome {
    /// The insight, if it is still current.
    pub fn into_current(self) -> Option<Insight> {
        match self {
            InsightOutcome::Current(insight) => Some(insight),
            InsightOutcome::Superseded { .. } => None,
        }
    }
}

/// Issues insight requests against one generator and model.
pub struct InsightRequester {
    generator: Arc<dyn TextGenerator>,
    model: String,
    timeout: Option<Duration>,
    latest: AtomicU64,
}

impl InsightRequester {
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
            timeout: None,
            latest: AtomicU64::new(0),
        }
    }

    /// Give up on a request after `timeout`. Off unless set.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sequence number of the most recently issued request (0 if none).
    pub fn latest_sequence(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Request an insight for the whole collection.
    ///
    /// Calls the service exactly once when `students` is non-empty. No
    /// retries and no caching.
    pub async fn request(&self, students: &[DerivedStudent]) -> InsightOutcome {
        let sequence = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        let (text, source) = if students.is_empty() {
            (String::new(), InsightSource::NotRequested)
        } else {
            let request = GenerateRequest {
                model: self.model.clone(),
                prompt: build_prompt(students),
            };
            match self.call(&request).await {
                Ok(response) => {
                    tracing::info!(
                        sequence,
                        provider = self.generator.name(),
                        model = %response.model,
                        latency_ms = response.latency_ms,
                        "insight received"
                    );
                    (response.content, InsightSource::Generated)
                }
                Err(e) => {
                    tracing::warn!(sequence, "insight unavailable: {e:#}");
                    (INSIGHT_FALLBACK.to_string(), InsightSource::Fallback)
                }
            }
        };

        let latest = self.latest_sequence();
        if sequence != latest {
            tracing::debug!(sequence, latest, "discarding superseded insight");
            return InsightOutcome::Superseded { sequence, latest };
        }

        InsightOutcome::Current(Insight {
            sequence,
            text,
            source,
        })
    }

    async fn call(&self, request: &GenerateRequest) -> anyhow::Result<GenerateResponse> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.generator.generate(request))
                .await
                .map_err(|_| anyhow::anyhow!("insight request timed out after {limit:?}"))?,
            None => self.generator.generate(request).await,
        }
    }
}
