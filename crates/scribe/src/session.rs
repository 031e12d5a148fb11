//! Host-facing recording session.
//!
//! A [`RecordingSession`] owns the state a host UI toggles: whether recording
//! is on, whether assertion mode is on, and the interaction log. Raw events
//! flow through [`RecordingSession::handle_event`]: classification, locator
//! synthesis against the container, then the reducer.

use tracing::{debug, trace};

use crate::assertion::ApplicableAssertion;
use crate::classify::classify;
use crate::compiler::{compile, GeneratedCode};
use crate::config::RecorderConfig;
use crate::dom::{Document, NodeId, QueryEngine};
use crate::event::{InteractionLog, LogEntry, RawEvent};
use crate::result::RecorderResult;
use crate::synthesize::LocatorSynthesizer;

/// Recording state for one story
#[derive(Debug)]
pub struct RecordingSession {
    config: RecorderConfig,
    synthesizer: LocatorSynthesizer,
    recording: bool,
    asserting: bool,
    log: InteractionLog,
}

impl Default for RecordingSession {
    fn default() -> Self {
        Self::new(RecorderConfig::default())
    }
}

impl RecordingSession {
    /// Idle session
    #[must_use]
    pub fn new(config: RecorderConfig) -> Self {
        Self {
            synthesizer: LocatorSynthesizer::new(&config),
            config,
            recording: false,
            asserting: false,
            log: InteractionLog::new(),
        }
    }

    /// Replace the query engine used for locator synthesis
    #[must_use]
    pub fn with_engine(mut self, engine: impl QueryEngine + 'static) -> Self {
        self.synthesizer = self.synthesizer.with_engine(engine);
        self
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Recorded interactions
    #[must_use]
    pub const fn log(&self) -> &InteractionLog {
        &self.log
    }

    /// Whether events are being captured
    #[must_use]
    pub const fn is_recording(&self) -> bool {
        self.recording
    }

    /// Whether assertion mode is on
    #[must_use]
    pub const fn is_asserting(&self) -> bool {
        self.asserting
    }

    /// Start a fresh recording
    pub fn start(&mut self) {
        self.log.clear();
        self.recording = true;
        debug!("recording started");
    }

    /// Stop capturing; the log is kept for compilation
    pub fn stop(&mut self) {
        self.recording = false;
        self.asserting = false;
        debug!(entries = self.log.len(), "recording stopped");
    }

    /// Toggle assertion mode. Ignored while not recording.
    pub fn set_asserting(&mut self, asserting: bool) {
        self.asserting = asserting && self.recording;
    }

    /// Drop all recorded interactions
    pub fn reset(&mut self) {
        self.log.clear();
    }

    /// The host switched to another story: stop and forget everything
    pub fn change_story(&mut self) {
        self.stop();
        self.reset();
    }

    /// Capture one raw DOM event.
    ///
    /// Returns the entry as captured, before merging, or `None` when the event
    /// was skipped, discarded by the classifier, or could not be located.
    pub async fn handle_event(
        &mut self,
        doc: &Document,
        container: NodeId,
        event: &RawEvent,
    ) -> RecorderResult<Option<LogEntry>> {
        if !self.recording || self.asserting {
            trace!(kind = %event.kind, "event ignored outside recording");
            return Ok(None);
        }

        let Some(interaction) = classify(doc, event) else {
            trace!(kind = %event.kind, "event discarded");
            return Ok(None);
        };

        let Some(locator) = self
            .synthesizer
            .synthesize(doc, container, event.target)
            .await?
        else {
            debug!(
                event = interaction.kind_name(),
                target = %event.target,
                "dropped event without locator"
            );
            return Ok(None);
        };

        let entry = LogEntry::new(locator, interaction);
        self.log.record(entry.clone());
        trace!(
            event = entry.event.kind_name(),
            entries = self.log.len(),
            "interaction recorded"
        );
        Ok(Some(entry))
    }

    /// Record an assertion chosen from the assertion menu
    pub async fn record_assertion(
        &mut self,
        doc: &Document,
        container: NodeId,
        target: NodeId,
        assertion: ApplicableAssertion,
    ) -> RecorderResult<Option<LogEntry>> {
        let Some(locator) = self.synthesizer.synthesize(doc, container, target).await? else {
            debug!(kind = %assertion.kind, target = %target, "dropped assertion without locator");
            return Ok(None);
        };

        let entry = LogEntry::new(locator, assertion.into_event());
        self.log.record(entry.clone());
        Ok(Some(entry))
    }

    /// Compile the log with the configured dialect
    #[must_use]
    pub fn compile(&self) -> GeneratedCode {
        compile(&self.log, &self.config.compile_options())
    }
}
