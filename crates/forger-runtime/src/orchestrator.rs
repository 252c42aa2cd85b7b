//! Orchestrator: decode → normalize → extract → classify → redact → publish.

use std::sync::Arc;

use chrono::Utc;
use forger_classify::{Classifier, LexiconSet};
use forger_core::{Disposition, Error, ForgerConfig, RedactionTarget, Result, TopicConfig};
use forger_ingest::{PhraseExtractor, TextNormalizer, VerbSelector};
use forger_nlp::{NlpPipeline, SentimentScorer, StopwordSet};
use forger_protocol::Redactor;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::decode::{decode_email, original_data, validate_email};
use crate::publish::{OutboundMessage, Publisher};
use crate::types::*;

/// Shared, read-only analysis resources built once at startup.
#[derive(Clone)]
pub struct Components {
    pub pipeline: Arc<dyn NlpPipeline>,
    pub scorer: Arc<dyn SentimentScorer>,
    /// Stopwords removed by the normalizer, on top of the pipeline's own flags.
    pub stopwords: Arc<StopwordSet>,
    pub lexicons: LexiconSet,
}

impl Components {
    /// Load data files named by `config`, falling back to built-ins.
    pub fn from_config(config: &ForgerConfig) -> Result<Self> {
        let stopwords = forger_nlp::load_stopwords(config.data_paths.stopwords_file.as_deref())?;
        Ok(Self {
            pipeline: forger_nlp::create_pipeline(Arc::new(StopwordSet::english())),
            scorer: forger_nlp::create_scorer(),
            stopwords: Arc::new(stopwords),
            lexicons: LexiconSet::from_paths(&config.data_paths)?,
        })
    }
}

/// Top-level orchestrator for one inbound message at a time.
///
/// Holds no per-message state; safe to share across threads.
pub struct Orchestrator {
    api_name: String,
    pipeline_name: String,
    scorer_name: String,
    normalizer: TextNormalizer,
    extractor: PhraseExtractor,
    classifier: Classifier,
    redactor: Redactor,
    targets: Vec<RedactionTarget>,
    topics: TopicConfig,
    skip_empty: bool,
    publisher: Arc<dyn Publisher>,
}

impl Orchestrator {
    pub fn new(
        components: Components,
        config: &ForgerConfig,
        publisher: Arc<dyn Publisher>,
    ) -> Result<Self> {
        let Components {
            pipeline,
            scorer,
            stopwords,
            lexicons,
        } = components;

        let classifier = Classifier::from_lexicons(&lexicons, scorer.clone())?;
        let redactor = Redactor::new(pipeline.clone(), config.redaction.marker.clone())?;

        info!(
            "Orchestrator initialized: pipeline={}, scorer={}, categories={}, tags={}",
            pipeline.name(),
            scorer.name(),
            lexicons.categories.len(),
            lexicons.tags.len()
        );

        Ok(Self {
            api_name: config.api_name.clone(),
            pipeline_name: pipeline.name().to_string(),
            scorer_name: scorer.name().to_string(),
            normalizer: TextNormalizer::new(pipeline.clone(), stopwords)
                .skip_empty_sentences(config.skip_empty_sentences),
            extractor: PhraseExtractor::new(pipeline),
            classifier,
            redactor,
            targets: config.redaction.targets.clone(),
            topics: config.topics.clone(),
            skip_empty: config.skip_empty_sentences,
            publisher,
        })
    }

    /// Build components from `config` and create the orchestrator.
    pub fn from_config(config: &ForgerConfig, publisher: Arc<dyn Publisher>) -> Result<Self> {
        Self::new(Components::from_config(config)?, config, publisher)
    }

    /// Replace the strategy that picks a governing verb for noun chunks.
    pub fn with_verb_selector(mut self, selector: impl VerbSelector + 'static) -> Self {
        self.extractor = self.extractor.with_verb_selector(selector);
        self
    }

    /// Run the analysis pipeline over `email` without publishing.
    pub fn analyse(&self, email: &EmailInfo, message_id: Option<&str>) -> Result<EnrichedPayload> {
        validate_email(email)?;
        let content = email.content.as_deref().unwrap_or_default();

        let sentences = self.normalizer.normalize(content)?;
        let phrases = self.extractor.extract(&sentences)?;
        let records = self.classifier.classify(&phrases);
        debug!(
            "Analysed {} sentences into {} phrases",
            sentences.len(),
            records.len()
        );

        let mut redacted = IndexMap::new();
        let mut redaction_errors = IndexMap::new();
        for target in &self.targets {
            let Some(value) = email.field(*target) else {
                continue;
            };
            match self.redactor.redact(value) {
                Ok(text) => {
                    redacted.insert(target.as_str().to_string(), text);
                }
                Err(e) => {
                    warn!("Redaction of {} failed, omitting field: {}", target, e);
                    redaction_errors.insert(target.as_str().to_string(), e.to_string());
                }
            }
        }

        Ok(EnrichedPayload {
            payload_id: Uuid::new_v4(),
            message_id: message_id.map(str::to_string),
            date_sent: email.date_sent.clone(),
            content_type: email.content_type.clone(),
            phrases: records,
            redacted,
            redaction_errors,
            processed_at: Utc::now(),
            published_at: None,
        })
    }

    /// Decode, analyse and publish one message.
    pub fn process(&self, message: &PubSubMessage) -> Result<EnrichedPayload> {
        self.run(message).map_err(|(_, e)| e)
    }

    /// Process a push delivery and decide what the transport should do with it.
    pub fn handle(&self, envelope: &PushEnvelope) -> Outcome {
        let message = &envelope.message;
        match self.run(message) {
            Ok(payload) => {
                info!(
                    "Message {} processed: payload {} with {} phrases",
                    message.message_id,
                    payload.payload_id,
                    payload.phrases.len()
                );
                Outcome::Ack {
                    message_id: message.message_id.clone(),
                    publish_time: message.publish_time.clone(),
                    payload_id: payload.payload_id,
                }
            }
            Err((stage, err)) => {
                let detail = err.to_string();
                if err.disposition() != Disposition::DeadLetter {
                    error!(
                        "Message {} failed at {}, requesting redelivery: {}",
                        message.message_id, stage, detail
                    );
                    return Outcome::Retry { stage, detail };
                }

                warn!(
                    "Message {} rejected at {}: {}",
                    message.message_id, stage, detail
                );
                match self.dead_letter(
                    &message.message_id,
                    &message.publish_time,
                    original_data(message),
                    stage,
                    &detail,
                ) {
                    Ok(_) => Outcome::DeadLetter { stage, detail },
                    Err(e) => {
                        error!(
                            "Dead-lettering message {} failed: {}",
                            message.message_id, e
                        );
                        Outcome::Retry {
                            stage: ErrorStage::SendingToDlq,
                            detail: e.to_string(),
                        }
                    }
                }
            }
        }
    }

    /// Forward `data` to the dead-letter topic with the failure context.
    pub fn dead_letter(
        &self,
        message_id: &str,
        publish_time: &str,
        data: Value,
        stage: ErrorStage,
        detail: &str,
    ) -> Result<String> {
        let message = OutboundMessage::new(data)
            .with_attribute("source_message_uuid", message_id)
            .with_attribute("source_publish_time", publish_time)
            .with_attribute("error_stage", stage.as_str())
            .with_attribute("error_desc", detail);
        let id = self.publisher.publish(&self.topics.dead_letter, message)?;
        info!(
            "Message {} sent to {} as {}",
            message_id, self.topics.dead_letter, id
        );
        Ok(id)
    }

    pub fn status(&self) -> RuntimeStatus {
        RuntimeStatus {
            api_name: self.api_name.clone(),
            pipeline: self.pipeline_name.clone(),
            scorer: self.scorer_name.clone(),
            categories: self.classifier.category_labels().map(str::to_string).collect(),
            tags: self.classifier.tag_labels().map(str::to_string).collect(),
            redaction_targets: self.targets.clone(),
            output_topic: self.topics.output.clone(),
            dead_letter_topic: self.topics.dead_letter.clone(),
            skip_empty_sentences: self.skip_empty,
        }
    }

    fn run(
        &self,
        message: &PubSubMessage,
    ) -> std::result::Result<EnrichedPayload, (ErrorStage, Error)> {
        let email = decode_email(message).map_err(|e| (ErrorStage::MessageValidation, e))?;

        let mut payload = self
            .analyse(&email, Some(&message.message_id))
            .map_err(|e| (ErrorStage::EmailNlpAnalysis, e))?;

        payload.published_at = Some(Utc::now());
        let data = serde_json::to_value(&payload).map_err(|e| {
            (
                ErrorStage::PushToPubsub,
                Error::Internal(format!("payload serialization failed: {}", e)),
            )
        })?;
        let outbound = OutboundMessage::new(data)
            .with_attribute("source_message_uuid", message.message_id.as_str())
            .with_attribute("payload_id", payload.payload_id.to_string());
        let id = self
            .publisher
            .publish(&self.topics.output, outbound)
            .map_err(|e| (ErrorStage::PushToPubsub, e))?;
        debug!("Payload {} published as {}", payload.payload_id, id);

        Ok(payload)
    }
}
