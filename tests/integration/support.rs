//! Test Doubles
//!
//! A scripted `LlmProvider` that routes each call by its purpose (feature
//! extraction, content generation, judging) and replays queued replies,
//! plus fixture content and pipeline builders.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use concept_forge::services::{build_engine, GenerationPipeline};
use concept_forge::storage::ForgeConfig;
use concept_forge_llm::{
    LlmError, LlmProvider, LlmRequestOptions, LlmResponse, LlmResult, Message, ProviderConfig,
};

// ============================================================================
// Scripted Provider
// ============================================================================

/// Which pipeline stage issued a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Extraction,
    Generation,
    Judge,
}

impl Role {
    fn of(system: Option<&str>) -> Self {
        match system {
            None => Role::Judge,
            Some(s) if s.contains("extract product features") => Role::Extraction,
            Some(_) => Role::Generation,
        }
    }
}

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Fail,
    Delayed(Duration, Box<Reply>),
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }

    pub fn delayed(delay: Duration, reply: Reply) -> Self {
        Reply::Delayed(delay, Box::new(reply))
    }
}

#[derive(Default)]
struct Script {
    queue: VecDeque<Reply>,
    /// Replayed once the queue is empty
    last: Option<Reply>,
}

impl Script {
    fn next(&mut self) -> Reply {
        match self.queue.pop_front() {
            Some(reply) => {
                self.last = Some(reply.clone());
                reply
            }
            None => self.last.clone().unwrap_or(Reply::Fail),
        }
    }
}

/// Provider double with per-role reply queues and call counters.
pub struct ScriptedProvider {
    config: ProviderConfig,
    extraction: Mutex<Script>,
    generation: Mutex<Script>,
    judge: Mutex<Script>,
    extraction_calls: AtomicUsize,
    generation_calls: AtomicUsize,
    judge_calls: AtomicUsize,
    generation_prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            config: ProviderConfig::default(),
            extraction: Mutex::new(Script::default()),
            generation: Mutex::new(Script::default()),
            judge: Mutex::new(Script::default()),
            extraction_calls: AtomicUsize::new(0),
            generation_calls: AtomicUsize::new(0),
            judge_calls: AtomicUsize::new(0),
            generation_prompts: Mutex::new(Vec::new()),
        }
    }

    fn script(&self, role: Role) -> &Mutex<Script> {
        match role {
            Role::Extraction => &self.extraction,
            Role::Generation => &self.generation,
            Role::Judge => &self.judge,
        }
    }

    /// Queue replies for a role; the last one repeats.
    pub fn script_replies(self, role: Role, replies: Vec<Reply>) -> Self {
        self.script(role).lock().unwrap().queue.extend(replies);
        self
    }

    pub fn extraction(self, replies: Vec<Reply>) -> Self {
        self.script_replies(Role::Extraction, replies)
    }

    pub fn generation(self, replies: Vec<Reply>) -> Self {
        self.script_replies(Role::Generation, replies)
    }

    pub fn judge(self, replies: Vec<Reply>) -> Self {
        self.script_replies(Role::Judge, replies)
    }

    pub fn calls(&self, role: Role) -> usize {
        match role {
            Role::Extraction => self.extraction_calls.load(Ordering::SeqCst),
            Role::Generation => self.generation_calls.load(Ordering::SeqCst),
            Role::Judge => self.judge_calls.load(Ordering::SeqCst),
        }
    }

    pub fn total_calls(&self) -> usize {
        self.calls(Role::Extraction) + self.calls(Role::Generation) + self.calls(Role::Judge)
    }

    pub fn generation_prompts(&self) -> Vec<String> {
        self.generation_prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn send_message(
        &self,
        messages: Vec<Message>,
        system: Option<String>,
        _request_options: LlmRequestOptions,
    ) -> LlmResult<LlmResponse> {
        let role = Role::of(system.as_deref());
        match role {
            Role::Extraction => self.extraction_calls.fetch_add(1, Ordering::SeqCst),
            Role::Generation => self.generation_calls.fetch_add(1, Ordering::SeqCst),
            Role::Judge => self.judge_calls.fetch_add(1, Ordering::SeqCst),
        };
        if role == Role::Generation {
            let prompt = messages.last().map(|m| m.content.clone()).unwrap_or_default();
            self.generation_prompts.lock().unwrap().push(prompt);
        }

        let mut reply = self.script(role).lock().unwrap().next();
        loop {
            match reply {
                Reply::Text(text) => return Ok(LlmResponse::from_text(text, "scripted-model")),
                Reply::Fail => {
                    return Err(LlmError::NetworkError {
                        message: "scripted failure".to_string(),
                    })
                }
                Reply::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    reply = *inner;
                }
            }
        }
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub const MARKETPLACE_DESCRIPTION: &str =
    "Online marketplace connecting local farmers with restaurants, needs listings, ordering, and payment";

/// Content too short to pass any rule.
pub const STUB: &str = "Farm marketplace. Listings. Orders. Payments. TBD!!";

pub fn verdict(verified: bool, confidence: u8) -> Reply {
    Reply::text(format!(
        "Here is my assessment:\n{{\"verified\": {}, \"confidence\": {}, \"issues\": [], \"recommendations\": []}}",
        verified, confidence
    ))
}

/// A Markdown document that passes every heuristic document rule.
pub fn good_document() -> String {
    let paragraph = "Restaurants in the region spend 6 hours each week sourcing produce \
        from 12 different suppliers, and 30 percent of orders arrive late or incomplete. \
        Our platform cuts sourcing time by 50 percent with a single ordering flow, \
        verified farm profiles and weekly delivery windows that match kitchen schedules.";
    let sections = [
        "Executive Summary",
        "Problem",
        "Solution",
        "Target Market",
        "Business Model",
        "Features",
    ];
    let mut doc = String::from("# FarmLink\n\n");
    for section in sections {
        doc.push_str(&format!("## {}\n\n{}\n\n{}\n\n", section, paragraph, paragraph));
    }
    doc
}

pub fn extraction_reply() -> Reply {
    Reply::text(
        r#"[{"name": "Farm listings", "priority": "high"}, {"name": "Restaurant ordering", "priority": "high"}, {"name": "Secure payment", "priority": "high"}, "Delivery scheduling"]"#,
    )
}

// ============================================================================
// Builders
// ============================================================================

pub fn test_config() -> ForgeConfig {
    let mut config = ForgeConfig::default();
    config.pipeline.call_timeout_secs = 5;
    config
}

/// Pipeline whose generator, extractor and judge all use `provider`.
pub fn pipeline_with(provider: &Arc<ScriptedProvider>, config: &ForgeConfig) -> GenerationPipeline {
    let provider: Arc<dyn LlmProvider> = provider.clone();
    let engine = build_engine(config, Arc::clone(&provider));
    GenerationPipeline::new(provider, engine, config)
}
