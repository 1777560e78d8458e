//! Shared fixtures: a scripted generator keyed by persona name and a
//! small persona roster.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use persona_panel::services::persona::InMemoryAgentStore;
use persona_panel::AgentStore;
use persona_panel_core::{
    CognitiveProfile, CommunicationStyle, ComprehensionSpeed, EmotionalBaseline, EmotionalProfile,
    PersonaProfile, PersonaStatus, SpeechPatterns,
};
use persona_panel_llm::{ChatMessage, GenerationParams, Generator, LlmError, LlmResult};

/// What the generator does for one persona.
#[derive(Clone)]
pub enum Script {
    Reply(String),
    Fail(LlmError),
    /// Sleep before replying; used to trip the per-call timeout.
    Stall(Duration),
}

/// Answers according to the persona named in the system prompt.
#[derive(Default)]
pub struct ScriptedGenerator {
    scripts: HashMap<String, Script>,
    fallback: Option<Script>,
    pub calls: Mutex<Vec<Call>>,
}

/// One recorded generator call.
#[derive(Debug, Clone)]
pub struct Call {
    pub system_prompt: String,
    pub user_prompt: String,
    pub history_len: usize,
    pub params: GenerationParams,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, persona_name: &str, script: Script) -> Self {
        self.scripts.insert(persona_name.to_string(), script);
        self
    }

    pub fn otherwise(mut self, script: Script) -> Self {
        self.fallback = Some(script);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn script_for(&self, system_prompt: &str) -> Option<Script> {
        self.scripts
            .iter()
            .find(|(name, _)| system_prompt.contains(&format!("You are {}", name)))
            .map(|(_, script)| script.clone())
            .or_else(|| self.fallback.clone())
    }

    async fn run(&self, script: Option<Script>) -> LlmResult<String> {
        match script {
            Some(Script::Reply(text)) => Ok(text),
            Some(Script::Fail(e)) => Err(e),
            Some(Script::Stall(duration)) => {
                tokio::time::sleep(duration).await;
                Ok("{}".to_string())
            }
            None => Err(LlmError::Other {
                message: "no script".to_string(),
            }),
        }
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        params: &GenerationParams,
    ) -> LlmResult<String> {
        self.generate_with_history(system_prompt, &[], user_prompt, params)
            .await
    }

    async fn generate_with_history(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
        user_prompt: &str,
        params: &GenerationParams,
    ) -> LlmResult<String> {
        self.calls.lock().unwrap().push(Call {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            history_len: history.len(),
            params: params.clone(),
        });
        let script = self.script_for(system_prompt);
        self.run(script).await
    }
}

pub fn persona(id: &str, name: &str, occupation: &str) -> PersonaProfile {
    let mut persona = PersonaProfile::new(id, name);
    persona.occupation = Some(occupation.to_string());
    persona
}

/// Asha, Ravi and Chen are active; Dana is inactive.
pub fn roster() -> Vec<PersonaProfile> {
    let mut asha = persona("asha", "Asha", "small business owner");
    asha.personality_traits = vec!["Cautious".to_string()];
    asha.pain_points = vec!["hidden fees".to_string()];
    asha.speech_patterns = Some(SpeechPatterns {
        filler_words: vec!["um".to_string()],
        common_phrases: vec!["to be honest".to_string()],
        self_correction_frequency: None,
    });
    asha.communication_style = Some(CommunicationStyle {
        sentence_length: None,
        formality: Some(3.0),
    });
    asha.cognitive_profile = Some(CognitiveProfile {
        comprehension_speed: Some(ComprehensionSpeed::Slow),
        patience: Some(4.0),
    });
    asha.emotional_profile = Some(EmotionalProfile {
        baseline: Some(EmotionalBaseline::Anxious),
        frustration_triggers: vec!["paperwork".to_string()],
        excitement_triggers: Vec::new(),
    });

    let ravi = persona("ravi", "Ravi", "software engineer");
    let chen = persona("chen", "Chen", "retired teacher");
    let mut dana = persona("dana", "Dana", "student");
    dana.status = PersonaStatus::Inactive;

    vec![asha, ravi, chen, dana]
}

pub fn store() -> Arc<dyn AgentStore> {
    Arc::new(InMemoryAgentStore::new(roster()))
}

pub fn ids(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

/// A critique JSON body with one problem.
pub fn critique_json(issue: &str, severity: &str, fix: &str, confidence: f64) -> String {
    serde_json::json!({
        "summary": format!("Concerned about: {}", issue),
        "positives": ["Clear layout"],
        "problems": [{
            "issue": issue,
            "evidence": format!("Seen on screen: {}", issue),
            "severity": severity,
            "heuristic": "Visibility of system status",
            "fix": fix
        }],
        "confidence": confidence
    })
    .to_string()
}
