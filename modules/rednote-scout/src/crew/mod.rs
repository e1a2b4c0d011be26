//! Sequential three-stage pipeline: collect, analyze, generate.
//!
//! Each stage's text output is the next stage's only input. The collect
//! stage is the [`Collector`]; the other two are single LLM calls made as a
//! persona.

pub mod roles;
pub mod tasks;

use ai_client::{Agent, PromptBuilder};
use anyhow::{Context, Result};
use rednote_common::{Collection, ScrapeRequest};
use thiserror::Error;
use tracing::{info, warn};

use crate::collector::Collector;
use crate::renderer::PageRenderer;
use roles::{Persona, CREATOR, STRATEGIST, TREND_SCOUT};
use tasks::TaskSpec;

#[derive(Debug, Error)]
pub enum CrewError {
    /// Collection ended without data: a fatal collection error or no
    /// candidate posts. Carries the text the collect stage produced.
    #[error("{0}")]
    Collection(String),
}

#[derive(Debug, Clone)]
pub struct CrewReport {
    pub topic: String,
    pub scrape_summary: String,
    pub analysis: String,
    /// Final output: the generated post variations.
    pub variations: String,
}

#[derive(Debug, Clone)]
pub struct Stage {
    pub persona: Persona,
    pub task: TaskSpec,
}

/// The three stages for `topic`, in execution order.
pub fn stages(topic: &str) -> [Stage; 3] {
    [
        Stage {
            persona: TREND_SCOUT,
            task: tasks::scraping_task(topic),
        },
        Stage {
            persona: STRATEGIST,
            task: tasks::analysis_task(topic),
        },
        Stage {
            persona: CREATOR,
            task: tasks::content_task(topic),
        },
    ]
}

pub struct Crew<A, R> {
    agent: A,
    collector: Collector<R>,
    temperature: f32,
}

impl<A: Agent, R: PageRenderer> Crew<A, R> {
    pub fn new(agent: A, collector: Collector<R>, temperature: f32) -> Self {
        Self {
            agent,
            collector,
            temperature,
        }
    }

    pub fn collector(&self) -> &Collector<R> {
        &self.collector
    }

    pub async fn kickoff(&self, topic: &str) -> Result<CrewReport> {
        let [scout, strategist, creator] = stages(topic);
        let request = ScrapeRequest::new(topic);

        info!(topic, stage = scout.persona.role, "Stage started");
        let scrape_summary = match self.collector.collect(&request).await {
            Ok(Collection::Scraped(result)) => result.summary,
            Ok(empty @ Collection::Empty { .. }) => {
                warn!(topic, "Nothing collected, stopping before analysis");
                return Err(CrewError::Collection(empty.summary()).into());
            }
            Err(e) => {
                warn!(topic, error = %e, "Collection failed, stopping before analysis");
                return Err(CrewError::Collection(e.to_string()).into());
            }
        };

        let analysis = self
            .run_stage(&strategist, &scrape_summary)
            .await
            .context("Analysis stage failed")?;

        let variations = self
            .run_stage(&creator, &analysis)
            .await
            .context("Content generation stage failed")?;

        Ok(CrewReport {
            topic: topic.to_string(),
            scrape_summary,
            analysis,
            variations,
        })
    }

    async fn run_stage(&self, stage: &Stage, context: &str) -> Result<String> {
        info!(
            stage = stage.persona.role,
            agent = %self.agent.name(),
            "Stage started"
        );

        let output = self
            .agent
            .prompt(stage.task.prompt(Some(context)))
            .preamble(stage.persona.preamble())
            .temperature(self.temperature)
            .send()
            .await?;

        info!(stage = stage.persona.role, chars = output.chars().count(), "Stage finished");
        Ok(output)
    }
}
