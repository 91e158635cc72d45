//! Ordered stages with fan-out inside each stage.
//!
//! A [`Pipeline`] runs its stages strictly one after another and stops at the
//! first failure. Work inside a stage that has no ordering constraints can be
//! spread with [`fan_out`], which joins before the stage returns.

use anyhow::Result;
use std::future::Future;
use std::time::Instant;
use tracing::{error, info};

#[async_trait::async_trait]
pub trait Stage<C: Send>: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self, ctx: &mut C) -> Result<()>;
}

pub struct Pipeline<C> {
    name: &'static str,
    stages: Vec<Box<dyn Stage<C>>>,
}

impl<C: Send> Pipeline<C> {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            stages: Vec::new(),
        }
    }

    #[must_use]
    pub fn stage(mut self, stage: impl Stage<C> + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    #[must_use]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub async fn run(&self, ctx: &mut C) -> Result<()> {
        let total = self.stages.len();

        for (index, stage) in self.stages.iter().enumerate() {
            let stage_name = stage.name();
            info!(
                pipeline = self.name,
                "Starting stage {}/{total}: {stage_name}",
                index + 1
            );
            let started = Instant::now();

            if let Err(e) = stage.run(ctx).await {
                error!(
                    pipeline = self.name,
                    error = %format!("{e:#}"),
                    "Stage '{stage_name}' failed, aborting"
                );
                return Err(e.context(format!("{} stage '{stage_name}' failed", self.name)));
            }

            info!(
                pipeline = self.name,
                elapsed_ms = started.elapsed().as_millis(),
                "Finished stage: {stage_name}"
            );
        }

        Ok(())
    }
}

/// Runs `op` over every item concurrently and waits for all of them.
///
/// Results come back in input order regardless of completion order; the first
/// error fails the whole batch.
pub async fn fan_out<I, T, F, Fut>(items: I, op: F) -> Result<Vec<T>>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    futures::future::try_join_all(items.into_iter().map(op)).await
}
