//! Check runner
//!
//! Owns the queue of registered checks and executes them under a
//! concurrency cap, pausing between two dispatches. Results are collected in
//! completion order and folded into a [`RunSummary`].

mod aggregate;
mod evaluate;

use std::collections::VecDeque;
use std::sync::Arc;

use hra_domain::{
    Assertion, Check, CheckResult, CheckState, DomainResult, RequestOptions, RequestSpec,
    RunSummary,
};
use tokio::task::JoinSet;
use tokio::time::{self, Instant};
use tracing::info;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::RunError;
use crate::handlers::HandlerRegistry;
use crate::ports::HttpClient;

use self::aggregate::summarize;
use self::evaluate::execute_check;

/// Executes registered checks and aggregates their results.
pub struct CheckRunner {
    config: EngineConfig,
    client: Arc<dyn HttpClient>,
    registry: Arc<HandlerRegistry>,
    queue: VecDeque<Check>,
}

impl CheckRunner {
    /// Creates a runner.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(
        config: EngineConfig,
        client: Arc<dyn HttpClient>,
        registry: Arc<HandlerRegistry>,
    ) -> DomainResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            client,
            registry,
            queue: VecDeque::new(),
        })
    }

    /// Registers a check for `url`.
    ///
    /// The engine's agent is sent as `User-Agent` unless `options` sets one,
    /// and a missing or zero timeout falls back to the engine default.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` is not an http(s) URL or `assertions` is
    /// empty.
    pub fn add_check(
        &mut self,
        url: &str,
        assertions: Vec<Assertion>,
        options: RequestOptions,
    ) -> DomainResult<Uuid> {
        let request =
            RequestSpec::resolve(url, options, self.config.timeout_ms, &self.config.agent)?;
        let check = Check::new(request, assertions)?;
        let id = check.id;

        info!(
            check = %check.request.display_title(),
            state = %CheckState::Pending,
            "check registered"
        );
        self.queue.push_back(check);
        Ok(id)
    }

    /// The engine settings.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The handlers assertions are dispatched to.
    #[must_use]
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Number of checks waiting to be run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Runs every registered check.
    ///
    /// The queue is drained: a second call without new checks returns
    /// [`RunError::NoChecks`].
    ///
    /// # Errors
    ///
    /// - [`RunError::NoChecks`] if no check was registered.
    /// - [`RunError::ChecksFailed`] with the complete summary if any check
    ///   failed.
    /// - [`RunError::Assertion`] in strict mode, for the first assertion
    ///   that cannot be evaluated. Remaining checks are dropped.
    pub async fn run(&mut self) -> Result<RunSummary, RunError> {
        if self.queue.is_empty() {
            return Err(RunError::NoChecks);
        }
        info!(
            checks = self.queue.len(),
            concurrency = self.config.concurrency,
            handlers = ?self.registry.names(),
            "run started"
        );

        let results = self.drive().await;
        self.queue.clear();
        let summary = summarize(results?);

        info!(passed = summary.passed, failed = summary.failed, "run finished");
        if summary.is_success() {
            Ok(summary)
        } else {
            Err(RunError::ChecksFailed(summary))
        }
    }

    /// The scheduler loop. Dispatches while fewer than `concurrency` checks
    /// are in flight and the dispatch timer is due, and collects
    /// completions until both the queue and the in-flight set are empty.
    async fn drive(&mut self) -> Result<Vec<CheckResult>, RunError> {
        let delay = self.config.delay();
        let mut results = Vec::with_capacity(self.queue.len());
        let mut in_flight = JoinSet::new();
        let mut next_dispatch = Instant::now();

        loop {
            let can_dispatch = !self.queue.is_empty() && in_flight.len() < self.config.concurrency;
            if !can_dispatch && in_flight.is_empty() {
                return Ok(results);
            }

            tokio::select! {
                () = time::sleep_until(next_dispatch), if can_dispatch => {
                    if let Some(check) = self.queue.pop_front() {
                        info!(
                            check = %check.request.display_title(),
                            state = %CheckState::Dispatched,
                            in_flight = in_flight.len() + 1,
                            "check dispatched"
                        );
                        in_flight.spawn(execute_check(
                            Arc::clone(&self.client),
                            Arc::clone(&self.registry),
                            check,
                            self.config.strict,
                        ));
                        next_dispatch = Instant::now() + delay;
                    }
                }
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    let result = joined
                        .map_err(|e| RunError::Task(e.to_string()))
                        .and_then(|result| result);
                    match result {
                        Ok(result) => {
                            info!(
                                check = %result.title,
                                state = %CheckState::Settled,
                                success = result.success,
                                "check settled"
                            );
                            results.push(result);
                        }
                        Err(error) => {
                            in_flight.abort_all();
                            return Err(error);
                        }
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for CheckRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckRunner")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("pending", &self.queue.len())
            .finish_non_exhaustive()
    }
}
