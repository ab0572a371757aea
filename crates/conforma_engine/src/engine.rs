//! The structured generation engine: composition, validation, and retry.

use crate::compose::{batch_sizes, PromptComposer};
use crate::retry::{RetrySession, RetryState};
use crate::validate::{validate, Rejection};
use conforma_core::{CoolingSchedule, RetryPolicy, SamplingParams};
use conforma_error::{ConfigError, ConformaResult, TransportError};
use conforma_interface::{BatchSchema, Cancellable, SchemaDescriptor, TextCompletion};
use derive_builder::Builder;
use derive_getters::Getters;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Engine configuration.
///
/// Built once per engine; validated at build and again on entry to
/// `generate`, so a hand-mutated configuration can never reach the client.
///
/// # Examples
///
/// ```
/// use conforma_engine::EngineConfigBuilder;
/// use conforma_core::RetryPolicy;
/// use std::time::Duration;
///
/// let config = EngineConfigBuilder::default()
///     .policy(RetryPolicy {
///         max_attempts: 3,
///         wait_interval: Duration::from_secs(20),
///     })
///     .max_items_per_call(5)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Builder, Getters)]
#[builder(build_fn(validate = "Self::check"))]
pub struct EngineConfig {
    /// Attempt budget and inter-attempt wait
    #[builder(default)]
    policy: RetryPolicy,
    /// Largest item count requested from the client in one call
    #[builder(default = "5")]
    max_items_per_call: usize,
    /// Sampling parameters for the first attempt
    #[builder(default)]
    base_sampling: SamplingParams,
    /// Per-attempt reduction of sampling randomness
    #[builder(default)]
    cooling: CoolingSchedule,
    /// Bound on one generation call; elapsed time is a transport failure
    #[builder(default)]
    per_call_timeout: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            policy: RetryPolicy::default(),
            max_items_per_call: 5,
            base_sampling: SamplingParams::default(),
            cooling: CoolingSchedule::default(),
            per_call_timeout: None,
        }
    }
}

impl EngineConfigBuilder {
    fn check(&self) -> Result<(), String> {
        if let Some(policy) = &self.policy {
            if policy.max_attempts == 0 {
                return Err("max_attempts must be positive".to_string());
            }
        }
        if let Some(0) = self.max_items_per_call {
            return Err("max_items_per_call must be positive".to_string());
        }
        Ok(())
    }
}

impl EngineConfig {
    /// Validate this configuration, before any client call is made.
    pub fn validate(&self) -> ConformaResult<()> {
        if self.policy.max_attempts == 0 {
            return Err(ConfigError::new("max_attempts must be positive").into());
        }
        if self.max_items_per_call == 0 {
            return Err(ConfigError::new("max_items_per_call must be positive").into());
        }
        for value in [
            self.base_sampling.temperature,
            self.base_sampling.top_p,
            self.cooling.temperature_step,
            self.cooling.top_p_step,
        ] {
            if !(0.0..=1.0).contains(&value) || value.is_nan() {
                return Err(ConfigError::new(
                    "sampling parameters and cooling steps must lie in [0, 1]",
                )
                .into());
            }
        }
        Ok(())
    }
}

/// Terminal result of one unit of work.
///
/// `Exhausted` and `Cancelled` are values, not errors: a best-effort caller
/// continues with degraded data instead of unwinding.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The validator accepted an output.
    Accepted {
        /// The schema-conformant value
        value: T,
        /// Attempts spent, including the accepted one
        attempts: usize,
    },
    /// Every budgeted attempt was rejected or failed.
    Exhausted {
        /// Attempts spent
        attempts: usize,
    },
    /// Cancellation was observed between attempts.
    Cancelled {
        /// Attempts spent before cancellation
        attempts: usize,
    },
}

impl<T> Outcome<T> {
    /// Whether an accepted value is present.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted { .. })
    }

    /// Attempts spent on this unit of work.
    pub fn attempts(&self) -> usize {
        match self {
            Outcome::Accepted { attempts, .. }
            | Outcome::Exhausted { attempts }
            | Outcome::Cancelled { attempts } => *attempts,
        }
    }

    /// The accepted value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Accepted { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Consume the outcome, yielding the accepted value if any.
    pub fn into_value(self) -> Option<T> {
        match self {
            Outcome::Accepted { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// Aggregate result of a batched generation call.
///
/// Batches succeed and fail independently; a batch that exhausts its retry
/// budget contributes nothing, and the remaining batches still contribute
/// their items.
#[derive(Debug, Clone, Getters)]
pub struct Harvest<T> {
    /// Items from every accepted batch, in batch order
    items: Vec<T>,
    /// Item count the caller asked for
    requested: usize,
    /// Batches planned
    batches: usize,
    /// Batches that exhausted their budget without acceptance
    failed_batches: usize,
    /// Generation-client calls made across all batches
    client_calls: usize,
    /// Whether cancellation cut the run short
    cancelled: bool,
}

impl<T> Harvest<T> {
    /// Whether every planned batch was accepted and the run was not cancelled.
    pub fn is_complete(&self) -> bool {
        self.failed_batches == 0 && !self.cancelled
    }

    /// Consume the harvest, yielding the accepted items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// Structured generation engine.
///
/// Owns a [`TextCompletion`] client, a configuration, and a
/// [`PromptComposer`]. Each `generate` call runs its own retry session;
/// no state is shared across calls.
pub struct Engine<C> {
    client: C,
    config: EngineConfig,
    composer: PromptComposer,
}

impl<C: TextCompletion> Engine<C> {
    /// Create an engine with the default prompt composer.
    pub fn new(client: C, config: EngineConfig) -> Self {
        Self::with_composer(client, config, PromptComposer::default())
    }

    /// Create an engine with a feature-specific prompt composer.
    pub fn with_composer(client: C, config: EngineConfig, composer: PromptComposer) -> Self {
        Self {
            client,
            config,
            composer,
        }
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The generation client this engine drives.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Generate one schema-conformant value.
    ///
    /// Returns `Err` only for configuration defects, detected before any
    /// client call. Rejections and transport failures are retried up to the
    /// attempt budget; exhaustion is reported as [`Outcome::Exhausted`].
    pub async fn generate<S: SchemaDescriptor>(
        &self,
        schema: &S,
        context: &str,
    ) -> ConformaResult<Outcome<S::Output>> {
        self.preflight(schema)?;
        Ok(self.run_session(schema, context, 1, None).await)
    }

    /// [`Engine::generate`] with a cooperative cancellation token, checked
    /// between attempts.
    pub async fn generate_with_cancel<S: SchemaDescriptor>(
        &self,
        schema: &S,
        context: &str,
        cancel: &dyn Cancellable,
    ) -> ConformaResult<Outcome<S::Output>> {
        self.preflight(schema)?;
        Ok(self.run_session(schema, context, 1, Some(cancel)).await)
    }

    /// Generate up to `count` items, batching requests at
    /// `max_items_per_call` and concatenating the items of every accepted
    /// batch.
    pub async fn generate_items<S: BatchSchema>(
        &self,
        schema: &S,
        context: &str,
        count: usize,
    ) -> ConformaResult<Harvest<S::Item>> {
        self.run_batches(schema, context, count, None).await
    }

    /// [`Engine::generate_items`] with a cooperative cancellation token,
    /// checked between attempts and between batches.
    pub async fn generate_items_with_cancel<S: BatchSchema>(
        &self,
        schema: &S,
        context: &str,
        count: usize,
        cancel: &dyn Cancellable,
    ) -> ConformaResult<Harvest<S::Item>> {
        self.run_batches(schema, context, count, Some(cancel)).await
    }

    fn preflight<S: SchemaDescriptor>(&self, schema: &S) -> ConformaResult<()> {
        self.config.validate()?;
        if schema.name().trim().is_empty() {
            return Err(ConfigError::new("schema descriptor has no name").into());
        }
        if schema.format_instructions().trim().is_empty() {
            return Err(
                ConfigError::new("schema descriptor has no formatting instructions").into(),
            );
        }
        Ok(())
    }

    async fn run_batches<S: BatchSchema>(
        &self,
        schema: &S,
        context: &str,
        count: usize,
        cancel: Option<&dyn Cancellable>,
    ) -> ConformaResult<Harvest<S::Item>> {
        self.preflight(schema)?;
        if count == 0 {
            return Err(ConfigError::new("requested item count must be positive").into());
        }

        let sizes = batch_sizes(count, *self.config.max_items_per_call());
        let batches = sizes.len();

        let mut items = Vec::with_capacity(count);
        let mut failed_batches = 0;
        let mut client_calls = 0;
        let mut cancelled = false;

        for (index, size) in sizes.into_iter().enumerate() {
            if cancel.is_some_and(|token| token.is_cancelled()) {
                info!(
                    schema = %schema.name(),
                    batch = index + 1,
                    batches,
                    "Cancellation observed; abandoning remaining batches"
                );
                cancelled = true;
                break;
            }

            info!(
                schema = %schema.name(),
                batch = index + 1,
                batches,
                size,
                "Generating batch"
            );

            match self.run_session(schema, context, size, cancel).await {
                Outcome::Accepted { value, attempts } => {
                    client_calls += attempts;
                    items.extend(S::into_items(value));
                }
                Outcome::Exhausted { attempts } => {
                    client_calls += attempts;
                    failed_batches += 1;
                    warn!(
                        schema = %schema.name(),
                        batch = index + 1,
                        batches,
                        "Batch exhausted its attempt budget; contributing nothing"
                    );
                }
                Outcome::Cancelled { attempts } => {
                    client_calls += attempts;
                    cancelled = true;
                    break;
                }
            }
        }

        Ok(Harvest {
            items,
            requested: count,
            batches,
            failed_batches,
            client_calls,
            cancelled,
        })
    }

    /// Drive one retry session for one unit of work.
    async fn run_session<S: SchemaDescriptor>(
        &self,
        schema: &S,
        context: &str,
        batch_size: usize,
        cancel: Option<&dyn Cancellable>,
    ) -> Outcome<S::Output> {
        let mut session = RetrySession::new(*self.config.policy());

        loop {
            if cancel.is_some_and(|token| token.is_cancelled()) {
                info!(schema = %schema.name(), "Cancellation observed between attempts");
                return Outcome::Cancelled {
                    attempts: session.attempts(),
                };
            }

            let attempt = session.begin_attempt();
            let sampling = self
                .config
                .cooling()
                .at(*self.config.base_sampling(), attempt - 1);
            let request = self.composer.compose(schema, context, batch_size, sampling);

            debug!(
                schema = %schema.name(),
                attempt,
                max_attempts = self.config.policy().max_attempts,
                temperature = sampling.temperature,
                top_p = sampling.top_p,
                "Dispatching generation attempt"
            );

            match self.complete_bounded(&request).await {
                Ok(raw) => match validate(schema, &raw) {
                    Ok(value) => {
                        session.record_accepted();
                        info!(schema = %schema.name(), attempt, "Output accepted");
                        return Outcome::Accepted {
                            value,
                            attempts: session.attempts(),
                        };
                    }
                    Err(rejection) => {
                        warn!(schema = %schema.name(), attempt, %rejection, "Output rejected");
                        debug!(raw = %raw.text(), "Rejected output");
                        if Self::note_failure(&mut session).await == RetryState::Exhausted {
                            return Outcome::Exhausted {
                                attempts: session.attempts(),
                            };
                        }
                    }
                },
                Err(err) => {
                    // Transport and auth failures share the validation
                    // retry budget.
                    warn!(schema = %schema.name(), attempt, %err, "Generation call failed");
                    if Self::note_failure(&mut session).await == RetryState::Exhausted {
                        return Outcome::Exhausted {
                            attempts: session.attempts(),
                        };
                    }
                }
            }
        }
    }

    /// Record a failed attempt; when budget remains, wait out the fixed
    /// interval before re-entering the attempt loop.
    async fn note_failure(session: &mut RetrySession) -> RetryState {
        let state = session.record_rejected();
        if state == RetryState::Retrying {
            debug!(wait = ?session.wait_interval(), "Waiting before next attempt");
            tokio::time::sleep(session.wait_interval()).await;
        }
        state
    }

    async fn complete_bounded(
        &self,
        request: &conforma_core::GenerateRequest,
    ) -> ConformaResult<conforma_core::RawResponse> {
        match self.config.per_call_timeout() {
            Some(limit) => match tokio::time::timeout(*limit, self.client.complete(request)).await
            {
                Ok(result) => result,
                Err(_) => Err(TransportError::timed_out(*limit).into()),
            },
            None => self.client.complete(request).await,
        }
    }
}
