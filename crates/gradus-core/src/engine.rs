//! The milestone progression engine.
//!
//! The engine owns the explicit [`Session`] value and is the only place
//! session state mutates. It mediates the two external collaborators: the
//! completion service (exercise generation and evaluation) and the
//! playground sink (the workspace file).

use crate::artifact::PlaygroundSink;
use crate::completion::{CompletionService, SamplingParams};
use crate::error::{GradusError, Result};
use crate::language::Language;
use crate::prompt::{self, Verdict};
use crate::session::Session;
use std::path::PathBuf;

/// Where the engine currently stands in the progression loop.
///
/// `GeneratingMilestone` is also the parking state after a failed
/// generation: nothing was mutated, the user re-triggers via
/// [`ProgressionEngine::generate_milestone`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    AwaitingGoal,
    GeneratingMilestone,
    AwaitingSolution,
}

/// A freshly generated milestone, written to the workspace.
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneReady {
    /// 1-based index of the milestone that was written.
    pub index: u32,
    /// Full path of the playground artifact.
    pub path: PathBuf,
}

/// Result of running the evaluation transition.
#[derive(Debug)]
pub enum EvaluationOutcome {
    /// The verdict was not a strict `PASS`. The index is unchanged and the
    /// engine returns to awaiting a solution; the user edits the same file
    /// and re-submits.
    Rejected,
    /// Strict `PASS`: the index advanced by one and the next milestone was
    /// generated and written.
    Advanced(MilestoneReady),
    /// Strict `PASS` and the index advanced, but generating the next
    /// milestone failed. The engine stays in `GeneratingMilestone`;
    /// re-trigger with [`ProgressionEngine::generate_milestone`].
    AdvancedPendingGeneration { next_index: u32, error: GradusError },
}

/// Sequential controller for one learning session.
///
/// Suspend-at-I/O, one in-flight external call at a time: every method takes
/// `&mut self`, so no two operations can overlap within a session.
pub struct ProgressionEngine<C, S> {
    completion: C,
    sink: S,
    phase: Phase,
    session: Option<Session>,
    generation_params: SamplingParams,
}

impl<C: CompletionService, S: PlaygroundSink> ProgressionEngine<C, S> {
    /// Creates an engine with no session. The completion service is taken
    /// by value: it is only constructible after config validation, so its
    /// absence is unrepresentable here.
    pub fn new(completion: C, sink: S) -> Self {
        Self {
            completion,
            sink,
            phase: Phase::Uninitialized,
            session: None,
            generation_params: SamplingParams::generation(),
        }
    }

    /// Overrides the sampling parameters used for milestone generation.
    /// Evaluation always stays deterministic.
    pub fn with_generation_params(mut self, params: SamplingParams) -> Self {
        self.generation_params = params;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Starts (or restarts) a learning path: discards any prior session and
    /// awaits a goal. A subsequent goal always begins at milestone 1.
    pub fn start(&mut self) {
        self.session = None;
        self.phase = Phase::AwaitingGoal;
    }

    /// Supplies the learning goal, fixing topic and language for the
    /// session's lifetime, and generates the first milestone.
    ///
    /// When no language is given explicitly, one is inferred from the goal
    /// text, falling back to [`Language::DEFAULT`].
    pub async fn supply_goal(
        &mut self,
        topic: &str,
        language: Option<Language>,
    ) -> Result<MilestoneReady> {
        if self.phase != Phase::AwaitingGoal {
            return Err(GradusError::internal(
                "no session is awaiting a learning goal",
            ));
        }

        let topic = topic.trim();
        if topic.is_empty() {
            return Err(GradusError::internal("the learning goal must not be empty"));
        }

        let language = language
            .or_else(|| Language::infer(topic))
            .unwrap_or(Language::DEFAULT);

        tracing::info!(%language, topic, "starting learning session");

        self.session = Some(Session::new(topic, language));
        self.phase = Phase::GeneratingMilestone;
        self.generate_milestone().await
    }

    /// Generates the session's current milestone and replaces the
    /// playground artifact with its commented text.
    ///
    /// On failure nothing is mutated: the engine stays parked in
    /// `GeneratingMilestone` and the caller surfaces the error. There is no
    /// automatic retry.
    pub async fn generate_milestone(&mut self) -> Result<MilestoneReady> {
        if self.phase != Phase::GeneratingMilestone {
            return Err(GradusError::internal("no milestone generation is pending"));
        }
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| GradusError::internal("generation requested without a session"))?;

        let messages = prompt::build_milestone_messages(session)?;
        let text = self
            .completion
            .complete(&messages, &self.generation_params)
            .await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(GradusError::EmptyResponse);
        }

        let body = prompt::comment_out(text, session.language().comment_token());
        let path = self
            .sink
            .replace_artifact(&session.playground_file_name(), &body)?;

        tracing::info!(
            index = session.milestone_index(),
            path = %path.display(),
            "milestone written"
        );

        let ready = MilestoneReady {
            index: session.milestone_index(),
            path,
        };
        self.phase = Phase::AwaitingSolution;
        Ok(ready)
    }

    /// Reads the current artifact back as the submission and asks the
    /// completion service for a strict pass/fail verdict.
    ///
    /// A service failure during evaluation is an error (the caller surfaces
    /// it); the index never advances in that case.
    pub async fn evaluate(&mut self) -> Result<EvaluationOutcome> {
        if self.phase != Phase::AwaitingSolution {
            return Err(GradusError::internal("no solution is awaited"));
        }
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| GradusError::internal("evaluation requested without a session"))?;

        let submission = self.sink.read_submission(&session.playground_file_name())?;
        let messages = prompt::build_evaluation_messages(&submission)?;
        let response = self
            .completion
            .complete(&messages, &SamplingParams::deterministic())
            .await?;

        match Verdict::from_response(&response) {
            Verdict::Fail => {
                tracing::info!(
                    index = session.milestone_index(),
                    "solution rejected, awaiting a new attempt"
                );
                Ok(EvaluationOutcome::Rejected)
            }
            Verdict::Pass => {
                let session = self
                    .session
                    .as_mut()
                    .ok_or_else(|| GradusError::internal("session vanished mid-evaluation"))?;
                session.advance();
                let next_index = session.milestone_index();
                tracing::info!(next_index, "solution accepted, advancing");

                self.phase = Phase::GeneratingMilestone;
                match self.generate_milestone().await {
                    Ok(ready) => Ok(EvaluationOutcome::Advanced(ready)),
                    Err(error) => Ok(EvaluationOutcome::AdvancedPendingGeneration {
                        next_index,
                        error,
                    }),
                }
            }
        }
    }
}
