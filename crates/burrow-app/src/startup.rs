//! Ordered start-up stages.
//!
//! Each stage must be started and completed in order. Completing a stage
//! that is not the current one is a logic error and aborts start-up.

use std::fmt;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupStage {
    SceneSetup,
    ComponentRegistration,
    AssetLoading,
    AudioSetup,
    GameInitialization,
}

impl StartupStage {
    pub const ALL: [StartupStage; 5] = [
        StartupStage::SceneSetup,
        StartupStage::ComponentRegistration,
        StartupStage::AssetLoading,
        StartupStage::AudioSetup,
        StartupStage::GameInitialization,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StartupStage::SceneSetup => "scene-setup",
            StartupStage::ComponentRegistration => "component-registration",
            StartupStage::AssetLoading => "asset-loading",
            StartupStage::AudioSetup => "audio-setup",
            StartupStage::GameInitialization => "game-initialization",
        }
    }
}

impl fmt::Display for StartupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StartupError {
    #[error("cannot start {stage} while {current} is in progress")]
    StageInProgress {
        stage: StartupStage,
        current: StartupStage,
    },
    #[error("cannot start {stage}, expected {expected}")]
    OutOfOrder {
        stage: StartupStage,
        expected: StartupStage,
    },
    #[error("completing wrong stage: {stage}, current: {}", .current.map_or("none", StartupStage::name))]
    WrongStage {
        stage: StartupStage,
        current: Option<StartupStage>,
    },
    #[error("start-up already finished")]
    Finished,
}

/// Tracks progress through the start-up stages.
#[derive(Debug, Default)]
pub struct StartupTracker {
    current: Option<(StartupStage, Instant)>,
    completed: Vec<(StartupStage, Duration)>,
}

impl StartupTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<StartupStage> {
        self.current.map(|(stage, _)| stage)
    }

    pub fn completed(&self) -> &[(StartupStage, Duration)] {
        &self.completed
    }

    pub fn is_finished(&self) -> bool {
        self.completed.len() == StartupStage::ALL.len()
    }

    pub fn begin(&mut self, stage: StartupStage) -> Result<(), StartupError> {
        if let Some((current, _)) = self.current {
            return Err(StartupError::StageInProgress { stage, current });
        }
        let expected = *StartupStage::ALL
            .get(self.completed.len())
            .ok_or(StartupError::Finished)?;
        if stage != expected {
            return Err(StartupError::OutOfOrder { stage, expected });
        }
        info!(stage = %stage, "stage started");
        self.current = Some((stage, Instant::now()));
        Ok(())
    }

    pub fn complete(&mut self, stage: StartupStage) -> Result<Duration, StartupError> {
        match self.current {
            Some((current, started)) if current == stage => {
                let took = started.elapsed();
                info!(stage = %stage, took_ms = took.as_millis() as u64, "stage complete");
                self.completed.push((stage, took));
                self.current = None;
                Ok(took)
            }
            other => Err(StartupError::WrongStage {
                stage,
                current: other.map(|(s, _)| s),
            }),
        }
    }

    /// Run `body` as `stage`. Errors from the body are tagged with the stage.
    pub fn run<T>(
        &mut self,
        stage: StartupStage,
        body: impl FnOnce() -> anyhow::Result<T>,
    ) -> anyhow::Result<T> {
        self.begin(stage)?;
        let value = body().map_err(|err| err.context(format!("start-up stage {stage} failed")))?;
        self.complete(stage)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_run_in_order() {
        let mut tracker = StartupTracker::new();
        for stage in StartupStage::ALL {
            tracker.begin(stage).unwrap();
            assert_eq!(tracker.current(), Some(stage));
            tracker.complete(stage).unwrap();
        }
        assert!(tracker.is_finished());
        assert_eq!(tracker.begin(StartupStage::SceneSetup), Err(StartupError::Finished));
    }

    #[test]
    fn test_completing_wrong_stage_fails() {
        let mut tracker = StartupTracker::new();
        tracker.begin(StartupStage::SceneSetup).unwrap();
        let err = tracker.complete(StartupStage::AudioSetup).unwrap_err();
        assert_eq!(
            err.to_string(),
            "completing wrong stage: audio-setup, current: scene-setup"
        );

        let mut idle = StartupTracker::new();
        let err = idle.complete(StartupStage::SceneSetup).unwrap_err();
        assert!(err.to_string().ends_with("current: none"));
    }

    #[test]
    fn test_out_of_order_and_overlap_rejected() {
        let mut tracker = StartupTracker::new();
        assert!(matches!(
            tracker.begin(StartupStage::AssetLoading),
            Err(StartupError::OutOfOrder { .. })
        ));
        tracker.begin(StartupStage::SceneSetup).unwrap();
        assert!(matches!(
            tracker.begin(StartupStage::ComponentRegistration),
            Err(StartupError::StageInProgress { .. })
        ));
    }

    #[test]
    fn test_run_tags_errors_with_stage() {
        let mut tracker = StartupTracker::new();
        let value = tracker.run(StartupStage::SceneSetup, || Ok(3)).unwrap();
        assert_eq!(value, 3);

        let err = tracker
            .run(
                StartupStage::ComponentRegistration,
                || -> anyhow::Result<()> { anyhow::bail!("registry unavailable") },
            )
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "start-up stage component-registration failed"
        );
        assert_eq!(err.root_cause().to_string(), "registry unavailable");
    }
}
