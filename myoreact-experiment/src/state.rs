use super::config::ExperimentConfig;
use super::error::ExperimentError;
use super::report::TrialReport;
use super::session::EventSource;
use super::tracker::PoseStateTracker;
use myoreact_core::{GestureCode, Leg, Phase, TrialRecord};
use myoreact_timing::Timer;
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info, trace};

/// Runs the reaction-time protocol: wait for a fist, then time
/// spread / fist legs for every trial, then report.
///
/// A poll is one bounded pump of the event source followed by a gesture
/// query. Poll loops have no timeout: they end on the target gesture or on
/// an error from the event source.
pub struct TrialTimer<T, W>
where
    T: Timer<Timestamp = u64>,
    W: Write,
{
    pub phase: Phase,
    pub timer: T,
    pub config: ExperimentConfig,
    pub tracker: PoseStateTracker,
    records: Vec<TrialRecord>,
    polls: u64,
    out: W,
}

impl<T, W> TrialTimer<T, W>
where
    T: Timer<Timestamp = u64>,
    W: Write,
{
    pub fn new(config: ExperimentConfig, timer: T, out: W) -> Self {
        let records = Vec::with_capacity(config.expected_records());
        Self {
            phase: Phase::default(),
            timer,
            config,
            tracker: PoseStateTracker::new(),
            records,
            polls: 0,
            out,
        }
    }

    pub fn advance_phase(&mut self) -> bool {
        if let Some(next) = self.phase.next() {
            debug!(from = ?self.phase, to = ?next, "phase change");
            self.phase = next;
            true
        } else {
            false
        }
    }

    fn expect_phase(&self, expected: Phase, action: &'static str) -> Result<(), ExperimentError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(ExperimentError::WrongPhase {
                action,
                phase: self.phase,
            })
        }
    }

    /// Pump once, then read the tracker.
    fn poll<S: EventSource>(&mut self, source: &mut S) -> Result<GestureCode, ExperimentError> {
        let started = self.timer.now();
        let applied = source.pump(&mut self.tracker, self.config.tick_interval())?;
        let took = self.timer.elapsed(started);
        self.timer.record_tick(took);
        self.polls += 1;
        trace!(applied, status = %self.tracker.snapshot(), "tick");
        Ok(self.tracker.query_gesture())
    }

    /// Poll until `target` shows up. Returns the number of polls it took.
    pub fn wait_for<S: EventSource>(
        &mut self,
        source: &mut S,
        target: GestureCode,
    ) -> Result<u64, ExperimentError> {
        let mut polls = 0;
        loop {
            polls += 1;
            if self.poll(source)? == target {
                return Ok(polls);
            }
        }
    }

    /// Block until the participant makes a fist, then move to measuring.
    #[tracing::instrument(skip_all)]
    pub fn arm<S: EventSource>(&mut self, source: &mut S) -> Result<(), ExperimentError> {
        self.expect_phase(Phase::Arming, "arm")?;
        writeln!(self.out, "Make a fist to begin.")?;
        self.out.flush()?;

        let polls = self.wait_for(source, GestureCode::Fist)?;
        info!(polls, "ready");
        self.advance_phase();
        Ok(())
    }

    /// Time one leg and append its record.
    pub fn measure_leg<S: EventSource>(
        &mut self,
        source: &mut S,
        trial: usize,
        leg: Leg,
    ) -> Result<TrialRecord, ExperimentError> {
        self.expect_phase(Phase::Measuring, "measure")?;
        let prompt = match leg {
            Leg::Spread => "spread your fingers!",
            Leg::Fist => "make a fist!",
        };
        writeln!(
            self.out,
            "Trial {}/{}: {}",
            trial + 1,
            self.config.trial_count,
            prompt
        )?;
        self.out.flush()?;

        let start = self.timer.now();
        let polls = self.wait_for(source, leg.target())?;
        let elapsed = self.timer.elapsed(start);

        let record = TrialRecord {
            trial_index: self.records.len(),
            leg,
            elapsed_ms: elapsed.as_millis() as u64,
        };
        info!(
            trial = trial + 1,
            ?leg,
            polls,
            elapsed_ms = record.elapsed_ms,
            "leg complete"
        );
        self.records.push(record.clone());
        Ok(record)
    }

    /// Run every trial, then move to reporting.
    #[tracing::instrument(skip_all, fields(trials = self.config.trial_count))]
    pub fn measure<S: EventSource>(&mut self, source: &mut S) -> Result<(), ExperimentError> {
        for trial in 0..self.config.trial_count {
            for leg in Leg::ORDER {
                self.measure_leg(source, trial, leg)?;
            }
        }
        self.advance_phase();
        Ok(())
    }

    /// Write the report. Only valid once measuring is over.
    pub fn report(&mut self) -> Result<TrialReport, ExperimentError> {
        self.expect_phase(Phase::Reporting, "report")?;
        let report = TrialReport::new(self.records.clone());
        report.render(&mut self.out)?;

        let cadence = self.timer.cadence_stats();
        debug!(
            polls = self.polls,
            avg_tick_ms = cadence.average_tick_ns / 1_000_000.0,
            jitter_ms = cadence.jitter_ns / 1_000_000.0,
            rate_hz = cadence.effective_hz,
            "poll cadence"
        );
        Ok(report)
    }

    /// Arming, measuring and reporting, in order.
    pub fn run<S: EventSource>(&mut self, source: &mut S) -> Result<TrialReport, ExperimentError> {
        self.arm(source)?;
        self.measure(source)?;
        self.report()
    }

    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    pub fn polls(&self) -> u64 {
        self.polls
    }

    pub fn tick(&self) -> Duration {
        self.config.tick_interval()
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::DeviceSession;
    use myoreact_core::{Arm, DeviceEvent, Pose, XDirection};
    use myoreact_device::{DeviceError, ScriptStep, ScriptedArmband};
    use myoreact_timing::ManualTimer;

    fn sync_and(pose: Pose) -> Vec<DeviceEvent> {
        vec![
            DeviceEvent::ArmSync {
                timestamp: 0,
                arm: Arm::Right,
                x_direction: XDirection::TowardWrist,
            },
            DeviceEvent::Pose { timestamp: 0, pose },
        ]
    }

    fn pose(pose: Pose) -> Vec<DeviceEvent> {
        vec![DeviceEvent::Pose { timestamp: 0, pose }]
    }

    fn timer_for(
        clock: &ManualTimer,
        steps: Vec<ScriptStep>,
    ) -> (TrialTimer<ManualTimer, Vec<u8>>, DeviceSession<ScriptedArmband>) {
        let armband = ScriptedArmband::new(clock.clone(), steps);
        let session = DeviceSession::open(armband).expect("scripted open");
        let timer = TrialTimer::new(ExperimentConfig::default(), clock.clone(), Vec::<u8>::new());
        (timer, session)
    }

    #[test]
    fn test_arming_needs_a_synced_fist() {
        let clock = ManualTimer::new();
        let tick = Duration::from_millis(50);
        let (mut timer, mut session) = timer_for(
            &clock,
            vec![
                ScriptStep::after(tick, pose(Pose::Fist)),
                ScriptStep::after(tick, sync_and(Pose::Rest)),
                ScriptStep::after(tick, pose(Pose::Fist)),
            ],
        );

        timer.arm(&mut session).expect("scripted arming");
        assert_eq!(session.armband().pumps(), 3);
        assert_eq!(timer.phase, Phase::Measuring);
        assert!(timer.records().is_empty());
    }

    #[test]
    fn test_immediate_match_still_costs_a_poll() {
        let clock = ManualTimer::new();
        let (mut timer, mut session) = timer_for(
            &clock,
            vec![ScriptStep::immediate(sync_and(Pose::FingersSpread))],
        );
        timer.phase = Phase::Measuring;
        let record = timer
            .measure_leg(&mut session, 0, Leg::Spread)
            .expect("scripted leg");
        assert_eq!(record.elapsed_ms, 0);
        assert_eq!(timer.polls(), 1);

        let record = timer
            .measure_leg(&mut session, 0, Leg::Spread)
            .expect("already spread");
        assert_eq!(record.elapsed_ms, 50);
        assert_eq!(record.trial_index, 1);
        assert_eq!(timer.polls(), 2);
    }

    #[test]
    fn test_poll_loop_has_no_timeout() {
        let clock = ManualTimer::new();
        let armband = ScriptedArmband::new(
            clock.clone(),
            vec![ScriptStep::immediate(sync_and(Pose::Rest))],
        )
        .halt_after(1000);
        let mut session = DeviceSession::open(armband).expect("scripted open");
        let mut timer = TrialTimer::new(ExperimentConfig::default(), clock.clone(), Vec::<u8>::new());

        let err = timer.arm(&mut session).expect_err("harness stops the loop");
        assert!(matches!(
            err,
            ExperimentError::Device(DeviceError::Disconnected)
        ));
        assert_eq!(session.armband().pumps(), 1000);
        assert_eq!(timer.polls(), 1000);
        assert_eq!(timer.phase, Phase::Arming);
        assert_eq!(clock.now(), 999 * 50_000_000);
    }

    #[test]
    fn test_phase_guards() {
        let clock = ManualTimer::new();
        let (mut timer, mut session) = timer_for(&clock, Vec::new());

        let err = timer
            .measure_leg(&mut session, 0, Leg::Spread)
            .expect_err("not armed yet");
        assert!(matches!(
            err,
            ExperimentError::WrongPhase {
                phase: Phase::Arming,
                ..
            }
        ));
        assert!(timer.report().is_err());
        assert_eq!(session.armband().pumps(), 0);
    }

    #[test]
    fn test_prompts_are_written() {
        let clock = ManualTimer::new();
        let (mut timer, mut session) = timer_for(
            &clock,
            vec![
                ScriptStep::immediate(sync_and(Pose::Fist)),
                ScriptStep::immediate(pose(Pose::FingersSpread)),
            ],
        );
        timer.arm(&mut session).expect("scripted arming");
        timer
            .measure_leg(&mut session, 0, Leg::Spread)
            .expect("scripted leg");

        let text = String::from_utf8(timer.output().clone()).expect("utf8");
        assert_eq!(
            text,
            "Make a fist to begin.\nTrial 1/3: spread your fingers!\n"
        );
    }
}
