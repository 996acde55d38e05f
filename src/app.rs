use anyhow::{Context, Result};
use myoreact_core::Leg;
use myoreact_device::Hub;
use myoreact_experiment::{DeviceSession, ExperimentConfig, TrialReport, TrialTimer};
use myoreact_timing::Timer;
use std::io::Write;
use tracing::{debug, info};

#[cfg(not(feature = "simulated-participant"))]
pub type DefaultHub = myoreact_device::ConsoleHub;

#[cfg(feature = "simulated-participant")]
pub type DefaultHub =
    myoreact_device::SimulatedHub<myoreact_timing::HighPrecisionTimer, rand::rngs::ThreadRng>;

#[cfg(not(feature = "simulated-participant"))]
fn default_hub(_timer: &myoreact_timing::HighPrecisionTimer) -> DefaultHub {
    myoreact_device::ConsoleHub::new()
}

#[cfg(feature = "simulated-participant")]
fn default_hub(timer: &myoreact_timing::HighPrecisionTimer) -> DefaultHub {
    myoreact_device::SimulatedHub::new(timer.clone(), rand::rng())
}

/// One reaction-time session: find the armband, then arm, measure and report.
pub struct App<H, T, W>
where
    H: Hub,
    T: Timer<Timestamp = u64>,
    W: Write,
{
    hub: H,
    timer: T,
    config: ExperimentConfig,
    out: W,
}

impl App<DefaultHub, myoreact_timing::HighPrecisionTimer, std::io::Stdout> {
    pub fn new() -> Self {
        let timer = myoreact_timing::HighPrecisionTimer::new();
        let hub = default_hub(&timer);
        Self::with_parts(hub, timer, ExperimentConfig::default(), std::io::stdout())
    }
}

impl<H, T, W> App<H, T, W>
where
    H: Hub,
    T: Timer<Timestamp = u64>,
    W: Write,
{
    pub fn with_parts(hub: H, timer: T, config: ExperimentConfig, out: W) -> Self {
        Self {
            hub,
            timer,
            config,
            out,
        }
    }

    #[tracing::instrument(skip_all)]
    pub fn run(mut self) -> Result<(TrialReport, W)> {
        writeln!(self.out, "=== MYOREACT REACTION TIMER ===")?;
        writeln!(self.out, "Attempting to find an armband...")?;
        self.out.flush()?;

        let armband = self
            .hub
            .find_device(self.config.discovery_timeout())
            .context("armband discovery failed")?;
        writeln!(self.out, "Connected to an armband!\n")?;
        #[cfg(not(feature = "simulated-participant"))]
        writeln!(self.out, "{}\n", myoreact_device::console::HELP)?;

        let mut session = DeviceSession::open(armband).context("could not enable EMG streaming")?;
        let mut trials = TrialTimer::new(self.config, self.timer, self.out);
        let report = trials.run(&mut session).context("reaction-time run aborted")?;

        info!(
            spread_mean_ms = report.mean_ms(Leg::Spread),
            fist_mean_ms = report.mean_ms(Leg::Fist),
            "finished"
        );
        debug!(report = %report.to_json()?, "results");

        Ok((report, trials.into_output()))
    }
}

impl Default for App<DefaultHub, myoreact_timing::HighPrecisionTimer, std::io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}
