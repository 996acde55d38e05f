//! Keyboard stand-in for a real armband.
//!
//! A reader thread turns words typed on stdin into device events and hands
//! them over a channel; pumping drains whatever arrived within the budget.
//! The armband comes up already synced to the right arm so that only poses
//! need typing.

use crate::error::DeviceError;
use crate::hub::{Armband, Hub};
use myoreact_core::{Arm, DeviceEvent, Pose, StreamEmg, UnlockMode, XDirection};
use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const HELP: &str = "Type a pose and press enter: \
fist (f), spread (s), rest (r), wavein (wi), waveout (wo), doubletap (dt). \
Device: left, right, unsync, lock, unlock, unpair.";

/// Parse one typed line into events. Unrecognised words are returned in `Err`.
pub fn parse_line(line: &str, timestamp: u64) -> Result<Vec<DeviceEvent>, String> {
    let mut events = Vec::new();
    for word in line.split_whitespace() {
        let event = match word.to_ascii_lowercase().as_str() {
            "f" | "fist" => DeviceEvent::Pose {
                timestamp,
                pose: Pose::Fist,
            },
            "s" | "spread" | "fingersspread" => DeviceEvent::Pose {
                timestamp,
                pose: Pose::FingersSpread,
            },
            "r" | "rest" => DeviceEvent::Pose {
                timestamp,
                pose: Pose::Rest,
            },
            "wi" | "wavein" => DeviceEvent::Pose {
                timestamp,
                pose: Pose::WaveIn,
            },
            "wo" | "waveout" => DeviceEvent::Pose {
                timestamp,
                pose: Pose::WaveOut,
            },
            "dt" | "doubletap" => DeviceEvent::Pose {
                timestamp,
                pose: Pose::DoubleTap,
            },
            "left" => DeviceEvent::ArmSync {
                timestamp,
                arm: Arm::Left,
                x_direction: XDirection::TowardWrist,
            },
            "right" => DeviceEvent::ArmSync {
                timestamp,
                arm: Arm::Right,
                x_direction: XDirection::TowardWrist,
            },
            "unsync" => DeviceEvent::ArmUnsync { timestamp },
            "lock" => DeviceEvent::Locked { timestamp },
            "unlock" => DeviceEvent::Unlocked { timestamp },
            "unpair" => DeviceEvent::Unpaired { timestamp },
            _ => return Err(word.to_string()),
        };
        events.push(event);
    }
    Ok(events)
}

/// Finds the one keyboard armband. Discovery never fails.
#[derive(Debug, Default)]
pub struct ConsoleHub;

impl ConsoleHub {
    pub fn new() -> Self {
        Self
    }
}

impl Hub for ConsoleHub {
    type Device = ConsoleArmband;

    fn wait_for_device(&mut self, _timeout: Duration) -> Result<Option<ConsoleArmband>, DeviceError> {
        let (tx, rx) = mpsc::channel();
        let epoch = Instant::now();
        thread::Builder::new()
            .name("console-armband".into())
            .spawn(move || read_stdin(tx, epoch))?;
        info!("Keyboard armband ready.");
        Ok(Some(ConsoleArmband::from_receiver(rx, epoch)))
    }
}

fn read_stdin(tx: Sender<Vec<DeviceEvent>>, epoch: Instant) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        let timestamp = epoch.elapsed().as_micros() as u64;
        match parse_line(&line, timestamp) {
            Ok(events) if events.is_empty() => {}
            Ok(events) => {
                if tx.send(events).is_err() {
                    break;
                }
            }
            Err(word) => warn!("Unrecognised input {:?}. {}", word, HELP),
        }
    }
    debug!("stdin closed, stopping keyboard armband");
}

pub struct ConsoleArmband {
    rx: Receiver<Vec<DeviceEvent>>,
    epoch: Instant,
    /// Events the armband raises itself, delivered on the next pump.
    pending: VecDeque<DeviceEvent>,
    locked: bool,
    stream_emg: StreamEmg,
}

impl ConsoleArmband {
    pub fn from_receiver(rx: Receiver<Vec<DeviceEvent>>, epoch: Instant) -> Self {
        let timestamp = epoch.elapsed().as_micros() as u64;
        let pending = VecDeque::from([
            DeviceEvent::Paired { timestamp },
            DeviceEvent::Connected { timestamp },
            DeviceEvent::ArmSync {
                timestamp,
                arm: Arm::Right,
                x_direction: XDirection::TowardWrist,
            },
        ]);
        Self {
            rx,
            epoch,
            pending,
            locked: true,
            stream_emg: StreamEmg::Disabled,
        }
    }

    fn timestamp(&self) -> u64 {
        self.epoch.elapsed().as_micros() as u64
    }

    pub fn stream_emg(&self) -> StreamEmg {
        self.stream_emg
    }
}

impl Armband for ConsoleArmband {
    fn set_stream_emg(&mut self, mode: StreamEmg) -> Result<(), DeviceError> {
        // No electrodes behind a keyboard; the flag is kept for completeness.
        self.stream_emg = mode;
        Ok(())
    }

    fn pump_events(&mut self, budget: Duration) -> Result<Vec<DeviceEvent>, DeviceError> {
        let mut events: Vec<DeviceEvent> = self.pending.drain(..).collect();
        let deadline = Instant::now() + budget;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(batch) => events.extend(batch),
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => return Err(DeviceError::Disconnected),
            }
        }
        for event in events.iter() {
            match event {
                DeviceEvent::Locked { .. } => self.locked = true,
                DeviceEvent::Unlocked { .. } => self.locked = false,
                _ => {}
            }
        }
        Ok(events)
    }

    fn unlock(&mut self, mode: UnlockMode) -> Result<(), DeviceError> {
        debug!(?mode, "unlock requested");
        if self.locked {
            self.locked = false;
            let timestamp = self.timestamp();
            self.pending.push_back(DeviceEvent::Unlocked { timestamp });
        }
        Ok(())
    }

    fn notify_user_action(&mut self) -> Result<(), DeviceError> {
        debug!("bzzt");
        Ok(())
    }
}
