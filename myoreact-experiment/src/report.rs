use myoreact_core::{Leg, TrialRecord};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

pub const CLOSING_LINE: &str = "Done.";

/// Every measured leg, in the order it was run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialReport {
    pub records: Vec<TrialRecord>,
}

impl TrialReport {
    pub fn new(records: Vec<TrialRecord>) -> Self {
        Self { records }
    }

    /// `<n> elapsed: <seconds> s` per record, numbered from 1, then the closing line.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (i, record) in self.records.iter().enumerate() {
            writeln!(out, "{} elapsed: {:.3} s", i + 1, record.seconds())?;
        }
        writeln!(out, "{}", CLOSING_LINE)?;
        out.flush()
    }

    pub fn mean_ms(&self, leg: Leg) -> Option<f64> {
        let times: Vec<u64> = self
            .records
            .iter()
            .filter(|r| r.leg == leg)
            .map(|r| r.elapsed_ms)
            .collect();
        if times.is_empty() {
            return None;
        }
        Some(times.iter().sum::<u64>() as f64 / times.len() as f64)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> TrialReport {
        TrialReport::new(vec![
            TrialRecord {
                trial_index: 0,
                leg: Leg::Spread,
                elapsed_ms: 1250,
            },
            TrialRecord {
                trial_index: 1,
                leg: Leg::Fist,
                elapsed_ms: 80,
            },
            TrialRecord {
                trial_index: 2,
                leg: Leg::Spread,
                elapsed_ms: 750,
            },
        ])
    }

    #[test]
    fn test_render() {
        let mut out = Vec::new();
        report().render(&mut out).expect("writing to a Vec");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(
            text,
            "1 elapsed: 1.250 s\n2 elapsed: 0.080 s\n3 elapsed: 0.750 s\nDone.\n"
        );
    }

    #[test]
    fn test_render_empty() {
        let mut out = Vec::new();
        TrialReport::new(Vec::new())
            .render(&mut out)
            .expect("writing to a Vec");
        assert_eq!(out, b"Done.\n");
    }

    #[test]
    fn test_mean_per_leg() {
        let report = report();
        assert_eq!(report.mean_ms(Leg::Spread), Some(1000.0));
        assert_eq!(report.mean_ms(Leg::Fist), Some(80.0));
        assert_eq!(TrialReport::new(Vec::new()).mean_ms(Leg::Fist), None);
    }

    #[test]
    fn test_json() {
        let json = report().to_json().expect("serialize");
        let back: TrialReport = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, report());
        assert!(json.contains("\"leg\":\"Spread\""));
    }
}
