use crate::checks::Violation;
use std::fmt;

/// How one scenario ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    /// The scenario's expectation does not hold.
    Fail(Violation),
    /// The service accepted a request the scenario expected it to reject.
    /// Anomalies are reported but do not fail the run.
    Anomaly(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioResult {
    pub name: String,
    pub outcome: Outcome,
}

/// Collected outcomes of one conformance run. Scenarios are independent,
/// so the report always covers the full set.
#[derive(Debug, Default)]
pub struct Report {
    results: Vec<ScenarioResult>,
}

impl Report {
    pub(crate) fn record<N: Into<String>>(&mut self, name: N, outcome: Outcome) {
        let name = name.into();
        match &outcome {
            Outcome::Pass => log::debug!("{}: pass", name),
            Outcome::Fail(violation) => log::error!("{}: {}", name, violation),
            Outcome::Anomaly(reason) => log::warn!("{}: anomaly: {}", name, reason),
        }
        self.results.push(ScenarioResult { name, outcome });
    }

    pub fn results(&self) -> &[ScenarioResult] {
        &self.results
    }

    pub fn outcome_of(&self, name: &str) -> Option<&Outcome> {
        self.results
            .iter()
            .find(|result| result.name == name)
            .map(|result| &result.outcome)
    }

    pub fn passed(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Pass))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Fail(_)))
    }

    pub fn anomalies(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Anomaly(_)))
    }

    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.results.iter().filter_map(|result| match &result.outcome {
            Outcome::Fail(violation) => Some(violation),
            _ => None,
        })
    }

    /// True when no scenario failed. Anomalies do not count against
    /// conformance, they only show up in the summary.
    pub fn is_conformant(&self) -> bool {
        self.failed() == 0
    }

    fn count<P: Fn(&Outcome) -> bool>(&self, predicate: P) -> usize {
        self.results
            .iter()
            .filter(|result| predicate(&result.outcome))
            .count()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} scenarios: {} passed, {} failed, {} anomalies",
            self.results.len(),
            self.passed(),
            self.failed(),
            self.anomalies()
        )?;
        for result in &self.results {
            match &result.outcome {
                Outcome::Pass => {}
                Outcome::Fail(violation) => writeln!(f, "  FAIL {}: {}", result.name, violation)?,
                Outcome::Anomaly(reason) => {
                    writeln!(f, "  ANOMALY {}: {}", result.name, reason)?
                }
            }
        }
        Ok(())
    }
}
