use crate::texts::{TEXT_MIDDLE, TEXT_NEGATIVE, TEXT_POSITIVE};
use crate::types::{PourResult, WatchConfig};
use log::{debug, info};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Positive,
    Middle,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    pub tier: Tier,
    pub text: String,
}

/// Maps accumulated results to a recommendation tier and picks a line from
/// the tier's text table.
///
/// Thresholds come from `WatchConfig`, not from this component: a fast
/// average lands in the positive tier, a slow one in the negative, and
/// enough completed rounds overrides pace entirely.
pub struct PaceAdvisor {
    fast_avg_ms: f64,
    slow_avg_ms: f64,
    max_rounds: usize,
}

impl PaceAdvisor {
    pub fn new(config: &WatchConfig) -> Self {
        Self {
            fast_avg_ms: config.fast_avg_ms,
            slow_avg_ms: config.slow_avg_ms,
            max_rounds: config.max_rounds,
        }
    }

    /// Select a tier from the aggregated results. The most recent average
    /// decides, except that `max_rounds` completed rounds always means
    /// stop.
    pub fn assess(&self, results: &[PourResult]) -> Tier {
        if results.len() >= self.max_rounds {
            debug!("{} rounds completed, forcing negative tier", results.len());
            return Tier::Negative;
        }

        let Some(latest) = results.last() else {
            return Tier::Positive;
        };

        if latest.avg <= self.fast_avg_ms {
            Tier::Positive
        } else if latest.avg <= self.slow_avg_ms {
            Tier::Middle
        } else {
            Tier::Negative
        }
    }

    pub fn advise(&self, results: &[PourResult]) -> Advice {
        let tier = self.assess(results);
        let text = pick(table_for(tier)).to_string();
        info!("Advice ({:?}): {}", tier, text);
        Advice { tier, text }
    }
}

fn table_for(tier: Tier) -> &'static [&'static str] {
    match tier {
        Tier::Positive => TEXT_POSITIVE,
        Tier::Middle => TEXT_MIDDLE,
        Tier::Negative => TEXT_NEGATIVE,
    }
}

// Tables are non-empty constants, so the index is always in range.
fn pick(table: &'static [&'static str]) -> &'static str {
    let index = (rand::random::<f64>() * table.len() as f64) as usize;
    table[index.min(table.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_avg(avg: f64) -> PourResult {
        PourResult {
            created: 0,
            times: vec![0, avg as i64],
            avg,
            errors: 0,
            ingested: 1,
        }
    }

    fn advisor() -> PaceAdvisor {
        PaceAdvisor::new(&WatchConfig::default())
    }

    #[test]
    fn test_no_results_is_positive() {
        assert_eq!(advisor().assess(&[]), Tier::Positive);
    }

    #[test]
    fn test_tier_thresholds() {
        let a = advisor();
        let config = WatchConfig::default();

        assert_eq!(a.assess(&[result_with_avg(1_000.0)]), Tier::Positive);
        assert_eq!(a.assess(&[result_with_avg(config.fast_avg_ms)]), Tier::Positive);
        assert_eq!(
            a.assess(&[result_with_avg(config.fast_avg_ms + 1.0)]),
            Tier::Middle
        );
        assert_eq!(a.assess(&[result_with_avg(config.slow_avg_ms)]), Tier::Middle);
        assert_eq!(
            a.assess(&[result_with_avg(config.slow_avg_ms + 1.0)]),
            Tier::Negative
        );
    }

    #[test]
    fn test_latest_result_decides() {
        let a = advisor();
        let results = vec![result_with_avg(10_000.0), result_with_avg(1_000.0)];
        assert_eq!(a.assess(&results), Tier::Positive);
    }

    #[test]
    fn test_max_rounds_forces_negative() {
        let a = advisor();
        let results: Vec<_> = (0..WatchConfig::default().max_rounds)
            .map(|_| result_with_avg(1_000.0))
            .collect();
        assert_eq!(a.assess(&results), Tier::Negative);
    }

    #[test]
    fn test_advice_text_comes_from_tier_table() {
        let a = advisor();
        for _ in 0..20 {
            let advice = a.advise(&[result_with_avg(1_000.0)]);
            assert_eq!(advice.tier, Tier::Positive);
            assert!(TEXT_POSITIVE.contains(&advice.text.as_str()));
        }
    }
}
