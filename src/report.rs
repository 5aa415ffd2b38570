//// # Multi-estimate report
////
//// One PERT-Beta distribution per estimated task, and a total row where
//// the means add up and the standard deviations combine as independent
//// variables, i.e. `sqrt(sum(sigma^2))`.

use crate::distribution::BetaDistribution;
use crate::errors::Result;
use crate::kernel::BetaKernel;
use crate::load::EstimateRecord;
use crate::types::{BetaShapeParams, ThreePointEstimate};
use std::fmt::Display;

pub const TOTAL_IDENTIFIER: &str = "ACCU";

const HEADER: [&str; 10] = [
    "ident", "opt", "likly", "pess", "alpha", "beta", "mean", "sigma", "mu+sig", "mu+2*sig",
];

#[derive(Clone, Debug, PartialEq)]
pub struct ReportRow {
    pub identifier: String,
    pub a: f64,
    pub m: f64,
    pub b: f64,
    /// Absent on the total row
    pub shape: Option<BetaShapeParams>,
    pub mean: f64,
    pub sigma: f64,
    pub mean_plus_1sigma: f64,
    pub mean_plus_2sigma: f64,
}

impl ReportRow {
    fn new(
        identifier: String,
        a: f64,
        m: f64,
        b: f64,
        shape: Option<BetaShapeParams>,
        mean: f64,
        sigma: f64,
    ) -> Self {
        Self {
            identifier,
            a,
            m,
            b,
            shape,
            mean,
            sigma,
            mean_plus_1sigma: mean + sigma,
            mean_plus_2sigma: mean + 2.0 * sigma,
        }
    }

    fn cells(&self) -> Vec<String> {
        let (alpha, beta) = match self.shape {
            Some(s) => (format!("{:.3}", s.alpha), format!("{:.3}", s.beta)),
            None => (String::new(), String::new()),
        };
        vec![
            self.identifier.clone(),
            format!("{:.0}", self.a),
            format!("{:.0}", self.m),
            format!("{:.0}", self.b),
            alpha,
            beta,
            format!("{:.2}", self.mean),
            format!("{:.2}", self.sigma),
            format!("{:.1}", self.mean_plus_1sigma),
            format!("{:.1}", self.mean_plus_2sigma),
        ]
    }
}

struct Entry {
    identifier: String,
    estimate: ThreePointEstimate,
    dist: BetaDistribution,
}

/// Estimates keyed by identifier, in insertion order. All the
/// distributions share one kernel.
#[derive(Default)]
pub struct MultiEstimate {
    kernel: BetaKernel,
    entries: Vec<Entry>,
}

impl MultiEstimate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<I: IntoIterator<Item = EstimateRecord>>(records: I) -> Result<Self> {
        let mut report = Self::new();
        for record in records {
            report.push(record.identifier, record.estimate)?;
        }
        Ok(report)
    }

    /// Adds an estimate, replacing any previous one with the same identifier.
    pub fn push(&mut self, identifier: String, estimate: ThreePointEstimate) -> Result<()> {
        let dist = BetaDistribution::from_estimate(&estimate)?.with_kernel(self.kernel.clone());
        let entry = Entry {
            identifier,
            estimate,
            dist,
        };
        match self
            .entries
            .iter_mut()
            .find(|e| e.identifier == entry.identifier)
        {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn distribution(&self, identifier: &str) -> Option<&BetaDistribution> {
        self.entries
            .iter()
            .find(|e| e.identifier == identifier)
            .map(|e| &e.dist)
    }

    pub fn rows(&self) -> impl Iterator<Item = ReportRow> + '_ {
        self.entries.iter().map(|e| {
            let est = e.estimate;
            ReportRow::new(
                e.identifier.clone(),
                est.optimistic,
                est.nominal,
                est.pessimistic,
                Some(e.dist.shape()),
                // the nominal value is always known here
                e.dist.mean().unwrap_or_else(|| e.dist.beta_mean()),
                e.dist.sigma(),
            )
        })
    }

    pub fn total(&self) -> ReportRow {
        let rows: Vec<ReportRow> = self.rows().collect();
        let sum = |f: fn(&ReportRow) -> f64| rows.iter().map(f).sum::<f64>();
        ReportRow::new(
            TOTAL_IDENTIFIER.to_owned(),
            sum(|r| r.a),
            sum(|r| r.m),
            sum(|r| r.b),
            None,
            sum(|r| r.mean),
            sum(|r| r.sigma * r.sigma).sqrt(),
        )
    }
}

/// Fixed-width text table: header, one line per estimate, and the total.
impl Display for MultiEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut table: Vec<Vec<String>> = vec![HEADER.iter().map(|h| h.to_string()).collect()];
        table.extend(self.rows().map(|r| r.cells()));
        table.push(self.total().cells());

        let widths: Vec<usize> = (0..HEADER.len())
            .map(|col| table.iter().map(|row| row[col].len()).max().unwrap_or(0))
            .collect();
        for row in table {
            let mut line = format!("{:<w$}", row[0], w = widths[0]);
            for (cell, &w) in row.iter().zip(widths.iter()).skip(1) {
                line.push_str(&format!("  {:>w$}", cell, w = w));
            }
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
