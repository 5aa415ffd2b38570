use crate::types::ThreePointEstimate;
use anyhow::{anyhow, Context, Result};
use flate2::read::GzDecoder;
use log::info;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;

/// One line of an estimates file.
#[derive(Clone, Debug, PartialEq)]
pub struct EstimateRecord {
    pub identifier: String,
    pub estimate: ThreePointEstimate,
}

/// Reads a `;`-separated file of `optimistic;nominal;pessimistic;identifier`
/// rows, skipping the header. Files ending in `.gz` are decompressed.
pub fn load_estimates<P: AsRef<Path>>(path: P) -> Result<Vec<EstimateRecord>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("reading {:?}", path))?;
    let reader: Box<dyn Read> = if path.extension().map_or(false, |ext| ext == "gz") {
        Box::new(GzDecoder::new(f))
    } else {
        Box::new(f)
    };
    let records =
        read_estimates(BufReader::new(reader)).with_context(|| format!("parsing {:?}", path))?;
    info!("loaded {} estimates from {:?}", records.len(), path);
    Ok(records)
}

pub fn read_estimates<R: Read>(reader: R) -> Result<Vec<EstimateRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .quote(b'|')
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row.context("malformed row")?;
        let line = row.position().map_or(0, |p| p.line());
        if row.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        let number = |col: usize| -> Result<f64> {
            let field = row
                .get(col)
                .ok_or_else(|| anyhow!("line {}: missing column {}", line, col + 1))?;
            let value: i64 = field.trim().parse().with_context(|| {
                format!("line {}: column {} is not an integer: {:?}", line, col + 1, field)
            })?;
            Ok(value as f64)
        };
        let (optimistic, nominal, pessimistic) = (number(0)?, number(1)?, number(2)?);
        let identifier = row
            .get(3)
            .map(|s| s.trim().to_owned())
            .ok_or_else(|| anyhow!("line {}: missing identifier", line))?;
        let estimate = ThreePointEstimate::new(optimistic, nominal, pessimistic)
            .with_context(|| format!("line {}: estimate {:?}", line, identifier))?;
        records.push(EstimateRecord {
            identifier,
            estimate,
        });
    }
    Ok(records)
}
