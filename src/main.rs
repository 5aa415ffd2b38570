use anyhow::{bail, Result};
use argh::FromArgs;
use log::info;
use pertbeta::distribution::{BetaDistribution, Histogram, MAX_DOTS};
use pertbeta::empirical::{bucketize, sample_moments, sample_quartiles};
use pertbeta::integrate::FINE_EPSILON;
use pertbeta::load::load_estimates;
use pertbeta::report::MultiEstimate;
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

#[derive(FromArgs)]
/// PERTBETA computes the PERT-Beta distribution of three-point estimates.
struct Config {
    #[argh(positional)]
    /// optimistic, nominal and pessimistic estimate (random if omitted)
    pub estimate: Vec<i64>,

    #[argh(option)]
    /// semicolon-separated file of `O;N;P;identifier` rows to aggregate
    pub csv: Option<String>,

    #[argh(option, default = "default_confidence()")]
    /// confidence level of the reported quantile
    pub confidence: f64,

    #[argh(option, default = "0")]
    /// number of values to sample for the empirical section (0 to skip it)
    pub samples: usize,

    #[argh(option, default = "default_seed()")]
    /// seed for the pseudorandom number generator
    pub seed: u64,

    #[argh(option, default = "FINE_EPSILON")]
    /// integration step of the analytic histogram
    pub epsilon: f64,

    #[argh(option, default = "MAX_DOTS")]
    /// width of the longest histogram bar
    pub max_dots: usize,
}

fn default_seed() -> u64 {
    12453
}

fn default_confidence() -> f64 {
    0.8
}

fn main() -> Result<()> {
    env_logger::init();

    // read configuration
    let config: Config = argh::from_env();

    if let Some(path) = &config.csv {
        let report = MultiEstimate::from_records(load_estimates(path)?)?;
        print!("{}", report);
        return Ok(());
    }

    let (o, n, p) = match config.estimate.as_slice() {
        &[o, n, p] => (o, n, p),
        [] => random_estimate(config.seed),
        other => bail!("expected three estimates O N P, got {}", other.len()),
    };
    info!("estimate O/N/P = {}/{}/{}", o, n, p);
    let dist = BetaDistribution::from_three_point(o as f64, n as f64, p as f64)?;

    println!("O/N/P = {}/{}/{}", o, n, p);
    println!();
    print_analytic(&dist, &config)?;
    if config.samples > 0 {
        print_empirical(&dist, &config)?;
    }
    Ok(())
}

fn random_estimate(seed: u64) -> (i64, i64, i64) {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let o = rng.gen_range(1..=10);
    let n = o + rng.gen_range(1..=10);
    let p = n + rng.gen_range(1..=10);
    (o, n, p)
}

fn print_analytic(dist: &BetaDistribution, config: &Config) -> Result<()> {
    println!(
        "BETA({:.1}, {:.1}, {:.1}) alpha={:.1} beta={:.1}",
        dist.a(),
        dist.nominal().unwrap_or(f64::NAN),
        dist.b(),
        dist.alpha(),
        dist.beta()
    );
    println!();
    println!("ANALYTIC");
    println!(
        "mean1 = {:.1} var = {:.1} sigma1 = {:.1}",
        dist.beta_mean(),
        dist.beta_variance(),
        dist.beta_sigma()
    );
    if let Some(mean) = dist.mean() {
        println!("pert mean = {:.1} pert sigma = {:.1}", mean, dist.sigma());
    }
    let q = dist.quantiles(&[0.25, 0.5, 0.75, config.confidence])?;
    println!(
        "q25 = {:.1} q50 = {:.1} q75 = {:.1} | qConf = {:.1} (conf={:.1}%)",
        q[0],
        q[1],
        q[2],
        q[3],
        100.0 * config.confidence
    );
    print!("{}", dist.histogram(config.max_dots, config.epsilon)?);
    println!();
    Ok(())
}

fn print_empirical(dist: &BetaDistribution, config: &Config) -> Result<()> {
    let values = dist.samples(config.samples, config.seed);
    let (mean, var) = sample_moments(&values)?;
    let q = sample_quartiles(&values, config.confidence)?;
    println!("EMPIRICAL");
    println!(
        "mean2 = {:.1} var = {:.1} sigma2 = {:.1} (N = {})",
        mean,
        var,
        var.sqrt(),
        values.len()
    );
    println!(
        "q25 = {:.1} q50 = {:.1} q75 = {:.1} | qConf = {:.1} (conf={:.1}%)",
        q.q25,
        q.q50,
        q.q75,
        q.q_conf,
        100.0 * config.confidence
    );
    let hist = Histogram::from_counts(&bucketize(&values), config.max_dots);
    print!("{}", hist);
    println!();
    Ok(())
}
