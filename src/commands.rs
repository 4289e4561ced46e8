use anyhow::{Context, Result};
use tracing::{info, info_span};

use velo_markov::Propagation;

use crate::cli::{DayArgs, ReportArgs, StationaryArgs};
use crate::convert;
use crate::pipeline::Session;
use crate::report;

/// `velo trajectories`
pub fn trajectories(session: &Session) -> Result<()> {
    let _span = info_span!("trajectories").entered();
    print!("{}", report::format_trajectories(&session.table));
    Ok(())
}

/// `velo initial`
pub fn initial(session: &Session) -> Result<()> {
    let _span = info_span!("initial").entered();
    print!(
        "{}",
        report::format_distribution(
            "Distribution on day 1",
            session.chain.initial(),
            session.precision
        )
    );
    Ok(())
}

/// `velo matrix`
pub fn matrix(session: &Session) -> Result<()> {
    let _span = info_span!("matrix").entered();
    println!("Transition matrix");
    print!(
        "{}",
        report::format_transitions(session.chain.transitions(), session.precision)
    );
    Ok(())
}

/// `velo day --n N`
pub fn day(session: &Session, args: &DayArgs) -> Result<()> {
    let _span = info_span!("day", n = args.n).entered();
    let propagation = match &args.propagation {
        Some(p) => convert::parse_propagation(p)?,
        None => convert::parse_propagation(&session.config.chain.propagation)?,
    };
    print_day(session, args.n, propagation)
}

fn print_day(session: &Session, n: u32, propagation: Propagation) -> Result<()> {
    let power = session.chain.power(n);
    println!("Transition matrix to the power {n}");
    print!("{}", report::format_matrix(&power, session.precision));
    println!();

    let distribution = session
        .chain
        .distribution_after(n, propagation)
        .with_context(|| format!("failed to propagate to day {n}"))?;
    info!(sum = distribution.sum(), ?propagation, "distribution propagated");
    print!(
        "{}",
        report::format_distribution(
            &format!("Distribution after {n} days"),
            &distribution,
            session.precision
        )
    );
    Ok(())
}

/// `velo counts`
pub fn counts(session: &Session) -> Result<()> {
    let _span = info_span!("counts").entered();
    println!("Observed moves per origin station");
    print!("{}", report::format_counts(session.chain.counts()));
    Ok(())
}

/// `velo stationary`
pub fn stationary(session: &Session, args: &StationaryArgs) -> Result<()> {
    let _span = info_span!("stationary").entered();
    let cfg = convert::build_stationary_config(
        &session.config.chain,
        args.exact,
        args.iterations,
        args.tolerance,
    )?;
    print_stationary(session, &cfg)
}

fn print_stationary(session: &Session, cfg: &velo_markov::StationaryConfig) -> Result<()> {
    let estimate = session
        .chain
        .stationary(cfg)
        .context("failed to compute the long-run distribution")?;
    info!(
        iterations = estimate.iterations(),
        row_spread = estimate.row_spread(),
        converged = estimate.converged(),
        "stationary distribution computed"
    );
    print!("{}", report::format_stationary(&estimate, session.precision));
    Ok(())
}

/// `velo report`
pub fn full_report(session: &Session, args: &ReportArgs) -> Result<()> {
    let _span = info_span!("report").entered();
    trajectories(session)?;
    println!();
    initial(session)?;
    println!();
    matrix(session)?;
    println!();
    print_day(
        session,
        args.n,
        convert::parse_propagation(&session.config.chain.propagation)?,
    )?;
    println!();
    counts(session)?;
    println!();
    let cfg = convert::build_stationary_config(&session.config.chain, args.exact, None, None)?;
    print_stationary(session, &cfg)
}
