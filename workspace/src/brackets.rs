use clap::Parser;
use ndarray as nd;
use xprop::brackets;

// bracket and refine the low-lying levels of the harmonic oscillator V = x²/2,
// whose exact energies are n + 1/2

#[derive(Parser)]
#[command(about = "Eigenvalue search for the harmonic oscillator by shooting")]
struct CommandLineArguments {
    /// Number of levels to find
    #[arg(long, short, default_value_t = 8)]
    levels: usize,
    /// Bisection tolerance
    #[arg(long, default_value_t = 1e-10)]
    epsilon: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .format_timestamp_secs()
        .init();

    let args = CommandLineArguments::parse();
    let x: nd::Array1<f64> = nd::Array1::linspace(-10.0, 10.0, 4001);
    let dx = x[1] - x[0];
    let v: nd::Array1<f64> = x.mapv(|xk| 0.5 * xk.powi(2));
    let escan: nd::Array1<f64> = nd::Array1::linspace(0.0, 40.0, 1500);
    let f = |e: f64| brackets::shoot(dx, &v, e);

    // only as much of the scan is evaluated as the requested levels need
    let mut scan = brackets::Brackets::new(f, &escan);
    for (n, bracket) in scan.by_ref().take(args.levels).enumerate() {
        let e = bracket.refine(f, args.epsilon, 1000)?;
        println!(
            "n = {:2}: [{:.5}, {:.5}] -> {:.10} (exact {:.1}, err {:+.2e})",
            n, bracket.lo, bracket.hi, e, n as f64 + 0.5, e - n as f64 - 0.5,
        );
    }
    log::info!(
        "evaluated {} of {} scan points",
        scan.evaluated(), scan.energies().len(),
    );

    Ok(())
}
