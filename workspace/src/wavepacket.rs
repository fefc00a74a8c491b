use std::{ fs, path::PathBuf, time::Instant };
use anyhow::Context;
use clap::Parser;
use ndarray as nd;
use ndarray_npy::NpzWriter;
use xprop::{
    config::{ self, RunParams },
    potential::optical_potential,
    spectral::momentum_density,
    state::initial_state,
};

// propagate a Gaussian wave packet into an absorbing boundary layer and dump
// the density trajectory with its observables

#[derive(Parser)]
#[command(about = "Split-step propagation of a Gaussian wave packet")]
struct CommandLineArguments {
    /// TOML file of run parameters; missing keys take default values
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Directory to write `wavepacket.npz` into
    #[arg(long, short, default_value = "output")]
    outdir: PathBuf,
    /// Print run parameters and a summary
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .format_timestamp_secs()
        .init();

    let args = CommandLineArguments::parse();
    let params: RunParams
        = match &args.config {
            Some(path) => config::read_toml(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => RunParams::default(),
        };
    if args.verbose {
        println!("Run parameters\n{}", params.to_toml()?);
    }

    let start = Instant::now();
    let traj = config::simulate(&params)?;
    log::info!(
        "propagated {} samples in {:.2} seconds",
        traj.len(), start.elapsed().as_secs_f64(),
    );

    let v: nd::Array1<f64>
        = optical_potential(
            traj.x(), params.v_opt, params.sigma_opt, params.x_max)
        .mapv(|vk| vk.im);
    // momentum distribution of the launched packet, in ascending k
    let grid = params.grid()?;
    let q0 = initial_state(grid.x(), grid.dx(), params.k0);
    let (k, rho_k0) = momentum_density(&q0, grid.dx());
    let norm = traj.norms();
    let mean = traj.means();
    let spread = traj.spreads();
    let spread_cond = traj.conditional_spreads();

    if args.verbose {
        let last = traj.len() - 1;
        println!(
            "t = {:.3}: norm = {:.6}, mean = {:+.4}, spread = {:.4} \
            (conditional {:.4})",
            traj.t()[last], norm[last], mean[last], spread[last],
            spread_cond[last],
        );
        println!("absorbed fraction: {:.6}", norm[0] - norm[last]);
    }

    fs::create_dir_all(&args.outdir)
        .with_context(|| format!("creating {}", args.outdir.display()))?;
    let path = args.outdir.join("wavepacket.npz");
    let mut npz = NpzWriter::new_compressed(fs::File::create(&path)?);
    npz.add_array("x", traj.x())?;
    npz.add_array("t", traj.t())?;
    npz.add_array("v", &v)?;
    npz.add_array("rho", traj.densities())?;
    npz.add_array("k", &k)?;
    npz.add_array("rho_k0", &rho_k0)?;
    npz.add_array("norm", &norm)?;
    npz.add_array("mean", &mean)?;
    npz.add_array("spread", &spread)?;
    npz.add_array("spread_cond", &spread_cond)?;
    npz.finish()?;
    log::info!("wrote {}", path.display());

    Ok(())
}
