use std::{ fs, path::PathBuf };
use clap::Parser;
use ndarray as nd;
use ndarray_npy::NpzWriter;
use xprop::config::{ self, RunParams };

// free spreading of a packet at rest, compared against σ(t) = sqrt(1 + t²/4)

#[derive(Parser)]
#[command(about = "Compare free wave packet spreading against the exact result")]
struct CommandLineArguments {
    /// Final time
    #[arg(long, default_value_t = 5.0)]
    t_end: f64,
    /// Number of samples over [0, t_end]
    #[arg(long, default_value_t = 51)]
    nsamples: usize,
    /// Directory to write `spread.npz` into
    #[arg(long, short, default_value = "output")]
    outdir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .format_timestamp_secs()
        .init();

    let args = CommandLineArguments::parse();
    let params = RunParams {
        t_end: args.t_end,
        nsamples: args.nsamples,
        k0: 0.0,
        v_opt: 0.0,
        ..RunParams::default()
    };
    let traj = config::simulate(&params)?;
    let computed = traj.spreads();
    let exact: nd::Array1<f64> = traj.t().mapv(|tk| (1.0 + tk.powi(2) / 4.0).sqrt());
    let relerr: nd::Array1<f64>
        = nd::Zip::from(&computed).and(&exact)
        .map_collect(|c, e| ((c - e) / e).abs());

    println!("{:>8}  {:>12}  {:>12}  {:>10}", "t", "computed", "exact", "rel. err");
    traj.t().iter().zip(&computed).zip(&exact).zip(&relerr)
        .step_by((traj.len() / 10).max(1))
        .for_each(|(((tk, ck), ek), rk)| {
            println!("{:8.3}  {:12.8}  {:12.8}  {:10.3e}", tk, ck, ek, rk);
        });
    let worst = relerr.iter().copied().fold(0.0, f64::max);
    println!("max relative error: {:.3e}", worst);

    fs::create_dir_all(&args.outdir)?;
    let path = args.outdir.join("spread.npz");
    let mut npz = NpzWriter::new_compressed(fs::File::create(&path)?);
    npz.add_array("t", traj.t())?;
    npz.add_array("computed", &computed)?;
    npz.add_array("exact", &exact)?;
    npz.finish()?;
    log::info!("wrote {}", path.display());

    Ok(())
}
