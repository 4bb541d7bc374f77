//! Renders the mandelbrot set over a region of the complex plane.

use std::path::{Path, PathBuf};
use structopt::StructOpt;
use structopt::clap::AppSettings;
use halo::*;

#[derive(StructOpt, Debug)]
#[structopt(name = "mandelbrot", setting = AppSettings::AllowNegativeNumbers)]
struct Opts {
    /// Plot range as xmin xmax ymin ymax. Defaults to -1 1 -1 1.
    range: Vec<f32>,

    /// Output image path.
    #[structopt(short = "o", long = "output", default_value = "resources/output.png", parse(from_os_str))]
    output: PathBuf,

    /// Render resolution as width height. Defaults to 1024 1024.
    #[structopt(short = "r", long = "resolution", number_of_values = 2)]
    resolution: Option<Vec<usize>>
}

fn params(opts: &Opts) -> Result<FractalParams, String> {
    let defaults = FractalParams::default();
    let region = if opts.range.is_empty() {
        defaults.region
    } else {
        Region::from_slice(&opts.range)
            .ok_or_else(|| format!("expected 4 values for the range, got {}", opts.range.len()))?
    };
    let (width, height) = match opts.resolution.as_deref() {
        Some(&[width, height]) => (width, height),
        _ => (defaults.width, defaults.height)
    };
    Ok(FractalParams { region, width, height, ..defaults })
}

fn run(params: &FractalParams, output: &Path) -> Result<(), Error> {
    let image = render_mandelbrot(params)?;
    log::info!("Processed image.");

    save_image(output, &image)?;
    log::info!("Wrote output image to {}.", output.display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = match Opts::from_args_safe() {
        Ok(opts) => opts,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            log::error!("Threw {} when parsing arguments.", e.message);
            std::process::exit(-1);
        }
    };
    let params = match params(&opts) {
        Ok(params) => params,
        Err(e) => {
            log::error!("Threw {} when parsing arguments.", e);
            std::process::exit(-1);
        }
    };

    if let Err(e) = run(&params, &opts.output) {
        log::error!("{}", e);
        std::process::exit(-1);
    }
}
