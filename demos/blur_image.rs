//! Applies a separable 3x3 blur to an image.

use std::path::PathBuf;
use structopt::StructOpt;
use halo::*;

#[derive(StructOpt, Debug)]
#[structopt(name = "blur_image")]
struct Opts {
    /// Image to blur.
    #[structopt(parse(from_os_str))]
    image: PathBuf,

    /// Output image path.
    #[structopt(short = "o", long = "output", default_value = "output.png", parse(from_os_str))]
    output: PathBuf
}

fn run(opts: &Opts) -> Result<(), Error> {
    let input = load_image(&opts.image)?;
    log::info!("Opened image from {}.", opts.image.display());
    log::info!("Read image.");

    let (pipeline, out) = blur3(input.clone())?;
    log::debug!("Pipeline:\n{}", pipeline.pretty_print());
    let (width, height, channels) = input.dimensions();
    let output: GrayImage = pipeline.realize(&out, Domain::new(width, height, channels))?;
    log::info!("Processed image.");

    save_image(&opts.output, &output)?;
    log::info!("Wrote output image to {}.", opts.output.display());
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

    if let Err(e) = run(&opts) {
        log::error!("{}", e);
        std::process::exit(-1);
    }
}
