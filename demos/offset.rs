//! Adds a runtime offset to every sample of an image.

use std::path::PathBuf;
use structopt::StructOpt;
use halo::*;

#[derive(StructOpt, Debug)]
#[structopt(name = "offset")]
struct Opts {
    /// Image to process.
    #[structopt(parse(from_os_str))]
    image: PathBuf,

    /// Amount added to every sample.
    #[structopt(long = "offset", default_value = "32")]
    offset: u8,

    /// Output image path.
    #[structopt(short = "o", long = "output", default_value = "output.png", parse(from_os_str))]
    output: PathBuf
}

fn run(opts: &Opts) -> Result<(), Error> {
    let input = load_image(&opts.image)?;
    log::info!("Opened image from {}.", opts.image.display());

    let (pipeline, output, offset) = offset_pipeline(input.clone())?;
    let params = Params::new().with(&offset, opts.offset as i32);
    let (width, height, channels) = input.dimensions();
    let result: GrayImage = pipeline.realize_with_params(&output, Domain::new(width, height, channels), &params)?;
    log::info!("Processed image.");

    save_image(&opts.output, &result)?;
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
