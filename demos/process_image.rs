//! Brightens an image by a factor of 1.5.

use std::path::PathBuf;
use structopt::StructOpt;
use halo::*;

#[derive(StructOpt, Debug)]
#[structopt(name = "process_image")]
struct Opts {
    /// Image to process.
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

    let output = brighten(&input, 1.5)?;
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
