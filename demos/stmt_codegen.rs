//! Dumps the loops realizing a gradient as HTML, then prints them.

use std::path::PathBuf;
use structopt::StructOpt;
use halo::*;

#[derive(StructOpt, Debug)]
#[structopt(name = "stmt_codegen")]
struct Opts {
    /// Where to write the HTML page.
    #[structopt(short = "o", long = "output", default_value = "resources/codegen.html", parse(from_os_str))]
    output: PathBuf
}

fn run(opts: &Opts) -> Result<(), Error> {
    let (pipeline, gradient) = gradient_pipeline()?;
    let domain = Domain::new(800, 600, 1);

    write_stmt_html(&pipeline, &gradient, domain, &opts.output)?;
    log::info!("Generated code to {}.", opts.output.display());

    print!("{}", loop_nest(&pipeline, &gradient, domain)?);
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
