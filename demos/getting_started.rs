//! Realizes `gradient(x, y) = x + y` and checks every pixel.

use halo::*;

#[derive(Debug, thiserror::Error)]
enum CheckError {
    #[error("Output ({0}, {1}) mismatch.")]
    Mismatch(usize, usize),
    #[error(transparent)]
    Halo(#[from] Error),
}

/// Returns the first pixel that isn't `x + y`, in row order.
fn first_mismatch(output: &ImageBuffer<i32>) -> Option<(usize, usize)> {
    (0..output.height())
        .flat_map(|j| (0..output.width()).map(move |i| (i, j)))
        .find(|&(i, j)| output.get(i, j, 0) != (i + j) as i32)
}

fn run() -> Result<(), CheckError> {
    let output = gradient(800, 600).map_err(Error::from)?;
    if let Some((i, j)) = first_mismatch(&output) {
        return Err(CheckError::Mismatch(i, j));
    }
    log::info!("Success!");
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(-1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_realized_gradient_has_no_mismatch() {
        assert_eq!(first_mismatch(&gradient(40, 30).unwrap()), None);
    }

    #[test]
    fn test_mismatch_is_reported_in_row_order() {
        let mut output = gradient(4, 3).unwrap();
        output.set(3, 1, 0, 0);
        output.set(0, 2, 0, 7);
        assert_eq!(first_mismatch(&output), Some((3, 1)));
        assert_eq!(CheckError::Mismatch(3, 1).to_string(), "Output (3, 1) mismatch.");
    }
}
