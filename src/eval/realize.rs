//! Realization: evaluating every stage an output depends on into a buffer.

use crate::error::PipelineError;
use crate::eval::expr::{Env, Point};
use crate::eval::{Params, Value};
use crate::image::{Image, ImageBuffer, Sample};
use crate::syntax::*;

/// The extent of the output buffer to realize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Domain {
    pub width: usize,
    pub height: usize,
    pub channels: usize
}

impl Domain {
    pub fn new(width: usize, height: usize, channels: usize) -> Domain {
        Domain { width, height, channels }
    }

    /// Returns an error if any extent is zero.
    pub fn check(&self) -> Result<(), PipelineError> {
        if self.width == 0 || self.height == 0 || self.channels == 0 {
            return Err(PipelineError::InvalidDomain {
                width: self.width,
                height: self.height,
                channels: self.channels
            });
        }
        Ok(())
    }
}

impl Pipeline {
    /// Computes `output` over `domain`.
    pub fn realize<T: Sample>(&self, output: &Func, domain: Domain) -> Result<ImageBuffer<T>, PipelineError> {
        self.realize_with_params(output, domain, &Params::new())
    }

    /// Computes `output` over `domain`, with values for the params it uses.
    ///
    /// Each stage `output` depends on is computed once, over the whole domain,
    /// before any stage that reads it. Pure stages have one channel per domain
    /// channel and recurrences have a single channel, which is replicated
    /// across the domain's channels when a recurrence is the output. Reads
    /// outside a stage's extent are clamped.
    pub fn realize_with_params<T: Sample>(
        &self,
        output: &Func,
        domain: Domain,
        params: &Params
    ) -> Result<ImageBuffer<T>, PipelineError> {
        domain.check()?;
        let schedule = self.schedule(output)?;

        if let Some(missing) = self.params(output)?.into_iter().find(|p| params.get(p).is_none()) {
            return Err(PipelineError::MissingParam(missing));
        }
        for id in &schedule {
            if let Definition::Input(image) = &self.stage_at(*id).definition {
                let (width, height, channels) = image.dimensions();
                Domain::new(width, height, channels).check()?;
            }
        }

        let mut realized: Vec<Option<ImageBuffer<Value>>> = vec![None; self.stages().len()];
        for id in schedule {
            let stage = self.stage_at(id);
            let env = Env { pipeline: self, realized: &realized, params };
            let buffer = match &stage.definition {
                // Inputs are read in place unless they are the output
                Definition::Input(image) if id == output.id => {
                    fill(domain.width, domain.height, domain.channels, |p| {
                        image.get_clamped(p.x, p.y, p.c).to_value()
                    })
                },
                Definition::Input(_) => continue,
                Definition::Pure(e) => {
                    fill(domain.width, domain.height, domain.channels, |p| env.eval(e, p, &[]))
                },
                Definition::Recurrence(r) => {
                    let escape = fill(domain.width, domain.height, 1, |p| env.run_recurrence(r, p));
                    if id == output.id && domain.channels > 1 {
                        ImageBuffer::from_fn(domain.width, domain.height, domain.channels, |x, y, _| {
                            escape.get(x, y, 0)
                        })
                    } else {
                        escape
                    }
                }
            };
            log::debug!(
                "Realized {} over {}x{}x{}",
                stage.name, buffer.width(), buffer.height(), buffer.channels()
            );
            realized[id.0] = Some(buffer);
        }

        match realized[output.id.0].take() {
            Some(buffer) => Ok(buffer.convert()),
            None => unreachable!("output stage {} is always scheduled", output.name)
        }
    }
}

/// Evaluates `f` at every point of a `width x height x channels` buffer.
/// With the `parallel` feature rows are filled concurrently.
fn fill<F>(width: usize, height: usize, channels: usize, f: F) -> ImageBuffer<Value>
where
    F: Fn(Point) -> Value + Sync
{
    let mut buffer = ImageBuffer::new(width, height, channels);
    let row_len = width * channels;
    let fill_row = |y: usize, row: &mut [Value]| {
        for (i, v) in row.iter_mut().enumerate() {
            let p = Point { x: (i / channels) as i64, y: y as i64, c: (i % channels) as i64 };
            *v = f(p);
        }
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        buffer.data_mut()
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| fill_row(y, row));
    }
    #[cfg(not(feature = "parallel"))]
    {
        for (y, row) in buffer.data_mut().chunks_mut(row_len).enumerate() {
            fill_row(y, row);
        }
    }

    buffer
}
