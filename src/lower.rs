//! Renders the loops a realization runs, in the spirit of a lowered
//! statement dump.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use crate::error::{Error, PipelineError};
use crate::eval::Domain;
use crate::image::Image;
use crate::syntax::*;

struct Printer {
    out: String,
    depth: usize
}

impl Printer {
    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn open(&mut self, text: &str) {
        self.line(text);
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth -= 1;
    }
}

/// Returns the loop nest realizing `output` over `domain`: one `produce`
/// block per stage, in the order the stages are computed.
///
/// ```
/// use halo::*;
///
/// let mut p = Pipeline::new("gradient");
/// let gradient = p.define("gradient", Expr::from(Var::X + Var::Y)).unwrap();
/// let nest = loop_nest(&p, &gradient, Domain::new(800, 600, 1)).unwrap();
/// assert_eq!(
///     nest,
///     "produce gradient:\n  for y in [0, 599]:\n    for x in [0, 799]:\n      for c in [0, 0]:\n        gradient(x, y, c) = x + y\n"
/// );
/// ```
pub fn loop_nest(pipeline: &Pipeline, output: &Func, domain: Domain) -> Result<String, PipelineError> {
    domain.check()?;
    let mut p = Printer { out: String::new(), depth: 0 };

    for id in pipeline.schedule(output)? {
        let stage = pipeline.stage_at(id);
        let name = &stage.name;
        let body = match &stage.definition {
            Definition::Input(image) if id == output.id() => {
                let (w, h, c) = image.dimensions();
                format!("{}(x, y, c) = <{}x{}x{} image>(x, y, c)", name, w, h, c)
            },
            Definition::Input(_) => continue,
            Definition::Pure(e) => format!("{}(x, y, c) = {}", name, e.pretty_print()),
            Definition::Recurrence(_) => String::new()
        };

        p.open(&format!("produce {}:", name));
        p.open(&format!("for y in [0, {}]:", domain.height - 1));
        p.open(&format!("for x in [0, {}]:", domain.width - 1));
        match &stage.definition {
            Definition::Recurrence(r) => {
                p.line(&format!("prev = {}", pretty_print_tuple(&r.init)));
                p.line(&format!("{}(x, y) = {}", name, r.iterations));
                p.open(&format!("for r in [1, {}]:", r.iterations));
                p.line(&format!("prev = {}", pretty_print_tuple(&r.update)));
                p.open(&format!("if !({}):", r.predicate.pretty_print()));
                p.line(&format!("{}(x, y) = r - 1", name));
                p.line("break");
                p.close();
                p.close();
            },
            _ => {
                p.open(&format!("for c in [0, {}]:", domain.channels - 1));
                p.line(&body);
                p.close();
            }
        }
        p.close();
        p.close();
        p.close();
    }

    Ok(p.out)
}

fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch)
        }
    }
    escaped
}

fn write_html_page<W: Write>(mut html: W, title: &str, stmt: &str) -> io::Result<()> {
    writeln!(html, "<html>")?;
    writeln!(html, "<head><title>{}</title></head>", escape_html(title))?;
    writeln!(html, "<body>")?;
    writeln!(html, "<pre>")?;
    write!(html, "{}", escape_html(stmt))?;
    writeln!(html, "</pre>")?;
    writeln!(html, "</body>")?;
    writeln!(html, "</html>")?;
    html.flush()
}

/// Writes the loop nest for `output` to `path` as an HTML page.
pub fn write_stmt_html<P: AsRef<Path>>(
    pipeline: &Pipeline,
    output: &Func,
    domain: Domain,
    path: P
) -> Result<(), Error> {
    let path = path.as_ref();
    let stmt = loop_nest(pipeline, output, domain)?;
    let write_error = |source| Error::Write { path: path.to_path_buf(), source };

    let file = File::create(path).map_err(write_error)?;
    write_html_page(BufWriter::new(file), &pipeline.name, &stmt).map_err(write_error)?;
    log::debug!("Wrote lowered statement for {} to {}", output.name(), path.display());
    Ok(())
}
