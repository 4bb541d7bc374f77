//! Evaluation of expressions at a single point.

use std::collections::HashMap;
use crate::eval::Value;
use crate::image::{Image, ImageBuffer};
use crate::syntax::*;

/// Values bound to a pipeline's params for one realization.
#[derive(Debug, Clone, Default)]
pub struct Params {
    values: HashMap<String, Value>
}

impl Params {
    pub fn new() -> Params {
        Params::default()
    }

    pub fn with<V: Into<Value>>(mut self, param: &Param, value: V) -> Params {
        self.set(param, value);
        self
    }

    pub fn set<V: Into<Value>>(&mut self, param: &Param, value: V) {
        self.values.insert(param.name.clone(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.values.get(name).copied()
    }
}

/// A coordinate in a stage's domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Point {
    pub x: i64,
    pub y: i64,
    pub c: i64
}

/// Everything needed to evaluate an expression: the pipeline, the buffers of
/// the stages realized so far and the bound params.
pub(crate) struct Env<'a> {
    pub pipeline: &'a Pipeline,
    pub realized: &'a [Option<ImageBuffer<Value>>],
    pub params: &'a Params
}

impl<'a> Env<'a> {
    pub fn eval(&self, expr: &Expr, p: Point, state: &[Value]) -> Value {
        match expr {
            Expr::Access(a) => self.read(a, p),
            Expr::Int(i) => Value::Int(*i as i64),
            Expr::Float(f) => Value::Float(*f),
            // Bindings are checked before realization starts
            Expr::Param(name) => self.params.get(name).unwrap_or(Value::Int(0)),
            Expr::Coord(v) => Value::Int(eval_coord(v, p)),
            // Only recurrences may refer to state, and their indices are checked on definition
            Expr::State(k) => state.get(*k).copied().unwrap_or(Value::Int(0)),
            Expr::Cast(ty, e) => self.eval(e, p, state).cast(*ty),
            Expr::Binary(op, l, r) => {
                Value::binary(*op, self.eval(l, p, state), self.eval(r, p, state))
            }
        }
    }

    /// Reads from an input or an already realized stage, clamping the
    /// coordinate to that stage's extent.
    fn read(&self, access: &Access, p: Point) -> Value {
        let (x, y, c) = (
            eval_coord(&access.x, p),
            eval_coord(&access.y, p),
            eval_coord(&access.c, p)
        );
        if let Definition::Input(image) = &self.pipeline.stage_at(access.stage).definition {
            return Value::Int(image.get_clamped(x, y, c) as i64);
        }
        match &self.realized[access.stage.0] {
            Some(buffer) => buffer.get_clamped(x, y, c),
            None => panic!("Stage {} was read before it was realized", access.name)
        }
    }

    /// Runs a recurrence at `p`, returning the number of leading iterations
    /// for which its predicate held.
    pub fn run_recurrence(&self, r: &Recurrence, p: Point) -> Value {
        let mut current: Vec<Value> = r.init.iter().map(|e| self.eval(e, p, &[])).collect();
        let mut next = Vec::with_capacity(current.len());
        for i in 1..=r.iterations {
            next.clear();
            next.extend(r.update.iter().map(|e| self.eval(e, p, &current)));
            std::mem::swap(&mut current, &mut next);
            if !self.eval(&r.predicate, p, &current).is_true() {
                return Value::Int(i as i64 - 1);
            }
        }
        Value::Int(r.iterations as i64)
    }
}

fn eval_coord(v: &VarExpr, p: Point) -> i64 {
    match v {
        VarExpr::Var(Var::X) => p.x,
        VarExpr::Var(Var::Y) => p.y,
        VarExpr::Var(Var::C) => p.c,
        VarExpr::Const(c) => *c as i64,
        VarExpr::Add(l, r) => eval_coord(l, p) + eval_coord(r, p),
        VarExpr::Sub(l, r) => eval_coord(l, p) - eval_coord(r, p),
        VarExpr::Mul(l, r) => eval_coord(l, p) * eval_coord(r, p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::ScalarType;

    fn at(x: i64, y: i64) -> Point {
        Point { x, y, c: 0 }
    }

    #[test]
    fn test_coordinates_and_arithmetic() {
        let pipeline = Pipeline::new("empty");
        let params = Params::new();
        let env = Env { pipeline: &pipeline, realized: &[], params: &params };
        let (x, y) = (Var::X, Var::Y);

        let e: Expr = (x + 2 * y).into();
        assert_eq!(env.eval(&e, at(3, 4), &[]), Value::Int(11));

        let e = (cast(ScalarType::F32, x) + 0.5f32) / 4.0f32;
        assert_eq!(env.eval(&e, at(1, 0), &[]), Value::Float(0.375));
    }

    #[test]
    fn test_reads_from_inputs_are_clamped() {
        let (x, y, c) = (Var::X, Var::Y, Var::C);
        let mut pipeline = Pipeline::new("read");
        let input = pipeline.input("input", gray_image!(1, 2; 3, 4));
        let params = Params::new();
        let env = Env { pipeline: &pipeline, realized: &[None], params: &params };

        let e = input.at(x - 1, y + 1, c);
        assert_eq!(env.eval(&e, at(0, 0), &[]), Value::Int(3));
        assert_eq!(env.eval(&e, at(1, 5), &[]), Value::Int(3));
        assert_eq!(env.eval(&e, at(9, -9), &[]), Value::Int(2));
        assert_eq!(env.eval(&e, at(9, 0), &[]), Value::Int(4));
    }

    #[test]
    fn test_params_are_looked_up_by_name() {
        let pipeline = Pipeline::new("params");
        let offset = Param::new("offset");
        let params = Params::new().with(&offset, 7);
        let env = Env { pipeline: &pipeline, realized: &[], params: &params };
        let e = Expr::from(Var::X) + &offset;
        assert_eq!(env.eval(&e, at(2, 0), &[]), Value::Int(9));
    }

    #[test]
    fn test_recurrence_counts_leading_iterations() {
        let pipeline = Pipeline::new("rec");
        let params = Params::new();
        let env = Env { pipeline: &pipeline, realized: &[], params: &params };

        // Counts up by x each iteration while below 10
        let r = Recurrence {
            init: vec![Expr::Int(0)],
            update: vec![state(0) + Expr::from(Var::X)],
            iterations: 5,
            predicate: lt(state(0), 10)
        };
        // 3, 6, 9, 12: fails at iteration 4
        assert_eq!(env.run_recurrence(&r, at(3, 0)), Value::Int(3));
        // 1, 2, 3, 4, 5: never fails
        assert_eq!(env.run_recurrence(&r, at(1, 0)), Value::Int(5));
        // 11: fails immediately
        assert_eq!(env.run_recurrence(&r, at(11, 0)), Value::Int(0));
    }
}
