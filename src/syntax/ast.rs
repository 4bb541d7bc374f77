use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use crate::eval::{BinOp, ScalarType};
use crate::syntax::pretty_print::*;

// [NOTE: AST terminology]
//
//                  VarExpr
//                    |
//                  v~~~v
// f(x, y, c) = u16(g(x + 1, y, c)) + g(x - 1, y, c) * 2
//                  ^~~~~~~~~~~~~~^
//                         |
//                       Access
//
//              ^~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~^
//                                |
//                              Expr

/// The pure variables of a stage: pixel column, pixel row and channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Var { X, Y, C }

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Var::X => write!(f, "x")?,
            Var::Y => write!(f, "y")?,
            Var::C => write!(f, "c")?
        }
        Ok(())
    }
}

/// An expression defining the coordinate to access a stage at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarExpr {
    Var(Var),
    Const(i32),
    Add(Box<VarExpr>, Box<VarExpr>),
    Sub(Box<VarExpr>, Box<VarExpr>),
    Mul(Box<VarExpr>, Box<VarExpr>)
}

impl PrettyPrint for VarExpr {
    fn pretty_print(&self) -> String {
        match self {
            VarExpr::Var(v) => v.to_string(),
            VarExpr::Const(c) => c.to_string(),
            VarExpr::Add(l, r) => combine_with_op("+", l, r),
            VarExpr::Sub(l, r) => combine_with_op("-", l, r),
            VarExpr::Mul(l, r) => combine_with_op("*", l, r)
        }
    }

    fn is_leaf(&self) -> bool {
        match self {
            VarExpr::Var(_) | VarExpr::Const(_) => true,
            _ => false
        }
    }
}

/// A runtime parameter, bound to a value when a pipeline is realized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    pub name: String
}

impl Param {
    pub fn new(name: &str) -> Param {
        Param { name: name.to_string() }
    }
}

/// Index of a stage within its pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StageId(pub usize);

/// Distinguishes pipelines, so handles can't be used with a pipeline that
/// didn't create them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineId(usize);

impl PipelineId {
    pub(crate) fn fresh() -> PipelineId {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        PipelineId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Access {
    /// The pipeline that owns the stage
    pub(crate) pipeline: PipelineId,
    /// The stage from which we're reading
    pub(crate) stage: StageId,
    /// Name of that stage, kept for printing.
    pub(crate) name: String,
    /// The coordinates to read from, in terms of
    /// variables X, Y and C.
    pub(crate) x: VarExpr,
    pub(crate) y: VarExpr,
    pub(crate) c: VarExpr
}


impl PrettyPrint for Access {
    fn pretty_print(&self) -> String {
        format!(
            "{}({}, {}, {})",
            self.name,
            self.x.pretty_print(),
            self.y.pretty_print(),
            self.c.pretty_print()
        )
    }

    fn is_leaf(&self) -> bool {
        true
    }
}

/// An expression defining the value of a stage at a coordinate.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A clamped read from an earlier stage.
    Access(Access),
    Int(i32),
    Float(f32),
    Param(String),
    /// The current coordinate, as an integer value.
    Coord(VarExpr),
    /// Component of the previous state tuple. Only valid inside a `Recurrence`.
    State(usize),
    Cast(ScalarType, Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>)
}

impl Expr {
    /// Returns every stage read in this expression.
    pub(crate) fn accesses(&self) -> Vec<&Access> {
        match self {
            Expr::Access(a) => vec![a],
            Expr::Cast(_, e) => e.accesses(),
            Expr::Binary(_, l, r) => l.accesses().into_iter().chain(r.accesses()).collect(),
            Expr::Int(_) | Expr::Float(_) | Expr::Param(_) | Expr::Coord(_) | Expr::State(_) => vec![]
        }
    }

    /// Returns the ids of all the stages read by this expression.
    pub(crate) fn sources(&self) -> Vec<StageId> {
        self.accesses().into_iter().map(|a| a.stage).collect()
    }

    /// Returns the names of all the params mentioned in this expression.
    pub(crate) fn params(&self) -> Vec<String> {
        match self {
            Expr::Param(p) => vec![p.clone()],
            Expr::Cast(_, e) => e.params(),
            Expr::Binary(_, l, r) => l.params().into_iter().chain(r.params()).collect(),
            Expr::Access(_) | Expr::Int(_) | Expr::Float(_) | Expr::Coord(_) | Expr::State(_) => vec![]
        }
    }

    /// The largest state component index referenced, if any.
    pub(crate) fn max_state(&self) -> Option<usize> {
        match self {
            Expr::State(k) => Some(*k),
            Expr::Cast(_, e) => e.max_state(),
            Expr::Binary(_, l, r) => l.max_state().max(r.max_state()),
            _ => None
        }
    }
}

impl PrettyPrint for Expr {
    fn pretty_print(&self) -> String {
        match self {
            Expr::Access(a) => a.pretty_print(),
            Expr::Int(i) => i.to_string(),
            Expr::Float(f) => format!("{:?}f", f),
            Expr::Param(p) => p.clone(),
            Expr::Coord(v) => v.pretty_print(),
            Expr::State(k) => format!("prev[{}]", k),
            Expr::Cast(ty, e) => format!("{}({})", ty, e.pretty_print()),
            Expr::Binary(op, l, r) if op.is_call() => {
                format!("{}({}, {})", op.symbol(), l.pretty_print(), r.pretty_print())
            },
            Expr::Binary(op, l, r) => combine_with_op(op.symbol(), l, r)
        }
    }

    fn is_leaf(&self) -> bool {
        match self {
            Expr::Binary(op, _, _) => op.is_call(),
            Expr::Coord(v) => v.is_leaf(),
            _ => true
        }
    }
}

/// Casts `e` to the given type.
pub fn cast<E: Into<Expr>>(ty: ScalarType, e: E) -> Expr {
    Expr::Cast(ty, Box::new(e.into()))
}

pub fn min<L: Into<Expr>, R: Into<Expr>>(l: L, r: R) -> Expr {
    Expr::Binary(BinOp::Min, Box::new(l.into()), Box::new(r.into()))
}

pub fn max<L: Into<Expr>, R: Into<Expr>>(l: L, r: R) -> Expr {
    Expr::Binary(BinOp::Max, Box::new(l.into()), Box::new(r.into()))
}

/// Clamps `e` to `[lo, hi]`.
pub fn clamp<E, L, H>(e: E, lo: L, hi: H) -> Expr
where
    E: Into<Expr>,
    L: Into<Expr>,
    H: Into<Expr>
{
    min(max(e, lo), hi)
}

pub fn lt<L: Into<Expr>, R: Into<Expr>>(l: L, r: R) -> Expr {
    Expr::Binary(BinOp::Lt, Box::new(l.into()), Box::new(r.into()))
}

/// Component `k` of a recurrence's previous state.
pub fn state(k: usize) -> Expr {
    Expr::State(k)
}

/// A handle to a stage in a `Pipeline`. Reading from it produces an `Access`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Func {
    pub(crate) pipeline: PipelineId,
    pub(crate) id: StageId,
    pub(crate) name: String
}

impl Func {
    pub fn id(&self) -> StageId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn at<U, V, W>(&self, x: U, y: V, c: W) -> Expr
    where
        U: Into<VarExpr>,
        V: Into<VarExpr>,
        W: Into<VarExpr>
    {
        Expr::Access(Access {
            pipeline: self.pipeline,
            stage: self.id,
            name: self.name.clone(),
            x: x.into(),
            y: y.into(),
            c: c.into()
        })
    }
}

/// A tuple-valued state updated a fixed number of times per pixel.
///
/// The state starts at `init` and every iteration replaces it with `update`,
/// evaluated against the previous state. After each update `predicate` is
/// evaluated against the new state, and the stage's value is the number of
/// leading iterations for which it held: `k - 1` if it first fails at
/// iteration `k`, or `iterations` if it never fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Recurrence {
    pub init: Vec<Expr>,
    pub update: Vec<Expr>,
    pub iterations: u32,
    pub predicate: Expr
}

impl Recurrence {
    pub(crate) fn exprs(&self) -> impl Iterator<Item = &Expr> {
        self.init.iter().chain(&self.update).chain(std::iter::once(&self.predicate))
    }

    pub(crate) fn accesses(&self) -> Vec<&Access> {
        self.exprs().flat_map(|e| e.accesses()).collect()
    }

    pub(crate) fn sources(&self) -> Vec<StageId> {
        self.accesses().into_iter().map(|a| a.stage).collect()
    }

    pub(crate) fn params(&self) -> Vec<String> {
        self.exprs().flat_map(|e| e.params()).collect()
    }
}
