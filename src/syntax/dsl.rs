//! Contains operator impls and macros to allow ergonomic construction of AST nodes.

use std::ops::{Add, Div, Mul, Sub};
use crate::eval::BinOp;
use crate::syntax::ast::*;

/// Shorthand for defining a pure stage in a pipeline, propagating any error.
///
/// The following code samples are equivalent.
///
/// ```ignore
/// func!(pipeline, g = f.at(x, y, c) + 1);
/// ```
///
/// ```ignore
/// let g = pipeline.define("g", f.at(x, y, c) + 1)?;
/// ```
#[macro_export]
macro_rules! func {
    ($pipeline:expr, $name:ident = $($rest:tt)*) => {
        let $name = $pipeline.define(stringify!($name), $($rest)*)?;
    }
}

/// Shorthand for creating a new `Param`.
///
/// The following code samples are equivalent.
///
/// ```ignore
/// param!(offset);
/// ```
///
/// ```ignore
/// let offset = Param::new("offset");
/// ```
#[macro_export]
macro_rules! param {
    ($name:ident) => {
        let $name = $crate::syntax::Param::new(stringify!($name));
    }
}

macro_rules! impl_var_expr_bin_op {
    ($trait_name:ident, $trait_op:ident, $ctor:expr) => {
        impl $trait_name<Self> for VarExpr {
            type Output = VarExpr;
            fn $trait_op(self, rhs: Self) -> VarExpr {
                $ctor(Box::new(self), Box::new(rhs))
            }
        }

        impl $trait_name<i32> for VarExpr {
            type Output = VarExpr;
            fn $trait_op(self, rhs: i32) -> VarExpr {
                $ctor(Box::new(self), Box::new(VarExpr::Const(rhs)))
            }
        }

        impl $trait_name<VarExpr> for i32 {
            type Output = VarExpr;
            fn $trait_op(self, rhs: VarExpr) -> VarExpr {
                $ctor(Box::new(VarExpr::Const(self)), Box::new(rhs))
            }
        }

        impl $trait_name<VarExpr> for Var {
            type Output = VarExpr;
            fn $trait_op(self, rhs: VarExpr) -> VarExpr {
                $ctor(Box::new(VarExpr::Var(self)), Box::new(rhs))
            }
        }

        impl $trait_name<Var> for VarExpr {
            type Output = VarExpr;
            fn $trait_op(self, rhs: Var) -> VarExpr {
                $ctor(Box::new(self), Box::new(VarExpr::Var(rhs)))
            }
        }

        impl $trait_name<i32> for Var {
            type Output = VarExpr;
            fn $trait_op(self, rhs: i32) -> VarExpr {
                $ctor(Box::new(VarExpr::Var(self)), Box::new(VarExpr::Const(rhs)))
            }
        }

        impl $trait_name<Var> for i32 {
            type Output = VarExpr;
            fn $trait_op(self, rhs: Var) -> VarExpr {
                $ctor(Box::new(VarExpr::Const(self)), Box::new(VarExpr::Var(rhs)))
            }
        }

        impl $trait_name<Var> for Var {
            type Output = VarExpr;
            fn $trait_op(self, rhs: Var) -> VarExpr {
                $ctor(Box::new(VarExpr::Var(self)), Box::new(VarExpr::Var(rhs)))
            }
        }
    };
}

impl_var_expr_bin_op!(Add, add, VarExpr::Add);
impl_var_expr_bin_op!(Sub, sub, VarExpr::Sub);
impl_var_expr_bin_op!(Mul, mul, VarExpr::Mul);

impl From<Var> for VarExpr {
    fn from(v: Var) -> VarExpr {
        VarExpr::Var(v)
    }
}

impl From<i32> for VarExpr {
    fn from(c: i32) -> VarExpr {
        VarExpr::Const(c)
    }
}

impl From<i32> for Expr {
    fn from(i: i32) -> Expr {
        Expr::Int(i)
    }
}

impl From<f32> for Expr {
    fn from(f: f32) -> Expr {
        Expr::Float(f)
    }
}

impl From<Var> for Expr {
    fn from(v: Var) -> Expr {
        Expr::Coord(VarExpr::Var(v))
    }
}

impl From<VarExpr> for Expr {
    fn from(v: VarExpr) -> Expr {
        Expr::Coord(v)
    }
}

impl From<&Param> for Expr {
    fn from(p: &Param) -> Expr {
        Expr::Param(p.name.clone())
    }
}

fn binary(op: BinOp, l: Expr, r: Expr) -> Expr {
    Expr::Binary(op, Box::new(l), Box::new(r))
}

macro_rules! impl_expr_bin_op {
    ($trait_name:ident, $trait_op:ident, $op:expr) => {
        impl $trait_name<Self> for Expr {
            type Output = Expr;
            fn $trait_op(self, rhs: Self) -> Expr {
                binary($op, self, rhs)
            }
        }

        impl $trait_name<i32> for Expr {
            type Output = Expr;
            fn $trait_op(self, rhs: i32) -> Expr {
                binary($op, self, Expr::Int(rhs))
            }
        }

        impl $trait_name<Expr> for i32 {
            type Output = Expr;
            fn $trait_op(self, rhs: Expr) -> Expr {
                binary($op, Expr::Int(self), rhs)
            }
        }

        impl $trait_name<f32> for Expr {
            type Output = Expr;
            fn $trait_op(self, rhs: f32) -> Expr {
                binary($op, self, Expr::Float(rhs))
            }
        }

        impl $trait_name<Expr> for f32 {
            type Output = Expr;
            fn $trait_op(self, rhs: Expr) -> Expr {
                binary($op, Expr::Float(self), rhs)
            }
        }

        impl $trait_name<&Param> for Expr {
            type Output = Expr;
            fn $trait_op(self, rhs: &Param) -> Expr {
                binary($op, self, rhs.into())
            }
        }

        impl $trait_name<Expr> for &Param {
            type Output = Expr;
            fn $trait_op(self, rhs: Expr) -> Expr {
                binary($op, self.into(), rhs)
            }
        }
    };
}

impl_expr_bin_op!(Add, add, BinOp::Add);
impl_expr_bin_op!(Sub, sub, BinOp::Sub);
impl_expr_bin_op!(Mul, mul, BinOp::Mul);
impl_expr_bin_op!(Div, div, BinOp::Div);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::PrettyPrint;

    #[test]
    fn test_param_macro() {
        param!(offset);
        assert_eq!(offset.name, "offset");
        let e = 2 * Expr::from(Var::X) + &offset;
        assert_eq!(e.pretty_print(), "(2 * x) + offset");
    }

    #[test]
    fn test_coordinates_as_values() {
        let e: Expr = (Var::X + Var::Y).into();
        assert_eq!(e, Expr::Coord(VarExpr::Var(Var::X) + VarExpr::Var(Var::Y)));
        assert_eq!((1.0f32 / e).pretty_print(), "1.0f / (x + y)");
    }
}
