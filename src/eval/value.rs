//! The scalar type that pipeline expressions evaluate to.

use std::fmt;

/// The narrow types an expression can be explicitly cast to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType { U8, U16, I32, F32, Bool }

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ScalarType::U8 => "u8",
            ScalarType::U16 => "u16",
            ScalarType::I32 => "i32",
            ScalarType::F32 => "f32",
            ScalarType::Bool => "bool"
        };
        write!(f, "{}", name)
    }
}

/// A single evaluated sample.
///
/// Integers are held at i64 so that sums of narrow samples can't overflow
/// before an explicit cast brings them back into range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f32),
    Bool(bool)
}

impl From<i32> for Value {
    fn from(i: i32) -> Value {
        Value::Int(i as i64)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Value {
        Value::Float(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp { Add, Sub, Mul, Div, Min, Max, Lt }

impl BinOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Min => "min",
            BinOp::Max => "max",
            BinOp::Lt => "<"
        }
    }

    /// Whether this op prints as a function call rather than infix.
    pub fn is_call(&self) -> bool {
        match self {
            BinOp::Min | BinOp::Max => true,
            _ => false
        }
    }
}

impl Value {
    pub fn as_i64(self) -> i64 {
        match self {
            Value::Int(i) => i,
            Value::Float(f) => f as i64,
            Value::Bool(b) => b as i64
        }
    }

    pub fn as_f32(self) -> f32 {
        match self {
            Value::Int(i) => i as f32,
            Value::Float(f) => f,
            Value::Bool(b) => if b { 1.0 } else { 0.0 }
        }
    }

    pub fn is_true(self) -> bool {
        match self {
            Value::Int(i) => i != 0,
            Value::Float(f) => f != 0.0,
            Value::Bool(b) => b
        }
    }

    /// Integer targets wrap integer values into range and saturate floats.
    pub fn cast(self, ty: ScalarType) -> Value {
        match ty {
            ScalarType::U8 => Value::Int(self.narrow(|i| i as u8 as i64, |f| f as u8 as i64)),
            ScalarType::U16 => Value::Int(self.narrow(|i| i as u16 as i64, |f| f as u16 as i64)),
            ScalarType::I32 => Value::Int(self.narrow(|i| i as i32 as i64, |f| f as i32 as i64)),
            ScalarType::F32 => Value::Float(self.as_f32()),
            ScalarType::Bool => Value::Bool(self.is_true())
        }
    }

    fn narrow<I, F>(self, int: I, float: F) -> i64
    where
        I: Fn(i64) -> i64,
        F: Fn(f32) -> i64
    {
        match self {
            Value::Int(i) => int(i),
            Value::Float(f) => float(f),
            Value::Bool(b) => b as i64
        }
    }

    /// Applies a binary op. Two integer (or bool) operands stay integer,
    /// anything involving a float is computed at f32.
    pub fn binary(op: BinOp, lhs: Value, rhs: Value) -> Value {
        match (lhs, rhs) {
            (Value::Float(_), _) | (_, Value::Float(_)) => {
                float_op(op, lhs.as_f32(), rhs.as_f32())
            },
            _ => int_op(op, lhs.as_i64(), rhs.as_i64())
        }
    }
}

fn int_op(op: BinOp, l: i64, r: i64) -> Value {
    match op {
        BinOp::Add => Value::Int(l.wrapping_add(r)),
        BinOp::Sub => Value::Int(l.wrapping_sub(r)),
        BinOp::Mul => Value::Int(l.wrapping_mul(r)),
        // Euclidean, so rounds down for positive divisors. Dividing by zero gives zero.
        BinOp::Div => Value::Int(if r == 0 { 0 } else { l.wrapping_div_euclid(r) }),
        BinOp::Min => Value::Int(l.min(r)),
        BinOp::Max => Value::Int(l.max(r)),
        BinOp::Lt => Value::Bool(l < r)
    }
}

fn float_op(op: BinOp, l: f32, r: f32) -> Value {
    match op {
        BinOp::Add => Value::Float(l + r),
        BinOp::Sub => Value::Float(l - r),
        BinOp::Mul => Value::Float(l * r),
        BinOp::Div => Value::Float(l / r),
        BinOp::Min => Value::Float(l.min(r)),
        BinOp::Max => Value::Float(l.max(r)),
        BinOp::Lt => Value::Bool(l < r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Value::*;

    #[test]
    fn test_integer_arithmetic_stays_integer() {
        assert_eq!(Value::binary(BinOp::Add, Int(200), Int(100)), Int(300));
        assert_eq!(Value::binary(BinOp::Mul, Int(2), Bool(true)), Int(2));
        assert_eq!(Value::binary(BinOp::Div, Int(510), Int(4)), Int(127));
    }

    #[test]
    fn test_integer_division_rounds_down_and_tolerates_zero() {
        assert_eq!(Value::binary(BinOp::Div, Int(-7), Int(2)), Int(-4));
        assert_eq!(Value::binary(BinOp::Div, Int(7), Int(0)), Int(0));
    }

    #[test]
    fn test_mixed_arithmetic_promotes_to_float() {
        assert_eq!(Value::binary(BinOp::Mul, Int(3), Float(1.5)), Float(4.5));
        assert_eq!(Value::binary(BinOp::Min, Float(382.5), Float(255.0)), Float(255.0));
        assert_eq!(Value::binary(BinOp::Lt, Float(7.9), Int(8)), Bool(true));
        assert_eq!(Value::binary(BinOp::Lt, Int(8), Float(8.0)), Bool(false));
    }

    #[test]
    fn test_casts() {
        assert_eq!(Int(256).cast(ScalarType::U8), Int(0));
        assert_eq!(Int(-1).cast(ScalarType::U16), Int(65535));
        assert_eq!(Float(254.9).cast(ScalarType::U8), Int(254));
        assert_eq!(Float(1000.0).cast(ScalarType::U8), Int(255));
        assert_eq!(Float(-3.5).cast(ScalarType::I32), Int(-3));
        assert_eq!(Int(3).cast(ScalarType::F32), Float(3.0));
        assert_eq!(Int(0).cast(ScalarType::Bool), Bool(false));
    }
}
