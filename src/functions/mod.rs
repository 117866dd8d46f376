//! Scalar functions applied element-wise by vector operations.
//!
//! A `BinaryFunction` combines a vector's own value with an operand's value;
//! a `UnaryFunction` maps a single value. Plain closures implement both traits,
//! but only the stock operators in this module can declare capabilities.

use bitflags::bitflags;

bitflags! {
    /// Algebraic properties a binary function may declare.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct FunctionFlags: u32 {
        /// `f(a, 0.0) == a` for every `a`. Lets `assign_with` visit only the
        /// non-zero entries of the operand.
        const RIGHT_ZERO_IDENTITY = 0b0000_0001;
    }
}

/// `f(a, b) -> c`, with `a` taken from the vector being assigned.
pub trait BinaryFunction {
    fn apply(&self, a: f64, b: f64) -> f64;

    /// Declared properties. Declaring a flag the function does not satisfy
    /// makes sparse-aware callers produce wrong results.
    fn flags(&self) -> FunctionFlags {
        FunctionFlags::empty()
    }
}

/// `f(x) -> y`.
pub trait UnaryFunction {
    fn apply(&self, x: f64) -> f64;
}

impl<F: Fn(f64, f64) -> f64> BinaryFunction for F {
    fn apply(&self, a: f64, b: f64) -> f64 {
        self(a, b)
    }
}

impl<F: Fn(f64) -> f64> UnaryFunction for F {
    fn apply(&self, x: f64) -> f64 {
        self(x)
    }
}

/// A closure with explicitly declared flags.
///
/// ```
/// use mahvec::functions::{BinaryFunction, Declared, FunctionFlags};
/// let saturating = Declared::new(|a: f64, b: f64| (a + b).min(10.0), FunctionFlags::empty());
/// assert_eq!(saturating.apply(8.0, 5.0), 10.0);
/// ```
pub struct Declared<F> {
    f: F,
    flags: FunctionFlags,
}

impl<F: Fn(f64, f64) -> f64> Declared<F> {
    pub fn new(f: F, flags: FunctionFlags) -> Self {
        Self { f, flags }
    }
}

impl<F: Fn(f64, f64) -> f64> BinaryFunction for Declared<F> {
    fn apply(&self, a: f64, b: f64) -> f64 {
        (self.f)(a, b)
    }
    fn flags(&self) -> FunctionFlags {
        self.flags
    }
}

/// `a + b`
#[derive(Debug, Clone, Copy, Default)]
pub struct Plus;

/// `a - b`
#[derive(Debug, Clone, Copy, Default)]
pub struct Minus;

/// `a * b`
#[derive(Debug, Clone, Copy, Default)]
pub struct Times;

/// `a / b`
#[derive(Debug, Clone, Copy, Default)]
pub struct Div;

/// `max(a, b)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Max;

/// `min(a, b)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Min;

/// `a + scale * b`, the accumulate operator behind `axpy`-style updates.
#[derive(Debug, Clone, Copy)]
pub struct PlusMult {
    pub scale: f64,
}

impl PlusMult {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }
}

impl BinaryFunction for Plus {
    fn apply(&self, a: f64, b: f64) -> f64 {
        a + b
    }
    fn flags(&self) -> FunctionFlags {
        FunctionFlags::RIGHT_ZERO_IDENTITY
    }
}

impl BinaryFunction for Minus {
    fn apply(&self, a: f64, b: f64) -> f64 {
        a - b
    }
    fn flags(&self) -> FunctionFlags {
        FunctionFlags::RIGHT_ZERO_IDENTITY
    }
}

impl BinaryFunction for PlusMult {
    fn apply(&self, a: f64, b: f64) -> f64 {
        a + self.scale * b
    }
    fn flags(&self) -> FunctionFlags {
        // a + scale * 0 == a only for finite scale
        if self.scale.is_finite() {
            FunctionFlags::RIGHT_ZERO_IDENTITY
        } else {
            FunctionFlags::empty()
        }
    }
}

impl BinaryFunction for Times {
    fn apply(&self, a: f64, b: f64) -> f64 {
        a * b
    }
}

impl BinaryFunction for Div {
    fn apply(&self, a: f64, b: f64) -> f64 {
        a / b
    }
}

impl BinaryFunction for Max {
    fn apply(&self, a: f64, b: f64) -> f64 {
        a.max(b)
    }
}

impl BinaryFunction for Min {
    fn apply(&self, a: f64, b: f64) -> f64 {
        a.min(b)
    }
}

/// `|x|`
#[derive(Debug, Clone, Copy, Default)]
pub struct Abs;

/// `-x`
#[derive(Debug, Clone, Copy, Default)]
pub struct Negate;

/// `x * x`
#[derive(Debug, Clone, Copy, Default)]
pub struct Square;

/// `sqrt(x)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Sqrt;

/// `x`
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl UnaryFunction for Abs {
    fn apply(&self, x: f64) -> f64 {
        x.abs()
    }
}

impl UnaryFunction for Negate {
    fn apply(&self, x: f64) -> f64 {
        -x
    }
}

impl UnaryFunction for Square {
    fn apply(&self, x: f64) -> f64 {
        x * x
    }
}

impl UnaryFunction for Sqrt {
    fn apply(&self, x: f64) -> f64 {
        x.sqrt()
    }
}

impl UnaryFunction for Identity {
    fn apply(&self, x: f64) -> f64 {
        x
    }
}
