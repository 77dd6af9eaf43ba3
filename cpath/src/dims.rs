use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use paste::paste;
use serde::{Deserialize, Serialize};

/// Grid coordinate or grid size, always in `(row, column)` order.
///
/// Serialized as a two element array, `[row, column]`, which is the format used by the request and
/// response contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Dims(pub i32, pub i32);

impl Dims {
    pub const ZERO: Dims = Dims(0, 0);

    pub fn all_positive(self) -> bool {
        self.0 > 0 && self.1 > 0
    }

    pub fn all_non_negative(self) -> bool {
        self.0 >= 0 && self.1 >= 0
    }

    pub fn abs_sum(self) -> i32 {
        self.0.abs() + self.1.abs()
    }

    /// Checks whether `self` lies inside the rectangle `[0, size.0) x [0, size.1)`.
    pub fn is_within(self, size: Dims) -> bool {
        self.all_non_negative() && self.0 < size.0 && self.1 < size.1
    }

    pub fn manhattan(self, other: Dims) -> i32 {
        (self - other).abs_sum()
    }

    pub fn euclidean(self, other: Dims) -> f64 {
        let Dims(dr, dc) = self - other;
        f64::from(dr).hypot(f64::from(dc))
    }

    /// Both coordinates odd, which makes it a traversable cell of a generated maze.
    pub fn is_path_cell(self) -> bool {
        self.0 % 2 == 1 && self.1 % 2 == 1
    }

    /// Position halfway between two cells, rounded towards `self`.
    pub fn midpoint(self, other: Dims) -> Dims {
        Dims((self.0 + other.0) / 2, (self.1 + other.1) / 2)
    }

    /// Iterates all positions of the rectangle `[from, to)`, row by row.
    pub fn iter_fill(from: Dims, to: Dims) -> impl Iterator<Item = Dims> {
        (from.0..to.0).flat_map(move |row| (from.1..to.1).map(move |col| Dims(row, col)))
    }
}

macro_rules! impl_op {
    ($trait:ident, $op:ident) => {
        impl $trait for Dims {
            type Output = Dims;

            #[inline(always)]
            fn $op(self, other: Dims) -> Dims {
                Dims(self.0.$op(other.0), self.1.$op(other.1))
            }
        }

        impl $trait<i32> for Dims {
            type Output = Dims;

            #[inline(always)]
            fn $op(self, other: i32) -> Dims {
                Dims(self.0.$op(other), self.1.$op(other))
            }
        }

        paste! {
            impl [<$trait Assign>] for Dims {
                #[inline(always)]
                fn [<$op _assign>](&mut self, other: Dims) {
                    *self = self.$op(other);
                }
            }

            impl [<$trait Assign>]<i32> for Dims {
                #[inline(always)]
                fn [<$op _assign>](&mut self, other: i32) {
                    *self = self.$op(other);
                }
            }
        }
    };
}

impl_op!(Add, add);
impl_op!(Sub, sub);
impl_op!(Mul, mul);
impl_op!(Div, div);

impl From<(i32, i32)> for Dims {
    fn from((row, col): (i32, i32)) -> Self {
        Dims(row, col)
    }
}

impl From<Dims> for (i32, i32) {
    fn from(dims: Dims) -> Self {
        (dims.0, dims.1)
    }
}

impl From<[i32; 2]> for Dims {
    fn from(arr: [i32; 2]) -> Self {
        Dims(arr[0], arr[1])
    }
}

impl From<Dims> for [i32; 2] {
    fn from(dims: Dims) -> Self {
        [dims.0, dims.1]
    }
}
