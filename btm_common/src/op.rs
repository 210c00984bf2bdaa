/// Implements the standard arithmetic traits for a single-field newtype.
///
/// `op!(binary Money, Add, add)` expands to `impl Add for Money`, delegating to the inner type.
/// `unary` and `inplace` cover `Neg`-style and `SubAssign`-style traits respectively. The trait
/// must be in scope at the expansion site.
#[macro_export]
macro_rules! op {
    (binary $ty:ident, $trait:ident, $fn:ident) => {
        impl $trait for $ty {
            type Output = Self;

            fn $fn(self, rhs: Self) -> Self::Output {
                Self(self.0.$fn(rhs.0))
            }
        }
    };

    (inplace $ty:ident, $trait:ident, $fn:ident) => {
        impl $trait for $ty {
            fn $fn(&mut self, rhs: Self) {
                self.0.$fn(rhs.0)
            }
        }
    };

    (unary $ty:ident, $trait:ident, $fn:ident) => {
        impl $trait for $ty {
            type Output = Self;

            fn $fn(self) -> Self::Output {
                Self(self.0.$fn())
            }
        }
    };
}
