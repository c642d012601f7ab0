use std::fmt;

pub trait Weight: Copy + Ord + fmt::Debug + fmt::Display {
    fn zero() -> Self;
    fn one() -> Self;
    fn checked_add(self, other: Self) -> Option<Self>;
}

macro_rules! impl_int_weight {
    ($ty:ty) => {
        impl Weight for $ty {
            fn zero() -> Self {
                0
            }

            fn one() -> Self {
                1
            }

            fn checked_add(self, other: Self) -> Option<Self> {
                <$ty>::checked_add(self, other)
            }
        }
    };
}

impl_int_weight!(i8);
impl_int_weight!(i16);
impl_int_weight!(i32);
impl_int_weight!(i64);
impl_int_weight!(u8);
impl_int_weight!(u16);
impl_int_weight!(u32);
impl_int_weight!(u64);
impl_int_weight!(isize);
impl_int_weight!(usize);

/// Distance of a vertex from the source of a path search.
///
/// A vertex that was never reached has no numeric distance at all, so no
/// arithmetic is ever performed on the "unreached" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Distance<W> {
    #[default]
    Unreached,
    Reached(W),
}

impl<W: Copy> Distance<W> {
    pub fn is_reached(&self) -> bool {
        matches!(self, Distance::Reached(_))
    }

    pub fn value(&self) -> Option<W> {
        match self {
            Distance::Reached(dist) => Some(*dist),
            Distance::Unreached => None,
        }
    }
}

impl<W> From<Distance<W>> for Option<W> {
    fn from(dist: Distance<W>) -> Self {
        match dist {
            Distance::Reached(dist) => Some(dist),
            Distance::Unreached => None,
        }
    }
}

impl<W: fmt::Display> fmt::Display for Distance<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Reached(dist) => write!(f, "{dist}"),
            Distance::Unreached => f.write_str("unreached"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_add_reports_overflow() {
        assert_eq!(Weight::checked_add(i32::MAX, 1), None);
        assert_eq!(Weight::checked_add(2i64, 3), Some(5));
    }

    #[test]
    fn unreached_has_no_value() {
        assert_eq!(Distance::<i64>::Unreached.value(), None);
        assert_eq!(Option::<i64>::from(Distance::Reached(7)), Some(7));
        assert_eq!(Distance::<i64>::default(), Distance::Unreached);
    }

    #[test]
    fn reached_state() {
        assert!(Distance::Reached(0i64).is_reached());
        assert!(!Distance::<i64>::Unreached.is_reached());
        assert_eq!(Distance::Reached(-3i64).to_string(), "-3");
        assert_eq!(Distance::<i64>::Unreached.to_string(), "unreached");
    }
}
