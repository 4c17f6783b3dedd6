//! Compile-time shapes of a method's argument tuple.
//!
//! The description builder walks the argument tuple one position at
//! a time. Each position is a marker type ([`P0`] through [`P10`]);
//! [`ArgAt`] projects the value at a position and names the next one,
//! and [`Complete`] marks the position after the last argument.
//!
//! These traits are implemented for tuples of up to ten elements. A
//! variadic parameter is the trailing `Vec<T>` element of the tuple.

use core::fmt;
use paste::paste;

/// The argument tuple of a mocked method.
pub trait Args: 'static {
    /// Number of elements in the tuple.
    const ARITY: usize;

    /// Renders each argument with its `Debug` implementation.
    fn render(&self) -> Vec<String>;
}

/// Projection of the argument at position `P`.
pub trait ArgAt<P>: Args {
    /// The type of the argument at `P`.
    type Value: fmt::Debug + 'static;
    /// The position after `P`.
    type Next;
    /// 0-based index of `P`.
    const POSITION: usize;

    fn arg(&self) -> &Self::Value;
}

/// Implemented when every argument before `P` has been bound.
pub trait Complete<P>: Args {}

/// Positions after the first one.
pub trait Subsequent {}

macro_rules! positions {
    ($($pos:ident),*) => {
        $(
            #[doc = concat!("Argument position marker `", stringify!($pos), "`.")]
            #[derive(Debug)]
            pub enum $pos {}
        )*
    };
}

positions! { P0, P1, P2, P3, P4, P5, P6, P7, P8, P9, P10 }

impl Subsequent for P1 {}
impl Subsequent for P2 {}
impl Subsequent for P3 {}
impl Subsequent for P4 {}
impl Subsequent for P5 {}
impl Subsequent for P6 {}
impl Subsequent for P7 {}
impl Subsequent for P8 {}
impl Subsequent for P9 {}

macro_rules! count {
    () => { 0 };
    ($head:ident $($tail:ident)*) => { 1 + count!($($tail)*) };
}

// (A, B) => P2, 0 A P0 P1, 1 B P1 P2
//
// implements Args and Complete<P2> for (A, B), and ArgAt<P0>,
// ArgAt<P1> for each listed position
macro_rules! tuple {
    (@args ($($T:ident),*) $done:ident) => {
        paste! {
            impl<$($T: fmt::Debug + 'static),*> Args for ($($T,)*) {
                const ARITY: usize = count!($($T)*);

                fn render(&self) -> Vec<String> {
                    let ($([<$T:lower>],)*) = self;
                    vec![$(format!("{:?}", [<$T:lower>])),*]
                }
            }

            impl<$($T: fmt::Debug + 'static),*> Complete<$done> for ($($T,)*) {}
        }
    };
    (@at ($($T:ident),*) $idx:tt $value:ident $pos:ident $next:ident) => {
        impl<$($T: fmt::Debug + 'static),*> ArgAt<$pos> for ($($T,)*) {
            type Value = $value;
            type Next = $next;
            const POSITION: usize = $idx;

            fn arg(&self) -> &$value {
                &self.$idx
            }
        }
    };
    ($types:tt => $done:ident $(, $idx:tt $value:ident $pos:ident $next:ident)*) => {
        tuple! { @args $types $done }
        $(tuple! { @at $types $idx $value $pos $next })*
    };
}

tuple! { () => P0 }
tuple! { (A) => P1, 0 A P0 P1 }
tuple! { (A, B) => P2, 0 A P0 P1, 1 B P1 P2 }
tuple! { (A, B, C) => P3, 0 A P0 P1, 1 B P1 P2, 2 C P2 P3 }
tuple! { (A, B, C, D) => P4, 0 A P0 P1, 1 B P1 P2, 2 C P2 P3, 3 D P3 P4 }
tuple! {
    (A, B, C, D, E) => P5,
    0 A P0 P1,
    1 B P1 P2,
    2 C P2 P3,
    3 D P3 P4,
    4 E P4 P5
}
tuple! {
    (A, B, C, D, E, F) => P6,
    0 A P0 P1,
    1 B P1 P2,
    2 C P2 P3,
    3 D P3 P4,
    4 E P4 P5,
    5 F P5 P6
}
tuple! {
    (A, B, C, D, E, F, G) => P7,
    0 A P0 P1,
    1 B P1 P2,
    2 C P2 P3,
    3 D P3 P4,
    4 E P4 P5,
    5 F P5 P6,
    6 G P6 P7
}
tuple! {
    (A, B, C, D, E, F, G, H) => P8,
    0 A P0 P1,
    1 B P1 P2,
    2 C P2 P3,
    3 D P3 P4,
    4 E P4 P5,
    5 F P5 P6,
    6 G P6 P7,
    7 H P7 P8
}
tuple! {
    (A, B, C, D, E, F, G, H, I) => P9,
    0 A P0 P1,
    1 B P1 P2,
    2 C P2 P3,
    3 D P3 P4,
    4 E P4 P5,
    5 F P5 P6,
    6 G P6 P7,
    7 H P7 P8,
    8 I P8 P9
}
tuple! {
    (A, B, C, D, E, F, G, H, I, J) => P10,
    0 A P0 P1,
    1 B P1 P2,
    2 C P2 P3,
    3 D P3 P4,
    4 E P4 P5,
    5 F P5 P6,
    6 G P6 P7,
    7 H P7 P8,
    8 I P8 P9,
    9 J P9 P10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position<P, I: ArgAt<P>>(_: &I) -> usize {
        I::POSITION
    }

    #[test]
    fn arity_counts_every_element() {
        assert_eq!(<() as Args>::ARITY, 0);
        assert_eq!(<(u8,) as Args>::ARITY, 1);
        assert_eq!(<(u8, String, Vec<i32>) as Args>::ARITY, 3);
    }

    #[test]
    fn renders_each_argument() {
        let args = (5, "foo".to_string(), vec![1, 2]);
        assert_eq!(args.render(), vec!["5", "\"foo\"", "[1, 2]"]);
        assert!(().render().is_empty());
    }

    #[test]
    fn projects_positions() {
        let args = (1_u8, "two", 3.0_f64);
        assert_eq!(*ArgAt::<P0>::arg(&args), 1);
        assert_eq!(*ArgAt::<P1>::arg(&args), "two");
        assert_eq!(position::<P2, _>(&args), 2);
    }

    #[test]
    fn ten_arguments() {
        let args = (0_u8, 1_u16, 2_u32, 3_u64, 4_i8, 5_i16, 6_i32, 7_i64, "eight", vec![9]);
        assert_eq!(<(u8, u8, u8, u8, u8, u8, u8, u8, u8, u8) as Args>::ARITY, 10);
        assert_eq!(*ArgAt::<P7>::arg(&args), 7_i64);
        assert_eq!(*ArgAt::<P9>::arg(&args), vec![9]);
        assert_eq!(position::<P9, _>(&args), 9);
        assert_eq!(args.render()[8], "\"eight\"");
    }
}
