//! Axes and poles.

use std::{
    ops::Neg,
    convert::TryFrom,
};


macro_rules! axis_enum {
    (
        $(#[$attr:meta])*
        $name:ident,
        $num_constant:ident = $num:expr,
        $per_name:ident,
        $all_constant:ident,
        ($(
            $variant:ident,
        )*),
    )=>{
        $(#[$attr])*
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(u8)]
        pub enum $name {$(
            $variant,
        )*}

        pub const $num_constant: usize = $num;

        /// Fixed-size table with one entry per variant, indexable by variant.
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        pub struct $per_name<T>(pub [T; $num_constant]);

        pub const $all_constant: $per_name<$name> = $per_name([$(
            $name::$variant,
        )*]);

        impl<T> ::std::ops::Index<$name> for $per_name<T> {
            type Output = T;

            fn index(&self, i: $name) -> &Self::Output {
                &self.0[i as usize]
            }
        }

        impl<T> ::std::ops::IndexMut<$name> for $per_name<T> {
            fn index_mut(&mut self, i: $name) -> &mut Self::Output {
                &mut self.0[i as usize]
            }
        }

        impl<T: Clone> $per_name<T> {
            pub fn repeat(val: T) -> Self {
                $per_name([$(
                    #[allow(non_snake_case)]
                    {
                        let $variant = ();
                        let _ = $variant;
                        val.clone()
                    },
                )*])
            }
        }

        impl<T> $per_name<T> {
            pub fn map<B, F>(self, f: F) -> $per_name<B>
            where
                F: FnMut(T) -> B,
            {
                $per_name(self.0.map(f))
            }

            pub fn iter(&self) -> ::std::slice::Iter<'_, T> {
                self.0.iter()
            }
        }

        impl<T> IntoIterator for $per_name<T> {
            type Item = T;
            type IntoIter = <[T; $num_constant] as IntoIterator>::IntoIter;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }
    };
}

pub(crate) use axis_enum;

axis_enum!(
    /// One of the three spatial axes.
    Axis,
    NUM_AXES = 3,
    PerAxis,
    AXES,
    (
        X,
        Y,
        Z,
    ),
);

impl Axis {
    /// The two axes other than self, in ascending order.
    pub const fn other_axes(self) -> [Axis; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::X, Axis::Z],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }
}

macro_rules! scalarlike_axis_enum {
    (
        $(#[$attr:meta])*
        $name:ident,
        $num_constant:ident = $num:expr,
        $per_name:ident,
        $all_constant:ident,
        ($(
            $pos:ident
                = ($int:expr)
                = -$neg:ident,
        )*),
    )=>{
        axis_enum!(
            $(#[$attr])*
            $name,
            $num_constant = $num,
            $per_name,
            $all_constant,
            ($(
                $pos,
            )*),
        );

        impl $name {
            pub const fn to_int(self) -> i32 {
                match self {$(
                    $name::$pos => $int,
                )*}
            }

            pub const fn from_int(int: i32) -> Option<Self> {
                match int {
                    $(
                        $int => Some($name::$pos),
                    )*
                    _ => None
                }
            }

            pub const fn neg(self) -> Self {
                match self {$(
                    $name::$pos => $name::$neg,
                )*}
            }
        }

        impl From<$name> for i32 {
            fn from(n: $name) -> i32 {
                n.to_int()
            }
        }

        impl From<$name> for f64 {
            fn from(n: $name) -> f64 {
                n.to_int() as f64
            }
        }

        impl TryFrom<i32> for $name {
            type Error = ();

            fn try_from(int: i32) -> Result<Self, ()> {
                Self::from_int(int).ok_or(())
            }
        }

        impl Neg for $name {
            type Output = Self;

            fn neg(self) -> Self {
                $name::neg(self)
            }
        }
    };
}

scalarlike_axis_enum!(
    /// Direction along an axis.
    Pole,
    NUM_POLES = 2,
    PerPole,
    POLES,
    (
        Neg = (-1) = -Pos,
        Pos = (1) = -Neg,
    ),
);
