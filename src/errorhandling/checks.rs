// Copyright (c) 2026
// License: MIT

/// Macro to check that a double is finite.
macro_rules! check_finite_double {
    ($s:ident.$x:ident) => {
        ensure!(
            $s.$x.is_finite(),
            "{0} turned non-finite! Got: {0} = {1}",
            stringify!($x),
            $s.$x
        )
    };
}

/// Macro to check that a list of doubles is finite.
macro_rules! check_finite_multiple_doubles {
    ($($s:ident.$x:ident),*) => {
       $(check_finite_double!($s.$x);)*
    };
}

/// Macro to check that the elements of an `Array1<f64>` are finite.
macro_rules! check_finite_array1 {
    ($s:ident.$x:ident) => {
        ensure!(
            $s.$x.iter().all(|y| y.is_finite()),
            "{0} turned non-finite! Got: {0} = {1}",
            stringify!($x),
            $s.$x
        )
    };
}

/// Macro to check that an `Array1<f64>` is non-empty.
macro_rules! check_nonempty_array1 {
    ($s:ident.$x:ident) => {
        ensure!(!$s.$x.is_empty(), "{0} is empty!", stringify!($x))
    };
}

/// Macro to check that an `Array1<f64>` is non-empty and its elements are finite.
macro_rules! check_nonempty_finite_array1 {
    ($s:ident.$x:ident) => {
        check_nonempty_array1!($s.$x);
        check_finite_array1!($s.$x);
    };
}

/// Macro to check that, for each `Array1<f64>` in a list, it is non-empty and its elements are finite.
macro_rules! check_nonempty_finite_multiple_array1 {
    ($($s:ident.$x:ident),*) => {
        $(check_nonempty_finite_array1!($s.$x);)*
    };
}

/// Macro to check that every element of an `Array1<f64>` is strictly positive.
macro_rules! check_positive_array1 {
    ($s:ident.$x:ident) => {
        ensure!(
            $s.$x.iter().all(|y| *y > 0.0),
            "{0} must be strictly positive! Got: {0} = {1}",
            stringify!($x),
            $s.$x
        )
    };
}
