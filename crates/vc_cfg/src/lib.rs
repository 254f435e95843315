#![doc = include_str!("../README.md")]
#![no_std]

// -----------------------------------------------------------------------------
// Pass-through macros

/// Always expands the provided code.
///
/// Usually reached through an alias created by [`define_alias!`].
///
/// ```
/// vc_cfg::enabled! {
///     let value = 1;
/// }
/// assert_eq!(value, 1);
///
/// let flag = vc_cfg::enabled! { if { true } else { false } };
/// assert!(flag);
/// ```
#[macro_export]
macro_rules! enabled {
    () => { true };
    (if { $($p:tt)* } else { $($n:tt)* }) => { $($p)* };
    ($($p:tt)*) => { $($p)* };
}

/// Never expands the provided code.
///
/// The `if {} else {}` form expands the `else` branch instead.
///
/// ```
/// let flag = vc_cfg::disabled! { if { true } else { false } };
/// assert!(!flag);
/// ```
#[macro_export]
macro_rules! disabled {
    () => { false };
    (if { $($p:tt)* } else { $($n:tt)* }) => { $($n)* };
    ($($p:tt)*) => {};
}

// -----------------------------------------------------------------------------
// switch

/// Selects the first arm whose `#[cfg(..)]` predicate holds.
///
/// `_ => { .. }` is the fallback arm.
///
/// ```
/// vc_cfg::switch! {
///     #[cfg(any())] => {
///         const NAME: &str = "never";
///     }
///     _ => {
///         const NAME: &str = "fallback";
///     }
/// }
///
/// fn main() {
///     assert_eq!(NAME, "fallback");
/// }
/// ```
#[macro_export]
macro_rules! switch {
    ({ $($tt:tt)* }) => {{
        $crate::switch! { $($tt)* }
    }};
    (_ => { $($output:tt)* }) => {
        $($output)*
    };
    (
        #[cfg($cfg:meta)] => $output:tt
        $($( $rest:tt )+)?
    ) => {
        #[cfg($cfg)]
        $crate::switch! { _ => $output }
        #[cfg(not($cfg))]
        $crate::switch! { $($( $rest )+)? }
    };
    () => {};
}

// -----------------------------------------------------------------------------
// define_alias

/// Defines one macro per `cfg` predicate, re-exporting either
/// [`enabled!`] or [`disabled!`] under the given name.
///
/// ```
/// mod cfg {
///     vc_cfg::define_alias! {
///         #[cfg(all())] => always,
///         #[cfg(any())] => never,
///     }
/// }
///
/// fn main() {
///     let mut hits = 0;
///     cfg::always! { hits += 1; }
///     cfg::never! { hits += 10; }
///     assert_eq!(hits, 1);
/// }
/// ```
#[macro_export]
macro_rules! define_alias {
    (
        #[cfg($meta:meta)] => $p:ident,
    ) => {
        $crate::define_alias! {
            #[cfg($meta)] => { $p }
        }
    };
    (
        #[cfg($meta:meta)] => $p:ident
        $(, $( $rest:tt )+)?
    ) => {
        $crate::define_alias! {
            #[cfg($meta)] => { $p }
            $(
                $($rest)+
            )?
        }
    };
    (
        #[cfg($meta:meta)] => {
            $(#[$p_meta:meta])*
            $p:ident
        }
        $($rest:tt)*
    ) => {
        $crate::switch! {
            #[cfg($meta)] => {
                $(#[$p_meta])*
                #[doc = concat!("Expands the code because `", stringify!($meta), "` holds.")]
                #[allow(unused_imports)]
                pub use $crate::enabled as $p;
            }
            _ => {
                $(#[$p_meta])*
                #[doc = concat!("Drops the code because `", stringify!($meta), "` does not hold.")]
                #[allow(unused_imports)]
                pub use $crate::disabled as $p;
            }
        }

        $crate::define_alias! {
            $($rest)*
        }
    };
    () => {};
}
