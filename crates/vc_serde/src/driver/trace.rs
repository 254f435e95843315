//! Breadcrumbs of serialized names, kept while the `debug` feature is on.
//!
//! Each driver pushes the field it dispatches and pops it on success, so
//! after a failure the path still points at the innermost field.

use crate::error::{Direction, Error};

crate::cfg::debug! {
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use core::fmt;

    #[derive(Default)]
    struct FieldPath {
        names: Vec<String>,
    }

    impl FieldPath {
        const fn new() -> Self {
            Self { names: Vec::new() }
        }
    }

    impl fmt::Display for FieldPath {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            for (index, name) in self.names.iter().enumerate() {
                if index > 0 {
                    f.write_str(".")?;
                }
                f.write_str(name)?;
            }
            Ok(())
        }
    }

    std::thread_local! {
        static FIELD_PATH: RefCell<FieldPath> = const { RefCell::new(FieldPath::new()) };
    }
}

#[inline]
pub(super) fn enter_field(name: &str) {
    crate::cfg::debug! {
        FIELD_PATH.with_borrow_mut(|path| path.names.push(String::from(name)));
    }
    let _ = name;
}

#[inline]
pub(super) fn leave_field() {
    crate::cfg::debug! {
        FIELD_PATH.with_borrow_mut(|path| path.names.pop());
    }
}

/// Resets the path at the start of a top-level call.
#[inline]
pub(crate) fn clear_trace() {
    crate::cfg::debug! {
        FIELD_PATH.with_borrow_mut(|path| path.names.clear());
    }
}

/// Logs a fatal error, with the failing field path when it is tracked.
pub(crate) fn report_failure(direction: Direction, err: &Error) {
    crate::cfg::debug! {
        if {
            FIELD_PATH.with_borrow(|path| log::debug!("{direction} failed at `{path}`: {err}"));
        } else {
            log::debug!("{direction} failed: {err}");
        }
    }
}
