//! Pretty printing utilities.

use core::fmt::{Display, Error as FmtError, Formatter};

/// A slice type that implements the `Display` trait to pretty-print the
/// contained elements, e.g. connection hops or negotiated versions in log
/// lines.
pub struct PrettySlice<'a, T>(pub &'a [T]);

impl<'a, T: Display> Display for PrettySlice<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "[ ")?;
        let mut elements = self.0.iter().peekable();
        while let Some(element) = elements.next() {
            write!(f, "{element}")?;
            if elements.peek().is_some() {
                write!(f, ", ")?;
            }
        }
        write!(f, " ]")
    }
}
