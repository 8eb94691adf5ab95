use crate::error::{report, SequenceError};
use crate::sequence::Sequence;
use std::fmt::{self, Display, Formatter};
use std::io::{self, Write};

impl<T: Display> Sequence<T> {
    /// Write the values to `out` separated by single spaces, front to back if
    /// `ascending` and back to front otherwise, followed by `terminator`.
    /// Returns the number of values written.
    ///
    /// An empty sequence reports [`SequenceError::Empty`] to the diagnostics
    /// sink, writes nothing and returns `Ok(0)`.
    ///
    /// # Errors
    ///
    /// Only the I/O errors of `out`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let sequence = Sequence::from([1, 2, 3]);
    /// let mut out = Vec::new();
    ///
    /// assert_eq!(sequence.write_values(&mut out, true, '\n').unwrap(), 3);
    /// assert_eq!(sequence.write_values(&mut out, false, '|').unwrap(), 3);
    /// assert_eq!(out, b"1 2 3\n3 2 1|");
    ///
    /// let empty = Sequence::<i32>::new();
    /// assert_eq!(empty.write_values(&mut out, true, '\n').unwrap(), 0);
    /// assert_eq!(out, b"1 2 3\n3 2 1|");
    /// ```
    pub fn write_values<W>(&self, out: &mut W, ascending: bool, terminator: char) -> io::Result<usize>
    where
        W: Write + ?Sized,
    {
        if self.is_empty() {
            report(SequenceError::Empty);
            return Ok(0);
        }
        if ascending {
            write_separated(out, self.iter())?;
        } else {
            write_separated(out, self.iter().rev())?;
        }
        write!(out, "{}", terminator)?;
        Ok(self.len)
    }

    /// [`Sequence::write_values`] to the standard output. A failing write is
    /// reported to the diagnostics sink.
    pub fn print(&self, ascending: bool, terminator: char) {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let result = self
            .write_values(&mut out, ascending, terminator)
            .and_then(|_| out.flush());
        if let Err(error) = result {
            #[cfg(feature = "diagnostics")]
            tracing::error!(target: "linked_sequence", %error, "failed to print sequence");
            #[cfg(not(feature = "diagnostics"))]
            drop(error);
        }
    }
}

fn write_separated<'a, W, T, I>(out: &mut W, values: I) -> io::Result<()>
where
    W: Write + ?Sized,
    T: Display + 'a,
    I: Iterator<Item = &'a T>,
{
    for (i, value) in values.enumerate() {
        if i > 0 {
            out.write_all(b" ")?;
        }
        write!(out, "{}", value)?;
    }
    Ok(())
}

/// Front to back, separated by single spaces.
impl<T: Display> Display for Sequence<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            Display::fmt(value, f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Sequence;
    use std::io::{self, Write};

    fn written<T: std::fmt::Display>(sequence: &Sequence<T>, ascending: bool, terminator: char) -> String {
        let mut out = Vec::new();
        let count = sequence.write_values(&mut out, ascending, terminator).unwrap();
        assert_eq!(count, sequence.len());
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn write_both_directions() {
        let sequence = Sequence::from([1, 3, 4, 5, 5, 1, 3]);
        assert_eq!(written(&sequence, true, '\n'), "1 3 4 5 5 1 3\n");
        assert_eq!(written(&sequence, false, ';'), "3 1 5 5 4 3 1;");
        assert_eq!(written(&Sequence::from(["x"]), true, '.'), "x.");
    }

    #[test]
    fn write_empty_writes_nothing() {
        assert_eq!(written(&Sequence::<i32>::new(), true, '\n'), "");

        let mut out = Vec::new();
        assert_eq!(Sequence::<i32>::new().write_values(&mut out, false, ';').unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn write_propagates_io_errors() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        let error = Sequence::from([1])
            .write_values(&mut Broken, true, '\n')
            .unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn display_is_space_separated() {
        assert_eq!(Sequence::from([1, 2, 3]).to_string(), "1 2 3");
        assert_eq!(Sequence::<i32>::new().to_string(), "");
    }
}
