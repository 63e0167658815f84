/// Decides whether an element of the original sequence matches one of the
/// revised sequence.
///
/// Implemented for every `Fn(&T, &T) -> bool`, so a closure can be passed
/// wherever an equalizer is expected.
pub trait Equalizer<T: ?Sized> {
    fn equals(&self, original: &T, revised: &T) -> bool;
}

/// Plain `==`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DefaultEqualizer;

impl<T: PartialEq + ?Sized> Equalizer<T> for DefaultEqualizer {
    fn equals(&self, original: &T, revised: &T) -> bool {
        original == revised
    }
}

impl<T: ?Sized, F> Equalizer<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn equals(&self, original: &T, revised: &T) -> bool {
        self(original, revised)
    }
}

/// Compares text after trimming both ends and collapsing inner whitespace
/// runs to a single space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IgnoreWhitespace;

impl<S: AsRef<str> + ?Sized> Equalizer<S> for IgnoreWhitespace {
    fn equals(&self, original: &S, revised: &S) -> bool {
        let mut a = original.as_ref().split_whitespace();
        let mut b = revised.as_ref().split_whitespace();
        loop {
            match (a.next(), b.next()) {
                (None, None) => return true,
                (Some(x), Some(y)) if x == y => {}
                _ => return false,
            }
        }
    }
}
