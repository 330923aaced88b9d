use core::fmt;

/// A segment construction error caused by invalid keyframes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error<T> {
    /// The keyframe at `index` (0 to 3) is not a unit quaternion.
    NotNormalized { index: usize, norm: T },
}

impl<T: fmt::Display> fmt::Display for Error<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotNormalized { index, norm } => {
                write!(f, "keyframe q{} is not normalized (norm = {})", index, norm)
            }
        }
    }
}
