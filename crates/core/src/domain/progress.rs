/// A user's advancement counter. The server stores whatever the client sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Progress(i32);

impl Progress {
    pub const ZERO: Progress = Progress(0);

    pub fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for Progress {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Progress;

    #[test]
    fn zero_is_default() {
        assert_eq!(Progress::default(), Progress::ZERO);
    }

    #[test]
    fn any_integer_is_kept() {
        assert_eq!(Progress::new(-3).value(), -3);
        assert_eq!(Progress::from(42).value(), 42);
    }
}
