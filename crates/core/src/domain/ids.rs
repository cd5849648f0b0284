use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! define_id_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(i32);

        impl $name {
            pub fn new(value: i32) -> Self {
                Self(value)
            }

            pub fn value(self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i32>().map(Self)
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.value()
            }
        }
    };
}

define_id_type!(LevelId);
define_id_type!(QuestionId);
define_id_type!(AnswerId);
define_id_type!(UserId);
define_id_type!(AdminId);

#[cfg(test)]
mod tests {
    use super::{AdminId, LevelId};

    #[test]
    fn admin_id_can_roundtrip_from_string() {
        let id = AdminId::new(42);
        let parsed: AdminId = id
            .to_string()
            .parse()
            .expect("formatted admin id should parse");

        assert_eq!(id, parsed);
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        assert!("abc".parse::<LevelId>().is_err());
    }
}
