//! Zero-value detection for terminal types.

use std::path::PathBuf;
use std::time::Duration;

use camino::Utf8PathBuf;

use super::Mergeable;

macro_rules! numeric_scalar {
    ($($ty:ty => $zero:expr),* $(,)?) => {
        $(
            impl Mergeable for $ty {
                fn is_zero(&self) -> bool {
                    *self == $zero
                }

                fn fresh_copy(&self) -> Self {
                    *self
                }
            }
        )*
    };
}

numeric_scalar!(
    u8 => 0, u16 => 0, u32 => 0, u64 => 0, u128 => 0, usize => 0,
    i8 => 0, i16 => 0, i32 => 0, i64 => 0, i128 => 0, isize => 0,
    f32 => 0.0, f64 => 0.0,
    bool => false,
    char => '\0',
);

impl Mergeable for () {
    fn is_zero(&self) -> bool {
        true
    }

    fn fresh_copy(&self) -> Self {}
}

impl Mergeable for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn fresh_copy(&self) -> Self {
        self.clone()
    }
}

impl Mergeable for &'static str {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn fresh_copy(&self) -> Self {
        *self
    }
}

impl Mergeable for Duration {
    fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    fn fresh_copy(&self) -> Self {
        *self
    }
}

impl Mergeable for PathBuf {
    fn is_zero(&self) -> bool {
        self.as_os_str().is_empty()
    }

    fn fresh_copy(&self) -> Self {
        self.clone()
    }
}

impl Mergeable for Utf8PathBuf {
    fn is_zero(&self) -> bool {
        self.as_str().is_empty()
    }

    fn fresh_copy(&self) -> Self {
        self.clone()
    }
}
