use std::fmt::Debug;

/// A key type usable in a [`KeyedStore`](crate::KeyedStore).
///
/// Keys are matched by value equality. Some key types carry a distinguished
/// null value that must never be stored:
/// - The empty string for `String` and `str`.
/// - `None` for `Option<T>`.
/// - Integer keys have no null value.
///
/// A null key is rejected by `set` and never matches a lookup.
pub trait StoreKey: PartialEq + Debug {
    /// Returns `true` if this key is the null key for its type.
    fn is_null(&self) -> bool {
        false
    }
}

impl StoreKey for str {
    fn is_null(&self) -> bool {
        self.is_empty()
    }
}

impl StoreKey for String {
    fn is_null(&self) -> bool {
        self.is_empty()
    }
}

impl<T: StoreKey + ?Sized> StoreKey for &T {
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T: PartialEq + Debug> StoreKey for Option<T> {
    fn is_null(&self) -> bool {
        self.is_none()
    }
}

macro_rules! never_null {
    ($($ty:ty),* $(,)?) => {
        $(impl StoreKey for $ty {})*
    };
}

never_null!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, char, bool);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_null() {
        assert!(String::new().is_null());
        assert!("".is_null());
        assert!(!"img/food/plate.png".is_null());
        assert!(!String::from("food").is_null());
    }

    #[test]
    fn none_is_null() {
        assert!(None::<u32>.is_null());
        assert!(!Some(0u32).is_null());
        // An empty string wrapped in Some is still a present key.
        assert!(!Some(String::new()).is_null());
    }

    #[test]
    fn integers_are_never_null() {
        assert!(!0u64.is_null());
        assert!(!(-1i32).is_null());
        assert!(!'\0'.is_null());
    }
}
