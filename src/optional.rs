use crate::err::StreamErr;
use std::fmt::Display;

/// 可能为空的结果，由可能不产生值的终止操作返回。
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Optional<T>(Option<T>);

impl<T> Optional<T> {
    pub fn of(value: T) -> Optional<T> {
        Optional(Some(value))
    }

    pub fn of_nullable(value: Option<T>) -> Optional<T> {
        Optional(value)
    }

    pub fn empty() -> Optional<T> {
        Optional(None)
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    /// 获取值，为空时返回`NoValuePresent`。
    pub fn get(self) -> Result<T, StreamErr> {
        self.0.ok_or(StreamErr::NoValuePresent)
    }

    pub fn if_present(self, consumer: impl FnOnce(T)) {
        if let Some(value) = self.0 {
            consumer(value)
        }
    }

    pub fn filter(self, test: impl FnOnce(&T) -> bool) -> Optional<T> {
        Optional(self.0.filter(test))
    }

    pub fn map<R>(self, mapper: impl FnOnce(T) -> R) -> Optional<R> {
        Optional(self.0.map(mapper))
    }

    pub fn flat_map<R>(self, mapper: impl FnOnce(T) -> Optional<R>) -> Optional<R> {
        Optional(self.0.and_then(|value| mapper(value).0))
    }

    pub fn or_else(self, other: T) -> T {
        self.0.unwrap_or(other)
    }

    pub fn or_else_get(self, get: impl FnOnce() -> T) -> T {
        self.0.unwrap_or_else(get)
    }

    /// 为空时以`panic_arg`中止。
    #[track_caller]
    pub fn or_panic(self, panic_arg: impl Display) -> T {
        match self.0 {
            Some(value) => value,
            None => panic!("{panic_arg}"),
        }
    }

    /// 为空时以`get_panic_arg`的返回值中止。
    #[track_caller]
    pub fn or_panic_get<D: Display>(self, get_panic_arg: impl FnOnce() -> D) -> T {
        match self.0 {
            Some(value) => value,
            None => panic!("{}", get_panic_arg()),
        }
    }

    pub fn into_option(self) -> Option<T> {
        self.0
    }

    pub fn as_option(&self) -> Option<&T> {
        self.0.as_ref()
    }
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Optional::empty()
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        Optional(value)
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(value: Optional<T>) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present() {
        let opt = Optional::of(3);
        assert!(opt.is_present());
        assert_eq!(Ok(3), opt.clone().get());
        assert_eq!(Some(&3), opt.as_option());
        assert_eq!(3, opt.clone().or_else(0));
        assert_eq!(3, opt.clone().or_else_get(|| 0));
        assert_eq!(3, opt.clone().or_panic("absent"));
        assert_eq!(3, opt.or_panic_get(|| "absent"));
    }

    #[test]
    fn test_empty() {
        let opt = Optional::<i32>::empty();
        assert!(!opt.is_present());
        assert_eq!(Err(StreamErr::NoValuePresent), opt.clone().get());
        assert_eq!(0, opt.clone().or_else(0));
        assert_eq!(7, opt.or_else_get(|| 7));
        assert_eq!(Optional::empty(), Optional::<i32>::default());
        assert_eq!(Optional::of_nullable(None::<i32>), Optional::from(None));
    }

    #[test]
    fn test_combinators() {
        assert_eq!(Optional::of(4), Optional::of(4).filter(|x| x % 2 == 0));
        assert_eq!(Optional::empty(), Optional::of(3).filter(|x| x % 2 == 0));
        assert_eq!(Optional::of("3".to_owned()), Optional::of(3).map(|x| x.to_string()));
        assert_eq!(Optional::of(6), Optional::of(3).flat_map(|x| Optional::of(x * 2)));
        assert_eq!(Optional::<i32>::empty(), Optional::of(3).flat_map(|_| Optional::empty()));
        assert_eq!(Optional::<i32>::empty(), Optional::<i32>::empty().map(|x| x + 1));
        assert_eq!(Some(1), Option::from(Optional::of(1)));
    }

    #[test]
    fn test_if_present() {
        let mut seen = Vec::new();
        Optional::of(1).if_present(|x| seen.push(x));
        Optional::empty().if_present(|x| seen.push(x));
        assert_eq!(vec![1], seen);
    }

    #[test]
    #[should_panic(expected = "no user found")]
    fn test_or_panic() {
        Optional::<i32>::empty().or_panic("no user found");
    }

    #[test]
    #[should_panic(expected = "missing id 42")]
    fn test_or_panic_get() {
        Optional::<i32>::empty().or_panic_get(|| format!("missing id {}", 42));
    }
}
