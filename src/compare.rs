//! 比较器，返回`Ordering`的三路比较函数。

use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use unicase::UniCase;

/// 自然顺序。
pub fn natural_order<T: Ord>() -> impl Fn(&T, &T) -> Ordering + Clone {
    |left: &T, right: &T| left.cmp(right)
}

/// 逆序。
pub fn reverse_order<T, C>(cmp: C) -> impl Fn(&T, &T) -> Ordering
where
    C: Fn(&T, &T) -> Ordering,
{
    move |left: &T, right: &T| cmp(right, left)
}

/// 按`key`提取的键比较。
pub fn comparing<T, K, F>(key: F) -> impl Fn(&T, &T) -> Ordering
where
    K: Ord,
    F: Fn(&T) -> K,
{
    move |left: &T, right: &T| key(left).cmp(&key(right))
}

/// 先按`first`比较，相等时再按`second`比较。
pub fn then_comparing<T, C1, C2>(first: C1, second: C2) -> impl Fn(&T, &T) -> Ordering
where
    C1: Fn(&T, &T) -> Ordering,
    C2: Fn(&T, &T) -> Ordering,
{
    move |left: &T, right: &T| first(left, right).then_with(|| second(left, right))
}

/// 浮点数全序，`NaN`最大且所有`NaN`相等。
pub fn f64_order() -> impl Fn(&f64, &f64) -> Ordering + Clone {
    |left: &f64, right: &f64| OrderedFloat(*left).cmp(&OrderedFloat(*right))
}

pub fn f32_order() -> impl Fn(&f32, &f32) -> Ordering + Clone {
    |left: &f32, right: &f32| OrderedFloat(*left).cmp(&OrderedFloat(*right))
}

/// 忽略大小写的字符串顺序。
pub fn nocase_order<S: AsRef<str>>() -> impl Fn(&S, &S) -> Ordering + Clone {
    |left: &S, right: &S| UniCase::new(left.as_ref()).cmp(&UniCase::new(right.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_and_reverse() {
        assert_eq!(Ordering::Less, natural_order::<i32>()(&1, &2));
        assert_eq!(Ordering::Equal, natural_order::<i32>()(&2, &2));
        assert_eq!(Ordering::Greater, reverse_order(natural_order::<i64>())(&1, &2));
        assert_eq!(Ordering::Less, reverse_order(reverse_order(natural_order::<i64>()))(&1, &2));
    }

    #[test]
    fn test_comparing() {
        let by_len = comparing(|s: &&str| s.len());
        assert_eq!(Ordering::Less, by_len(&"b", &"aa"));
        assert_eq!(Ordering::Equal, by_len(&"b", &"a"));
        let by_len_then_text = then_comparing(by_len, natural_order::<&str>());
        assert_eq!(Ordering::Greater, by_len_then_text(&"b", &"a"));
        assert_eq!(Ordering::Less, by_len_then_text(&"z", &"aa"));
    }

    #[test]
    fn test_float_order() {
        let cmp = f64_order();
        assert_eq!(Ordering::Less, cmp(&-1.5, &0.0));
        assert_eq!(Ordering::Greater, cmp(&f64::NAN, &f64::INFINITY));
        assert_eq!(Ordering::Equal, cmp(&f64::NAN, &f64::NAN));
        assert_eq!(Ordering::Less, f32_order()(&1.0, &2.0));
    }

    #[test]
    fn test_nocase_order() {
        let cmp = nocase_order::<String>();
        assert_eq!(Ordering::Equal, cmp(&"ABC".to_owned(), &"abc".to_owned()));
        assert_eq!(Ordering::Less, cmp(&"abc".to_owned(), &"ABD".to_owned()));
        assert_eq!(Ordering::Greater, nocase_order::<&str>()(&"b", &"A"));
    }
}
