use crate::config::presize;
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};

/// 可按大小提示预分配、逐个追加元素的目标集合。
pub trait Collector<T> {
    /// 以大小提示创建空集合，`size`仅作参考。
    fn with_size(size: Option<usize>) -> Self;

    fn append(&mut self, item: T);
}

impl<T> Collector<T> for Vec<T> {
    fn with_size(size: Option<usize>) -> Self {
        Vec::with_capacity(presize(size))
    }

    fn append(&mut self, item: T) {
        self.push(item)
    }
}

impl<T> Collector<T> for VecDeque<T> {
    fn with_size(size: Option<usize>) -> Self {
        VecDeque::with_capacity(presize(size))
    }

    fn append(&mut self, item: T) {
        self.push_back(item)
    }
}

impl<T: Eq + Hash, S: BuildHasher + Default> Collector<T> for HashSet<T, S> {
    fn with_size(size: Option<usize>) -> Self {
        HashSet::with_capacity_and_hasher(presize(size), S::default())
    }

    fn append(&mut self, item: T) {
        self.insert(item);
    }
}

impl<T: Ord> Collector<T> for BTreeSet<T> {
    fn with_size(_: Option<usize>) -> Self {
        BTreeSet::new()
    }

    fn append(&mut self, item: T) {
        self.insert(item);
    }
}

impl Collector<char> for String {
    fn with_size(size: Option<usize>) -> Self {
        String::with_capacity(presize(size))
    }

    fn append(&mut self, item: char) {
        self.push(item)
    }
}

impl Collector<String> for String {
    fn with_size(_: Option<usize>) -> Self {
        String::new()
    }

    fn append(&mut self, item: String) {
        self.push_str(&item)
    }
}

impl<'s> Collector<&'s str> for String {
    fn with_size(_: Option<usize>) -> Self {
        String::new()
    }

    fn append(&mut self, item: &'s str) {
        self.push_str(item)
    }
}
