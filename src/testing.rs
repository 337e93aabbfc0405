use crate::source::{Source, VecSource};
use std::cell::Cell;
use std::rc::Rc;

/// 记录拉取次数的数据源，超过`max_pulls`次拉取时直接失败。
pub(crate) struct TrackedSource<T> {
    inner: VecSource<T>,
    pulls: Rc<Cell<usize>>,
    max_pulls: usize,
}

impl<T> TrackedSource<T> {
    pub(crate) fn new(elements: Vec<T>) -> (TrackedSource<T>, Rc<Cell<usize>>) {
        let max_pulls = elements.len();
        TrackedSource::guarded(elements, max_pulls)
    }

    pub(crate) fn guarded(elements: Vec<T>, max_pulls: usize) -> (TrackedSource<T>, Rc<Cell<usize>>) {
        let pulls = Rc::new(Cell::new(0));
        (TrackedSource { inner: VecSource::new(elements), pulls: Rc::clone(&pulls), max_pulls }, pulls)
    }
}

impl<T> Source<T> for TrackedSource<T> {
    fn size_if_known(&self) -> Option<usize> {
        self.inner.size_if_known()
    }

    fn has_next(&mut self) -> bool {
        self.inner.has_next()
    }

    fn pull(&mut self) -> T {
        let pulls = self.pulls.get() + 1;
        assert!(pulls <= self.max_pulls, "source pulled {pulls} times, at most {} expected", self.max_pulls);
        self.pulls.set(pulls);
        self.inner.pull()
    }
}

/// 无限递增的数据源，记录拉取次数。
pub(crate) struct Counter {
    next: i64,
    pulls: Rc<Cell<usize>>,
}

impl Counter {
    pub(crate) fn new(start: i64) -> (Counter, Rc<Cell<usize>>) {
        let pulls = Rc::new(Cell::new(0));
        (Counter { next: start, pulls: Rc::clone(&pulls) }, pulls)
    }
}

impl Source<i64> for Counter {
    fn size_if_known(&self) -> Option<usize> {
        None
    }

    fn has_next(&mut self) -> bool {
        true
    }

    fn pull(&mut self) -> i64 {
        self.pulls.set(self.pulls.get() + 1);
        let curr = self.next;
        self.next += 1;
        curr
    }
}
