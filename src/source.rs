use crate::err::StreamErr;
use std::iter::Peekable;

/// 数据源，惰性产生元素，可能无限。
///
/// 调用`pull`之前必须先通过`has_next`确认仍有元素，数据源自身不做保护。
pub trait Source<T> {
    /// 剩余元素个数，未知时返回`None`，仅用于预分配缓冲区。
    fn size_if_known(&self) -> Option<usize>;

    fn has_next(&mut self) -> bool;

    fn pull(&mut self) -> T;
}

/// 基于已有元素序列的数据源，大小已知。
#[derive(Debug)]
pub struct VecSource<T> {
    iter: std::vec::IntoIter<T>,
}

impl<T> VecSource<T> {
    pub fn new(elements: Vec<T>) -> Self {
        VecSource { iter: elements.into_iter() }
    }
}

impl<T> Source<T> for VecSource<T> {
    fn size_if_known(&self) -> Option<usize> {
        Some(self.iter.len())
    }

    fn has_next(&mut self) -> bool {
        self.iter.len() > 0
    }

    fn pull(&mut self) -> T {
        match self.iter.next() {
            Some(item) => item,
            None => StreamErr::SourceExhausted { kind: "vec" }.raise(),
        }
    }
}

/// 适配任意迭代器的数据源，仅当迭代器给出精确的大小提示时大小已知。
pub struct IterSource<I: Iterator> {
    iter: Peekable<I>,
}

impl<I: Iterator> IterSource<I> {
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        IterSource { iter: iter.into_iter().peekable() }
    }
}

impl<I: Iterator> Source<I::Item> for IterSource<I> {
    fn size_if_known(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(lower),
            _ => None,
        }
    }

    fn has_next(&mut self) -> bool {
        self.iter.peek().is_some()
    }

    fn pull(&mut self) -> I::Item {
        match self.iter.next() {
            Some(item) => item,
            None => StreamErr::SourceExhausted { kind: "iter" }.raise(),
        }
    }
}

/// 每次调用生成器产生一个元素，无限且大小未知。
pub struct SupplierSource<F> {
    get: F,
}

impl<F> SupplierSource<F> {
    pub fn new(get: F) -> Self {
        SupplierSource { get }
    }
}

impl<T, F: FnMut() -> T> Source<T> for SupplierSource<F> {
    fn size_if_known(&self) -> Option<usize> {
        None
    }

    fn has_next(&mut self) -> bool {
        true
    }

    fn pull(&mut self) -> T {
        (self.get)()
    }
}

/// 种子数据源，首次返回种子本身，之后每次对上一个元素应用迭代函数，无限且大小未知。
pub struct SeedSource<T, F> {
    element: T,
    operator: F,
    first: bool,
}

impl<T, F> SeedSource<T, F> {
    pub fn new(seed: T, operator: F) -> Self {
        SeedSource { element: seed, operator, first: true }
    }
}

impl<T: Clone, F: FnMut(&T) -> T> Source<T> for SeedSource<T, F> {
    fn size_if_known(&self) -> Option<usize> {
        None
    }

    fn has_next(&mut self) -> bool {
        true
    }

    fn pull(&mut self) -> T {
        if self.first {
            self.first = false;
        } else {
            self.element = (self.operator)(&self.element);
        }
        self.element.clone()
    }
}

/// 范围数据源可用的端点类型。
pub trait Endpoint: Copy + PartialOrd {
    fn widen(self) -> i128;

    /// 按步长偏移，超出类型范围时返回`None`。
    fn offset(self, step: i64) -> Option<Self>;
}

macro_rules! impl_endpoint {
    ($($t:ty),*) => {
        $(
            impl Endpoint for $t {
                #[inline]
                fn widen(self) -> i128 {
                    self as i128
                }

                #[inline]
                fn offset(self, step: i64) -> Option<Self> {
                    <$t>::try_from(self as i128 + step as i128).ok()
                }
            }
        )*
    };
}

impl_endpoint!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// 范围数据源，包含起始值，不包含结束值。
///
/// 步长为正时按`<`比较结束值，步长为负时按`>`比较结束值，步长为0时若起始值小于结束值则无限重复起始值。
/// 偏移超出端点类型范围时结束。默认大小未知，可通过`exact_size`计算精确的剩余个数。
#[derive(Debug, Clone)]
pub struct RangeSource<E> {
    to: E,
    step: i64,
    next: Option<E>,
    exact: bool,
}

impl<E: Endpoint> RangeSource<E> {
    pub fn new(from_inclusive: E, to_exclusive: E, step: i64) -> Self {
        RangeSource { to: to_exclusive, step, next: Some(from_inclusive), exact: false }
    }

    pub fn exact_size(mut self) -> Self {
        self.exact = true;
        self
    }
}

fn range_len<E: Endpoint>(from: E, to: E, step: i64) -> Option<usize> {
    let (from, to, step) = (from.widen(), to.widen(), step as i128);
    let len = if step > 0 {
        if from < to { (to - from + step - 1) / step } else { 0 }
    } else if step < 0 {
        if from > to { (from - to - step - 1) / -step } else { 0 }
    } else if from < to {
        return None;
    } else {
        0
    };
    usize::try_from(len).ok()
}

impl<E: Endpoint> Source<E> for RangeSource<E> {
    fn size_if_known(&self) -> Option<usize> {
        match self.next {
            Some(next) if self.exact => range_len(next, self.to, self.step),
            Some(_) => None,
            None if self.exact => Some(0),
            None => None,
        }
    }

    fn has_next(&mut self) -> bool {
        match self.next {
            Some(next) if self.step >= 0 => next < self.to,
            Some(next) => next > self.to,
            None => false,
        }
    }

    fn pull(&mut self) -> E {
        match self.next {
            Some(curr) => {
                self.next = curr.offset(self.step);
                curr
            }
            None => StreamErr::SourceExhausted { kind: "range" }.raise(),
        }
    }
}
