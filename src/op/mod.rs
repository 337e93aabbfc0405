mod map;

use crate::compare::{comparing, natural_order};
use crate::config::{Config, is_unstable_sort, presize};
use crate::op::map::{FlatMapIterOp, FlatMapOp, MapOp};
use crate::pipe::{Stream, Wrap};
use crate::stage::{BoxStage, ChainedStage};
use log::trace;
use rustc_hash::{FxBuildHasher, FxHashSet};
use std::cmp::Ordering;
use std::hash::{BuildHasher, Hash};
use std::mem;
use std::rc::Rc;

/// 元素类型不变的操作。
pub(crate) enum Op<T> {
    /* **************************************** 无状态 **************************************** */
    /// 仅保留满足条件的元素，下游大小未知。
    Filter(Rc<dyn Fn(&T) -> bool>),
    /// 访问每个元素后原样发送给下游。
    Peek(Rc<dyn Fn(&T)>),
    /* **************************************** 有状态 **************************************** */
    /// 按hash值去重，保留首次出现的元素。
    ///
    /// 只比较hash值，不同元素hash冲突时后出现的元素同样被丢弃。
    Distinct(Rc<dyn Fn(&T) -> u64>),
    /// 缓存全部元素，结束时排序后重新驱动下游。
    Sorted(Rc<dyn Fn(&T, &T) -> Ordering>),
    /// 保留前N个元素，达到数量后可以提前结束。
    Limit(usize),
    /// 丢弃前N个元素。
    Skip(usize),
}

impl<T: 'static> Wrap<T, T> for Op<T> {
    fn name(&self) -> &'static str {
        match self {
            Op::Filter(_) => "filter",
            Op::Peek(_) => "peek",
            Op::Distinct(_) => "distinct",
            Op::Sorted(_) => "sorted",
            Op::Limit(_) => "limit",
            Op::Skip(_) => "skip",
        }
    }

    fn wrap<'a>(&self, down: BoxStage<'a, T>, configs: &[Config]) -> BoxStage<'a, T> {
        match self {
            Op::Filter(test) => {
                let test = Rc::clone(test);
                Box::new(
                    ChainedStage::new(down, (), move |_, down, item: T| {
                        if test(&item) {
                            down.accept(item)
                        }
                    })
                    .on_begin(|_, down, _| down.begin(None)),
                )
            }
            Op::Peek(consumer) => {
                let consumer = Rc::clone(consumer);
                Box::new(ChainedStage::new(down, (), move |_, down, item: T| {
                    consumer(&item);
                    down.accept(item)
                }))
            }
            Op::Distinct(hash) => {
                let hash = Rc::clone(hash);
                Box::new(
                    ChainedStage::new(down, FxHashSet::<u64>::default(), move |seen, down, item: T| {
                        if seen.insert(hash(&item)) {
                            down.accept(item)
                        }
                    })
                    .on_begin(|seen, down, _| {
                        *seen = FxHashSet::default();
                        down.begin(None)
                    })
                    .on_end(|seen, down| {
                        trace!("Distinct end, unique: {}", seen.len());
                        *seen = FxHashSet::default();
                        down.end()
                    }),
                )
            }
            Op::Sorted(cmp) => {
                let cmp = Rc::clone(cmp);
                let unstable = is_unstable_sort(configs);
                // 下游只在排序完成后收到一次begin
                Box::new(
                    ChainedStage::new(down, Vec::new(), |buffer: &mut Vec<T>, _, item: T| buffer.push(item))
                        .on_begin(|buffer, _, size| *buffer = Vec::with_capacity(presize(size)))
                        .on_can_finish(|_, down| down.can_finish())
                        .on_end(move |buffer, down| {
                            let mut sorted = mem::take(buffer);
                            if unstable {
                                sorted.sort_unstable_by(|l, r| cmp(l, r));
                            } else {
                                sorted.sort_by(|l, r| cmp(l, r));
                            }
                            trace!("Sorted {} elements, unstable: {unstable}", sorted.len());
                            down.begin(Some(sorted.len()));
                            for item in sorted {
                                if down.can_finish() {
                                    break;
                                }
                                down.accept(item);
                            }
                            down.end();
                        }),
                )
            }
            Op::Limit(max_size) => {
                let max_size = *max_size;
                Box::new(
                    ChainedStage::new(down, 0usize, move |count, down, item: T| {
                        if *count < max_size {
                            *count += 1;
                            down.accept(item)
                        }
                    })
                    .on_begin(move |_, down, size| down.begin(size.map(|size| size.min(max_size))))
                    .on_can_finish(move |count, down| *count >= max_size || down.can_finish()),
                )
            }
            Op::Skip(n) => {
                let n = *n;
                Box::new(
                    ChainedStage::new(down, 0usize, move |skipped, down, item: T| {
                        if *skipped < n {
                            *skipped += 1;
                        } else {
                            down.accept(item)
                        }
                    })
                    .on_begin(move |_, down, size| down.begin(size.map(|size| size.saturating_sub(n)))),
                )
            }
        }
    }
}

impl<T: 'static> Stream<T> {
    /// 过滤，仅保留满足`test`的元素。
    pub fn filter(&self, test: impl Fn(&T) -> bool + 'static) -> Stream<T> {
        self.chain(Op::Filter(Rc::new(test)))
    }

    /// 转换每个元素。
    pub fn map<R: 'static>(&self, apply: impl Fn(T) -> R + 'static) -> Stream<R> {
        self.chain(MapOp::new(apply))
    }

    /// 每个元素转为一个流，依次消费完该流的全部元素后再处理下一个元素。`[[1,2],[3,4]] -> [1,2,3,4]`
    pub fn flat_map<R: 'static>(&self, flatten: impl Fn(T) -> Stream<R> + 'static) -> Stream<R> {
        self.chain(FlatMapOp::new(flatten))
    }

    /// 与`flat_map`相同，但每个元素转为一个迭代器。
    pub fn flat_map_iter<R, I>(&self, flatten: impl Fn(T) -> I + 'static) -> Stream<R>
    where
        R: 'static,
        I: IntoIterator<Item = R> + 'static,
    {
        self.chain(FlatMapIterOp::new(flatten))
    }

    /// 访问每个元素而不消费它，可用于调试。
    pub fn peek(&self, consumer: impl Fn(&T) + 'static) -> Stream<T> {
        self.chain(Op::Peek(Rc::new(consumer)))
    }

    /// 按元素自身的hash值去重，hash冲突的不同元素视为重复。
    pub fn distinct(&self) -> Stream<T>
    where
        T: Hash,
    {
        self.distinct_by(|item| FxBuildHasher.hash_one(item))
    }

    /// 按`hash`返回的值去重，保留首次出现的元素，hash冲突的不同元素视为重复。
    pub fn distinct_by(&self, hash: impl Fn(&T) -> u64 + 'static) -> Stream<T> {
        self.chain(Op::Distinct(Rc::new(hash)))
    }

    /// 按自然顺序排序。
    pub fn sorted(&self) -> Stream<T>
    where
        T: Ord,
    {
        self.sorted_by(natural_order::<T>())
    }

    pub fn sorted_by(&self, comparator: impl Fn(&T, &T) -> Ordering + 'static) -> Stream<T> {
        self.chain(Op::Sorted(Rc::new(comparator)))
    }

    pub fn sorted_by_key<K: Ord + 'static>(&self, key: impl Fn(&T) -> K + 'static) -> Stream<T> {
        self.sorted_by(comparing(key))
    }

    /// 限制元素个数。
    pub fn limit(&self, max_size: usize) -> Stream<T> {
        self.chain(Op::Limit(max_size))
    }

    /// 跳过前`n`个元素。
    pub fn skip(&self, n: usize) -> Stream<T> {
        self.chain(Op::Skip(n))
    }
}
