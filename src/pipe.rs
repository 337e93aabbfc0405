use crate::config::{Config, is_verbose};
use crate::err::StreamErr;
use crate::source::{Endpoint, IterSource, RangeSource, SeedSource, Source, SupplierSource, VecSource};
use crate::stage::BoxStage;
use itertools::Itertools;
use log::{debug, trace};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// 流水线中的一个节点，头节点持有数据源，其余节点持有前驱节点。
///
/// 终止操作生成终止节点后，从最后一个节点开始逐个向前调用`wrap`，最终由头节点驱动数据源：
///
/// ```text
///            head   filter    map    for-each
///            +--+    +---+    +--+
///     nil <- |  | <- |   | <- |  | <- terminal stage
///            +--+    +---+    +--+
///
///                +-filter----------------+
///  source -->    |       +-map-----------+
///                |       |    +-for-each-+
///                +-------+----+----------+
/// ```
pub(crate) trait Pipeline<T: 'static> {
    /// 用本节点的操作包装下游，并交给前驱节点，头节点负责遍历数据源。
    fn evaluate<'a>(&self, stage: BoxStage<'a, T>, configs: &[Config]);

    /// 从头节点开始依次记录每个节点的名称。
    fn describe(&self, names: &mut Vec<&'static str>);
}

/// 一个操作，把接收`R`的下游包装成接收`T`的节点。
pub(crate) trait Wrap<T: 'static, R: 'static> {
    fn name(&self) -> &'static str;

    fn wrap<'a>(&self, down: BoxStage<'a, R>, configs: &[Config]) -> BoxStage<'a, T>;
}

struct Head<T> {
    name: &'static str,
    source: RefCell<Box<dyn Source<T>>>,
}

impl<T: 'static> Pipeline<T> for Head<T> {
    fn evaluate<'a>(&self, mut stage: BoxStage<'a, T>, configs: &[Config]) {
        let Ok(mut source) = self.source.try_borrow_mut() else {
            StreamErr::ConcurrentWalk.raise();
        };
        let verbose = is_verbose(configs);
        let size = source.size_if_known();
        debug!("Walk `{}` source begin, size: {:?}", self.name, size);
        stage.begin(size);
        let mut pulled = 0usize;
        while source.has_next() && !stage.can_finish() {
            let item = source.pull();
            pulled += 1;
            if verbose {
                trace!("Pulled element #{pulled} from `{}` source", self.name);
            }
            stage.accept(item);
        }
        stage.end();
        debug!("Walk `{}` source end, pulled: {pulled}, exhausted: {}", self.name, !source.has_next());
    }

    fn describe(&self, names: &mut Vec<&'static str>) {
        names.push(self.name);
    }
}

struct Node<T: 'static, R: 'static> {
    prev: Rc<dyn Pipeline<T>>,
    op: Box<dyn Wrap<T, R>>,
}

impl<T: 'static, R: 'static> Pipeline<R> for Node<T, R> {
    fn evaluate<'a>(&self, stage: BoxStage<'a, R>, configs: &[Config]) {
        self.prev.evaluate(self.op.wrap(stage, configs), configs)
    }

    fn describe(&self, names: &mut Vec<&'static str>) {
        self.prev.describe(names);
        names.push(self.op.name());
    }
}

/// 惰性求值的数据流。
///
/// 中间操作只创建新的节点，不访问数据源；终止操作才会遍历数据源，且只遍历一次。
/// 同一条链上的所有节点共享同一个数据源，数据源耗尽后再次执行终止操作得到空结果。
pub struct Stream<T: 'static> {
    pipe: Rc<dyn Pipeline<T>>,
    configs: Rc<[Config]>,
}

impl<T: 'static> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Stream { pipe: Rc::clone(&self.pipe), configs: Rc::clone(&self.configs) }
    }
}

impl<T: 'static> Stream<T> {
    fn head(name: &'static str, source: Box<dyn Source<T>>) -> Stream<T> {
        Stream { pipe: Rc::new(Head { name, source: RefCell::new(source) }), configs: Rc::from([]) }
    }

    pub fn from_source(source: impl Source<T> + 'static) -> Stream<T> {
        Stream::head("source", Box::new(source))
    }

    pub fn of(elements: Vec<T>) -> Stream<T> {
        Stream::head("of", Box::new(VecSource::new(elements)))
    }

    pub fn empty() -> Stream<T> {
        Stream::of(Vec::new())
    }

    /// 惰性适配迭代器，直到终止操作才开始迭代。
    pub fn from_iterator<I>(iter: I) -> Stream<T>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Stream::head("iter", Box::new(IterSource::new(iter)))
    }

    /// 每次调用`get`生成一个元素的无限流。
    pub fn generate(get: impl FnMut() -> T + 'static) -> Stream<T> {
        Stream::head("generate", Box::new(SupplierSource::new(get)))
    }

    /// 以`seed`开始，之后每个元素由上一个元素经`operator`生成的无限流。
    pub fn iterate(seed: T, operator: impl FnMut(&T) -> T + 'static) -> Stream<T>
    where
        T: Clone,
    {
        Stream::head("iterate", Box::new(SeedSource::new(seed, operator)))
    }

    /// 设置流水线配置，返回的新句柄与原句柄共享同一条链。
    pub fn with_configs(&self, configs: &[Config]) -> Stream<T> {
        Stream { pipe: Rc::clone(&self.pipe), configs: Rc::from(configs) }
    }

    pub(crate) fn chain<R: 'static>(&self, op: impl Wrap<T, R> + 'static) -> Stream<R> {
        Stream { pipe: Rc::new(Node { prev: Rc::clone(&self.pipe), op: Box::new(op) }), configs: Rc::clone(&self.configs) }
    }

    /// 用终止节点驱动整条链。
    pub(crate) fn terminal(&self, stage: BoxStage<'_, T>) {
        if is_verbose(&self.configs) {
            trace!("Evaluate {:?}", self);
        }
        self.pipe.evaluate(stage, &self.configs)
    }
}

impl<E: Endpoint + 'static> Stream<E> {
    /// `[from_inclusive, to_exclusive)`范围内按`step`生成的整数流，大小未知。
    pub fn range(from_inclusive: E, to_exclusive: E, step: i64) -> Stream<E> {
        Stream::head("range", Box::new(RangeSource::new(from_inclusive, to_exclusive, step)))
    }
}

impl<T: 'static> FromIterator<T> for Stream<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Stream::of(iter.into_iter().collect())
    }
}

impl<T: 'static> From<Vec<T>> for Stream<T> {
    fn from(elements: Vec<T>) -> Self {
        Stream::of(elements)
    }
}

impl<T: 'static> fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        self.pipe.describe(&mut names);
        write!(f, "Stream[{}]", names.iter().join(" -> "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TrackedSource;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_describe() {
        let stream = Stream::range(0, 10, 1).filter(|x| x % 2 == 0).map(|x| x * 2).limit(3);
        assert_eq!("Stream[range -> filter -> map -> limit]", format!("{stream:?}"));
        assert_eq!("Stream[of]", format!("{:?}", Stream::of(vec![1])));
    }

    #[test]
    fn test_lazy_until_terminal() {
        let (source, pulls) = TrackedSource::new(vec![1, 2, 3, 4, 5, 6]);
        let stream = Stream::from_source(source).filter(|x| x % 2 == 0).map(|x| x * 2);
        assert_eq!(0, pulls.get());
        let mut res = Vec::new();
        stream.for_each(|x| res.push(x));
        assert_eq!(vec![4, 8, 12], res);
        assert_eq!(6, pulls.get());
    }

    #[test]
    fn test_single_pass() {
        let (source, pulls) = TrackedSource::new((0..20).collect());
        let stream = Stream::from_source(source).peek(|_| {}).map(|x| x + 1).skip(2).distinct().sorted();
        assert_eq!(18, stream.count());
        assert_eq!(20, pulls.get());
    }

    #[test]
    fn test_exhausted_source_yields_empty_walk() {
        let stream = Stream::of(vec![1, 2, 3]);
        assert_eq!(vec![1, 2, 3], stream.to_slice());
        assert_eq!(Vec::<i32>::new(), stream.to_slice());
        assert_eq!(0, stream.count());
    }

    #[test]
    fn test_nodes_share_source() {
        let head = Stream::of(vec![1, 2, 3, 4]);
        let doubled = head.map(|x| x * 2);
        assert_eq!(Some(2), doubled.find_first().into_option());
        // 已经被拉取的元素不会再出现在其他分支中
        assert_eq!(vec![2, 3, 4], head.to_slice());
        assert_eq!(Vec::<i32>::new(), doubled.to_slice());
    }

    #[test]
    fn test_with_configs() {
        let stream = Stream::of(vec![3, 1, 2]).sorted().with_configs(&[Config::Verbose, Config::UnstableSort]);
        assert_eq!("Stream[of -> sorted]", format!("{stream:?}"));
        assert_eq!(vec![1, 2, 3], stream.to_slice());
    }

    #[test]
    fn test_from_iterator() {
        let stream: Stream<i32> = (1..=3).collect();
        assert_eq!(vec![1, 2, 3], stream.to_slice());
        assert_eq!(vec![1, 2], Stream::from(vec![1, 2]).to_slice());
        assert_eq!(vec!['a', 'b'], Stream::from_iterator("ab".chars()).to_slice());
        assert_eq!(0, Stream::<String>::empty().count());
    }

    #[test]
    fn test_generate() {
        let mut next = 0;
        let stream = Stream::generate(move || {
            next += 1;
            next
        });
        assert_eq!(vec![1, 2, 3], stream.limit(3).to_slice());
    }

    #[test]
    #[should_panic(expected = "already being walked")]
    fn test_reentrant_walk() {
        let head = Stream::of(vec![1, 2]);
        let inner = head.clone();
        head.for_each(move |_| inner.for_each(|_| {}));
    }
}
