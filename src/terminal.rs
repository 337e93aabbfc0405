use crate::collect::Collector;
use crate::optional::Optional;
use crate::pipe::Stream;
use crate::stage::TerminalStage;

/// 遍历结束后取出累计结果，`begin`和每次`accept`之后累计值始终存在。
fn settled<R>(acc: Option<R>) -> R {
    match acc {
        Some(acc) => acc,
        None => unreachable!("accumulator is restored after every element"),
    }
}

impl<T: 'static> Stream<T> {
    /// 消费流中的每个元素。
    pub fn for_each(&self, mut consumer: impl FnMut(T)) {
        let mut stage = TerminalStage::new((), |_, item| consumer(item));
        self.terminal(Box::new(&mut stage));
    }

    /// 以第一个元素为初始值依次累计，没有元素时为空，只有一个元素时不调用`accumulator`。
    pub fn reduce(&self, mut accumulator: impl FnMut(T, T) -> T) -> Optional<T> {
        let mut stage = TerminalStage::new(None, |acc: &mut Option<T>, item| {
            *acc = Some(match acc.take() {
                Some(prev) => accumulator(prev, item),
                None => item,
            })
        });
        self.terminal(Box::new(&mut stage));
        Optional::of_nullable(stage.into_state())
    }

    /// 从给定的初始值`init`开始，使用`accumulator`累计结果。
    pub fn reduce_from(&self, init: T, accumulator: impl FnMut(T, T) -> T) -> T {
        self.reduce_with(init, accumulator)
    }

    /// 使用与元素类型不同的初始值`init`开始，使用`accumulator`累计结果。
    pub fn reduce_with<R>(&self, init: R, mut accumulator: impl FnMut(R, T) -> R) -> R {
        let mut stage = TerminalStage::new(Some(init), |acc: &mut Option<R>, item| {
            *acc = acc.take().map(|prev| accumulator(prev, item))
        });
        self.terminal(Box::new(&mut stage));
        settled(stage.into_state())
    }

    /// 在`begin`时以大小提示（未知为`None`）调用`init`生成初始值，然后使用`accumulator`累计结果。
    pub fn reduce_by<R>(&self, init: impl FnOnce(Option<usize>) -> R, mut accumulator: impl FnMut(R, T) -> R) -> R {
        let mut init = Some(init);
        let mut stage = TerminalStage::new(None, |acc: &mut Option<R>, item| {
            *acc = acc.take().map(|prev| accumulator(prev, item))
        })
        .on_begin(|acc, size| {
            if let Some(init) = init.take() {
                *acc = Some(init(size))
            }
        });
        self.terminal(Box::new(&mut stage));
        settled(stage.into_state())
    }

    pub fn to_slice(&self) -> Vec<T> {
        self.to_typed_slice()
    }

    /// 收集到任意目标集合，按大小提示预分配。
    pub fn to_typed_slice<C: Collector<T>>(&self) -> C {
        self.reduce_by(C::with_size, |mut collector, item| {
            collector.append(item);
            collector
        })
    }

    /// 第一个元素，找到后立即结束遍历。
    pub fn find_first(&self) -> Optional<T> {
        let mut stage = TerminalStage::new(None, |found: &mut Option<T>, item| {
            if found.is_none() {
                *found = Some(item)
            }
        })
        .on_can_finish(Option::is_some);
        self.terminal(Box::new(&mut stage));
        Optional::of_nullable(stage.into_state())
    }

    /// 元素个数。
    pub fn count(&self) -> usize {
        self.reduce_with(0, |count, _| count + 1)
    }

    /// 是否所有元素都满足条件，遇到第一个不满足的元素立即结束。
    pub fn all_match(&self, mut test: impl FnMut(&T) -> bool) -> bool {
        let mut stage = TerminalStage::new(true, |all: &mut bool, item| {
            if !test(&item) {
                *all = false
            }
        })
        .on_can_finish(|all| !*all);
        self.terminal(Box::new(&mut stage));
        stage.into_state()
    }

    /// 是否没有元素满足条件，遇到第一个满足的元素立即结束。
    pub fn none_match(&self, mut test: impl FnMut(&T) -> bool) -> bool {
        let mut stage = TerminalStage::new(true, |none: &mut bool, item| {
            if test(&item) {
                *none = false
            }
        })
        .on_can_finish(|none| !*none);
        self.terminal(Box::new(&mut stage));
        stage.into_state()
    }

    /// 是否有任意元素满足条件，遇到第一个满足的元素立即结束。
    pub fn any_match(&self, mut test: impl FnMut(&T) -> bool) -> bool {
        let mut stage = TerminalStage::new(false, |any: &mut bool, item| {
            if test(&item) {
                *any = true
            }
        })
        .on_can_finish(|any| *any);
        self.terminal(Box::new(&mut stage));
        stage.into_state()
    }
}
