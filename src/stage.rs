//! 操作链中的单个节点。
//!
//! 生命周期：`begin`恰好调用一次，之后每次`accept`前都先检查`can_finish`，一旦返回`true`则不再`accept`，
//! 最后`end`恰好调用一次。

/// 一个操作。
pub(crate) trait Stage<T> {
    /// 操作开始，参数是元素个数，未知时为`None`。
    fn begin(&mut self, size: Option<usize>);

    fn accept(&mut self, item: T);

    /// 是否可以提前结束。
    fn can_finish(&self) -> bool;

    fn end(&mut self);
}

impl<T, S: Stage<T> + ?Sized> Stage<T> for &mut S {
    fn begin(&mut self, size: Option<usize>) {
        (**self).begin(size)
    }

    fn accept(&mut self, item: T) {
        (**self).accept(item)
    }

    fn can_finish(&self) -> bool {
        (**self).can_finish()
    }

    fn end(&mut self) {
        (**self).end()
    }
}

pub(crate) type BoxStage<'a, T> = Box<dyn Stage<T> + 'a>;

type BeginFn<'a, St, R> = Box<dyn FnMut(&mut St, &mut BoxStage<'a, R>, Option<usize>) + 'a>;
type AcceptFn<'a, St, T, R> = Box<dyn FnMut(&mut St, &mut BoxStage<'a, R>, T) + 'a>;
type CanFinishFn<'a, St, R> = Box<dyn Fn(&St, &BoxStage<'a, R>) -> bool + 'a>;
type EndFn<'a, St, R> = Box<dyn FnMut(&mut St, &mut BoxStage<'a, R>) + 'a>;

/// 串起下游操作的中间节点，接收`T`并向下游发送`R`。
///
/// 只有`accept`必须指定，未指定的`begin`、`can_finish`、`end`原样转发给下游。
/// `state`为节点独占的状态，每次遍历重新构造。
pub(crate) struct ChainedStage<'a, T, R, St = ()> {
    down: BoxStage<'a, R>,
    state: St,
    begin: Option<BeginFn<'a, St, R>>,
    accept: AcceptFn<'a, St, T, R>,
    can_finish: Option<CanFinishFn<'a, St, R>>,
    end: Option<EndFn<'a, St, R>>,
}

impl<'a, T, R, St> ChainedStage<'a, T, R, St> {
    pub(crate) fn new(
        down: BoxStage<'a, R>,
        state: St,
        accept: impl FnMut(&mut St, &mut BoxStage<'a, R>, T) + 'a,
    ) -> Self {
        ChainedStage { down, state, begin: None, accept: Box::new(accept), can_finish: None, end: None }
    }

    pub(crate) fn on_begin(mut self, begin: impl FnMut(&mut St, &mut BoxStage<'a, R>, Option<usize>) + 'a) -> Self {
        self.begin = Some(Box::new(begin));
        self
    }

    pub(crate) fn on_can_finish(mut self, can_finish: impl Fn(&St, &BoxStage<'a, R>) -> bool + 'a) -> Self {
        self.can_finish = Some(Box::new(can_finish));
        self
    }

    pub(crate) fn on_end(mut self, end: impl FnMut(&mut St, &mut BoxStage<'a, R>) + 'a) -> Self {
        self.end = Some(Box::new(end));
        self
    }
}

impl<T, R, St> Stage<T> for ChainedStage<'_, T, R, St> {
    fn begin(&mut self, size: Option<usize>) {
        match &mut self.begin {
            Some(begin) => begin(&mut self.state, &mut self.down, size),
            None => self.down.begin(size),
        }
    }

    fn accept(&mut self, item: T) {
        (self.accept)(&mut self.state, &mut self.down, item)
    }

    fn can_finish(&self) -> bool {
        match &self.can_finish {
            Some(can_finish) => can_finish(&self.state, &self.down),
            None => self.down.can_finish(),
        }
    }

    fn end(&mut self) {
        match &mut self.end {
            Some(end) => end(&mut self.state, &mut self.down),
            None => self.down.end(),
        }
    }
}

/// 终止节点，在`state`中累计结果。
///
/// 未指定的`begin`、`end`不做任何事，未指定的`can_finish`始终返回`false`。
pub(crate) struct TerminalStage<'a, T, St> {
    state: St,
    begin: Option<Box<dyn FnMut(&mut St, Option<usize>) + 'a>>,
    accept: Box<dyn FnMut(&mut St, T) + 'a>,
    can_finish: Option<Box<dyn Fn(&St) -> bool + 'a>>,
}

impl<'a, T, St> TerminalStage<'a, T, St> {
    pub(crate) fn new(state: St, accept: impl FnMut(&mut St, T) + 'a) -> Self {
        TerminalStage { state, begin: None, accept: Box::new(accept), can_finish: None }
    }

    pub(crate) fn on_begin(mut self, begin: impl FnMut(&mut St, Option<usize>) + 'a) -> Self {
        self.begin = Some(Box::new(begin));
        self
    }

    pub(crate) fn on_can_finish(mut self, can_finish: impl Fn(&St) -> bool + 'a) -> Self {
        self.can_finish = Some(Box::new(can_finish));
        self
    }

    pub(crate) fn into_state(self) -> St {
        self.state
    }
}

impl<T, St> Stage<T> for TerminalStage<'_, T, St> {
    fn begin(&mut self, size: Option<usize>) {
        if let Some(begin) = &mut self.begin {
            begin(&mut self.state, size)
        }
    }

    fn accept(&mut self, item: T) {
        (self.accept)(&mut self.state, item)
    }

    fn can_finish(&self) -> bool {
        self.can_finish.as_ref().is_some_and(|can_finish| can_finish(&self.state))
    }

    fn end(&mut self) {}
}
