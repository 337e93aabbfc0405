use crate::config::Config;
use crate::pipe::{Stream, Wrap};
use crate::stage::{BoxStage, ChainedStage, TerminalStage};
use std::rc::Rc;

/// 转换操作，大小不变。
pub(crate) struct MapOp<T, R> {
    apply: Rc<dyn Fn(T) -> R>,
}

impl<T, R> MapOp<T, R> {
    pub(crate) fn new(apply: impl Fn(T) -> R + 'static) -> Self {
        MapOp { apply: Rc::new(apply) }
    }
}

impl<T: 'static, R: 'static> Wrap<T, R> for MapOp<T, R> {
    fn name(&self) -> &'static str {
        "map"
    }

    fn wrap<'a>(&self, down: BoxStage<'a, R>, _: &[Config]) -> BoxStage<'a, T> {
        let apply = Rc::clone(&self.apply);
        Box::new(ChainedStage::new(down, (), move |_, down, item: T| down.accept(apply(item))))
    }
}

/// 打平操作，每个元素展开为一个流，大小未知。
pub(crate) struct FlatMapOp<T: 'static, R: 'static> {
    flatten: Rc<dyn Fn(T) -> Stream<R>>,
}

impl<T: 'static, R: 'static> FlatMapOp<T, R> {
    pub(crate) fn new(flatten: impl Fn(T) -> Stream<R> + 'static) -> Self {
        FlatMapOp { flatten: Rc::new(flatten) }
    }
}

impl<T: 'static, R: 'static> Wrap<T, R> for FlatMapOp<T, R> {
    fn name(&self) -> &'static str {
        "flat_map"
    }

    fn wrap<'a>(&self, down: BoxStage<'a, R>, _: &[Config]) -> BoxStage<'a, T> {
        let flatten = Rc::clone(&self.flatten);
        Box::new(
            ChainedStage::new(down, (), move |_, down, item: T| {
                // 元素是集合，转化为流后依次消费流中的数据，下游可以结束时不再拉取
                let mut drain = TerminalStage::new(down, |down, nested| down.accept(nested))
                    .on_can_finish(|down| down.can_finish());
                flatten(item).terminal(Box::new(&mut drain));
            })
            .on_begin(|_, down, _| down.begin(None)),
        )
    }
}

/// 打平操作，每个元素展开为一个迭代器，大小未知。
pub(crate) struct FlatMapIterOp<T, I> {
    flatten: Rc<dyn Fn(T) -> I>,
}

impl<T, I> FlatMapIterOp<T, I> {
    pub(crate) fn new(flatten: impl Fn(T) -> I + 'static) -> Self {
        FlatMapIterOp { flatten: Rc::new(flatten) }
    }
}

impl<T, R, I> Wrap<T, R> for FlatMapIterOp<T, I>
where
    T: 'static,
    R: 'static,
    I: IntoIterator<Item = R> + 'static,
{
    fn name(&self) -> &'static str {
        "flat_map"
    }

    fn wrap<'a>(&self, down: BoxStage<'a, R>, _: &[Config]) -> BoxStage<'a, T> {
        let flatten = Rc::clone(&self.flatten);
        Box::new(
            ChainedStage::new(down, (), move |_, down, item: T| {
                for nested in flatten(item) {
                    if down.can_finish() {
                        break;
                    }
                    down.accept(nested)
                }
            })
            .on_begin(|_, down, _| down.begin(None)),
        )
    }
}
