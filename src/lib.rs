//! 惰性求值、单次遍历的数据流。
//!
//! 中间操作（`filter`、`map`、`sorted`、`limit`等）只记录操作链，终止操作（`for_each`、`reduce`、`to_slice`等）
//! 把整条链融合为一组嵌套的节点后遍历一次数据源：
//!
//! ```
//! use rstream::Stream;
//!
//! let res = Stream::range(0, 10, 1).filter(|x| x % 2 == 0).map(|x| x * 10).limit(3).to_slice();
//! assert_eq!(vec![0, 20, 40], res);
//! ```

mod collect;
pub mod compare;
mod config;
mod err;
mod op;
mod optional;
mod pipe;
mod source;
mod stage;
mod terminal;
#[cfg(test)]
mod testing;

pub use crate::collect::Collector;
pub use crate::config::Config;
pub use crate::err::StreamErr;
pub use crate::optional::Optional;
pub use crate::pipe::Stream;
pub use crate::source::{Endpoint, IterSource, RangeSource, SeedSource, Source, SupplierSource, VecSource};
