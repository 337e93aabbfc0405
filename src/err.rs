use thiserror::Error;

#[derive(Error, Debug, Eq, PartialEq)]
pub enum StreamErr {
    #[error("[Optional] No value present")]
    NoValuePresent,

    #[error("[Source] Pull from exhausted `{kind}` source, `has_next` must be checked first")]
    SourceExhausted { kind: &'static str },

    #[error("[Pipeline] Source is already being walked by another terminal operation")]
    ConcurrentWalk,
}

impl StreamErr {
    /// 记录错误后立即中止当前调用，用于调用方违反约定的场景。
    #[track_caller]
    pub(crate) fn raise(self) -> ! {
        log::error!("{}", self);
        panic!("{}", self);
    }
}
