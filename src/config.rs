/// 流水线配置，在终止操作触发时传递给每个节点。
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Config {
    /// 以trace级别记录每个拉取的元素以及融合后的操作链
    Verbose,
    /// 排序操作使用不稳定排序
    UnstableSort,
}

#[inline]
pub(crate) fn is_verbose(configs: &[Config]) -> bool {
    configs.contains(&Config::Verbose)
}

#[inline]
pub(crate) fn is_unstable_sort(configs: &[Config]) -> bool {
    configs.contains(&Config::UnstableSort)
}

/// 根据大小提示预分配缓冲区时的上限，大小提示仅作参考。
pub(crate) const PRESIZE_LIMIT: usize = 1 << 16;

#[inline]
pub(crate) fn presize(size: Option<usize>) -> usize {
    size.unwrap_or(0).min(PRESIZE_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        assert!(is_verbose(&[Config::UnstableSort, Config::Verbose]));
        assert!(!is_verbose(&[Config::UnstableSort]));
        assert!(is_unstable_sort(&[Config::UnstableSort]));
        assert!(!is_unstable_sort(&[]));
    }

    #[test]
    fn test_presize() {
        assert_eq!(0, presize(None));
        assert_eq!(10, presize(Some(10)));
        assert_eq!(PRESIZE_LIMIT, presize(Some(usize::MAX)));
    }
}
