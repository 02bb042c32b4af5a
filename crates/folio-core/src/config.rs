use crate::cache::CacheConfig;
use crate::device::Thresholds;
use crate::lazy::LazyConfig;
use crate::scroll::ScrollConfig;
use crate::visibility::VisibilityConfig;

/// Every tunable of the performance layer in one place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OptimizerConfig {
    pub thresholds: Thresholds,
    pub visibility: VisibilityConfig,
    pub scroll: ScrollConfig,
    pub lazy: LazyConfig,
    pub cache: CacheConfig,
}
