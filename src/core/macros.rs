//! 核心宏定义

/// 为配置结构体实现 `Default`
///
/// 使用示例:
/// ```rust
/// use emission_scheduler::impl_default;
///
/// struct PoolLimits {
///     max_particles: usize,
///     particle_lifetime: f32,
/// }
///
/// impl_default!(PoolLimits {
///     max_particles: 1024,
///     particle_lifetime: 2.0,
/// });
///
/// assert_eq!(PoolLimits::default().max_particles, 1024);
/// ```
#[macro_export]
macro_rules! impl_default {
    ($struct_name:ident {
        $($field:ident: $value:expr),* $(,)?
    }) => {
        impl Default for $struct_name {
            fn default() -> Self {
                Self {
                    $($field: $value),*
                }
            }
        }
    };
}
