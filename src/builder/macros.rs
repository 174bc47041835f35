//! Macros for ergonomic configuration construction.

/// Build a [`MachineConfig`](crate::core::MachineConfig) from a compact
/// state table.
///
/// State and event names are written as identifiers. Expands to a
/// [`ConfigBuilder`](crate::builder::ConfigBuilder) chain and evaluates to
/// `Result<MachineConfig, BuildError>`.
///
/// # Example
///
/// ```
/// use retrace::fsm_config;
///
/// let config = fsm_config! {
///     initial: hungry,
///     states: {
///         hungry => { next => fed },
///         fed => { next => sleepy },
///         sleepy => { next => hungry, wake => hungry },
///     }
/// }
/// .unwrap();
///
/// assert_eq!(config.target("fed", "next").unwrap(), "sleepy");
/// ```
#[macro_export]
macro_rules! fsm_config {
    (
        initial: $initial:ident,
        states: {
            $(
                $state:ident => { $($event:ident => $target:ident),* $(,)? }
            ),* $(,)?
        } $(,)?
    ) => {{
        let builder = $crate::builder::ConfigBuilder::new().initial(stringify!($initial));
        $(
            let transitions: ::std::vec::Vec<(&str, &str)> =
                ::std::vec![$((stringify!($event), stringify!($target))),*];
            let builder = builder.state(stringify!($state), transitions);
        )*
        builder.build()
    }};
}
