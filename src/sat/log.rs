/// Targets passed to the `log` macros, so output can be filtered per area
/// with `RUST_LOG`, e.g. `RUST_LOG=search=debug`.
pub mod targets {
    pub const SEARCH: &str = "search";
    pub const PROPAGATION: &str = "propagation";
    pub const PURE: &str = "pure";
    pub const PARSE: &str = "parse";
    pub const PREPROCESSING: &str = "preprocessing";
}
