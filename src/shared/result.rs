/// Crate-wide Result alias backed by anyhow::Error.
///
/// Typed failures (see [`crate::shared::error::CatalogError`]) are wrapped into
/// this alias and recovered with `downcast_ref` where callers need to branch.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
