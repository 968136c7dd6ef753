/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound (driven) ports are the only way the application core reaches the
/// record store, remote storage, the file system and the console.
pub mod outbound;
