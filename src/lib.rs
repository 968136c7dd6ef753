//! storefront-assets - product asset lifecycle manager for a storefront backend
//!
//! Keeps a product catalog and the remotely hosted images it references in
//! step: images are uploaded all-or-nothing when a product is created, and
//! removed (best-effort, with bounded retries) when a product is deleted.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`catalog`): products, asset references, cleanup outcomes
//!   and the identifier resolver
//! - **Application Layer** (`application`): use cases and the cleanup/upload services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Cloudinary client, record stores, console and file I/O
//! - **Shared** (`shared`): error types, retry policy, security checks
//!
//! # Example
//!
//! ```no_run
//! use storefront_assets::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! let use_case = RemoveProductUseCase::new(
//!     JsonFileProductRepository::open("products.json")?,
//!     CloudinaryClient::new(CloudinaryCredentials::from_env()?)?,
//!     StderrProgressReporter::new(),
//! );
//!
//! let response = use_case.execute(&ProductId::new("p-42")?).await?;
//! println!("{}", response.message);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
    pub use crate::adapters::outbound::network::{CloudinaryClient, CloudinaryCredentials};
    pub use crate::adapters::outbound::persistence::{
        InMemoryProductRepository, JsonFileProductRepository,
    };
    pub use crate::application::dto::{
        AddProductRequest, AddProductResponse, OutputFormat, RemoveProductResponse,
    };
    pub use crate::application::services::{
        AssetCleanupOrchestrator, RetryingDeleter, UploadCoordinator,
    };
    pub use crate::application::use_cases::{
        AddProductUseCase, DeletionStage, ListProductsUseCase, RemoveProductUseCase,
    };
    pub use crate::catalog::domain::{
        AssetReference, CleanupError, CleanupReport, DeletionOutcome, DestroyStatus,
        ImagePayload, ImageSlots, Product, ProductDetails, ProductId, RemoteIdentifier,
        ResolutionFailure, UploadedAsset, MAX_IMAGES,
    };
    pub use crate::catalog::services::{IdentifierResolver, ResolveStrategy};
    pub use crate::ports::outbound::{
        AssetStorage, ImagePayloadReader, OutputPresenter, ProductRepository, ProgressReporter,
        ReportFormatter,
    };
    pub use crate::shared::error::{CatalogError, ExitCode};
    pub use crate::shared::retry::{AttemptError, RetryPolicy};
    pub use crate::shared::Result;
}
