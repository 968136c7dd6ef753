mod add_product;
mod list_products;
mod remove_product;

pub use add_product::AddProductUseCase;
pub use list_products::ListProductsUseCase;
pub use remove_product::{DeletionStage, RemoveProductUseCase};
