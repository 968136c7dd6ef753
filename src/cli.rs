use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::application::dto::{AddProductRequest, OutputFormat};
use crate::catalog::domain::ProductId;
use crate::shared::Result;

/// Manage storefront products and their Cloudinary-hosted images
#[derive(Parser, Debug)]
#[command(name = "storefront-assets")]
#[command(version)]
#[command(
    about = "Manage storefront products and their Cloudinary-hosted images",
    long_about = None
)]
pub struct Args {
    /// Path to a config file (defaults to ./storefront-assets.config.yml if present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the JSON product store
    #[arg(short, long, global = true, value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// Output format: text or json
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Only print warnings and errors on stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload up to four images and create a product
    Add(AddArgs),

    /// Remove a product and delete its images from Cloudinary
    Remove {
        /// Product id
        id: ProductId,
    },

    /// List all products, newest first
    List,

    /// Show a single product
    Show {
        /// Product id
        id: ProductId,
    },
}

#[derive(ClapArgs, Debug)]
pub struct AddArgs {
    /// Product name
    #[arg(long)]
    pub name: String,

    /// Product description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Price
    #[arg(long)]
    pub price: f64,

    /// Category (e.g. Men, Women, Kids)
    #[arg(long)]
    pub category: String,

    /// Sub-category (e.g. Topwear)
    #[arg(long = "sub-category", default_value = "")]
    pub sub_category: String,

    /// Available sizes, comma separated: --sizes S,M,L
    #[arg(long, value_delimiter = ',', required = true)]
    pub sizes: Vec<String>,

    /// Mark the product as a bestseller
    #[arg(long)]
    pub bestseller: bool,

    /// First image
    #[arg(long, value_name = "FILE")]
    pub image1: Option<PathBuf>,

    /// Second image
    #[arg(long, value_name = "FILE")]
    pub image2: Option<PathBuf>,

    /// Third image
    #[arg(long, value_name = "FILE")]
    pub image3: Option<PathBuf>,

    /// Fourth image
    #[arg(long, value_name = "FILE")]
    pub image4: Option<PathBuf>,
}

impl AddArgs {
    /// Converts the parsed flags into the use case request
    pub fn into_request(self) -> Result<AddProductRequest> {
        let mut builder = AddProductRequest::builder()
            .name(self.name)
            .description(self.description)
            .price(self.price)
            .category(self.category)
            .sub_category(self.sub_category)
            .bestseller(self.bestseller)
            .sizes(self.sizes.into_iter().map(|s| s.trim().to_string()));

        let images = [self.image1, self.image2, self.image3, self.image4];
        for (index, image) in images.into_iter().enumerate() {
            if let Some(path) = image {
                builder = builder.image(index + 1, path);
            }
        }

        builder.build()
    }
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
