/// Network adapters for the remote image storage provider
mod cloudinary_client;

pub use cloudinary_client::{
    CloudinaryClient, CloudinaryCredentials, DEFAULT_API_BASE, ENV_API_KEY, ENV_API_SECRET,
    ENV_CLOUD_NAME,
};
