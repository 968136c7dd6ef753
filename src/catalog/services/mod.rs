mod identifier_resolver;

pub use identifier_resolver::{
    IdentifierResolver, PatternStrategy, ResolveStrategy, UploadPathStrategy,
};
