use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use storefront_assets::adapters::outbound::console::StderrProgressReporter;
use storefront_assets::adapters::outbound::filesystem::FileSystemReader;
use storefront_assets::adapters::outbound::network::{
    CloudinaryClient, CloudinaryCredentials, ENV_CLOUD_NAME,
};
use storefront_assets::adapters::outbound::persistence::JsonFileProductRepository;
use storefront_assets::application::dto::OutputFormat;
use storefront_assets::application::factories::{
    FormatterFactory, PresenterFactory, PresenterType,
};
use storefront_assets::application::use_cases::{
    AddProductUseCase, ListProductsUseCase, RemoveProductUseCase,
};
use storefront_assets::cli::{Args, Command};
use storefront_assets::config::{
    discover_config, load_config_from_path, ConfigFile, CONFIG_FILENAME,
};
use storefront_assets::shared::error::{CatalogError, ExitCode};
use storefront_assets::shared::retry::RetryPolicy;
use storefront_assets::shared::Result;

/// Default location of the product store, relative to the working directory
const DEFAULT_STORE_PATH: &str = "products.json";

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::from_error(&e).as_i32());
    }
}

/// Effective settings after merging the config file with command-line flags
struct Settings {
    store_path: PathBuf,
    format: OutputFormat,
    folder: Option<String>,
    cloud_name: Option<String>,
    api_base: Option<String>,
    cleanup_policy: RetryPolicy,
    upload_timeout: Option<Duration>,
}

impl Settings {
    fn resolve(args: &Args, config: ConfigFile) -> Result<Self> {
        let format = match (args.format, config.format.as_deref()) {
            (Some(format), _) => format,
            (None, Some(value)) => value
                .parse()
                .map_err(|e: String| anyhow::anyhow!("Invalid config: {}", e))?,
            (None, None) => OutputFormat::default(),
        };

        Ok(Self {
            store_path: args
                .store
                .clone()
                .or_else(|| config.store_path.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH)),
            format,
            cleanup_policy: config.cleanup_policy(),
            upload_timeout: config.upload_timeout(),
            folder: config.folder,
            cloud_name: config.cloud_name,
            api_base: config.api_base,
        })
    }

    /// Builds the storage client; credentials are only required by commands
    /// that talk to Cloudinary. `CLOUDINARY_NAME` wins over `cloud_name`.
    fn asset_storage(&self) -> Result<CloudinaryClient> {
        let credentials = CloudinaryCredentials::from_lookup(|name| {
            std::env::var(name)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .or_else(|| {
                    (name == ENV_CLOUD_NAME)
                        .then(|| self.cloud_name.clone())
                        .flatten()
                })
        })?;

        let client = CloudinaryClient::new(credentials)?;
        Ok(match &self.api_base {
            Some(api_base) => client.with_api_base(api_base.clone()),
            None => client,
        })
    }
}

fn load_config(explicit: Option<&Path>, quiet: bool) -> Result<ConfigFile> {
    match explicit {
        Some(path) => {
            let config = load_config_from_path(path)?;
            if !quiet {
                eprintln!("📄 Loaded config from: {}", path.display());
            }
            Ok(config)
        }
        None => match discover_config(Path::new("."))? {
            Some(config) => {
                if !quiet {
                    eprintln!("📄 Auto-discovered config file: {}", CONFIG_FILENAME);
                }
                Ok(config)
            }
            None => Ok(ConfigFile::default()),
        },
    }
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref(), args.quiet)?;
    let settings = Settings::resolve(&args, config)?;

    let formatter = FormatterFactory::create(settings.format);
    let presenter = PresenterFactory::create(PresenterType::from_output(args.output.clone()));
    let progress_reporter = if args.quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    };
    let product_repository = JsonFileProductRepository::open(&settings.store_path)?;

    let result = match args.command {
        Command::Add(add) => {
            let request = add.into_request()?;
            let mut use_case = AddProductUseCase::new(
                product_repository,
                settings.asset_storage()?,
                FileSystemReader::new(),
                progress_reporter,
            )
            .with_rollback_policy(settings.cleanup_policy);
            if let Some(folder) = &settings.folder {
                use_case = use_case.with_folder(folder.clone());
            }
            if let Some(timeout) = settings.upload_timeout {
                use_case = use_case.with_upload_timeout(timeout);
            }

            use_case
                .execute(request)
                .await
                .and_then(|response| formatter.format_added(&response))
        }
        Command::Remove { id } => {
            let use_case = RemoveProductUseCase::new(
                product_repository,
                settings.asset_storage()?,
                progress_reporter,
            )
            .with_cleanup_policy(settings.cleanup_policy);

            use_case
                .execute(&id)
                .await
                .and_then(|response| formatter.format_removed(&response))
        }
        Command::List => ListProductsUseCase::new(product_repository)
            .list()
            .await
            .and_then(|products| formatter.format_products(&products)),
        Command::Show { id } => ListProductsUseCase::new(product_repository)
            .find(&id)
            .await
            .and_then(|product| formatter.format_product(&product)),
    };

    match result {
        Ok(output) => presenter.present(&output),
        Err(e) => {
            // Unknown products are rendered like any other result; the exit
            // code still reports them
            if let Some(not_found @ CatalogError::ProductNotFound { .. }) =
                e.downcast_ref::<CatalogError>()
            {
                presenter.present(&formatter.format_failure(&not_found.to_string())?)?;
            }
            Err(e)
        }
    }
}
