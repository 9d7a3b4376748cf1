//! CLI command implementations.

pub(crate) mod list;
pub(crate) mod post;
pub(crate) mod render;
pub(crate) mod tags;
pub(crate) mod tree;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use logbook_config::{CliSettings, Config};
use logbook_site::{MetadataDefaults, RouteConfig, Site, SiteConfig, slug_from_route};
use logbook_storage::Storage;
use logbook_storage_fs::FsStorage;

use crate::error::CliError;
use crate::output::Output;

pub(crate) use list::ListArgs;
pub(crate) use post::PostArgs;
pub(crate) use render::RenderArgs;

/// Options shared by every command.
#[derive(Args, Debug)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover logbook.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Markdown content directory (overrides config).
    #[arg(short, long, global = true, env = "LOGBOOK_SOURCE_DIR")]
    source_dir: Option<PathBuf>,

    /// Enable verbose output (info-level logs and timing).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Loaded configuration plus the site built from it.
pub(crate) struct Context {
    pub config: Config,
    pub site: Site,
}

impl CommonArgs {
    /// Load configuration and build a site over the content directory.
    pub(crate) fn load(&self) -> Result<Context, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let source_dir = config.content_resolved.source_dir.clone();
        tracing::info!(source_dir = %source_dir.display(), "Loading content");
        if !source_dir.exists() {
            Output::new().warning(&format!(
                "Content directory {} does not exist",
                source_dir.display()
            ));
        }

        let storage: Arc<dyn Storage> = Arc::new(FsStorage::new(source_dir));
        let site = Site::new(storage, site_config_from_config(&config));
        Ok(Context { config, site })
    }
}

impl Context {
    /// Slug addressed by a CLI argument: a bare slug or a post route.
    pub(crate) fn requested_slug<'a>(&self, arg: &'a str) -> &'a str {
        slug_from_route(&self.config.routes.post_prefix, arg).unwrap_or(arg)
    }
}

/// Translate application config into site config.
pub(crate) fn site_config_from_config(config: &Config) -> SiteConfig {
    SiteConfig {
        routes: RouteConfig {
            post_prefix: config.routes.post_prefix.clone(),
            home_label: config.routes.home_label.clone(),
        },
        defaults: MetadataDefaults {
            title: config.defaults.title.clone(),
            read_time: config.defaults.read_time.clone(),
        },
        today: None,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_project(root: &std::path::Path) {
        fs::write(
            root.join("logbook.toml"),
            "[content]\nsource_dir = \"posts\"\n\n[routes]\npost_prefix = \"/notes/\"\nhome_label = \"Index\"\n\n[defaults]\ntitle = \"Draft\"\n",
        )
        .unwrap();
        fs::create_dir_all(root.join("posts/systems")).unwrap();
        fs::write(root.join("posts/systems/raft.md"), "# Raft\n").unwrap();
    }

    fn common(config: PathBuf) -> CommonArgs {
        CommonArgs {
            config: Some(config),
            source_dir: None,
            verbose: false,
        }
    }

    #[test]
    fn test_site_config_from_config() {
        let mut config = Config::default();
        config.routes.post_prefix = "/notes/".to_owned();
        config.defaults.title = "Draft".to_owned();

        let site_config = site_config_from_config(&config);

        assert_eq!(site_config.routes.post_prefix, "/notes/");
        assert_eq!(site_config.routes.home_label, "Home");
        assert_eq!(site_config.defaults.title, "Draft");
        assert_eq!(site_config.defaults.read_time, "5 min read");
        assert_eq!(site_config.today, None);
    }

    #[test]
    fn test_load_uses_config_values() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_project(temp_dir.path());

        let ctx = common(temp_dir.path().join("logbook.toml")).load().unwrap();
        let page = ctx.site.post("systems/raft").unwrap();

        assert_eq!(page.resolved.title, "Draft");
        assert_eq!(page.breadcrumbs[0].label, "Index");
    }

    #[test]
    fn test_source_dir_override() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_project(temp_dir.path());
        let other = temp_dir.path().join("other");
        fs::create_dir_all(&other).unwrap();
        fs::write(other.join("solo.md"), "---\ntitle: Solo\n---\n").unwrap();

        let args = CommonArgs {
            source_dir: Some(other),
            ..common(temp_dir.path().join("logbook.toml"))
        };
        let ctx = args.load().unwrap();

        let slugs: Vec<String> = ctx.site.tree().into_iter().map(|n| n.slug).collect();
        assert_eq!(slugs, vec!["solo"]);
    }

    #[test]
    fn test_requested_slug_accepts_routes() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_project(temp_dir.path());
        let ctx = common(temp_dir.path().join("logbook.toml")).load().unwrap();

        assert_eq!(ctx.requested_slug("/notes/systems/raft/"), "systems/raft");
        assert_eq!(ctx.requested_slug("systems/raft"), "systems/raft");
    }

    #[derive(Clone)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_load_logs_source_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_project(temp_dir.path());
        let logs = SharedBuf(Arc::new(Mutex::new(Vec::new())));
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            common(temp_dir.path().join("logbook.toml")).load().unwrap();
        });

        let logged = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("Loading content"));
        assert!(logged.contains("posts"));
    }

    #[test]
    fn test_missing_config_file() {
        let err = common(PathBuf::from("/nonexistent/logbook.toml"))
            .load()
            .err()
            .unwrap();

        assert!(matches!(err, CliError::Config(_)));
    }
}
