//! CLI Command Tests
//!
//! Argument parsing, exit codes, and the offline commands (favorites,
//! theme) run against a temp store.

// =============================================================================
// CLI Argument Parsing Tests
// =============================================================================

mod cli_parsing {
    use clap::Parser;
    use tmdbsurfer::cli::{Cli, Command, FavoritesAction, MediaTypeFilter, MovieListArg, TvListArg};

    #[test]
    fn test_search_command_basic() {
        let cli = Cli::parse_from(["tmdbsurfer", "search", "batman"]);
        assert!(cli.is_cli_mode());
        match cli.command {
            Some(Command::Search(cmd)) => {
                assert_eq!(cmd.query, "batman");
                assert_eq!(cmd.limit, 20); // default
                assert!(cmd.media_type.is_none());
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_search_with_filters() {
        let cli = Cli::parse_from(["tmdbsurfer", "s", "dune", "--limit", "5", "-t", "movie"]);
        match cli.command {
            Some(Command::Search(cmd)) => {
                assert_eq!(cmd.limit, 5);
                assert_eq!(cmd.media_type, Some(MediaTypeFilter::Movie));
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_list_names() {
        let cli = Cli::parse_from(["tmdbsurfer", "movies", "now-playing"]);
        assert!(matches!(
            cli.command,
            Some(Command::Movies(ref cmd)) if cmd.list == MovieListArg::NowPlaying
        ));

        let cli = Cli::parse_from(["tmdbsurfer", "tv", "top-rated"]);
        assert!(matches!(
            cli.command,
            Some(Command::Tv(ref cmd)) if cmd.list == TvListArg::TopRated
        ));

        assert!(Cli::try_parse_from(["tmdbsurfer", "movies", "trending"]).is_err());
    }

    #[test]
    fn test_favorites_remove_movie() {
        let cli = Cli::parse_from(["tmdbsurfer", "favorites", "rm", "--movie", "550"]);
        match cli.command {
            Some(Command::Favorites(cmd)) => match cmd.action {
                FavoritesAction::Remove(target) => {
                    assert_eq!(target.movie, Some(550));
                    assert_eq!(target.tv, None);
                }
                _ => panic!("Expected remove"),
            },
            _ => panic!("Expected Favorites command"),
        }
    }

    #[test]
    fn test_theme_toggle_flag() {
        let cli = Cli::parse_from(["tmdbsurfer", "theme", "--toggle"]);
        assert!(matches!(cli.command, Some(Command::Theme(ref cmd)) if cmd.toggle));
    }
}

// =============================================================================
// Offline Command Tests
// =============================================================================

mod offline_commands {
    use tmdbsurfer::cli::{
        ExitCode, FavoriteTarget, FavoritesAction, FavoritesCmd, FavoritesFilterArg,
        FavoritesListCmd, Output, SearchCmd, ThemeCmd,
    };
    use tmdbsurfer::commands;
    use tmdbsurfer::config::Config;
    use tmdbsurfer::favorites::FavoritesStore;
    use tmdbsurfer::models::Movie;
    use tmdbsurfer::store::FileStore;
    use tmdbsurfer::theme::ThemePreference;

    fn quiet() -> Output {
        Output {
            json: true,
            quiet: true,
        }
    }

    fn config(dir: &tempfile::TempDir) -> Config {
        Config {
            tmdb_api_key: None,
            env_file: Some(dir.path().join("missing.env")),
            store_path: Some(dir.path().join("store.json")),
        }
    }

    #[tokio::test]
    async fn test_theme_toggle_persists() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);

        let code = commands::theme_cmd(ThemeCmd { toggle: true }, &config, &quiet()).await;
        assert_eq!(code, ExitCode::Success);

        let store = FileStore::open(dir.path().join("store.json"));
        assert!(ThemePreference::load(&store).is_dark_mode);
    }

    #[tokio::test]
    async fn test_favorites_list_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);

        let mut favorites = FavoritesStore::load(FileStore::open(dir.path().join("store.json")));
        favorites.add_movie(Movie {
            id: 550,
            title: Some("Fight Club".into()),
            overview: None,
            poster_path: None,
            release_date: None,
            vote_average: None,
            name: None,
        });
        drop(favorites);

        let list = FavoritesCmd {
            action: FavoritesAction::List(FavoritesListCmd {
                filter: FavoritesFilterArg::Movies,
            }),
        };
        assert_eq!(commands::favorites_cmd(list, &config, &quiet()).await, ExitCode::Success);

        let remove = |id| FavoritesCmd {
            action: FavoritesAction::Remove(FavoriteTarget {
                movie: Some(id),
                tv: None,
            }),
        };
        assert_eq!(
            commands::favorites_cmd(remove(550), &config, &quiet()).await,
            ExitCode::Success
        );
        // Second removal: nothing left to remove
        assert_eq!(
            commands::favorites_cmd(remove(550), &config, &quiet()).await,
            ExitCode::NotFound
        );

        let reloaded = FavoritesStore::load(FileStore::open(dir.path().join("store.json")));
        assert!(reloaded.is_empty());
    }

    #[tokio::test]
    async fn test_missing_api_key_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        if std::env::var("TMDB_API_KEY").is_ok() {
            // Environment key would win over the empty config
            return;
        }

        let cmd = SearchCmd {
            query: "alien".into(),
            limit: 5,
            media_type: None,
        };
        assert_eq!(
            commands::search_cmd(cmd, &config, &quiet()).await,
            ExitCode::ConfigError
        );
    }

    #[tokio::test]
    async fn test_empty_query_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = SearchCmd {
            query: "   ".into(),
            limit: 5,
            media_type: None,
        };
        assert_eq!(
            commands::search_cmd(cmd, &config(&dir), &quiet()).await,
            ExitCode::InvalidArgs
        );
    }
}
