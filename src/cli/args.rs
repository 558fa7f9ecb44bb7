use clap::{Args, Parser, Subcommand};

/// Multi-tenant todo list REST service
#[derive(Parser, Debug)]
#[command(name = "todo-api", author, version, about)]
pub struct Cli {
    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply pending migrations and serve HTTP
    Serve(ServeArgs),

    /// Inspect or change the database schema
    Migrate(MigrateArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Bind address, overrides SERVER_HOST
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Listen port, overrides SERVER_PORT
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Args, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    /// Apply every pending migration
    Up,
    /// Revert the most recent migration
    Down,
    /// List migrations and whether each is applied
    Status,
    /// Drop all tables and migrate from scratch
    Fresh,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_overrides_are_optional() {
        let cli = Cli::try_parse_from(["todo-api", "serve", "-H", "127.0.0.1"]).unwrap();

        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(args.port, None);
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["todo-api", "migrate", "status", "--verbose"]).unwrap();

        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Migrate(MigrateArgs {
                action: MigrateAction::Status
            })
        ));
    }

    #[test]
    fn test_unknown_migrate_action_rejected() {
        assert!(Cli::try_parse_from(["todo-api", "migrate", "sideways"]).is_err());
    }
}
