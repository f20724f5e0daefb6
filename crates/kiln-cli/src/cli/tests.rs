#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Command};
    use clap::Parser;
    use kiln_config::BuildMode;
    use std::path::PathBuf;

    #[test]
    fn global_flags_apply_after_subcommand() {
        let cli = Cli::parse_from(["kiln", "config", "--mode", "production", "--root", "site"]);
        assert_eq!(cli.build_mode(), BuildMode::Production);
        assert_eq!(cli.root, PathBuf::from("site"));
        assert!(matches!(cli.command, Command::Config(_)));
    }

    #[test]
    fn unknown_mode_is_accepted_as_unrecognized() {
        let cli = Cli::parse_from(["kiln", "--mode", "staging", "check"]);
        assert_eq!(cli.build_mode(), BuildMode::Unrecognized);
    }

    #[test]
    fn emit_collects_repeated_assets() {
        let cli = Cli::parse_from([
            "kiln",
            "emit",
            "--script",
            "vendor.js",
            "--script",
            "main.js",
            "--style",
            "main.css",
        ]);
        match cli.command {
            Command::Emit(args) => {
                assert_eq!(args.scripts, vec!["vendor.js", "main.js"]);
                assert_eq!(args.styles, vec!["main.css"]);
                assert!(args.title.is_none());
            }
            other => panic!("expected emit, got {other:?}"),
        }
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["kiln", "-v", "-q", "check"]).is_err());
    }

    #[test]
    fn serve_port_override() {
        let cli = Cli::parse_from(["kiln", "serve", "--port", "8080"]);
        match cli.command {
            Command::Serve(args) => assert_eq!(args.port, Some(8080)),
            other => panic!("expected serve, got {other:?}"),
        }
    }

    #[test]
    fn config_defaults_to_no_explicit_file() {
        let cli = Cli::parse_from(["kiln", "schema"]);
        assert!(cli.config.is_none());
        assert_eq!(cli.root, PathBuf::from("."));
    }
}
