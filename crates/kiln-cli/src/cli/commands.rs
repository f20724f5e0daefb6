use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the assembled build configuration as JSON
    Config(ConfigArgs),

    /// Validate the project layout against the filesystem
    Check(CheckArgs),

    /// Clean the output directory, render the HTML shell and copy static assets
    Emit(EmitArgs),

    /// Serve the output directory with reload events
    Serve(ServeArgs),

    /// Print the JSON schema of kiln.toml
    Schema(SchemaArgs),
}

#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Print single-line JSON
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Only validate kiln.toml values, skip filesystem checks
    #[arg(long)]
    pub schema_only: bool,
}

#[derive(Args, Debug, Default)]
pub struct EmitArgs {
    /// Script emitted by the bundler, relative to the output directory
    ///
    /// Repeat for several files; order is preserved in the HTML shell.
    #[arg(long = "script", value_name = "FILE")]
    pub scripts: Vec<String>,

    /// Stylesheet emitted by the bundler, relative to the output directory
    #[arg(long = "style", value_name = "FILE")]
    pub styles: Vec<String>,

    /// Page title, overriding `title` from kiln.toml
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Port override for the dev server
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Args, Debug, Default)]
pub struct SchemaArgs {
    /// Print single-line JSON
    #[arg(long)]
    pub compact: bool,
}
