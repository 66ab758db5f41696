use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "aac",
    about = "AAC board: navigate and edit image-to-speech mapping files",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with board settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Abort on the first bad line or entry instead of skipping it
    #[arg(long, global = true)]
    pub strict: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the home page, or the items of one category
    Show(ShowArgs),
    /// Tap images in order, starting from home
    Select(SelectArgs),
    /// Add an item to a category, or a new category to home
    Add(AddArgs),
    /// Load a board strictly and report its size
    Check(CheckArgs),
    /// Rewrite a board into a new mapping file
    Export(ExportArgs),
}

#[derive(Args)]
pub struct ShowArgs {
    pub board: PathBuf,
    #[arg(short, long)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct SelectArgs {
    pub board: PathBuf,
    #[arg(required = true)]
    pub images: Vec<String>,
}

#[derive(Args)]
pub struct AddArgs {
    pub board: PathBuf,
    pub image: String,
    /// Text to speak, or the category name when adding to home
    #[arg(required = true)]
    pub text: Vec<String>,
    /// Category to add the item to; omit to declare a new category
    #[arg(short, long)]
    pub category: Option<String>,
    /// Write the result here instead of back to the board file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct CheckArgs {
    pub board: PathBuf,
}

#[derive(Args)]
pub struct ExportArgs {
    pub board: PathBuf,
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_show() {
        let cli = Cli::try_parse_from(["aac", "show", "board.txt"]).unwrap();
        if let Command::Show(args) = cli.command {
            assert_eq!(args.board, PathBuf::from("board.txt"));
            assert!(args.category.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_show_category() {
        let cli = Cli::try_parse_from(["aac", "show", "board.txt", "-c", "food"]).unwrap();
        if let Command::Show(args) = cli.command {
            assert_eq!(args.category, Some("food".into()));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_select_many() {
        let cli = Cli::try_parse_from([
            "aac", "select", "board.txt", "img/food/plate.png", "img/food/fries.png",
        ]).unwrap();
        if let Command::Select(args) = cli.command {
            assert_eq!(args.images, vec!["img/food/plate.png", "img/food/fries.png"]);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn select_requires_an_image() {
        assert!(Cli::try_parse_from(["aac", "select", "board.txt"]).is_err());
    }

    #[test]
    fn parse_add_with_multiword_text() {
        let cli = Cli::try_parse_from([
            "aac", "add", "board.txt", "img/food/fries.png", "french", "fries", "--category", "food",
        ]).unwrap();
        if let Command::Add(args) = cli.command {
            assert_eq!(args.image, "img/food/fries.png");
            assert_eq!(args.text, vec!["french", "fries"]);
            assert_eq!(args.category, Some("food".into()));
            assert!(args.output.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_export() {
        let cli = Cli::try_parse_from(["aac", "export", "in.txt", "out.txt"]).unwrap();
        if let Command::Export(args) = cli.command {
            assert_eq!(args.output, PathBuf::from("out.txt"));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from([
            "aac", "--verbose", "--strict", "--format", "json", "--config", "aac.toml", "check", "board.txt",
        ]).unwrap();
        assert!(cli.verbose);
        assert!(cli.strict);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("aac.toml")));
        assert!(matches!(cli.command, Command::Check(_)));
    }
}
