//! Command-line schema.
//!
//! Values are validated while parsing: every typed option runs through one of
//! the validators in [`crate::validate`], so handlers only ever see accepted
//! values.

use std::path::PathBuf;

use clap::{
    ArgAction, ArgGroup, Parser, Subcommand,
    builder::{
        PossibleValuesParser, Styles,
        styling::{AnsiColor, Effects},
    },
};

use crate::{
    Res,
    credentials::AuthSource,
    error::Error,
    sniff::ImageFile,
    validate::{parse_datetime, parse_image_file, parse_positive_integer, parse_positive_real, parse_url},
    vocab,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

fn one_of(values: &'static [&'static str]) -> PossibleValuesParser {
    PossibleValuesParser::new(values.iter().copied())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name = env!("CARGO_PKG_NAME"),
  bin_name = env!("CARGO_PKG_NAME"),
  about = "MangaCat Manager",
  styles = styles(),
)]
pub struct Cli {
    /// Increase the verbosity level (up to 2)
    #[clap(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log into manga.cat
    Login(LoginOptions),

    /// Manage series
    Series(SeriesOptions),

    /// Manage chapters
    Chapters(ChaptersOptions),

    /// Manage people
    People(EntityOptions),

    /// Manage groups
    Groups(EntityOptions),
}

#[derive(Parser, Debug, Clone)]
#[command(group(
    ArgGroup::new("authentication")
        .required(true)
        .args(["netrc", "credentials"])
))]
pub struct LoginOptions {
    /// Use a netrc file for authentication
    #[clap(short, long, value_name = "FILE", num_args = 0..=1)]
    pub netrc: Option<Option<PathBuf>>,

    /// Provide your credentials for authentication: [EMAIL] [USERNAME] [PASSWORD]
    #[clap(short, long, value_name = "CREDENTIALS", num_args = 0..)]
    pub credentials: Option<Vec<String>>,
}

impl LoginOptions {
    /// The credential strategy selected on the command line.
    pub fn source(&self) -> Res<AuthSource> {
        match (&self.netrc, &self.credentials) {
            (Some(path), None) => Ok(AuthSource::Netrc(path.clone())),
            (None, Some(values)) => Ok(AuthSource::Interactive(values.clone())),
            _ => Err(Error::Config(
                "exactly one of --netrc and --credentials is required".to_string(),
            )),
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct SeriesOptions {
    #[command(subcommand)]
    pub command: SeriesSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SeriesSubcommand {
    /// Add a new series
    Add(SeriesAddOpts),

    /// Edit a series
    Edit,

    /// Delete a series
    Delete,
}

#[derive(Parser, Debug, Clone)]
pub struct SeriesAddOpts {
    /// Use this token to authenticate
    #[clap(short = 'T', long)]
    pub token: String,

    /// The name of the series
    #[clap(short, long)]
    pub name: String,

    /// A description for the series
    #[clap(short, long)]
    pub description: String,

    /// The cover of the series
    #[clap(short, long, value_parser = parse_image_file)]
    pub cover: ImageFile,

    /// Set if this is a hentai series
    #[clap(short = 'H', long)]
    pub hentai: bool,

    /// The country of origin of the series
    #[clap(short = 'C', long, default_value = "Japan", value_parser = one_of(vocab::COUNTRIES))]
    pub country: String,

    /// The status of the series
    #[clap(short, long, default_value = "Releasing", value_parser = one_of(vocab::STATUSES))]
    pub status: String,

    /// The default orientation of the series
    #[clap(short, long, default_value = "rtl", value_parser = one_of(vocab::ORIENTATIONS))]
    pub orientation: String,

    /// Other names of the series
    #[clap(short, long, value_name = "ALIASES", num_args = 1..)]
    pub aliases: Option<Vec<String>>,

    /// Some tags for the series
    #[clap(short, long, num_args = 1.., value_parser = one_of(vocab::TAGS))]
    pub tags: Option<Vec<String>>,

    /// The URL to the raw version of the series
    #[clap(short, long, value_name = "RAW_URL", value_parser = parse_url)]
    pub raw: Option<String>,

    /// The ID of the series on MangaUpdates
    #[clap(long, value_name = "MU_ID")]
    pub mu_id: Option<u64>,

    /// The ID of the series on MyAnimeList
    #[clap(long, value_name = "MAL_ID")]
    pub mal_id: Option<u64>,

    /// The ID of the series on BookWalker
    #[clap(long, value_name = "BW_ID")]
    pub bw_id: Option<u64>,

    /// The ID of the series on Amazon JP
    #[clap(long, value_name = "AMAZON_ID")]
    pub amzn_id: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ChaptersOptions {
    #[command(subcommand)]
    pub command: ChaptersSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ChaptersSubcommand {
    /// Add a new chapter
    Add(ChaptersAddOpts),

    /// Edit a chapter
    Edit,

    /// Delete a chapter
    Delete,
}

#[derive(Parser, Debug, Clone)]
pub struct ChaptersAddOpts {
    /// Use this token to authenticate
    #[clap(short = 'T', long)]
    pub token: String,

    /// The title of the chapter
    #[clap(short, long)]
    pub title: String,

    /// The MangaCat ID of the chapter's series
    #[clap(short, long)]
    pub series: u64,

    /// The image files of the chapter
    #[clap(short, long, value_name = "FILES", required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// The names of the chapter's groups
    #[clap(short, long, value_name = "GROUPS", required = true, num_args = 1..)]
    pub groups: Vec<String>,

    /// The absolute number of the chapter
    #[clap(
        long,
        visible_alias = "na",
        value_name = "CHAPTER_NUMBER",
        default_value = "0",
        value_parser = parse_positive_real
    )]
    pub number_absolute: f64,

    /// The number of the chapter in its volume
    #[clap(
        long,
        visible_alias = "nv",
        value_name = "NUMBER_IN_VOLUME",
        default_value = "0",
        value_parser = parse_positive_real
    )]
    pub number_volume: f64,

    /// The volume number of the chapter
    #[clap(
        long,
        visible_alias = "vn",
        value_name = "VOLUME_NUMBER",
        default_value = "0",
        value_parser = parse_positive_integer
    )]
    pub volume_number: u64,

    /// The language of the translation
    #[clap(short, long, default_value = "English", value_parser = one_of(vocab::LANGUAGES))]
    pub language: String,

    /// The chapter delay in ISO date-time format
    #[clap(short, long, value_parser = parse_datetime)]
    pub delay: Option<String>,

    /// Keep the chapter unpublished
    #[clap(short = 'H', long)]
    pub hidden: bool,
}

/// People and groups are declared but have no implemented subcommands yet.
#[derive(Parser, Debug, Clone)]
pub struct EntityOptions {
    #[command(subcommand)]
    pub command: EntitySubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum EntitySubcommand {
    /// Add a new entry
    Add,

    /// Edit an entry
    Edit,

    /// Delete an entry
    Delete,
}
