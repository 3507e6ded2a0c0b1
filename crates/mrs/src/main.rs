use std::fs::{self, File};
use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use mrs_document::HtmlDocument;
use mrs_fetcher::{fetch_one, FetchRequest, ReqwestClient};
use mrs_reviews::writer::CsvWriter;
use mrs_reviews::{extract, scrape_year, Assembly, Dataset, ScrapeConfig};
use tokio::runtime;

const DEFAULT_LOG_FILTER: &str = "mrs_fetcher=info,mrs_reviews=info";

/// Movie Reviews Scraper
#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub cmd: SubCommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum SubCommand {
    #[command(name = "scrape")]
    Scrape(ScrapeArgs),
    #[command(name = "extract")]
    Extract(ExtractArgs),
    #[command(hide = true)]
    Completion,
}

/// Scrape the user reviews of a year's top movies
#[derive(Debug, clap::Args)]
pub struct ScrapeArgs {
    /// Year of the top movies index
    #[arg(long, short, default_value_t = 2019)]
    pub year: u32,
    /// Path to the output csv file, stdout when missing
    #[arg(long, short)]
    pub output_file: Option<PathBuf>,
    /// Optional yaml configuration file
    #[arg(env = "MRS_CONFIG", long)]
    pub config: Option<PathBuf>,
    /// Override the maximum number of requests in flight
    #[arg(long)]
    pub concurrency: Option<usize>,
    /// Override the per request timeout
    #[arg(long)]
    pub timeout_secs: Option<u64>,
    /// Override the site base url
    #[arg(long)]
    pub base_url: Option<String>,
    /// When quiet no logs are outputted
    #[arg(long, short)]
    pub quiet: bool,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ScrapeConfig> {
    let conf = match path {
        Some(path) => serde_yaml::from_reader(File::open(path)?)?,
        None => ScrapeConfig::default(),
    };
    Ok(conf)
}

impl TryFrom<&ScrapeArgs> for ScrapeConfig {
    type Error = anyhow::Error;

    fn try_from(args: &ScrapeArgs) -> Result<Self, Self::Error> {
        let mut conf = load_config(args.config.as_ref())?;
        if let Some(concurrency) = args.concurrency {
            conf.fetcher.concurrency = concurrency;
        }
        if let Some(timeout_secs) = args.timeout_secs {
            conf.fetcher.timeout_secs = timeout_secs;
        }
        if let Some(base_url) = &args.base_url {
            conf.site.base_url = base_url.to_string();
        }
        Ok(conf)
    }
}

pub fn scrape(args: ScrapeArgs) -> anyhow::Result<()> {
    let conf = ScrapeConfig::try_from(&args)?;
    let client = ReqwestClient::new()?;
    let rt = runtime::Builder::new_multi_thread().enable_all().build()?;

    let Assembly {
        dataset,
        pages,
        skipped,
    } = rt.block_on(scrape_year(&client, &conf, args.year))?;

    let mut wtr = CsvWriter::create(&conf.csv, args.output_file.as_deref())?;
    wtr.write_dataset(&dataset)?;
    if let Some(path) = &args.output_file {
        log::info!("Wrote {} rows to {}", dataset.len(), path.display());
    }

    eprintln!(
        "Scraped {} reviews from {pages} pages, skipped {} pages",
        dataset.len(),
        skipped.len()
    );
    for page in &skipped {
        eprintln!("  {}: {}", page.url, page.reason);
    }

    Ok(())
}

/// Extract the reviews of a single page and print them to stdout
#[derive(Debug, clap::Args)]
#[command(group = clap::ArgGroup::new("page").required(true))]
pub struct ExtractArgs {
    /// A local html page
    #[arg(group = "page", long)]
    pub file: Option<PathBuf>,
    /// A distant html page, fetched with the first header profile
    #[arg(group = "page", long)]
    pub url: Option<String>,
    /// Optional yaml configuration file
    #[arg(env = "MRS_CONFIG", long)]
    pub config: Option<PathBuf>,
}

/// Raw bytes of the page to extract, fetched or read from disk.
fn read_page(args: &ExtractArgs, conf: &ScrapeConfig) -> anyhow::Result<Vec<u8>> {
    if let Some(url) = &args.url {
        let profile = conf
            .fetcher
            .profiles
            .first()
            .ok_or_else(|| anyhow::anyhow!("No header profile configured"))?;
        let client = ReqwestClient::new()?;
        let rt = runtime::Builder::new_current_thread().enable_all().build()?;
        let request = FetchRequest {
            url: url.as_str(),
            profile,
        };
        let resp = rt.block_on(fetch_one(&client, &conf.fetcher, request))?;
        if !resp.is_success() {
            anyhow::bail!("{url} responded with status {}", resp.status);
        }
        Ok(resp.body)
    } else if let Some(path) = &args.file {
        Ok(fs::read(path)?)
    } else {
        anyhow::bail!("Missing `url` or `file`");
    }
}

pub fn extract_page(args: ExtractArgs) -> anyhow::Result<()> {
    let conf = load_config(args.config.as_ref())?;
    let page = read_page(&args, &conf)?;

    let extraction = extract(&HtmlDocument::from_bytes(&page), &conf.site.locator)?;
    let mut dataset = Dataset::default();
    dataset.push_page(extraction);

    let mut wtr = CsvWriter::create(&conf.csv, None)?;
    wtr.write_dataset(&dataset)?;
    Ok(())
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.cmd {
        SubCommand::Scrape(args) => {
            if !args.quiet {
                init_logger();
            }
            scrape(args)
        }
        SubCommand::Extract(args) => {
            init_logger();
            extract_page(args)
        }
        SubCommand::Completion => {
            generate(Shell::Bash, &mut Args::command(), "mrs", &mut io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn cli_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fetcher:\n  concurrency: 4\n  timeoutSecs: 5").unwrap();

        let args = Args::parse_from([
            "mrs",
            "scrape",
            "--config",
            file.path().to_str().unwrap(),
            "--timeout-secs",
            "12",
            "--base-url",
            "https://mirror.test",
        ]);
        let SubCommand::Scrape(args) = args.cmd else {
            panic!("expected scrape subcommand");
        };

        let conf = ScrapeConfig::try_from(&args).unwrap();
        assert_eq!(args.year, 2019);
        assert_eq!(conf.fetcher.concurrency, 4);
        assert_eq!(conf.fetcher.timeout_secs, 12);
        assert_eq!(conf.site.base_url, "https://mirror.test");
    }

    #[test]
    fn file_page_with_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"<h2 class=\"panel-heading\">Am\xe9lie Reviews</h2>\
              <span class=\"star-display\"><span class=\"star-display__filled\"></span></span>\
              <p class=\"audience-reviews__review\">Tr\xe8s bien</p>",
        )
        .unwrap();

        let args = Args::parse_from(["mrs", "extract", "--file", file.path().to_str().unwrap()]);
        let SubCommand::Extract(args) = args.cmd else {
            panic!("expected extract subcommand");
        };

        let conf = ScrapeConfig::default();
        let page = read_page(&args, &conf).unwrap();
        let extraction = extract(&HtmlDocument::from_bytes(&page), &conf.site.locator).unwrap();

        assert_eq!(extraction.title, "Am\u{fffd}lie");
        assert_eq!(extraction.reviews.len(), 1);
        assert_eq!(extraction.reviews[0].text, "Tr\u{fffd}s bien");
        assert_eq!(extraction.reviews[0].score, 1.0);
    }
}
