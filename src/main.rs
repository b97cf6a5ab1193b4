use anyhow::Context;
use dlhub::{DlHub, HubConfig, DEFAULT_MAX_ATTEMPTS};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{filter::Builder as TracingFilterBuilder, util::SubscriberInitExt};

const USAGE: &str = "Usage: dlhub <url> [--download] [--out-dir DIR] [--prefix PREFIX] \
                     [--filename NAME] [--header \"Name: Value\"]... [--max-attempts N]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Err(e) if e.not_found() => {}
        Ok(_) => {}
        Err(e) => {
            panic!("Failed to load .env file: {}", e);
        }
    }

    init_log();

    let options = CliOptions::parse(std::env::args().skip(1))?;

    info!(url = %options.config.url, "Resolving post media");

    let hub = DlHub::new(options.config)?;
    let result = hub.run(options.download, options.max_attempts).await;

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

struct CliOptions {
    config: HubConfig,
    download: bool,
    max_attempts: u32,
}

impl CliOptions {
    fn parse<T: Iterator<Item = String>>(mut args: T) -> anyhow::Result<Self> {
        let mut url: Option<String> = None;
        let mut download = false;
        let mut max_attempts = DEFAULT_MAX_ATTEMPTS;
        let mut extra_headers = Vec::new();
        let mut output_prefix: Option<String> = None;
        let mut output_dir: Option<String> = None;
        let mut output_filename: Option<String> = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--download" => download = true,
                "--out-dir" => output_dir = Some(flag_value(&mut args, &arg)?),
                "--prefix" => output_prefix = Some(flag_value(&mut args, &arg)?),
                "--filename" => output_filename = Some(flag_value(&mut args, &arg)?),
                "--header" => extra_headers.push(flag_value(&mut args, &arg)?),
                "--max-attempts" => {
                    max_attempts = flag_value(&mut args, &arg)?
                        .parse()
                        .context("--max-attempts expects a non-negative integer")?;
                }
                _ if arg.starts_with("--") => {
                    anyhow::bail!("Unknown flag {arg}\n{USAGE}");
                }
                _ => {
                    if url.replace(arg).is_some() {
                        anyhow::bail!("Only one URL is supported\n{USAGE}");
                    }
                }
            }
        }

        let url = url.with_context(|| USAGE.to_string())?;

        let mut config = HubConfig::new(url);
        config.extra_headers = extra_headers;
        config.output_dir = output_dir.map(Into::into);
        config.output_filename = output_filename;
        if let Some(prefix) = output_prefix {
            config.output_prefix = prefix;
        }

        Ok(Self {
            config,
            download,
            max_attempts,
        })
    }
}

fn flag_value<T: Iterator<Item = String>>(args: &mut T, flag: &str) -> anyhow::Result<String> {
    args.next()
        .with_context(|| format!("{flag} expects a value\n{USAGE}"))
}

fn init_log() {
    tracing_subscriber::fmt()
        .with_ansi(true)
        .with_env_filter(
            TracingFilterBuilder::default()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .finish()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_url_and_flags() {
        let options = CliOptions::parse(
            [
                "https://www.tiktok.com/@x/video/1",
                "--download",
                "--out-dir",
                "media",
                "--header",
                "Referer: https://example.com",
                "--max-attempts",
                "5",
            ]
            .map(String::from)
            .into_iter(),
        )
        .expect("valid args");

        assert_eq!(options.config.url, "https://www.tiktok.com/@x/video/1");
        assert!(options.download);
        assert_eq!(options.max_attempts, 5);
        assert_eq!(
            options.config.output_dir.as_deref(),
            Some(std::path::Path::new("media"))
        );
        assert_eq!(options.config.extra_headers.len(), 1);
    }

    #[test]
    fn missing_url_is_an_error() {
        assert!(CliOptions::parse(std::iter::empty()).is_err());
    }

    #[test]
    fn flag_without_value_is_an_error() {
        let args = ["https://example.com/video/1", "--out-dir"]
            .map(String::from)
            .into_iter();
        assert!(CliOptions::parse(args).is_err());
    }
}
