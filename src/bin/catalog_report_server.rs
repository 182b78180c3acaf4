use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use catalog_report::ReportConfig;
use catalog_report::config::DEFAULT_DATA_PATH;
use catalog_report::core::Dataset;
use catalog_report::server;
use catalog_report::telemetry::init_default_tracing;
use tracing::info;

#[derive(Debug, Default)]
struct CliArgs {
    data_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    bind_addr: Option<SocketAddr>,
    export_path: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let _ = init_default_tracing();

    let mut config = match &args.config_path {
        Some(path) => ReportConfig::load(path).map_err(|err| err.to_string())?,
        None => ReportConfig::default(),
    };
    if let Some(data_path) = args.data_path {
        config.data_path = data_path;
    }
    if let Some(bind_addr) = args.bind_addr {
        config.bind_addr = bind_addr;
    }

    let dataset = Dataset::load(&config.data_path).map_err(|err| err.to_string())?;
    let engine = config
        .build_engine(Arc::new(dataset))
        .map_err(|err| err.to_string())?;

    if let Some(export_path) = args.export_path {
        let page = engine.render_page().map_err(|err| err.to_string())?;
        fs::write(&export_path, page.as_bytes())
            .map_err(|err| format!("failed to write `{}`: {err}", export_path.display()))?;
        info!(path = %export_path.display(), bytes = page.len(), "exported report page");
        println!("wrote {}", export_path.display());
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("failed to start runtime: {err}"))?;
    runtime
        .block_on(server::serve(config.bind_addr, engine))
        .map_err(|err| err.to_string())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                parsed.config_path = Some(PathBuf::from(value));
            }
            "--addr" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --addr".to_owned())?;
                let addr = value
                    .parse::<SocketAddr>()
                    .map_err(|err| format!("invalid --addr `{value}`: {err}"))?;
                parsed.bind_addr = Some(addr);
            }
            "--export" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --export".to_owned())?;
                parsed.export_path = Some(PathBuf::from(value));
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            flag if flag.starts_with('-') => {
                return Err(format!("unknown argument `{flag}`\n\n{}", usage_message()));
            }
            _ => {
                if parsed.data_path.is_some() {
                    return Err(format!(
                        "unexpected extra argument `{arg}`\n\n{}",
                        usage_message()
                    ));
                }
                parsed.data_path = Some(PathBuf::from(&arg));
            }
        }
    }

    Ok(parsed)
}

fn print_usage() {
    println!("{}", usage_message());
}

fn usage_message() -> String {
    format!(
        "Usage: catalog-report-server [DATA_CSV] [options]\n\nArguments:\n  DATA_CSV               Catalog CSV to report on (default: {DEFAULT_DATA_PATH})\n\nOptions:\n  --config <path>        JSON config file\n  --addr <ip:port>       Listen address (default: 127.0.0.1:5000)\n  --export <path>        Render the page once into <path> and exit\n  -h, --help             Show this message"
    )
}
