use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use conscribolib::{
    api::request::TransactionListRequest,
    client::Client,
    error::{ConscriboError, Result},
    export::csv::write_transactions,
    model::Credentials,
    transport::HttpTransport,
};
use log::info;
use std::fs::File;
use std::io::{self, Write};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Fmt {
    Csv,
    Text,
}

#[derive(Parser, Debug)]
#[command(name = "conscribo", version, about = "Выгрузка проводок из Conscribo")]
struct Cli {
    /// Адрес API
    #[arg(long, env = "CONSCRIBO_ENDPOINT")]
    endpoint: String,

    /// Ключ API
    #[arg(long = "api-key", env = "CONSCRIBO_API_KEY")]
    api_key: String,

    /// Пароль API
    #[arg(long, env = "CONSCRIBO_PASSPHRASE", hide_env_values = true)]
    passphrase: String,

    /// Начало периода, YYYY-MM-DD
    #[arg(long = "from")]
    date_start: NaiveDate,

    /// Конец периода (по умолчанию равен началу)
    #[arg(long = "to")]
    date_end: Option<NaiveDate>,

    #[arg(long)]
    limit: Option<u32>,

    #[arg(long)]
    offset: Option<u32>,

    /// Выходной файл (по умолчанию stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Формат выхода
    #[arg(long = "out-format", value_enum, default_value = "csv")]
    out_format: Fmt,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let creds = Credentials::new(cli.api_key, cli.passphrase);
    let client = Client::connect(HttpTransport::new()?, cli.endpoint, &creds)?;

    let mut req = TransactionListRequest::new(cli.limit, cli.offset);
    req.filter_date(Some(cli.date_start), Some(cli.date_end.unwrap_or(cli.date_start)));
    let transactions = client.list(&req)?;
    info!("fetched {} transactions", transactions.len());

    // writer
    let mut writer: Box<dyn Write> = match cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    match cli.out_format {
        Fmt::Csv => write_transactions(&mut writer, &transactions)?,
        Fmt::Text => {
            for tx in &transactions {
                write!(writer, "{tx}")?;
            }
        }
    }

    writer.flush().map_err(ConscriboError::from)
}
