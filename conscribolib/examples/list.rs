use chrono::NaiveDate;
use conscribolib::{client::Client, model::Credentials, transport::HttpTransport};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: проводки за один день, endpoint и ключи из окружения
    let endpoint = std::env::var("CONSCRIBO_ENDPOINT")?;
    let creds = Credentials::new(
        std::env::var("CONSCRIBO_API_KEY")?,
        std::env::var("CONSCRIBO_PASSPHRASE")?,
    );
    let client = Client::connect(HttpTransport::new()?, endpoint, &creds)?;

    let day = NaiveDate::from_ymd_opt(2017, 8, 1).ok_or("bad date")?;
    for tx in client.list_transactions(day, day)? {
        print!("{tx}");
    }
    Ok(())
}
