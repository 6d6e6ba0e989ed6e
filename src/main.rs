#[tokio::main]
async fn main() {
    if let Err(error) = rss_json_lib::run().await {
        eprintln!("rss-json: {error}");
        std::process::exit(1);
    }
}
