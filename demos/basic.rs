use retry_fetch::{fetch_with_retry, RequestOptions, RetryPolicy, RetryingFetcher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let url = std::env::var("PORTFOLIO_URL")
        .unwrap_or_else(|_| "https://httpbin.org/json".to_owned());

    let portfolio = fetch_with_retry(&url, &RequestOptions::get(), 2, 200).await?;
    println!("{portfolio:#}");

    let fetcher = RetryingFetcher::new().with_policy(RetryPolicy::new(3, 100));
    let echoed = fetcher
        .fetch(
            "https://httpbin.org/post",
            &RequestOptions::post()
                .header("x-source", "demo")
                .json(serde_json::json!({ "title": "Dunes" })),
        )
        .await?;
    println!("{}", echoed["json"]);

    Ok(())
}
