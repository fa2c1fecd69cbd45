use anyhow::{anyhow, Result};
use dotenv::dotenv;
use reqwest::blocking::Client as HttpClient;
use serde_json::{json, Value};
use std::env;

fn main() -> Result<()> {
	dotenv().ok();

	let url = env::args()
		.nth(1)
		.ok_or_else(|| anyhow!("Usage: url-integrity-client <url>"))?;

	let service_url = env::var("URL_CHECK_SERVICE_URL")
		.unwrap_or_else(|_| "http://localhost:3000".to_string());

	let client = HttpClient::new();
	let response = client
		.post(format!("{}/check-url", service_url))
		.json(&json!({ "url": url }))
		.send()?;

	let status = response.status();
	let body: Value = response.json()?;

	if !status.is_success() {
		let message = body
			.get("message")
			.and_then(|m| m.as_str())
			.unwrap_or("request failed");
		return Err(anyhow!("Check failed ({}): {}", status, message));
	}

	let safe = body.get("safe").and_then(|s| s.as_bool()).unwrap_or(false);
	let checked = body.get("url").and_then(|u| u.as_str()).unwrap_or(&url);
	let message = body.get("message").and_then(|m| m.as_str()).unwrap_or("");

	if safe {
		println!("SAFE     {}", checked);
	} else {
		println!("FLAGGED  {}", checked);
	}
	if !message.is_empty() {
		println!("{}", message);
	}

	Ok(())
}
