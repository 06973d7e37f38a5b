use colored::*;
use governor::{Quota, RateLimiter};
use hdrhistogram::Histogram;
use reqwest::Client;
use serde_json::{json, Value};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use uuid::Uuid;

const DURATION_SECS: u64 = 20;
const BURST_CAPACITY: i64 = 50;
const BURST_REQUESTS: usize = 200;

struct Target {
    name: &'static str,
    method: &'static str,
    url: String,
    token: Option<String>,
    body: Option<Value>,
}

#[tokio::main]
async fn main() {
    let base_url = std::env::var("BENCH_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

    println!("{}", "🚀 Starting Benchmark Suite".bold().green());
    println!("Target URL: {}", base_url);

    let client = match Client::builder()
        .pool_max_idle_per_host(1000)
        .timeout(Duration::from_secs(10))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{} {}", "❌ Could not build HTTP client:".red().bold(), e);
            return;
        }
    };

    if client.get(format!("{}/health", base_url)).send().await.is_err() {
        eprintln!("{}", format!("❌ Server is NOT reachable at {}. Please start it first.", base_url).red().bold());
        return;
    }

    println!("\n{}", "⚙️  Setting up benchmark data...".yellow());
    let admin_token = match signin(&client, &base_url, "admin@example.com", "admin123").await {
        Some(token) => token,
        None => {
            eprintln!("{}", "❌ Admin sign-in failed. Is the server seeded with demo data?".red().bold());
            return;
        }
    };
    let user_token = match signup(&client, &base_url).await {
        Some(token) => token,
        None => {
            eprintln!("{}", "❌ Could not create benchmark user.".red().bold());
            return;
        }
    };
    println!("{}", "✅ Data created successfully.".green());

    run_booking_burst(&client, &base_url, &admin_token, &user_token).await;

    let targets = vec![
        Target {
            name: "Health Check (Public)",
            method: "GET",
            url: format!("{}/health", base_url),
            token: None,
            body: None,
        },
        Target {
            name: "List Events (Public Read)",
            method: "GET",
            url: format!("{}/events", base_url),
            token: None,
            body: None,
        },
        Target {
            name: "User Bookings (Token Verify)",
            method: "GET",
            url: format!("{}/user/bookings", base_url),
            token: Some(user_token.clone()),
            body: None,
        },
        Target {
            name: "Sign-in Flow (Crypto Intensive)",
            method: "POST",
            url: format!("{}/signin", base_url),
            token: None,
            body: Some(json!({ "email": "test@example.com", "password": "password123" })),
        },
    ];

    let rps_stages = vec![10, 50, 200, 1000];

    for target in targets {
        println!("\n{}", "=".repeat(60));
        println!("Benchmarking Endpoint: {}", target.name.cyan().bold());
        println!("URL: {}", target.url);
        println!("{}", "=".repeat(60));

        println!("{:<10} | {:<15} | {:<15} | {:<15}", "RPS", "Mean (ms)", "P99 (ms)", "Success Rate");
        println!("{:-<10}-+-{:-<15}-+-{:-<15}-+-{:-<15}", "", "", "", "");

        for &rps in &rps_stages {
            run_stage(&client, &target, rps).await;
        }
    }
}

async fn signin(client: &Client, base_url: &str, email: &str, password: &str) -> Option<String> {
    let res = client.post(format!("{}/signin", base_url))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .ok()?;
    if !res.status().is_success() {
        return None;
    }
    let body: Value = res.json().await.ok()?;
    body["token"].as_str().map(str::to_string)
}

async fn signup(client: &Client, base_url: &str) -> Option<String> {
    let res = client.post(format!("{}/signup", base_url))
        .json(&json!({
            "email": format!("bench-{}@example.com", Uuid::new_v4()),
            "password": "bench-password",
            "firstName": "Bench"
        }))
        .send()
        .await
        .ok()?;
    if !res.status().is_success() {
        return None;
    }
    let body: Value = res.json().await.ok()?;
    body["token"].as_str().map(str::to_string)
}

/// Fires far more single-ticket bookings than seats at one event and checks
/// the inventory never goes negative.
async fn run_booking_burst(client: &Client, base_url: &str, admin_token: &str, user_token: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{}", "Concurrent Booking Burst".cyan().bold());
    println!("{}", "=".repeat(60));

    let created = client.post(format!("{}/admin/events", base_url))
        .bearer_auth(admin_token)
        .json(&json!({
            "title": format!("Benchmark Gig {}", Uuid::new_v4()),
            "date": "2030-01-01",
            "location": "Load Test Arena",
            "price": 100,
            "capacity": BURST_CAPACITY
        }))
        .send()
        .await;

    let event_id = match created {
        Ok(res) if res.status().is_success() => match res.json::<Value>().await {
            Ok(body) => body["event"]["id"].as_str().unwrap_or_default().to_string(),
            Err(e) => {
                eprintln!("{} {}", "❌ Unreadable event response:".red(), e);
                return;
            }
        },
        Ok(res) => {
            eprintln!("{} {}", "❌ Failed to create burst event, status".red(), res.status());
            return;
        }
        Err(e) => {
            eprintln!("{} {}", "❌ Failed to create burst event:".red(), e);
            return;
        }
    };

    let mut set = JoinSet::new();
    let started = Instant::now();
    for _ in 0..BURST_REQUESTS {
        let client = client.clone();
        let url = format!("{}/bookings", base_url);
        let token = user_token.to_string();
        let event_id = event_id.clone();
        set.spawn(async move {
            client.post(url)
                .bearer_auth(token)
                .json(&json!({ "eventId": event_id, "quantity": 1 }))
                .send()
                .await
                .map(|r| r.status().is_success())
                .unwrap_or(false)
        });
    }

    let mut confirmed = 0i64;
    while let Some(res) = set.join_next().await {
        if matches!(res, Ok(true)) {
            confirmed += 1;
        }
    }

    let remaining = match client.get(format!("{}/events/{}", base_url, event_id)).send().await {
        Ok(res) => res.json::<Value>().await.ok()
            .and_then(|body| body["event"]["availableTickets"].as_i64()),
        Err(_) => None,
    };

    println!("Requests: {}  Confirmed: {}  Remaining: {:?}  Elapsed: {:?}",
        BURST_REQUESTS, confirmed, remaining, started.elapsed());

    if confirmed == BURST_CAPACITY && remaining == Some(0) {
        println!("{}", "✅ No overselling detected.".green().bold());
    } else {
        println!("{}", "❌ Inventory mismatch after burst!".red().bold());
    }
}

async fn run_stage(client: &Client, target: &Target, rps: u32) {
    let Some(rate) = NonZeroU32::new(rps) else { return };
    let limiter = Arc::new(RateLimiter::direct(Quota::per_second(rate)));

    let (tx, mut rx) = mpsc::channel(50000);
    let start_time = Instant::now();
    let duration = Duration::from_secs(DURATION_SECS);

    loop {
        if start_time.elapsed() > duration {
            break;
        }

        if limiter.check().is_ok() {
            let client = client.clone();
            let url = target.url.clone();
            let body = target.body.clone();
            let token = target.token.clone();
            let method = target.method;
            let tx = tx.clone();

            tokio::spawn(async move {
                let req_start = Instant::now();
                let mut req = match method {
                    "POST" => client.post(&url),
                    _ => client.get(&url),
                };
                if let Some(token) = token {
                    req = req.bearer_auth(token);
                }
                if let Some(b) = body {
                    req = req.json(&b);
                }
                let res = req.send().await;
                let latency = req_start.elapsed();

                let success = match res {
                    Ok(r) => r.status().is_success(),
                    Err(_) => false,
                };

                let _ = tx.send((latency, success)).await;
            });
        } else {
            tokio::task::yield_now().await;
        }
    }

    drop(tx);

    let Ok(mut histogram) = Histogram::<u64>::new(3) else { return };
    let mut successes = 0;
    let mut total = 0;

    while let Some((latency, success)) = rx.recv().await {
        total += 1;
        if success { successes += 1; }
        let _ = histogram.record(latency.as_micros() as u64);
    }

    let mean_ms = histogram.mean() / 1000.0;
    let p99_ms = histogram.value_at_quantile(0.99) as f64 / 1000.0;
    let success_rate = if total > 0 { (successes as f64 / total as f64) * 100.0 } else { 0.0 };

    println!(
        "{:<10} | {:<15.2} | {:<15.2} | {:<14.1}%",
        rps,
        mean_ms,
        p99_ms,
        success_rate
    );

    tokio::time::sleep(Duration::from_millis(500)).await;
}
