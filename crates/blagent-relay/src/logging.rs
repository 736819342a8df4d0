use colored::Colorize;

use blagent_models::CompletionRequest;

/// Safely truncate a string to a maximum number of characters
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let trunc_chars = if max_chars >= 3 { max_chars - 3 } else { 0 };
        format!("{}...", s.chars().take(trunc_chars).collect::<String>())
    }
}

/// Log outbound request details for debugging (console output)
pub fn log_request(url: &str, request: &CompletionRequest, api_key: &str, verbose: bool) {
    if !verbose {
        return;
    }

    println!("\n{}", "═".repeat(80).bright_cyan());
    println!("{}", "🔍 UPSTREAM REQUEST DEBUG".bright_cyan().bold());
    println!("{}", "═".repeat(80).bright_cyan());
    println!("{}: {}", "URL".bright_yellow(), url);

    println!("\n{}", "Headers:".bright_yellow());
    println!("  Content-Type: application/json");
    println!(
        "  Authorization: Bearer {}***",
        &api_key.chars().take(10).collect::<String>()
    );

    println!("\n{}", "Request Body:".bright_yellow());
    match serde_json::to_string_pretty(&request) {
        Ok(json) => println!("{}", safe_truncate(&json, 2000)),
        Err(e) => println!("{}", format!("Error serializing request: {}", e).red()),
    }
    println!("{}", "═".repeat(80).bright_cyan());
}

/// Log upstream response body for debugging (console output)
pub fn log_response(status: &reqwest::StatusCode, body: &str, verbose: bool) {
    if !verbose {
        return;
    }

    println!("\n{}", "═".repeat(80).bright_cyan());
    println!("{}", "🔍 UPSTREAM RESPONSE DEBUG".bright_cyan().bold());
    println!("{}: {}", "Status".bright_yellow(), status);
    println!("{}", safe_truncate(body, 2000));
    println!("{}", "═".repeat(80).bright_cyan());
}
