fn main() {
    println!("URL Integrity Check Service Example");
    println!("===================================");

    let url = "https://example.com";

    println!("\nURL to check: {}", url);

    println!("\nTo test the service, send a POST request to:");
    println!("http://localhost:3000/check-url");
    println!("\nWith the following JSON body:");
    println!("{{");
    println!("  \"url\": \"{}\"", url);
    println!("}}");

    println!("\nOr use curl:");
    println!("curl -X POST http://localhost:3000/check-url \\");
    println!("  -H \"Content-Type: application/json\" \\");
    println!("  -d '{{\"url\": \"{}\"}}'", url);

    println!("\nCompleted checks are served at:");
    println!("GET http://localhost:3000/checks");
    println!("GET http://localhost:3000/checks/<check-id>");
}
