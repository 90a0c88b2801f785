//! `sipg examples` - Sample queries to start from.

use colored::Colorize;

/// (description, query)
const EXAMPLES: &[(&str, &str)] = &[
    ("Find IPs with SSL certificates from Uber Technologies", r#"ssl:"Uber Technologies Inc""#),
    ("Find IPs with HTTP status 200", "http.status:200"),
    ("Find IPs with specific SSL certificate subject", r#"ssl.cert.subject.CN:"*.uber.com""#),
    ("Find IPs with Apache server", "http.server:Apache"),
    ("Find IPs in specific country", r#"country:"United States""#),
    ("Find IPs with specific port open", "port:80"),
    ("Find IPs with specific product", r#"product:"nginx""#),
    ("Find IPs with specific organization", r#"org:"Amazon""#),
];

pub fn execute() {
    println!("{}", "Example Search Queries:".blue());
    println!();

    for (i, (description, query)) in EXAMPLES.iter().enumerate() {
        println!("{} {}", format!("{}.", i + 1).cyan(), description.green());
        println!("   {}", format!("sipg search '{query}'").yellow());
        println!();
    }
}
