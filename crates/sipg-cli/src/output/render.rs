use anyhow::Result;
use colored::Colorize;
use sipg::Hit;
use std::io::{self, Stdout, Write};
use tabled::settings::{Panel, Style};
use tabled::{Table, Tabled};

use super::{Projection, Sink};

/// Hostnames shown in a table cell before the rest are summarized.
const TABLE_HOSTNAMES: usize = 2;

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Port")]
    port: String,
    #[tabled(rename = "Organization")]
    org: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Hostnames")]
    hostnames: String,
}

impl From<&Hit> for ResultRow {
    fn from(hit: &Hit) -> Self {
        let record = &hit.record;
        Self {
            ip: hit.ip.to_string(),
            port: record.port.map_or_else(|| "N/A".to_string(), |p| p.to_string()),
            org: record.org.clone().unwrap_or_else(|| "N/A".to_string()),
            location: record.location.clone().unwrap_or_default().summary(),
            hostnames: hostname_cell(&record.hostnames),
        }
    }
}

fn hostname_cell(hostnames: &[String]) -> String {
    if hostnames.is_empty() {
        return "N/A".to_string();
    }
    let mut cell = hostnames
        .iter()
        .take(TABLE_HOSTNAMES)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if hostnames.len() > TABLE_HOSTNAMES {
        cell.push_str(&format!(" (+{} more)", hostnames.len() - TABLE_HOSTNAMES));
    }
    cell
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Lines(Projection),
    Table,
}

/// Renders hits to the console.
///
/// Line layouts print each hit as it arrives. The table layout needs every
/// row for column widths, so it prints on [`finish`](Sink::finish).
pub struct ConsoleSink<W: Write = Stdout> {
    out: W,
    layout: Layout,
    rows: Vec<ResultRow>,
}

impl ConsoleSink<Stdout> {
    /// One line or block per hit on stdout.
    pub fn lines(projection: Projection) -> Self {
        Self::with_writer(io::stdout(), Layout::Lines(projection))
    }

    /// A table of detail rows on stdout.
    pub fn table() -> Self {
        Self::with_writer(io::stdout(), Layout::Table)
    }
}

impl<W: Write> ConsoleSink<W> {
    const fn with_writer(out: W, layout: Layout) -> Self {
        Self {
            out,
            layout,
            rows: Vec::new(),
        }
    }

    fn write_detailed(&mut self, hit: &Hit) -> io::Result<()> {
        let record = &hit.record;
        let label = |name: &str| format!("{name}:").green();

        writeln!(self.out)?;
        writeln!(self.out, "{}", format!("Result {}:", hit.index).cyan())?;
        writeln!(self.out, "  {} {}", label("IP"), hit.ip)?;
        match record.port {
            Some(port) => writeln!(self.out, "  {} {port}", label("Port"))?,
            None => writeln!(self.out, "  {} N/A", label("Port"))?,
        }
        writeln!(
            self.out,
            "  {} {}",
            label("Organization"),
            record.org.as_deref().unwrap_or("N/A")
        )?;
        if let Some(location) = record.location.as_ref().filter(|l| !l.is_unknown()) {
            writeln!(self.out, "  {} {}", label("Location"), location.summary())?;
        }
        if !record.hostnames.is_empty() {
            writeln!(self.out, "  {} {}", label("Hostnames"), record.hostnames.join(", "))?;
        }
        if !record.domains.is_empty() {
            writeln!(self.out, "  {} {}", label("Domains"), record.domains.join(", "))?;
        }
        Ok(())
    }
}

impl<W: Write> Sink for ConsoleSink<W> {
    fn accept(&mut self, hit: &Hit) -> Result<()> {
        match self.layout {
            Layout::Lines(Projection::IpOnly) => writeln!(self.out, "{}. {}", hit.index, hit.url())?,
            Layout::Lines(Projection::Detailed) => self.write_detailed(hit)?,
            Layout::Table => self.rows.push(ResultRow::from(hit)),
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.layout == Layout::Table {
            if self.rows.is_empty() {
                writeln!(self.out, "{}", "No results to display.".yellow())?;
            } else {
                let table = Table::new(&self.rows)
                    .with(Style::rounded())
                    .with(Panel::header("Shodan Search Results"))
                    .to_string();
                writeln!(self.out, "{table}")?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sipg::{GeoLocation, MatchRecord};
    use std::net::Ipv4Addr;

    fn hit(index: u64, ip: Ipv4Addr, record: MatchRecord) -> Hit {
        Hit {
            index,
            page: 1,
            ip,
            record,
        }
    }

    fn render(layout: Layout, hits: &[Hit]) -> String {
        colored::control::set_override(false);
        let mut sink = ConsoleSink::with_writer(Vec::new(), layout);
        for h in hits {
            sink.accept(h).unwrap();
        }
        sink.finish().unwrap();
        String::from_utf8(sink.out).unwrap()
    }

    #[test]
    fn test_ip_only_lines_are_numbered() {
        let hits = vec![
            hit(1, Ipv4Addr::new(1, 1, 1, 1), MatchRecord::default()),
            hit(2, Ipv4Addr::new(9, 9, 9, 9), MatchRecord::default()),
        ];
        let out = render(Layout::Lines(Projection::IpOnly), &hits);
        assert_eq!(out, "1. https://1.1.1.1\n2. https://9.9.9.9\n");
    }

    #[test]
    fn test_detailed_block() {
        let record = MatchRecord {
            port: Some(443),
            org: Some("Acme".into()),
            hostnames: vec!["a.example.com".into(), "b.example.com".into()],
            location: Some(GeoLocation {
                city: Some("Berlin".into()),
                country_name: Some("Germany".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let out = render(
            Layout::Lines(Projection::Detailed),
            &[hit(3, Ipv4Addr::new(5, 6, 7, 8), record)],
        );

        assert!(out.contains("Result 3:"));
        assert!(out.contains("  IP: 5.6.7.8"));
        assert!(out.contains("  Port: 443"));
        assert!(out.contains("  Organization: Acme"));
        assert!(out.contains("  Location: Berlin, Germany"));
        assert!(out.contains("  Hostnames: a.example.com, b.example.com"));
        assert!(!out.contains("Domains:"));
    }

    #[test]
    fn test_detailed_block_fills_missing_fields() {
        let out = render(
            Layout::Lines(Projection::Detailed),
            &[hit(1, Ipv4Addr::new(5, 6, 7, 8), MatchRecord::default())],
        );
        assert!(out.contains("  Port: N/A"));
        assert!(out.contains("  Organization: N/A"));
        assert!(!out.contains("Location:"));
    }

    #[test]
    fn test_hostname_cell_truncates() {
        assert_eq!(hostname_cell(&[]), "N/A");
        let names: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| (*s).to_string()).collect();
        assert_eq!(hostname_cell(&names[..1]), "a");
        assert_eq!(hostname_cell(&names[..2]), "a, b");
        assert_eq!(hostname_cell(&names), "a, b (+2 more)");
    }

    #[test]
    fn test_table_prints_on_finish() {
        colored::control::set_override(false);
        let mut sink = ConsoleSink::with_writer(Vec::new(), Layout::Table);
        sink.accept(&hit(1, Ipv4Addr::new(10, 1, 2, 3), MatchRecord::default()))
            .unwrap();
        assert!(sink.out.is_empty());

        sink.finish().unwrap();
        let out = String::from_utf8(sink.out).unwrap();
        assert!(out.contains("Shodan Search Results"));
        assert!(out.contains("10.1.2.3"));
        assert!(out.contains("N/A, N/A"));
    }

    #[test]
    fn test_empty_table_notice() {
        let out = render(Layout::Table, &[]);
        assert_eq!(out, "No results to display.\n");
    }
}
