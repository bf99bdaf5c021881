//! Line commands and their rendering

use std::fmt::Write as _;
use std::sync::Arc;

use serde::Serialize;

use station_desk::application::{
    CreateMalfunctionReportUseCase, CreateReportRequest, DashboardQuery, ReportView,
    ResolveMalfunctionUseCase, ResolveReportRequest, SearchStationsUseCase, StationView,
};
use station_desk::{MalfunctionReportService, MalfunctionType, RepositoryProvider};

pub const HELP: &str = "\
Commands:
  stations                                  list all stations
  search <postal_code>                      stations in a Berlin postal code area
  station <station_id>                      show one station
  report <station_id> <type> <description>  file a malfunction report
  resolve <ticket_id> [operator notes]      close a ticket, restore the station
  reports                                   all reports, oldest first
  tickets                                   open tickets
  overview                                  dashboard figures
  help                                      this text
  quit                                      leave the console

Malfunction types: not_charging, payment_failure, connector_issue,
                   physical_damage, display_malfunction, other";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Stations,
    Search(String),
    Station(String),
    Report {
        station_id: String,
        malfunction_type: MalfunctionType,
        description: String,
    },
    Resolve {
        ticket_id: String,
        notes: Option<String>,
    },
    Reports,
    Tickets,
    Overview,
    Quit,
}

impl Command {
    /// `Ok(None)` for blank lines and `#` comments.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (verb, rest) = split_word(line);
        let command = match verb.to_lowercase().as_str() {
            "help" | "?" => Self::Help,
            "stations" => Self::Stations,
            "search" => Self::Search(required(rest, "search <postal_code>")?.to_string()),
            "station" => Self::Station(required(rest, "station <station_id>")?.to_string()),
            "report" => {
                let usage = "report <station_id> <type> <description>";
                let (station_id, rest) = split_word(required(rest, usage)?);
                let (kind, description) = split_word(required(rest, usage)?);
                let malfunction_type = kind.parse::<MalfunctionType>().map_err(|e| e.to_string())?;
                Self::Report {
                    station_id: station_id.to_string(),
                    malfunction_type,
                    description: required(description, usage)?.to_string(),
                }
            }
            "resolve" => {
                let (ticket_id, notes) = split_word(required(rest, "resolve <ticket_id> [notes]")?);
                Self::Resolve {
                    ticket_id: ticket_id.to_string(),
                    notes: (!notes.is_empty()).then(|| notes.to_string()),
                }
            }
            "reports" => Self::Reports,
            "tickets" => Self::Tickets,
            "overview" | "dashboard" => Self::Overview,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("unknown command `{}` (try `help`)", other)),
        };
        Ok(Some(command))
    }
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}

fn required<'a>(s: &'a str, usage: &str) -> Result<&'a str, String> {
    if s.trim().is_empty() {
        Err(format!("usage: {}", usage))
    } else {
        Ok(s)
    }
}

/// Wires the use cases to one shared store
pub struct Console {
    search: SearchStationsUseCase,
    create: CreateMalfunctionReportUseCase,
    resolve: ResolveMalfunctionUseCase,
    dashboard: DashboardQuery,
    json: bool,
}

impl Console {
    pub fn new(repos: Arc<dyn RepositoryProvider>, json: bool) -> Self {
        let service = Arc::new(MalfunctionReportService::new(repos.clone()));
        Self {
            search: SearchStationsUseCase::new(repos),
            create: CreateMalfunctionReportUseCase::new(service.clone()),
            resolve: ResolveMalfunctionUseCase::new(service.clone()),
            dashboard: DashboardQuery::new(service),
            json,
        }
    }

    pub async fn execute(&self, command: Command) -> String {
        match command {
            Command::Help => HELP.to_string(),
            Command::Quit => String::new(),
            Command::Stations => match self.search.all().await {
                Ok(stations) => self.stations(&stations),
                Err(e) => format!("error: {}", e),
            },
            Command::Search(postal_code) => match self.search.by_postal_code(&postal_code).await {
                Ok(stations) if stations.is_empty() && !self.json => {
                    format!("No stations in {}", postal_code)
                }
                Ok(stations) => self.stations(&stations),
                Err(e) => format!("error: {}", e),
            },
            Command::Station(id) => match self.search.by_id(&id).await {
                Ok(station) => self.stations(std::slice::from_ref(&station)),
                Err(e) => format!("error: {}", e),
            },
            Command::Report {
                station_id,
                malfunction_type,
                description,
            } => {
                let response = self
                    .create
                    .execute(CreateReportRequest::new(station_id, malfunction_type, description))
                    .await;
                if self.json {
                    return to_json(&response);
                }
                match (response.success, response.ticket_id) {
                    (true, Some(ticket)) => format!("Ticket {} opened, station out of service", ticket),
                    _ => format!("Report not accepted: {}", response.errors.join("; ")),
                }
            }
            Command::Resolve { ticket_id, notes } => {
                let mut request = ResolveReportRequest::new(ticket_id);
                request.operator_notes = notes;
                let response = self.resolve.execute(request).await;
                if self.json {
                    to_json(&response)
                } else {
                    response.message
                }
            }
            Command::Reports => match self.dashboard.all_reports().await {
                Ok(reports) => self.reports(&reports),
                Err(e) => format!("error: {}", e),
            },
            Command::Tickets => match self.dashboard.open_tickets().await {
                Ok(reports) => self.reports(&reports),
                Err(e) => format!("error: {}", e),
            },
            Command::Overview => match self.dashboard.overview().await {
                Ok(o) if self.json => to_json(&o),
                Ok(o) => {
                    let mut out = format!(
                        "Reports: {} total, {} open, {} resolved\nDefective stations: {}",
                        o.total_reports, o.open_reports, o.resolved_reports, o.defective_stations
                    );
                    for (kind, count) in &o.by_type {
                        let _ = write!(out, "\n  {:<20} {}", kind, count);
                    }
                    out
                }
                Err(e) => format!("error: {}", e),
            },
        }
    }

    fn stations(&self, stations: &[station_desk::OperationalStation]) -> String {
        let views: Vec<StationView> = stations.iter().map(StationView::from).collect();
        if self.json {
            return to_json(&views);
        }
        let mut out = String::new();
        for v in &views {
            let _ = write!(
                out,
                "{:<14} {:<10} {}  {}",
                v.station_id,
                v.status.as_str().to_uppercase(),
                v.postal_code,
                v.name
            );
            if let Some(address) = &v.address {
                let _ = write!(out, ", {}", address);
            }
            out.push('\n');
        }
        out.trim_end().to_string()
    }

    fn reports(&self, reports: &[ReportView]) -> String {
        if self.json {
            return to_json(&reports);
        }
        if reports.is_empty() {
            return "No reports".to_string();
        }
        let mut out = String::new();
        for r in reports {
            let ticket = r
                .ticket_id
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(
                out,
                "{} {:<10} {:<14} {:<20} ticket {}\n    {}",
                r.created_at.format("%Y-%m-%d %H:%M"),
                r.status.as_str().to_uppercase(),
                r.station_id,
                r.malfunction_type.as_str(),
                ticket,
                r.description
            );
        }
        out.trim_end().to_string()
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use station_desk::config::AppConfig;
    use station_desk::InMemoryRepositoryProvider;

    fn console(json: bool) -> Console {
        let stations = AppConfig::default().seed_stations().unwrap();
        Console::new(Arc::new(InMemoryRepositoryProvider::with_stations(stations)), json)
    }

    #[test]
    fn parses_report_with_free_text() {
        let cmd = Command::parse("report STATION-001 not_charging Car does not start charging")
            .unwrap()
            .unwrap();
        assert_eq!(
            cmd,
            Command::Report {
                station_id: "STATION-001".into(),
                malfunction_type: MalfunctionType::NotCharging,
                description: "Car does not start charging".into(),
            }
        );
    }

    #[test]
    fn parses_resolve_with_and_without_notes() {
        assert_eq!(
            Command::parse("resolve abc").unwrap(),
            Some(Command::Resolve {
                ticket_id: "abc".into(),
                notes: None
            })
        );
        assert_eq!(
            Command::parse("resolve abc  swapped the cable ").unwrap(),
            Some(Command::Resolve {
                ticket_id: "abc".into(),
                notes: Some("swapped the cable".into())
            })
        );
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(Command::parse("# setup").unwrap(), None);
    }

    #[test]
    fn bad_input_is_explained() {
        assert!(Command::parse("search").unwrap_err().starts_with("usage:"));
        assert!(Command::parse("report STATION-001 on_fire smoke everywhere")
            .unwrap_err()
            .contains("Invalid malfunction type"));
        assert!(Command::parse("launch").unwrap_err().contains("unknown command"));
    }

    #[tokio::test]
    async fn report_then_resolve_round() {
        let console = console(false);

        let out = console
            .execute(Command::parse("report STATION-001 connector_issue Connector is stuck").unwrap().unwrap())
            .await;
        assert!(out.starts_with("Ticket "), "{}", out);
        let ticket = out.split_whitespace().nth(1).unwrap().to_string();

        let out = console.execute(Command::Station("STATION-001".into())).await;
        assert!(out.contains("DEFECTIVE"));

        let out = console
            .execute(Command::Resolve {
                ticket_id: ticket,
                notes: Some("Cable replaced".into()),
            })
            .await;
        assert_eq!(out, "Malfunction resolved for station STATION-001");

        let out = console.execute(Command::Overview).await;
        assert!(out.contains("1 resolved"));
    }

    #[tokio::test]
    async fn search_output_in_json() {
        let console = console(true);
        let out = console.execute(Command::Search("10178".into())).await;
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[0]["status"], "available");
    }

    #[tokio::test]
    async fn invalid_postal_code_is_an_error_line() {
        let out = console(false).execute(Command::Search("20095".into())).await;
        assert!(out.starts_with("error:"));
    }
}
