use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::domain::Organization;

pub const CSV_HEADERS: [&str; 7] = [
    "Name",
    "Website",
    "City",
    "State",
    "Industry",
    "Employees",
    "Revenue",
];

/// Renders organizations as CSV. Every field is quoted and embedded quotes are doubled.
/// Rows are joined with `\n` and the last row has no terminator.
pub fn organizations_to_csv(organizations: &[Organization]) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(&mut buffer);

        writer.write_record(CSV_HEADERS)?;
        for org in organizations {
            writer.write_record(csv_row(org))?;
        }
        writer.flush()?;
    }

    let mut csv = String::from_utf8_lossy(&buffer).into_owned();
    if csv.ends_with('\n') {
        csv.pop();
    }
    Ok(csv)
}

fn csv_row(org: &Organization) -> [String; 7] {
    [
        org.name.clone(),
        org.website_url.clone().unwrap_or_default(),
        org.city.clone().unwrap_or_default(),
        org.state.clone().unwrap_or_default(),
        org.industry.clone().unwrap_or_default(),
        org.estimated_num_employees
            .map(|n| n.to_string())
            .unwrap_or_default(),
        org.annual_revenue.map(|n| n.to_string()).unwrap_or_default(),
    ]
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("organizations_{}.csv", date.format("%Y-%m-%d"))
}
